use super::span::Spanned;

pub type Expr = Spanned<ExprKind>;

/// Expressions are emitted inline, in the position their parent puts them.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A string constant. Emitted as a reference to the unit's literal pool,
    /// never inline.
    StringLiteral(String),

    /// A host-language value path written verbatim: `Name`, `user.Age`,
    /// `0`, `true`.
    ValueRef(String),

    /// `left <op> right`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },

    /// `target <op> value`. Appears as a statement or in the init/step
    /// slots of a counter loop.
    Assignment {
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },

    /// `(expr)`
    Parenthesized(Box<Expr>),

    /// A plain call: `name(args...)`. `name` may be a qualified path.
    FunctionCall(FunctionCall),

    /// `filter.Name(value, args...)` against the configured filter module.
    FilterCall(FilterCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCall {
    pub name: String,
    pub value: Box<Expr>,
    /// Extra positional arguments passed after the filtered value.
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Logical
    And,
    Or,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::LtEq => "<=",
            BinOp::GtEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}

// ── Constructors ────────────────────────────────────────────────────────

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Self::bare(ExprKind::StringLiteral(value.into()))
    }

    pub fn value_ref(path: impl Into<String>) -> Self {
        Self::bare(ExprKind::ValueRef(path.into()))
    }

    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Self::bare(ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn assign(target: Expr, op: AssignOp, value: Expr) -> Self {
        Self::bare(ExprKind::Assignment {
            target: Box::new(target),
            op,
            value: Box::new(value),
        })
    }

    pub fn paren(inner: Expr) -> Self {
        Self::bare(ExprKind::Parenthesized(Box::new(inner)))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::bare(ExprKind::FunctionCall(FunctionCall {
            name: name.into(),
            args,
        }))
    }

    pub fn filter(name: impl Into<String>, value: Expr, args: Vec<Expr>) -> Self {
        Self::bare(ExprKind::FilterCall(FilterCall {
            name: name.into(),
            value: Box::new(value),
            args,
        }))
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self.node, ExprKind::StringLiteral(_))
    }
}
