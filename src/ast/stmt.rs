use super::expr::Expr;
use super::span::Spanned;

pub type Stmt = Spanned<StmtKind>;

/// A statement inside a template or wrapper body. Each statement renders
/// as one or more complete lines of the generated function.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `var name type`
    VariableDecl(VariableDecl),

    /// Raw template text between constructs. Always pooled.
    WriteLiteralText(String),

    /// An expression already of string type, written without conversion.
    WriteString(Expr),

    /// A computed expression, stringified before writing unless it is a
    /// string literal.
    WriteValue(Expr),

    /// An expression evaluated for its effect: an assignment or a call.
    Expr(Expr),

    /// `for index, elem := range collection { ... }`
    RangeLoop(RangeLoop),

    /// `for init; cond; step { ... }`
    CounterLoop(CounterLoop),

    /// `if cond { ... } else { ... }`
    Conditional(Conditional),

    /// Call another compiled template's routine.
    InvokeTemplate(InvokeTemplate),

    /// Inside a wrapper body: render the wrapped template's content here.
    EmitWrappedBody,
}

/// A name+type pair. Used for template and wrapper parameters and for
/// local declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub ty: String,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Iterates a collection-valued expression. The element binding (and the
/// index binding, if declared) are scoped to the body.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeLoop {
    pub index: Option<String>,
    pub element: String,
    pub collection: Expr,
    pub body: Vec<Stmt>,
}

/// A classic counted loop. Each of the three header parts is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterLoop {
    pub init: Option<Expr>,
    pub condition: Option<Expr>,
    pub step: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expr,
    pub if_body: Vec<Stmt>,
    /// `None` emits no else clause at all. `Some(vec![])` emits an empty one.
    pub else_body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeTemplate {
    /// Package qualifier for templates compiled into another unit.
    pub package: Option<String>,
    pub name: String,
    pub args: Vec<Expr>,
}

// ── Constructors ────────────────────────────────────────────────────────

impl Stmt {
    pub fn var(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::bare(StmtKind::VariableDecl(VariableDecl::new(name, ty)))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::bare(StmtKind::WriteLiteralText(text.into()))
    }

    pub fn write_string(expr: Expr) -> Self {
        Self::bare(StmtKind::WriteString(expr))
    }

    pub fn write_value(expr: Expr) -> Self {
        Self::bare(StmtKind::WriteValue(expr))
    }

    pub fn expr(expr: Expr) -> Self {
        Self::bare(StmtKind::Expr(expr))
    }

    pub fn range(
        index: Option<&str>,
        element: impl Into<String>,
        collection: Expr,
        body: Vec<Stmt>,
    ) -> Self {
        Self::bare(StmtKind::RangeLoop(RangeLoop {
            index: index.map(str::to_string),
            element: element.into(),
            collection,
            body,
        }))
    }

    pub fn counter(
        init: Option<Expr>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Vec<Stmt>,
    ) -> Self {
        Self::bare(StmtKind::CounterLoop(CounterLoop {
            init,
            condition,
            step,
            body,
        }))
    }

    pub fn if_else(condition: Expr, if_body: Vec<Stmt>, else_body: Option<Vec<Stmt>>) -> Self {
        Self::bare(StmtKind::Conditional(Conditional {
            condition,
            if_body,
            else_body,
        }))
    }

    pub fn invoke(package: Option<&str>, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::bare(StmtKind::InvokeTemplate(InvokeTemplate {
            package: package.map(str::to_string),
            name: name.into(),
            args,
        }))
    }

    pub fn wrapped_body() -> Self {
        Self::bare(StmtKind::EmitWrappedBody)
    }
}
