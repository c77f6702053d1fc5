use super::expr::Expr;
use super::span::Spanned;
use super::stmt::{Stmt, VariableDecl};

/// One compilation unit: an optional header of explicit imports followed
/// by top-level definitions in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    pub header: Option<Header>,
    pub items: Vec<Item>,
}

impl File {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            header: None,
            items,
        }
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }
}

/// Imports the template author declared explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub imports: Vec<Import>,
}

impl Header {
    pub fn new(imports: Vec<Import>) -> Self {
        Self { imports }
    }
}

/// A module path. Parsers may hand it over still quoted (`"fmt"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The path with any surrounding quotes removed.
    pub fn module(&self) -> &str {
        self.path.trim().trim_matches('"')
    }
}

pub type Item = Spanned<ItemKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Template(TemplateDef),
    Wrapper(WrapperDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDef {
    pub name: String,
    pub params: Vec<VariableDecl>,
    pub wrapper: Option<UseWrapper>,
    pub body: Vec<Stmt>,
}

impl TemplateDef {
    pub fn new(name: impl Into<String>, params: Vec<VariableDecl>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            wrapper: None,
            body,
        }
    }

    pub fn wrapped_by(mut self, wrapper: UseWrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }
}

/// The `use wrapper` clause of a template: which wrapper to render inside
/// and the arguments forwarded to the wrapper's own parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct UseWrapper {
    pub package: Option<String>,
    pub name: String,
    pub args: Vec<Expr>,
}

impl UseWrapper {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            package: None,
            name: name.into(),
            args,
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// A layout routine. Its body holds exactly one
/// [`EmitWrappedBody`](super::stmt::StmtKind::EmitWrappedBody) marking
/// where the wrapped template renders.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperDef {
    pub name: String,
    pub params: Vec<VariableDecl>,
    pub body: Vec<Stmt>,
}

impl WrapperDef {
    pub fn new(name: impl Into<String>, params: Vec<VariableDecl>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }
}

impl Item {
    pub fn template(def: TemplateDef) -> Self {
        Self::bare(ItemKind::Template(def))
    }

    pub fn wrapper(def: WrapperDef) -> Self {
        Self::bare(ItemKind::Wrapper(def))
    }

    pub fn name(&self) -> &str {
        match &self.node {
            ItemKind::Template(def) => &def.name,
            ItemKind::Wrapper(def) => &def.name,
        }
    }
}
