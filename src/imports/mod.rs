//! Dependency collection.
//!
//! Every node reports the modules its own emitted code refers to, unioned
//! with its children's. The set is a pure function of the subtree and the
//! options, so the order nodes are visited in never changes the result.

use std::collections::BTreeSet;

use crate::ast::*;
use crate::codegen::GenOptions;

pub const CONTEXT_MODULE: &str = "context";
pub const IO_MODULE: &str = "io";
pub const FMT_MODULE: &str = "fmt";

/// Module paths, unique and in lexicographic order.
pub type ImportSet = BTreeSet<String>;

/// Modules required to compile a node's emitted code.
pub trait RequiredImports {
    /// Add this node's requirements, and its children's, to `out`.
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet);

    fn required_imports(&self, opts: &GenOptions) -> ImportSet {
        let mut out = ImportSet::new();
        self.collect_imports(opts, &mut out);
        out
    }
}

/// The import block of a unit: everything the tree needs plus the
/// caller's extra imports, sorted and deduplicated.
///
/// ```rust
/// use tplgen::{required_imports, File, GenOptions, Item, Stmt, TemplateDef};
///
/// let file = File::new(vec![Item::template(TemplateDef::new(
///     "Hello",
///     vec![],
///     vec![Stmt::text("hi")],
/// ))]);
/// let opts = GenOptions::new("views").extra_import("strings");
/// assert_eq!(required_imports(&file, &opts), ["context", "io", "strings"]);
/// ```
pub fn required_imports(file: &File, opts: &GenOptions) -> Vec<String> {
    let mut set = file.required_imports(opts);
    set.extend(opts.extra_imports.iter().cloned());
    set.into_iter().collect()
}

fn collect_all<'a, T: RequiredImports + 'a>(
    nodes: impl IntoIterator<Item = &'a T>,
    opts: &GenOptions,
    out: &mut ImportSet,
) {
    for node in nodes {
        node.collect_imports(opts, out);
    }
}

fn add_routine_base(out: &mut ImportSet) {
    out.insert(CONTEXT_MODULE.to_string());
    out.insert(IO_MODULE.to_string());
}

// ── Items ───────────────────────────────────────────────────────────────

impl RequiredImports for File {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        if let Some(header) = &self.header {
            header.collect_imports(opts, out);
        }
        collect_all(&self.items, opts, out);
    }
}

impl RequiredImports for Header {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        collect_all(&self.imports, opts, out);
    }
}

impl RequiredImports for Import {
    fn collect_imports(&self, _opts: &GenOptions, out: &mut ImportSet) {
        let module = self.module();
        if !module.is_empty() {
            out.insert(module.to_string());
        }
    }
}

impl RequiredImports for Item {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        match &self.node {
            ItemKind::Template(def) => def.collect_imports(opts, out),
            ItemKind::Wrapper(def) => def.collect_imports(opts, out),
        }
    }
}

impl RequiredImports for TemplateDef {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        add_routine_base(out);
        collect_all(&self.params, opts, out);
        if let Some(wrapper) = &self.wrapper {
            wrapper.collect_imports(opts, out);
        }
        collect_all(&self.body, opts, out);
    }
}

impl RequiredImports for UseWrapper {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        collect_all(&self.args, opts, out);
    }
}

impl RequiredImports for WrapperDef {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        add_routine_base(out);
        collect_all(&self.params, opts, out);
        collect_all(&self.body, opts, out);
    }
}

impl RequiredImports for VariableDecl {
    // Type names are written verbatim; qualified types rely on header imports.
    fn collect_imports(&self, _opts: &GenOptions, _out: &mut ImportSet) {}
}

// ── Statements ──────────────────────────────────────────────────────────

impl RequiredImports for Stmt {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        match &self.node {
            StmtKind::VariableDecl(decl) => decl.collect_imports(opts, out),
            StmtKind::WriteLiteralText(_) => {
                out.insert(IO_MODULE.to_string());
            }
            StmtKind::WriteString(expr) => {
                out.insert(IO_MODULE.to_string());
                expr.collect_imports(opts, out);
            }
            StmtKind::WriteValue(expr) => {
                out.insert(IO_MODULE.to_string());
                if !expr.is_string_literal() {
                    out.insert(FMT_MODULE.to_string());
                }
                expr.collect_imports(opts, out);
            }
            StmtKind::Expr(expr) => expr.collect_imports(opts, out),
            StmtKind::RangeLoop(block) => {
                block.collection.collect_imports(opts, out);
                collect_all(&block.body, opts, out);
            }
            StmtKind::CounterLoop(block) => {
                collect_all(
                    [&block.init, &block.condition, &block.step].into_iter().flatten(),
                    opts,
                    out,
                );
                collect_all(&block.body, opts, out);
            }
            StmtKind::Conditional(block) => {
                block.condition.collect_imports(opts, out);
                collect_all(&block.if_body, opts, out);
                if let Some(else_body) = &block.else_body {
                    collect_all(else_body, opts, out);
                }
            }
            StmtKind::InvokeTemplate(call) => collect_all(&call.args, opts, out),
            StmtKind::EmitWrappedBody => {}
        }
    }
}

// ── Expressions ─────────────────────────────────────────────────────────

impl RequiredImports for Expr {
    fn collect_imports(&self, opts: &GenOptions, out: &mut ImportSet) {
        match &self.node {
            ExprKind::StringLiteral(_) | ExprKind::ValueRef(_) => {}
            ExprKind::Binary { left, right, .. } => {
                left.collect_imports(opts, out);
                right.collect_imports(opts, out);
            }
            ExprKind::Assignment { target, value, .. } => {
                target.collect_imports(opts, out);
                value.collect_imports(opts, out);
            }
            ExprKind::Parenthesized(inner) => inner.collect_imports(opts, out),
            ExprKind::FunctionCall(call) => collect_all(&call.args, opts, out),
            ExprKind::FilterCall(call) => {
                out.insert(opts.filter_module.clone());
                call.value.collect_imports(opts, out);
                collect_all(&call.args, opts, out);
            }
        }
    }
}
