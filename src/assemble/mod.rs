//! File assembly.
//!
//! A unit is rendered body-first: the definitions are emitted into a
//! buffer, which fills the literal pool as a side effect, and only then are
//! the package line, import block and constant block written in front of
//! it. Nothing reaches the caller's sink until the whole unit has rendered.

use std::io::Write;

use tracing::debug;

use crate::ast::*;
use crate::codegen::{CodeWriter, Emit, GenContext, GenOptions, require_name};
use crate::error::{GenError, GenResult};
use crate::imports::RequiredImports;
use crate::pool::escape_go_string;

/// First line of every generated file when the notice is enabled. Go
/// tooling recognizes this form and skips linting the file.
pub const GENERATED_NOTICE: &str = "// Code generated by tplgen. DO NOT EDIT.";

/// Compile one unit to source text.
///
/// ```rust
/// use tplgen::{compile, Expr, File, GenOptions, Item, Stmt, TemplateDef, VariableDecl};
///
/// let file = File::new(vec![Item::template(TemplateDef::new(
///     "Report",
///     vec![VariableDecl::new("Name", "string")],
///     vec![Stmt::text("Hello, "), Stmt::write_value(Expr::value_ref("Name"))],
/// ))]);
/// let source = compile(&file, &GenOptions::new("views")).unwrap();
/// assert!(source.contains("package views\n"));
/// assert!(source.contains("func ProcessReport(ctx context.Context, w io.Writer, Name string) {\n"));
/// ```
pub fn compile(file: &File, opts: &GenOptions) -> GenResult<String> {
    debug!(
        package = %opts.package_name,
        unit = opts.unit_id.as_deref().unwrap_or(""),
        items = file.items.len(),
        "compiling unit"
    );

    let mut cx = GenContext::for_file(file, opts)?;
    let mut w = CodeWriter::new();
    file.emit(&mut w, &mut cx)?;

    debug!(
        imports = cx.imports.len(),
        literals = cx.pool().len(),
        bytes = w.as_str().len(),
        "unit compiled"
    );
    Ok(w.into_string())
}

/// Compile one unit and write it to `sink`.
///
/// The unit is rendered in full before the first byte is written, so a
/// malformed tree never leaves partial output behind. A failing sink may
/// still have received part of the text; callers should discard it.
pub fn compile_to<W: Write + ?Sized>(file: &File, opts: &GenOptions, sink: &mut W) -> GenResult<()> {
    let source = compile(file, opts)?;
    sink.write_all(source.as_bytes()).map_err(GenError::io)?;
    sink.flush().map_err(GenError::io)
}

impl Emit for File {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        let opts = cx.opts;
        require_name(&opts.package_name, "package", Span::default())?;

        let mut body = CodeWriter::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                body.newline();
            }
            item.emit(&mut body, cx)?;
        }

        cx.imports = self.required_imports(opts);
        cx.imports.extend(opts.extra_imports.iter().cloned());

        if opts.generated_notice {
            w.line(GENERATED_NOTICE);
            w.newline();
        }
        w.line(&format!("package {}", opts.package_name));

        match &self.header {
            Some(header) => header.emit(w, cx)?,
            None => Header::default().emit(w, cx)?,
        }
        emit_constants(w, cx);

        if !body.as_str().is_empty() {
            w.newline();
            w.append(body);
        }
        Ok(())
    }
}

impl Emit for Header {
    /// The import block: the unit's collected imports together with the
    /// ones declared here. Omitted entirely when there are none.
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        let mut modules = cx.imports.clone();
        self.collect_imports(cx.opts, &mut modules);
        if modules.is_empty() {
            return Ok(());
        }

        w.newline();
        w.line("import (");
        w.inc_indent();
        for module in modules {
            Import::new(module).emit(w, cx)?;
        }
        w.dec_indent();
        w.line(")");
        Ok(())
    }
}

impl Emit for Import {
    fn emit(&self, w: &mut CodeWriter, _cx: &mut GenContext<'_>) -> GenResult<()> {
        w.line(&escape_go_string(self.module()));
        Ok(())
    }
}

fn emit_constants(w: &mut CodeWriter, cx: &GenContext<'_>) {
    let pool = cx.pool();
    if pool.is_empty() {
        return;
    }

    w.newline();
    w.line("const (");
    w.inc_indent();
    for (name, literal) in pool.iter() {
        w.line(&format!("{name} = {}", escape_go_string(literal)));
    }
    w.dec_indent();
    w.line(")");
}
