//! Template and wrapper definitions.
//!
//! A template that uses a wrapper renders its body inside a closure passed
//! to the wrapper routine. The wrapper's body calls that closure wherever it
//! holds the [`EmitWrappedBody`](StmtKind::EmitWrappedBody) placeholder, so
//! a layout never needs to know which template it is wrapping.

use tracing::{trace, warn};

use super::{CodeWriter, Emit, GenContext, RESERVED_PARAMS, emit_block, require_name};
use crate::ast::*;
use crate::error::{GenError, GenResult};

/// Name of the body callback parameter in every generated wrapper.
pub const WRAPPED_BODY_FN: &str = "renderBody";

impl Emit for Item {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        trace!(name = self.name(), span = %self.span, "emitting definition");
        match &self.node {
            ItemKind::Template(def) => emit_template(def, self.span, w, cx),
            ItemKind::Wrapper(def) => emit_wrapper(def, self.span, w, cx),
        }
    }
}

impl Emit for TemplateDef {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        emit_template(self, Span::default(), w, cx)
    }
}

impl Emit for WrapperDef {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        emit_wrapper(self, Span::default(), w, cx)
    }
}

impl Emit for UseWrapper {
    /// The opening of the wrapper call, up to and including the callback's
    /// `func() {`. The closing half is written by the template after its body.
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        if let Some(package) = &self.package {
            w.write(package);
            w.write(".");
        }
        let prefix = cx.options().wrapper_prefix.clone();
        w.line(&format!("{prefix}{}(ctx, w, func() {{", self.name));
        Ok(())
    }
}

/// Write the `(ctx context.Context, w io.Writer[, extra], params...)` list.
fn emit_signature(
    params: &[VariableDecl],
    extra: Option<&str>,
    span: Span,
    w: &mut CodeWriter,
    cx: &mut GenContext<'_>,
) -> GenResult<()> {
    w.write("(ctx context.Context, w io.Writer");
    if let Some(extra) = extra {
        w.write(", ");
        w.write(extra);
    }
    for param in params {
        require_name(&param.name, "parameter", span)?;
        require_name(&param.ty, "parameter type", span)?;
        let reserved = RESERVED_PARAMS.contains(&param.name.as_str())
            || (extra.is_some() && param.name == WRAPPED_BODY_FN);
        if reserved {
            return Err(GenError::reserved_param(&param.name).with_span(span));
        }
        w.write(", ");
        param.emit(w, cx)?;
    }
    w.line(") {");
    Ok(())
}

/// Check an unqualified wrapper use against the unit's wrappers and the
/// externally declared ones.
fn resolve_wrapper(usage: &UseWrapper, span: Span, cx: &GenContext<'_>) -> GenResult<()> {
    require_name(&usage.name, "wrapper", span)?;
    if let Some(package) = &usage.package {
        return require_name(package, "package qualifier", span);
    }
    match cx.wrappers.get(&usage.name) {
        Some(&arity) if arity != usage.args.len() => {
            Err(GenError::wrapper_arity(&usage.name, arity, usage.args.len()).with_span(span))
        }
        Some(_) => Ok(()),
        None if cx.options().external_wrappers.contains(&usage.name) => Ok(()),
        None => Err(GenError::unknown_wrapper(&usage.name).with_span(span)),
    }
}

fn emit_template(
    def: &TemplateDef,
    span: Span,
    w: &mut CodeWriter,
    cx: &mut GenContext<'_>,
) -> GenResult<()> {
    require_name(&def.name, "template", span)?;
    if let Some(usage) = &def.wrapper {
        resolve_wrapper(usage, span, cx)?;
    }

    let prefix = cx.options().template_prefix.clone();
    w.write(&format!("func {prefix}{}", def.name));
    emit_signature(&def.params, None, span, w, cx)?;
    w.inc_indent();

    match &def.wrapper {
        Some(usage) => {
            usage.emit(w, cx)?;
            emit_block(&def.body, w, cx)?;
            w.write("}");
            for arg in &usage.args {
                w.write(", ");
                arg.emit(w, cx)?;
            }
            w.line(")");
        }
        None => {
            for stmt in &def.body {
                stmt.emit(w, cx)?;
            }
        }
    }

    w.dec_indent();
    w.line("}");
    Ok(())
}

fn emit_wrapper(
    def: &WrapperDef,
    span: Span,
    w: &mut CodeWriter,
    cx: &mut GenContext<'_>,
) -> GenResult<()> {
    require_name(&def.name, "wrapper", span)?;

    let prefix = cx.options().wrapper_prefix.clone();
    w.write(&format!("func {prefix}{}", def.name));
    let callback = format!("{WRAPPED_BODY_FN} func()");
    emit_signature(&def.params, Some(callback.as_str()), span, w, cx)?;

    cx.in_wrapper = true;
    cx.wrapped_body_count = 0;
    let body = emit_block(&def.body, w, cx);
    cx.in_wrapper = false;
    body?;

    if cx.wrapped_body_count != 1 {
        warn!(
            wrapper = %def.name,
            placeholders = cx.wrapped_body_count,
            "wrapper body should render the wrapped content exactly once"
        );
    }

    w.line("}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GenOptions;
    use crate::error::GenErrorKind;
    use crate::pool::pool_name;

    fn render_file(file: &File, opts: &GenOptions) -> GenResult<String> {
        let mut cx = GenContext::for_file(file, opts)?;
        let mut w = CodeWriter::new();
        for item in &file.items {
            item.emit(&mut w, &mut cx)?;
        }
        Ok(w.into_string())
    }

    fn layout() -> Item {
        Item::wrapper(WrapperDef::new(
            "Layout",
            vec![VariableDecl::new("Title", "string")],
            vec![
                Stmt::write_string(Expr::value_ref("Title")),
                Stmt::wrapped_body(),
            ],
        ))
    }

    #[test]
    fn test_plain_template_signature() {
        let file = File::new(vec![Item::template(TemplateDef::new(
            "Report",
            vec![VariableDecl::new("Name", "string"), VariableDecl::new("Age", "int")],
            vec![],
        ))]);
        let out = render_file(&file, &GenOptions::new("views")).unwrap();
        assert_eq!(
            out,
            "func ProcessReport(ctx context.Context, w io.Writer, Name string, Age int) {\n}\n"
        );
    }

    #[test]
    fn test_wrapper_signature_and_placeholder() {
        let file = File::new(vec![layout()]);
        let out = render_file(&file, &GenOptions::new("views")).unwrap();
        assert_eq!(
            out,
            "func WrapperLayout(ctx context.Context, w io.Writer, renderBody func(), Title string) {\n\
             \tio.WriteString(w, Title)\n\
             \trenderBody()\n\
             }\n"
        );
    }

    #[test]
    fn test_template_body_nests_inside_wrapper_call() {
        let page = TemplateDef::new(
            "Page",
            vec![VariableDecl::new("Heading", "string")],
            vec![Stmt::text("<p>")],
        )
        .wrapped_by(UseWrapper::new("Layout", vec![Expr::value_ref("Heading")]));
        let file = File::new(vec![layout(), Item::template(page)]);
        let out = render_file(&file, &GenOptions::new("views")).unwrap();
        let p = pool_name("<p>", None);
        assert!(out.contains(&format!(
            "func ProcessPage(ctx context.Context, w io.Writer, Heading string) {{\n\
             \tWrapperLayout(ctx, w, func() {{\n\
             \t\tio.WriteString(w, {p})\n\
             \t}}, Heading)\n\
             }}\n"
        )));
        assert_eq!(out.matches("WrapperLayout(ctx, w, func() {").count(), 1);
    }

    #[test]
    fn test_qualified_wrapper_is_not_resolved_locally() {
        let page = TemplateDef::new("Page", vec![], vec![])
            .wrapped_by(UseWrapper::new("Base", vec![]).in_package("layouts"));
        let file = File::new(vec![Item::template(page)]);
        let out = render_file(&file, &GenOptions::new("views")).unwrap();
        assert!(out.contains("\tlayouts.WrapperBase(ctx, w, func() {\n\t})\n"));
    }

    #[test]
    fn test_empty_wrapper_package_qualifier_fails() {
        let page = TemplateDef::new("Page", vec![], vec![])
            .wrapped_by(UseWrapper::new("Base", vec![]).in_package(""));
        let file = File::new(vec![Item::template(page).with_span(Span::new(0, 30))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MalformedTree);
        assert_eq!(err.span, Some(Span::new(0, 30)));
    }

    #[test]
    fn test_parameter_without_type_fails() {
        let file = File::new(vec![Item::template(TemplateDef::new(
            "T",
            vec![VariableDecl::new("Name", "")],
            vec![],
        ))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MalformedTree);
        assert_eq!(err.to_string(), "parameter type name is empty (at 0..0)");

        let file = File::new(vec![Item::wrapper(WrapperDef::new(
            "L",
            vec![VariableDecl::new("Title", " ")],
            vec![Stmt::wrapped_body()],
        ))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MalformedTree);
    }

    #[test]
    fn test_external_wrapper_is_accepted() {
        let page = TemplateDef::new("Page", vec![], vec![])
            .wrapped_by(UseWrapper::new("Shared", vec![Expr::value_ref("1")]));
        let file = File::new(vec![Item::template(page)]);
        let opts = GenOptions::new("views").external_wrapper("Shared");
        let out = render_file(&file, &opts).unwrap();
        assert!(out.contains("\t}, 1)\n"));
    }

    #[test]
    fn test_unknown_wrapper_fails() {
        let page = TemplateDef::new("Page", vec![], vec![])
            .wrapped_by(UseWrapper::new("Missing", vec![]));
        let file = File::new(vec![Item::template(page).with_span(Span::new(10, 40))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::UnknownWrapper);
        assert_eq!(err.span, Some(Span::new(10, 40)));
    }

    #[test]
    fn test_wrapper_arity_mismatch_fails() {
        let page = TemplateDef::new("Page", vec![], vec![])
            .wrapped_by(UseWrapper::new("Layout", vec![]));
        let file = File::new(vec![layout(), Item::template(page)]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::WrapperArity);
    }

    #[test]
    fn test_reserved_parameter_names_fail() {
        let file = File::new(vec![Item::template(TemplateDef::new(
            "T",
            vec![VariableDecl::new("w", "int")],
            vec![],
        ))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MalformedTree);

        let file = File::new(vec![Item::wrapper(WrapperDef::new(
            "L",
            vec![VariableDecl::new(WRAPPED_BODY_FN, "int")],
            vec![Stmt::wrapped_body()],
        ))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MalformedTree);
    }

    #[test]
    fn test_wrapped_body_in_template_fails() {
        let file = File::new(vec![Item::template(TemplateDef::new(
            "T",
            vec![],
            vec![Stmt::wrapped_body()],
        ))]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::MisplacedWrappedBody);
    }

    #[test]
    fn test_wrapper_without_placeholder_still_emits() {
        let file = File::new(vec![Item::wrapper(WrapperDef::new("Bare", vec![], vec![]))]);
        let out = render_file(&file, &GenOptions::new("views")).unwrap();
        assert!(out.starts_with("func WrapperBare("));
    }

    #[test]
    fn test_duplicate_definitions_fail() {
        let file = File::new(vec![
            Item::template(TemplateDef::new("A", vec![], vec![])),
            Item::template(TemplateDef::new("A", vec![], vec![])),
        ]);
        let err = render_file(&file, &GenOptions::new("views")).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::DuplicateDefinition);

        // A template and a wrapper may share a name; their routines differ.
        let file = File::new(vec![
            Item::template(TemplateDef::new("A", vec![], vec![])),
            Item::wrapper(WrapperDef::new("A", vec![], vec![Stmt::wrapped_body()])),
        ]);
        assert!(render_file(&file, &GenOptions::new("views")).is_ok());
    }

    #[test]
    fn test_custom_prefixes() {
        let opts = GenOptions::new("views")
            .template_prefix("Render")
            .wrapper_prefix("Layout");
        let page = TemplateDef::new("Home", vec![], vec![Stmt::invoke(None, "Nav", vec![])])
            .wrapped_by(UseWrapper::new("Main", vec![]));
        let file = File::new(vec![
            Item::wrapper(WrapperDef::new("Main", vec![], vec![Stmt::wrapped_body()])),
            Item::template(page),
        ]);
        let out = render_file(&file, &opts).unwrap();
        assert!(out.contains("func LayoutMain("));
        assert!(out.contains("func RenderHome("));
        assert!(out.contains("\tLayoutMain(ctx, w, func() {\n\t\tRenderNav(ctx, w)\n\t})\n"));
    }
}
