use super::{CodeWriter, Emit, GenContext, emit_comma_list, require_name};
use crate::ast::*;
use crate::error::{GenError, GenResult};

impl Emit for Expr {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        match &self.node {
            ExprKind::StringLiteral(value) => {
                let name = cx.intern(value, self.span)?;
                w.write(&name);
            }

            ExprKind::ValueRef(path) => {
                require_name(path, "value", self.span)?;
                w.write(path);
            }

            ExprKind::Binary { left, op, right } => {
                left.emit(w, cx)?;
                w.write(" ");
                w.write(op.as_str());
                w.write(" ");
                right.emit(w, cx)?;
            }

            ExprKind::Assignment { target, op, value } => {
                target.emit(w, cx)?;
                w.write(" ");
                w.write(op.as_str());
                w.write(" ");
                value.emit(w, cx)?;
            }

            ExprKind::Parenthesized(inner) => {
                w.write("(");
                inner.emit(w, cx)?;
                w.write(")");
            }

            ExprKind::FunctionCall(call) => {
                require_name(&call.name, "function", self.span)?;
                w.write(&call.name);
                w.write("(");
                emit_comma_list(&call.args, w, cx)?;
                w.write(")");
            }

            ExprKind::FilterCall(call) => {
                require_name(&call.name, "filter", self.span)?;
                let package = match cx.options().filter_package() {
                    Some(package) => package.to_string(),
                    None => {
                        let module = &cx.options().filter_module;
                        return Err(GenError::invalid_filter_qualifier(module).with_span(self.span));
                    }
                };
                w.write(&package);
                w.write(".");
                w.write(&call.name);
                w.write("(");
                call.value.emit(w, cx)?;
                for arg in &call.args {
                    w.write(", ");
                    arg.emit(w, cx)?;
                }
                w.write(")");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GenOptions;
    use crate::pool::pool_name;

    fn render(expr: &Expr) -> String {
        let opts = GenOptions::new("views");
        let mut cx = GenContext::new(&opts);
        let mut w = CodeWriter::new();
        expr.emit(&mut w, &mut cx).expect("emit failed");
        w.into_string()
    }

    #[test]
    fn test_string_literal_references_pool() {
        assert_eq!(render(&Expr::string("X")), pool_name("X", None));
    }

    #[test]
    fn test_binary_and_parens() {
        let expr = Expr::binary(
            Expr::paren(Expr::binary(Expr::value_ref("a"), BinOp::Add, Expr::value_ref("1"))),
            BinOp::GtEq,
            Expr::value_ref("b"),
        );
        assert_eq!(render(&expr), "(a + 1) >= b");
    }

    #[test]
    fn test_assignment() {
        let expr = Expr::assign(Expr::value_ref("i"), AssignOp::Define, Expr::value_ref("0"));
        assert_eq!(render(&expr), "i := 0");
    }

    #[test]
    fn test_function_call() {
        let expr = Expr::call(
            "strings.Repeat",
            vec![Expr::value_ref("s"), Expr::value_ref("3")],
        );
        assert_eq!(render(&expr), "strings.Repeat(s, 3)");
        assert_eq!(render(&Expr::call("now", vec![])), "now()");
    }

    #[test]
    fn test_filter_call_uses_module_qualifier() {
        let expr = Expr::filter(
            "Truncate",
            Expr::value_ref("Title"),
            vec![Expr::value_ref("20")],
        );
        assert_eq!(render(&expr), "filter.Truncate(Title, 20)");
    }

    #[test]
    fn test_versioned_filter_module() {
        let opts = GenOptions::new("views").filter_module("gopkg.in/textfx.v1");
        let mut cx = GenContext::new(&opts);
        let mut w = CodeWriter::new();
        let expr = Expr::filter("Upper", Expr::value_ref("Name"), vec![]);
        expr.emit(&mut w, &mut cx).unwrap();
        assert_eq!(w.as_str(), "textfx.Upper(Name)");
    }

    #[test]
    fn test_filter_without_usable_qualifier_fails() {
        let opts = GenOptions::new("views").filter_module("example.com/go-filters");
        let mut cx = GenContext::new(&opts);
        let mut w = CodeWriter::new();
        let expr = Expr::filter("Upper", Expr::value_ref("Name"), vec![]).with_span(Span::new(2, 7));
        let err = expr.emit(&mut w, &mut cx).unwrap_err();
        assert_eq!(err.kind, crate::error::GenErrorKind::InvalidOptions);
        assert_eq!(err.span, Some(Span::new(2, 7)));
        assert!(w.as_str().is_empty());
    }

    #[test]
    fn test_empty_value_ref_is_rejected() {
        let opts = GenOptions::new("views");
        let mut cx = GenContext::new(&opts);
        let mut w = CodeWriter::new();
        let expr = Expr::value_ref("").with_span(Span::new(3, 5));
        let err = expr.emit(&mut w, &mut cx).unwrap_err();
        assert_eq!(err.kind, crate::error::GenErrorKind::MalformedTree);
        assert_eq!(err.span, Some(Span::new(3, 5)));
    }
}
