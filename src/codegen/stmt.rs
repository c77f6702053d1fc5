use super::{CodeWriter, Emit, GenContext, WRAPPED_BODY_FN, require_name};
use crate::ast::*;
use crate::error::{GenError, GenResult};

/// Emit `body` one level deeper than the current line.
pub(crate) fn emit_block(body: &[Stmt], w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
    w.inc_indent();
    for stmt in body {
        stmt.emit(w, cx)?;
    }
    w.dec_indent();
    Ok(())
}

impl Emit for VariableDecl {
    /// Parameter-list form: `name type`.
    fn emit(&self, w: &mut CodeWriter, _cx: &mut GenContext<'_>) -> GenResult<()> {
        w.write(&self.name);
        w.write(" ");
        w.write(&self.ty);
        Ok(())
    }
}

fn write_call(expr: &Expr, stringify: bool, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
    if stringify {
        w.write("io.WriteString(w, fmt.Sprint(");
        expr.emit(w, cx)?;
        w.write("))");
    } else {
        w.write("io.WriteString(w, ");
        expr.emit(w, cx)?;
        w.write(")");
    }
    w.newline();
    Ok(())
}

impl Emit for Stmt {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()> {
        match &self.node {
            StmtKind::VariableDecl(decl) => {
                require_name(&decl.name, "variable", self.span)?;
                require_name(&decl.ty, "variable type", self.span)?;
                w.write("var ");
                decl.emit(w, cx)?;
                w.newline();
            }

            StmtKind::WriteLiteralText(text) => {
                let name = cx.intern(text, self.span)?;
                w.line(&format!("io.WriteString(w, {name})"));
            }

            StmtKind::WriteString(expr) => write_call(expr, false, w, cx)?,

            StmtKind::WriteValue(expr) => write_call(expr, !expr.is_string_literal(), w, cx)?,

            StmtKind::Expr(expr) => {
                expr.emit(w, cx)?;
                w.newline();
            }

            StmtKind::RangeLoop(block) => {
                require_name(&block.element, "loop element", self.span)?;
                let index = match block.index.as_deref() {
                    Some(index) => {
                        require_name(index, "loop index", self.span)?;
                        index
                    }
                    None => "_",
                };
                w.write(&format!("for {index}, {} := range ", block.element));
                block.collection.emit(w, cx)?;
                w.line(" {");
                emit_block(&block.body, w, cx)?;
                w.line("}");
            }

            StmtKind::CounterLoop(block) => {
                w.write("for ");
                match (&block.init, &block.condition, &block.step) {
                    (None, None, None) => {}
                    (None, Some(cond), None) => {
                        cond.emit(w, cx)?;
                        w.write(" ");
                    }
                    (init, cond, step) => {
                        if let Some(init) = init {
                            init.emit(w, cx)?;
                        }
                        w.write("; ");
                        if let Some(cond) = cond {
                            cond.emit(w, cx)?;
                        }
                        w.write(";");
                        if let Some(step) = step {
                            w.write(" ");
                            step.emit(w, cx)?;
                        }
                        w.write(" ");
                    }
                }
                w.line("{");
                emit_block(&block.body, w, cx)?;
                w.line("}");
            }

            StmtKind::Conditional(block) => {
                w.write("if ");
                block.condition.emit(w, cx)?;
                w.line(" {");
                emit_block(&block.if_body, w, cx)?;
                if let Some(else_body) = &block.else_body {
                    w.line("} else {");
                    emit_block(else_body, w, cx)?;
                }
                w.line("}");
            }

            StmtKind::InvokeTemplate(call) => {
                require_name(&call.name, "template", self.span)?;
                if let Some(package) = &call.package {
                    require_name(package, "package qualifier", self.span)?;
                    w.write(package);
                    w.write(".");
                }
                let prefix = cx.options().template_prefix.clone();
                w.write(&format!("{prefix}{}(ctx, w", call.name));
                for arg in &call.args {
                    w.write(", ");
                    arg.emit(w, cx)?;
                }
                w.line(")");
            }

            StmtKind::EmitWrappedBody => {
                if !cx.in_wrapper {
                    return Err(GenError::misplaced_wrapped_body().with_span(self.span));
                }
                cx.wrapped_body_count += 1;
                w.line(&format!("{WRAPPED_BODY_FN}()"));
            }
        }
        Ok(())
    }
}
