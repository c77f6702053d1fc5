const INDENT_WITH: &str = "\t";

/// Append-only text sink that tracks the current block depth.
///
/// Indentation is inserted lazily at the first write of each line, so
/// callers write fragments and end lines without thinking about it.
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    indent: usize,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.out.push_str(INDENT_WITH);
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    /// Append another writer's finished output verbatim.
    pub fn append(&mut self, other: CodeWriter) {
        if other.out.is_empty() {
            return;
        }
        self.out.push_str(&other.out);
        self.at_line_start = self.out.ends_with('\n');
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_applies_at_line_start_only() {
        let mut w = CodeWriter::new();
        w.line("if x {");
        w.inc_indent();
        w.write("a");
        w.write("b");
        w.newline();
        w.dec_indent();
        w.line("}");
        assert_eq!(w.as_str(), "if x {\n\tab\n}\n");
    }

    #[test]
    fn test_append_keeps_inner_indentation() {
        let mut inner = CodeWriter::new();
        inner.inc_indent();
        inner.line("x");
        let mut outer = CodeWriter::new();
        outer.line("{");
        outer.append(inner);
        outer.line("}");
        assert_eq!(outer.as_str(), "{\n\tx\n}\n");
    }

    #[test]
    fn test_dec_indent_saturates() {
        let mut w = CodeWriter::new();
        w.dec_indent();
        w.line("x");
        assert_eq!(w.into_string(), "x\n");
    }
}
