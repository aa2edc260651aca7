//! Line builder for Go sources.

/// gofmt indents with tabs only.
const INDENT: &str = "\t";

/// Accumulates Go source one line at a time, tracking block depth.
///
/// ```
/// use tiergen_codegen::builder::CodeBuilder;
///
/// let mut b = CodeBuilder::go();
/// b.push_line("type Order struct {")
///     .push_indent()
///     .push_line("ID string")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(b.build(), "type Order struct {\n\tID string\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn go() -> Self {
        Self::default()
    }

    /// Append `s` at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Blank lines carry no indentation, as gofmt leaves them.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Append a `//` comment, one line per line of `text`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indent();
            if line.is_empty() {
                self.buffer.push_str("//");
            } else {
                self.buffer.push_str("// ");
                self.buffer.push_str(line);
            }
            self.buffer.push('\n');
        }
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks_use_tabs() {
        let mut b = CodeBuilder::go();
        b.push_line("func f() {")
            .push_indent()
            .push_line("if ok {")
            .push_indent()
            .push_line("return")
            .push_dedent()
            .push_line("}")
            .push_dedent()
            .push_line("}");
        assert_eq!(b.build(), "func f() {\n\tif ok {\n\t\treturn\n\t}\n}\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut b = CodeBuilder::go();
        b.push_indent().push_line("a").push_blank().push_line("b");
        assert_eq!(b.build(), "\ta\n\n\tb\n");
    }

    #[test]
    fn test_comment_multiline() {
        let mut b = CodeBuilder::go();
        b.push_indent().push_comment("first\n\nsecond");
        assert_eq!(b.build(), "\t// first\n\t//\n\t// second\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut b = CodeBuilder::go();
        b.push_dedent().push_line("x");
        assert_eq!(b.build(), "x\n");
    }
}
