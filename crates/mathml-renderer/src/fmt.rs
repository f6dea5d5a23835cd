const INDENT: &str = "    ";

/// Start a new line and indent it, unless we are not pretty-printing (`indent_num == 0`).
pub(crate) fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}
