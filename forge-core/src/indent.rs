//! Re-indentation of foreign text blocks.

/// Indent every line of `text` by `columns` spaces.
///
/// Trailing whitespace is trimmed from each resulting line, so blank lines
/// stay empty, and the result always ends with a single line break. A final
/// line break in the input does not produce an extra empty line.
///
/// Indentation compounds: indenting an already indented block shifts it
/// again, so call this once per insertion point.
///
/// ```
/// use botforge_core::indent;
///
/// assert_eq!(indent("if ok:\n    run()", 4), "    if ok:\n        run()\n");
/// ```
pub fn indent(text: &str, columns: usize) -> String {
    let pad = " ".repeat(columns);
    let mut out = String::with_capacity(text.len() + columns * 4);

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let padded = format!("{pad}{line}");
        out.push_str(padded.trim_end());
        if lines.peek().is_some() {
            out.push('\n');
        }
    }

    out.push('\n');
    out
}
