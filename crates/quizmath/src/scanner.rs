use memchr::memchr;

/// Walk `text` and replace every `$...$` span by whatever `render` writes for its content.
///
/// `$$` stands for a literal `$`. A final span without a closing `$` is copied as is.
pub(crate) fn scan_dollars(text: &str, mut render: impl FnMut(&mut String, &str)) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = memchr(b'$', rest.as_bytes()) {
        // `$` is ASCII, so all the indices below are char boundaries.
        let (before, after) = rest.split_at(open);
        output.push_str(before);
        let after = after.get(1..).unwrap_or_default();
        let Some(close) = memchr(b'$', after.as_bytes()) else {
            output.push('$');
            output.push_str(after);
            return output;
        };
        let (math, tail) = after.split_at(close);
        if math.is_empty() {
            output.push('$');
        } else {
            render(&mut output, math);
        }
        rest = tail.get(1..).unwrap_or_default();
    }
    output.push_str(rest);
    output
}
