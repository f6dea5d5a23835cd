use std::borrow::Cow;

/// Escapes special characters in `input` for safe inclusion in HTML content.
/// Specifically, it replaces:
/// - `&` with `&amp;`
/// - `<` with `&lt;`
/// - `>` with `&gt;`
///
/// This function uses `memchr` for efficient searching of special characters.
pub fn escape_html_content(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(index) = memchr::memchr3(b'&', b'<', b'>', rest.as_bytes()) {
        // The special characters are ASCII, so `index` is a char boundary.
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        match after.as_bytes().first() {
            Some(b'&') => output.push_str("&amp;"),
            Some(b'<') => output.push_str("&lt;"),
            Some(b'>') => output.push_str("&gt;"),
            _ => {}
        }
        rest = after.get(1..).unwrap_or_default();
    }
    output.push_str(rest);
}

/// Like [`escape_html_content`], but only allocates if there is something to escape.
pub fn escape_html_cow(input: &str) -> Cow<'_, str> {
    if memchr::memchr3(b'&', b'<', b'>', input.as_bytes()).is_some() {
        let mut output = String::with_capacity(input.len() + 4);
        escape_html_content(&mut output, input);
        Cow::Owned(output)
    } else {
        Cow::Borrowed(input)
    }
}
