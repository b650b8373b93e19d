/// Returns the first balanced top-level `{...}` span in `text`.
///
/// Scanning starts at the first `{`; prose before it is ignored, so stray
/// quotes or apostrophes in a preamble do not confuse the matcher. Inside
/// the span, braces within JSON strings (including escaped quotes) are not
/// counted. If the first `{` is never closed the text has no balanced span.
pub fn find_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
