// Small string-level HTML helpers for the live-trading table.
// Tag matching is ASCII case-insensitive; byte offsets are shared between the
// original and the lowercased copy because ASCII lowercasing keeps lengths.

/// Inner HTML of the first `<tag ...>...</tag>` section, if any.
pub fn first_section<'a>(s: &'a str, tag: &str) -> Option<&'a str> {
    let lc = s.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}", tag.to_ascii_lowercase());

    let start = find_open(&lc, &open, 0)?;
    let after_open = s[start..].find('>')? + start + 1;
    let end = lc[after_open..].find(&close)? + after_open;
    Some(&s[after_open..end])
}

/// Inner HTML of every top-level `<tag>` block in `s`, in document order.
pub fn blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = s.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}", tag.to_ascii_lowercase());

    let mut out = Vec::new();
    let mut from = 0;
    while let Some(start) = find_open(&lc, &open, from) {
        let Some(gt) = s[start..].find('>') else { break };
        let inner_start = start + gt + 1;

        // Unclosed cells (`<td>a<td>b`) end where the next one begins.
        let next_close = lc[inner_start..].find(&close).map(|i| i + inner_start);
        let next_open = find_open(&lc, &open, inner_start);
        let inner_end = match (next_close, next_open) {
            (Some(c), Some(o)) => c.min(o),
            (Some(c), None) => c,
            (None, Some(o)) => o,
            (None, None) => s.len(),
        };

        out.push(&s[inner_start..inner_end]);
        from = match next_close {
            Some(c) if c == inner_end => c + close.len(),
            _ => inner_end,
        };
    }
    out
}

// `<tr` must not match `<track`: require a delimiter after the tag name.
fn find_open(lc: &str, open: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(open) {
        let at = pos + rel;
        let next = lc.as_bytes().get(at + open.len()).copied();
        if matches!(next, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/')) {
            return Some(at);
        }
        pos = at + open.len();
    }
    None
}

/// Drops tags, decodes the common entities and collapses whitespace.
pub fn text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    let decoded = out.replace("&nbsp;", " ").replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
