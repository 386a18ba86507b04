//! The five-entity escape set used in attribute values and leaf text.
//!
//! Substitution markers (`$1`, `$A`, ...) pass through untouched; they are
//! resolved later by the prompt and exception accessors, not by the codec.

/// Escape the five reserved characters.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape`]. Fails on a bare `&` or an unrecognized entity.
pub fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos..];
        let semi = after
            .find(';')
            .ok_or_else(|| "bare '&' without a closing ';'".to_string())?;
        let replacement = match &after[1..semi] {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "apos" => '\'',
            "quot" => '"',
            other => return Err(format!("unrecognized entity '&{};'", other)),
        };
        out.push(replacement);
        rest = &after[semi + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
