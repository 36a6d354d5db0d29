//! String helpers shared by the emitters.

/// Maximum width of a wrapped doc comment line, excluding the ` * ` prefix.
pub const COMMENT_WIDTH: usize = 80;

/// Identifiers that cannot be used as parameter names in declarations.
const RESERVED_PARAM_NAMES: &[&str] = &[
    "class", "default", "delete", "enum", "export", "function", "import", "in", "new", "return",
    "switch", "this", "typeof", "var", "void", "with",
];

/// Uppercase the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert to camelCase, splitting on punctuation and case boundaries
/// (`did-finish-load` -> `didFinishLoad`, `URLRequest` -> `urlRequest`).
pub fn camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in split_words(s).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&upper_first(&lower));
        }
    }
    out
}

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Rewrite parameter names that collide with reserved words
/// (`switch` -> `theSwitch`).
pub fn paramify(name: &str) -> String {
    if RESERVED_PARAM_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
        format!("the{}", upper_first(name))
    } else {
        name.to_string()
    }
}

/// Wrap a description into `/** ... */` doc comment lines.
///
/// Returns no lines for a missing or blank description. A leading
/// `(optional)` marker is dropped since optionality is already part of the
/// emitted signature.
pub fn wrap_comment(description: Option<&str>) -> Vec<String> {
    let Some(text) = description else {
        return Vec::new();
    };
    let text = strip_optional_marker(text.trim()).trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["/**".to_string()];
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > COMMENT_WIDTH {
                lines.push(format!(" * {current}"));
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(format!(" * {current}").trim_end().to_string());
    }
    lines.push(" */".to_string());
    lines
}

fn strip_optional_marker(text: &str) -> &str {
    const MARKER: &str = "(optional)";
    match text.get(..MARKER.len()) {
        Some(head) if head.eq_ignore_ascii_case(MARKER) => {
            let rest = text[MARKER.len()..].trim_start();
            rest.strip_prefix("- ").unwrap_or(rest)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("webContents"), "WebContents");
        assert_eq!(upper_first("App"), "App");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("did-finish-load"), "didFinishLoad");
        assert_eq!(camel_case("ready"), "ready");
        assert_eq!(camel_case("WebContents"), "webContents");
        assert_eq!(camel_case("URLRequest"), "urlRequest");
        assert_eq!(camel_case("before_input event"), "beforeInputEvent");
    }

    #[test]
    fn test_paramify() {
        assert_eq!(paramify("switch"), "theSwitch");
        assert_eq!(paramify("default"), "theDefault");
        assert_eq!(paramify("options"), "options");
    }

    #[test]
    fn test_wrap_comment_empty() {
        assert!(wrap_comment(None).is_empty());
        assert!(wrap_comment(Some("   ")).is_empty());
        assert!(wrap_comment(Some("(optional)")).is_empty());
    }

    #[test]
    fn test_wrap_comment_short() {
        assert_eq!(
            wrap_comment(Some("Emitted when the app is ready.")),
            vec!["/**", " * Emitted when the app is ready.", " */"]
        );
    }

    #[test]
    fn test_wrap_comment_strips_optional_marker() {
        assert_eq!(
            wrap_comment(Some("(optional) - The window title")),
            vec!["/**", " * The window title", " */"]
        );
    }

    #[test]
    fn test_wrap_comment_wraps_long_lines() {
        let text = "word ".repeat(40);
        let lines = wrap_comment(Some(&text));
        assert_eq!(lines.first().unwrap(), "/**");
        assert_eq!(lines.last().unwrap(), " */");
        assert!(lines.len() > 3);
        for line in &lines[1..lines.len() - 1] {
            assert!(line.len() <= COMMENT_WIDTH + 3, "too long: {line}");
        }
    }

    #[test]
    fn test_wrap_comment_keeps_paragraphs() {
        assert_eq!(
            wrap_comment(Some("First.\n\nSecond.")),
            vec!["/**", " * First.", " *", " * Second.", " */"]
        );
    }
}
