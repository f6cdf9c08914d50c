//! Embedding user text in single-quoted string literals.

/// Escape `value` for embedding between single quotes.
///
/// A `{` directly following another `{` is split off with `' . '` so the
/// embedded text can never form a `{{ NAME }}` placeholder token.
pub fn single_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '{' if previous == Some('{') => escaped.push_str("' . '{"),
            c => escaped.push(c),
        }
        previous = Some(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use thyme_source::placeholder_tokens;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(single_quoted(".selector"), ".selector");
        assert_eq!(single_quoted(""), "");
        assert_eq!(single_quoted("{ a } }}"), "{ a } }}");
    }

    #[test]
    fn test_quotes_and_backslashes() {
        assert_eq!(single_quoted("it's"), "it\\'s");
        assert_eq!(single_quoted("a\\b"), "a\\\\b");
        assert_eq!(single_quoted("\\'"), "\\\\\\'");
    }

    #[test]
    fn test_template_opener_is_split() {
        assert_eq!(single_quoted("{{ SECRET }}"), "{' . '{ SECRET }}");
        assert_eq!(single_quoted("{{{"), "{' . '{' . '{");
        assert_eq!(single_quoted("\\{{"), "\\\\{' . '{");
    }

    #[test]
    fn test_escaped_text_has_no_placeholder_tokens() {
        for text in ["{{ TEST_CONTEXT }}", "a{{ B }}c{{ D:2 }}", "{{{ X }}}", "'{{ Y }}'"] {
            let statement = format!("'{}'", single_quoted(text));
            assert!(placeholder_tokens(&statement).is_empty(), "{statement}");
        }
    }
}
