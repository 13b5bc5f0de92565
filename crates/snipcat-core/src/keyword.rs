use crate::models::{Modifier, SnippetKind};

/// Decorate a base keyword with the configured start/end modifier tokens.
///
/// Spelling entries are exact matches and come back untouched, as does an
/// empty keyword. Everything else gets `start + keyword + end`, where a
/// `none` modifier contributes nothing.
pub fn format_keyword(keyword: &str, kind: SnippetKind, start: Modifier, end: Modifier) -> String {
    if kind == SnippetKind::Spelling || keyword.is_empty() {
        return keyword.to_string();
    }
    format!("{}{}{}", start.affix(), keyword, end.affix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_keyword_is_never_decorated() {
        for start in Modifier::ALL {
            for end in Modifier::ALL {
                assert_eq!(
                    format_keyword("teh", SnippetKind::Spelling, start, end),
                    "teh"
                );
            }
        }
    }

    #[test]
    fn empty_keyword_stays_empty() {
        for kind in [SnippetKind::Text, SnippetKind::Template] {
            assert_eq!(
                format_keyword("", kind, Modifier::Bang, Modifier::Colon),
                ""
            );
        }
    }

    #[test]
    fn both_modifiers_wrap_the_keyword() {
        assert_eq!(
            format_keyword("--", SnippetKind::Text, Modifier::Bang, Modifier::Colon),
            "!--:"
        );
    }

    #[test]
    fn none_contributes_no_token() {
        assert_eq!(
            format_keyword("shrug", SnippetKind::Text, Modifier::None, Modifier::None),
            "shrug"
        );
        assert_eq!(
            format_keyword("shrug", SnippetKind::Text, Modifier::Bang, Modifier::None),
            "!shrug"
        );
        assert_eq!(
            format_keyword(
                "shrug",
                SnippetKind::Template,
                Modifier::None,
                Modifier::DoubleSlash
            ),
            "shrug//"
        );
    }
}
