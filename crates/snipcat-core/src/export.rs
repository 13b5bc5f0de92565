use crate::error::{Result, SnipcatError};
use crate::keyword::format_keyword;
use crate::models::{Modifier, Snippet, SnippetKind};
use serde::{Deserialize, Serialize};

/// One element of the JSON payload (file download and clipboard copy).
#[derive(Debug, Clone, PartialEq, Serialize)]
struct ImportRecord {
    name: String,
    text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    keyword: String,
}

/// One `snippet=` entry of the share query string. Unlike the JSON
/// payload this carries the content kind, so the receiving side can
/// decide whether to apply its own modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSnippet {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: SnippetKind,
}

impl SharedSnippet {
    fn from_snippet(snippet: &Snippet, start: Modifier, end: Modifier) -> Self {
        Self {
            name: snippet.name.clone(),
            text: snippet.text.clone(),
            keyword: format_keyword(&snippet.keyword, snippet.kind, start, end),
            kind: snippet.kind,
        }
    }
}

/// Serialize the selection as a JSON array of `{name, text, keyword}`,
/// in selection order, with keywords decorated under the given modifiers.
pub fn json_payload(snippets: &[Snippet], start: Modifier, end: Modifier) -> String {
    let records: Vec<ImportRecord> = snippets
        .iter()
        .map(|snippet| ImportRecord {
            name: snippet.name.clone(),
            text: snippet.text.clone(),
            keyword: format_keyword(&snippet.keyword, snippet.kind, start, end),
        })
        .collect();

    // Serialization of plain strings cannot fail.
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
}

/// Serialize the selection as `snippet=<percent-encoded JSON>` pairs
/// joined with `&`. An empty selection yields an empty string.
pub fn query_string(snippets: &[Snippet], start: Modifier, end: Modifier) -> String {
    snippets
        .iter()
        .map(|snippet| {
            let shared = SharedSnippet::from_snippet(snippet, start, end);
            let json = serde_json::to_string(&shared).unwrap_or_default();
            format!("snippet={}", urlencoding::encode(&json))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the shareable URL for the given origin.
pub fn share_url(origin: &str, snippets: &[Snippet], start: Modifier, end: Modifier) -> String {
    format!("{}/shared?{}", origin, query_string(snippets, start, end))
}

/// Build the deep-link URI that hands the selection to the companion app.
pub fn deep_link(scheme: &str, snippets: &[Snippet], start: Modifier, end: Modifier) -> String {
    format!(
        "{}://snippets/import?{}",
        scheme,
        query_string(snippets, start, end)
    )
}

/// Decode a share query string back into the records that produced it.
///
/// Parameters other than `snippet=` are ignored. This is the receiving
/// side of [`query_string`]; foreign input makes decoding fallible here
/// where encoding is total.
pub fn parse_shared_query(query: &str) -> Result<Vec<SharedSnippet>> {
    let mut snippets = Vec::new();

    if query.is_empty() {
        return Ok(snippets);
    }

    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => {
                return Err(SnipcatError::InvalidShareQuery(format!(
                    "malformed parameter: {}",
                    pair
                )))
            }
        };

        if key != "snippet" {
            continue;
        }

        let decoded = urlencoding::decode(value)
            .map_err(|e| SnipcatError::InvalidShareQuery(e.to_string()))?;
        snippets.push(serde_json::from_str(&decoded)?);
    }

    Ok(snippets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn em_dash() -> Snippet {
        Snippet::new("1", "Em Dash", "—", SnippetKind::Text, "--")
    }

    #[test]
    fn json_payload_decorates_keywords() {
        let payload = json_payload(&[em_dash()], Modifier::Bang, Modifier::Colon);
        assert_eq!(payload, r#"[{"name":"Em Dash","text":"—","keyword":"!--:"}]"#);
    }

    #[test]
    fn json_payload_of_empty_selection_is_an_empty_array() {
        assert_eq!(json_payload(&[], Modifier::Bang, Modifier::None), "[]");
    }

    #[test]
    fn json_payload_keeps_selection_order() {
        let snippets = vec![
            Snippet::new("a", "First", "1", SnippetKind::Text, "one"),
            Snippet::new("b", "Second", "2", SnippetKind::Text, "two"),
        ];
        let payload = json_payload(&snippets, Modifier::None, Modifier::None);
        let first = payload.find("First").unwrap();
        let second = payload.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn spelling_keyword_survives_export_untouched() {
        let snippet = Snippet::new("sp-1", "the", "the", SnippetKind::Spelling, "teh");
        let payload = json_payload(&[snippet], Modifier::Bang, Modifier::Colon);
        assert_eq!(payload, r#"[{"name":"the","text":"the","keyword":"teh"}]"#);
    }

    #[test]
    fn empty_selection_yields_empty_query_string() {
        assert_eq!(query_string(&[], Modifier::Bang, Modifier::None), "");
    }

    #[test]
    fn query_string_entries_are_url_safe() {
        let snippet = Snippet::new(
            "q-1",
            "Tricky & Co",
            "a=b&c\n\"quoted\"",
            SnippetKind::Text,
            "trick",
        );
        let query = query_string(&[snippet], Modifier::Bang, Modifier::None);

        assert!(query.starts_with("snippet="));
        let value = query.strip_prefix("snippet=").unwrap();
        assert!(!value.contains('&'));
        assert!(!value.contains('='));
        assert!(!value.contains('"'));
        assert!(!value.contains('\n'));
    }

    #[test]
    fn query_string_round_trips() {
        let snippets = vec![
            Snippet::new(
                "q-1",
                "Tricky & Co",
                "a=b&c\n\"quoted\" {braces}",
                SnippetKind::Template,
                "trick",
            ),
            Snippet::new("sp-1", "the", "the", SnippetKind::Spelling, "teh"),
        ];
        let query = query_string(&snippets, Modifier::At, Modifier::DoubleSlash);

        let decoded = parse_shared_query(&query).unwrap();
        assert_eq!(
            decoded,
            vec![
                SharedSnippet {
                    name: "Tricky & Co".to_string(),
                    text: "a=b&c\n\"quoted\" {braces}".to_string(),
                    keyword: "@trick//".to_string(),
                    kind: SnippetKind::Template,
                },
                SharedSnippet {
                    name: "the".to_string(),
                    text: "the".to_string(),
                    keyword: "teh".to_string(),
                    kind: SnippetKind::Spelling,
                },
            ]
        );
    }

    #[test]
    fn parse_rejects_malformed_parameters() {
        assert!(parse_shared_query("snippet").is_err());
        assert!(parse_shared_query("snippet=%7Bnot-json%7D").is_err());
    }

    #[test]
    fn parse_ignores_foreign_parameters() {
        let query = query_string(&[em_dash()], Modifier::None, Modifier::None);
        let with_extra = format!("utm_source=mail&{}", query);
        let decoded = parse_shared_query(&with_extra).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "Em Dash");
    }

    #[test]
    fn parse_of_empty_query_is_empty() {
        assert!(parse_shared_query("").unwrap().is_empty());
    }

    #[test]
    fn share_url_and_deep_link_share_the_query() {
        let snippets = vec![em_dash()];
        let query = query_string(&snippets, Modifier::Bang, Modifier::None);

        assert_eq!(
            share_url("https://snipcat.dev", &snippets, Modifier::Bang, Modifier::None),
            format!("https://snipcat.dev/shared?{}", query)
        );
        assert_eq!(
            deep_link("snipcat", &snippets, Modifier::Bang, Modifier::None),
            format!("snipcat://snippets/import?{}", query)
        );
    }
}
