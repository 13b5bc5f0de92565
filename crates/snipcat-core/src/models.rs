use crate::error::SnipcatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content kind of a snippet. Spelling entries are exact-match corrections
/// and never carry keyword modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    Text,
    Template,
    Spelling,
}

/// A named, typed text fragment, optionally triggerable by a keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SnippetKind,
    /// Base trigger string. Empty for entries without a keyword.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword: String,
}

impl Snippet {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
        kind: SnippetKind,
        keyword: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            kind,
            keyword: keyword.into(),
        }
    }
}

/// An ordered group of snippets. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Routable identifier, e.g. "/symbols".
    pub slug: String,
    /// Named icon reference for the presentation layer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    /// Layout hint: how many columns the category prefers.
    #[serde(default = "default_grid_cols")]
    pub grid_cols: u8,
    pub snippets: Vec<Snippet>,
}

fn default_grid_cols() -> u8 {
    4
}

impl Category {
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// A keyword prefix/suffix token. `None` is the sentinel for "no token".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = ":")]
    Colon,
    #[serde(rename = "_")]
    Underscore,
    #[serde(rename = "__")]
    DoubleUnderscore,
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = "@")]
    At,
    #[serde(rename = "@@")]
    DoubleAt,
    #[serde(rename = "$")]
    Dollar,
    #[serde(rename = ";")]
    Semicolon,
    #[serde(rename = ";;")]
    DoubleSemicolon,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "//")]
    DoubleSlash,
    #[default]
    #[serde(rename = "none")]
    None,
}

impl Modifier {
    /// Every selectable token, in the order the settings panel offers them.
    pub const ALL: [Modifier; 13] = [
        Modifier::Bang,
        Modifier::Colon,
        Modifier::Underscore,
        Modifier::DoubleUnderscore,
        Modifier::Dash,
        Modifier::At,
        Modifier::DoubleAt,
        Modifier::Dollar,
        Modifier::Semicolon,
        Modifier::DoubleSemicolon,
        Modifier::Slash,
        Modifier::DoubleSlash,
        Modifier::None,
    ];

    /// The literal token this modifier contributes to a keyword.
    /// `None` contributes nothing.
    pub fn affix(&self) -> &'static str {
        match self {
            Modifier::Bang => "!",
            Modifier::Colon => ":",
            Modifier::Underscore => "_",
            Modifier::DoubleUnderscore => "__",
            Modifier::Dash => "-",
            Modifier::At => "@",
            Modifier::DoubleAt => "@@",
            Modifier::Dollar => "$",
            Modifier::Semicolon => ";",
            Modifier::DoubleSemicolon => ";;",
            Modifier::Slash => "/",
            Modifier::DoubleSlash => "//",
            Modifier::None => "",
        }
    }

    /// Position of this modifier within `ALL`, for cycling in the settings UI.
    pub fn position(&self) -> usize {
        Modifier::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::None => write!(f, "none"),
            other => write!(f, "{}", other.affix()),
        }
    }
}

impl FromStr for Modifier {
    type Err = SnipcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" {
            return Ok(Modifier::None);
        }
        Modifier::ALL
            .iter()
            .find(|m| m.affix() == s && **m != Modifier::None)
            .copied()
            .ok_or_else(|| SnipcatError::UnknownModifier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_tokens_round_trip_from_str() {
        for modifier in Modifier::ALL {
            let parsed: Modifier = modifier.to_string().parse().unwrap();
            assert_eq!(parsed, modifier);
        }
    }

    #[test]
    fn modifier_rejects_unknown_token() {
        assert!("??".parse::<Modifier>().is_err());
        assert!("".parse::<Modifier>().is_err());
    }

    #[test]
    fn snippet_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SnippetKind::Spelling).unwrap(),
            "\"spelling\""
        );
        let kind: SnippetKind = serde_json::from_str("\"template\"").unwrap();
        assert_eq!(kind, SnippetKind::Template);
    }

    #[test]
    fn snippet_omits_empty_keyword() {
        let snippet = Snippet::new("s-1", "Check", "✓", SnippetKind::Text, "");
        let json = serde_json::to_string(&snippet).unwrap();
        assert!(!json.contains("keyword"));
    }
}
