pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod keyword;
pub mod launch;
pub mod models;
pub mod selection;

mod effects;

// Re-export common items for convenience
pub use app::{App, EffectSink, Intent, Panel};
pub use catalog::{builtin_catalog, find_snippet, load_catalog, resolve_ids};
pub use config::{share_origin, Environment, COPY_TOAST_MS, EXPORT_FILENAME};
pub use effects::SystemEffects;
pub use error::{Result, SnipcatError};
pub use export::{deep_link, json_payload, parse_shared_query, query_string, share_url, SharedSnippet};
pub use keyword::format_keyword;
pub use models::{Category, Modifier, Snippet, SnippetKind};
pub use selection::Selection;
