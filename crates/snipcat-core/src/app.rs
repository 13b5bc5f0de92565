use crate::catalog::resolve_ids;
use crate::config::{share_origin, Environment};
use crate::error::Result;
use crate::export::{deep_link, json_payload, query_string, share_url};
use crate::models::{Category, Modifier};
use crate::selection::Selection;

/// A discrete user intention, produced by keyboard shortcuts or menu
/// actions in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Download,
    CopyJson,
    CopyShareUrl,
    AddToApp,
    ToggleExportMenu,
    ToggleSettings,
    ToggleAbout,
    ClearSelection,
}

/// Which overlay panel is open. At most one at a time, so opening a
/// panel structurally closes the other two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    None,
    ExportMenu,
    Settings,
    About,
}

/// Side-effect primitives the dispatcher drives. The production sink
/// wires the clipboard, the export file, and the platform opener; tests
/// substitute a recorder to observe that guarded intents fire nothing.
pub trait EffectSink {
    /// Materialize the JSON payload as the export file.
    fn download(&mut self, payload: &str) -> Result<()>;

    /// Write text to the system clipboard.
    fn copy_text(&mut self, text: &str) -> Result<()>;

    /// Hand a URI to the platform opener.
    fn navigate(&mut self, uri: &str) -> Result<()>;
}

/// Process-wide application state: the catalog, the selection, the two
/// modifier tokens, the open panel, and the copy-confirmation flag.
///
/// All mutation happens through methods on this controller, inside the
/// UI's single-threaded event loop.
pub struct App {
    catalog: Vec<Category>,
    selection: Selection,
    start_modifier: Modifier,
    end_modifier: Modifier,
    panel: Panel,
    copied: bool,
    share_origin: String,
    deep_link_scheme: &'static str,
}

impl App {
    pub fn new(catalog: Vec<Category>) -> Self {
        Self::with_endpoints(
            catalog,
            share_origin(),
            Environment::detect().deep_link_scheme(),
        )
    }

    /// Construct with explicit share origin and deep-link scheme.
    pub fn with_endpoints(
        catalog: Vec<Category>,
        share_origin: String,
        deep_link_scheme: &'static str,
    ) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            start_modifier: Modifier::Bang,
            end_modifier: Modifier::None,
            panel: Panel::None,
            copied: false,
            share_origin,
            deep_link_scheme,
        }
    }

    pub fn catalog(&self) -> &[Category] {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn start_modifier(&self) -> Modifier {
        self.start_modifier
    }

    pub fn end_modifier(&self) -> Modifier {
        self.end_modifier
    }

    pub fn set_start_modifier(&mut self, modifier: Modifier) {
        self.start_modifier = modifier;
    }

    pub fn set_end_modifier(&mut self, modifier: Modifier) {
        self.end_modifier = modifier;
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Whether the copy confirmation should currently show. Set by the
    /// dispatcher; cleared by the presentation layer's timer.
    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn clear_copied(&mut self) {
        self.copied = false;
    }

    /// Merge a selection gesture into the selection. The gesture arrives
    /// as identity deltas; ids that match nothing in the catalog are
    /// skipped.
    pub fn apply_gesture(&mut self, added: &[String], removed: &[String]) {
        let added = resolve_ids(&self.catalog, added);
        let removed = resolve_ids(&self.catalog, removed);
        self.selection.apply_delta(&added, &removed);
    }

    /// Per-item delete from the selection summary.
    pub fn remove_from_selection(&mut self, id: &str) {
        self.selection.remove(id);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// JSON payload for the current selection under the current modifiers.
    pub fn json_payload(&self) -> String {
        json_payload(
            self.selection.snippets(),
            self.start_modifier,
            self.end_modifier,
        )
    }

    pub fn query_string(&self) -> String {
        query_string(
            self.selection.snippets(),
            self.start_modifier,
            self.end_modifier,
        )
    }

    pub fn share_url(&self) -> String {
        share_url(
            &self.share_origin,
            self.selection.snippets(),
            self.start_modifier,
            self.end_modifier,
        )
    }

    pub fn deep_link(&self) -> String {
        deep_link(
            self.deep_link_scheme,
            self.selection.snippets(),
            self.start_modifier,
            self.end_modifier,
        )
    }

    /// Map an intent to its effect. Export intents are no-ops while the
    /// selection is empty; a dispatched export also closes the export
    /// menu, matching the menu's own behavior.
    pub fn dispatch<E: EffectSink>(&mut self, intent: Intent, effects: &mut E) -> Result<()> {
        match intent {
            Intent::ToggleSettings => {
                self.toggle_panel(Panel::Settings);
                Ok(())
            }
            Intent::ToggleAbout => {
                self.toggle_panel(Panel::About);
                Ok(())
            }
            Intent::ToggleExportMenu => {
                if self.selection.is_empty() {
                    return Ok(());
                }
                self.toggle_panel(Panel::ExportMenu);
                Ok(())
            }
            Intent::ClearSelection => {
                self.selection.clear();
                Ok(())
            }
            Intent::Download => {
                if self.selection.is_empty() {
                    return Ok(());
                }
                let payload = self.json_payload();
                self.panel = Panel::None;
                effects.download(&payload)
            }
            Intent::CopyJson => {
                if self.selection.is_empty() {
                    return Ok(());
                }
                let payload = self.json_payload();
                self.panel = Panel::None;
                effects.copy_text(&payload)?;
                self.copied = true;
                Ok(())
            }
            Intent::CopyShareUrl => {
                if self.selection.is_empty() {
                    return Ok(());
                }
                let url = self.share_url();
                self.panel = Panel::None;
                effects.copy_text(&url)?;
                self.copied = true;
                Ok(())
            }
            Intent::AddToApp => {
                if self.selection.is_empty() {
                    return Ok(());
                }
                let link = self.deep_link();
                self.panel = Panel::None;
                effects.navigate(&link)
            }
        }
    }

    fn toggle_panel(&mut self, target: Panel) {
        self.panel = if self.panel == target {
            Panel::None
        } else {
            target
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Snippet, SnippetKind};

    #[derive(Default)]
    struct RecordingSink {
        downloads: Vec<String>,
        copies: Vec<String>,
        navigations: Vec<String>,
    }

    impl RecordingSink {
        fn effect_count(&self) -> usize {
            self.downloads.len() + self.copies.len() + self.navigations.len()
        }
    }

    impl EffectSink for RecordingSink {
        fn download(&mut self, payload: &str) -> Result<()> {
            self.downloads.push(payload.to_string());
            Ok(())
        }

        fn copy_text(&mut self, text: &str) -> Result<()> {
            self.copies.push(text.to_string());
            Ok(())
        }

        fn navigate(&mut self, uri: &str) -> Result<()> {
            self.navigations.push(uri.to_string());
            Ok(())
        }
    }

    fn test_catalog() -> Vec<Category> {
        vec![Category {
            name: "Symbols".to_string(),
            slug: "/symbols".to_string(),
            icon: String::new(),
            grid_cols: 4,
            snippets: vec![
                Snippet::new("em-dash", "Em Dash", "—", SnippetKind::Text, "--"),
                Snippet::new("ellipsis", "Ellipsis", "…", SnippetKind::Text, "..."),
            ],
        }]
    }

    fn test_app() -> App {
        App::with_endpoints(
            test_catalog(),
            "https://snipcat.dev".to_string(),
            "snipcat",
        )
    }

    fn select(app: &mut App, ids: &[&str]) {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        app.apply_gesture(&ids, &[]);
    }

    #[test]
    fn export_intents_are_no_ops_on_empty_selection() {
        let mut app = test_app();
        let mut sink = RecordingSink::default();

        for intent in [
            Intent::Download,
            Intent::CopyJson,
            Intent::CopyShareUrl,
            Intent::AddToApp,
        ] {
            app.dispatch(intent, &mut sink).unwrap();
        }

        assert_eq!(sink.effect_count(), 0);
        assert!(!app.copied());
    }

    #[test]
    fn download_materializes_the_json_payload() {
        let mut app = test_app();
        select(&mut app, &["em-dash"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::Download, &mut sink).unwrap();

        assert_eq!(
            sink.downloads,
            vec![r#"[{"name":"Em Dash","text":"—","keyword":"!--"}]"#.to_string()]
        );
    }

    #[test]
    fn copy_json_sets_the_confirmation_flag() {
        let mut app = test_app();
        select(&mut app, &["em-dash"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::CopyJson, &mut sink).unwrap();

        assert_eq!(sink.copies.len(), 1);
        assert!(app.copied());

        app.clear_copied();
        assert!(!app.copied());
    }

    #[test]
    fn copy_share_url_targets_the_shared_page() {
        let mut app = test_app();
        select(&mut app, &["em-dash"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::CopyShareUrl, &mut sink).unwrap();

        assert_eq!(sink.copies.len(), 1);
        assert!(sink.copies[0].starts_with("https://snipcat.dev/shared?snippet="));
        assert!(app.copied());
    }

    #[test]
    fn add_to_app_navigates_to_the_deep_link() {
        let mut app = test_app();
        select(&mut app, &["em-dash", "ellipsis"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::AddToApp, &mut sink).unwrap();

        assert_eq!(sink.navigations.len(), 1);
        assert!(sink.navigations[0].starts_with("snipcat://snippets/import?snippet="));
    }

    #[test]
    fn panels_are_mutually_exclusive() {
        let mut app = test_app();
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::ToggleAbout, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::About);

        // Opening settings while about is open closes about
        app.dispatch(Intent::ToggleSettings, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::Settings);

        app.dispatch(Intent::ToggleSettings, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::None);
    }

    #[test]
    fn export_menu_requires_a_selection() {
        let mut app = test_app();
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::ToggleExportMenu, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::None);

        select(&mut app, &["em-dash"]);
        app.dispatch(Intent::ToggleExportMenu, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::ExportMenu);
    }

    #[test]
    fn dispatching_an_export_closes_the_export_menu() {
        let mut app = test_app();
        select(&mut app, &["em-dash"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::ToggleExportMenu, &mut sink).unwrap();
        app.dispatch(Intent::CopyJson, &mut sink).unwrap();
        assert_eq!(app.panel(), Panel::None);
    }

    #[test]
    fn clear_selection_intent_empties_the_selection() {
        let mut app = test_app();
        select(&mut app, &["em-dash", "ellipsis"]);
        let mut sink = RecordingSink::default();

        app.dispatch(Intent::ClearSelection, &mut sink).unwrap();
        assert!(app.selection().is_empty());
    }

    #[test]
    fn gestures_resolve_ids_and_skip_unknown_ones() {
        let mut app = test_app();
        app.apply_gesture(
            &[
                "em-dash".to_string(),
                "missing".to_string(),
                "em-dash".to_string(),
            ],
            &[],
        );

        assert_eq!(app.selection().len(), 1);
        assert!(app.is_selected("em-dash"));

        app.apply_gesture(&[], &["em-dash".to_string()]);
        assert!(app.selection().is_empty());
    }

    #[test]
    fn modifiers_flow_into_every_export_channel() {
        let mut app = test_app();
        select(&mut app, &["em-dash"]);
        app.set_start_modifier(Modifier::None);
        app.set_end_modifier(Modifier::Colon);

        assert!(app.json_payload().contains("--:"));
        let decoded = crate::export::parse_shared_query(&app.query_string()).unwrap();
        assert_eq!(decoded[0].keyword, "--:");
        assert!(app.deep_link().starts_with("snipcat://snippets/import?"));
    }
}
