use anyhow::{Context, Result};
use log::debug;

use super::{App, PolicyReview, View};
use crate::config::PortalSettings;
use crate::contact::{LinkOpener, SystemOpener};
use crate::content::Content;
use crate::definitions::HitMap;
use crate::i18n::Catalog;
use crate::preferences::{self, PreferenceStore};

impl App {
    /// Creates the application from settings, restoring preferences from the
    /// configured storage and loading the embedded content.
    pub fn new(settings: PortalSettings) -> Result<Self> {
        let storage = preferences::open_storage(settings.preferences_path.as_deref());
        let store = PreferenceStore::load(storage, preferences::system_theme());
        let content = Content::builtin().context("Failed to load built-in content")?;
        let catalog = Catalog::builtin().context("Failed to load translations")?;
        Ok(Self::with_parts(
            settings,
            content,
            catalog,
            store,
            Box::new(SystemOpener),
        ))
    }

    /// Assembles an `App` from already-built parts. The initial view is the
    /// policy review on its first tab.
    pub fn with_parts(
        settings: PortalSettings,
        content: Content,
        catalog: Catalog,
        preferences: PreferenceStore,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let document = preferences.document();
        debug!(
            "Initializing App: lang={}, dir={}, dark={}",
            document.lang.code(),
            document.direction.as_str(),
            document.dark
        );
        Self {
            should_quit: false,
            view: View::PolicyReview(PolicyReview::new(settings.scroll_tolerance)),
            content,
            catalog,
            preferences,
            document,
            status: None,
            hit_map: HitMap::default(),
            settings,
            opener,
        }
    }
}
