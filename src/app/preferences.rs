use log::info;

use super::App;
use crate::i18n::Language;

// Implementation block for preference-related logic in the App.
impl App {
    /// Translates English source text into the current display language.
    pub fn t<'a>(&'a self, text: &'a str) -> &'a str {
        self.catalog.resolve(text, self.document.lang)
    }

    pub fn language(&self) -> Language {
        self.preferences.language()
    }

    /// Flips between light and dark, persists it, and re-applies the
    /// document attributes.
    pub(crate) fn toggle_theme(&mut self) {
        self.document = self.preferences.toggle_theme();
        info!("Theme set to {}", self.preferences.theme().as_str());
    }

    /// Switches the display language, persists it, and updates direction.
    pub(crate) fn set_language(&mut self, language: Language) {
        self.document = self.preferences.set_language(language);
        info!(
            "Language set to {} ({})",
            language.code(),
            self.document.direction.as_str()
        );
    }

    pub(crate) fn cycle_language(&mut self) {
        self.set_language(self.language().next());
    }
}
