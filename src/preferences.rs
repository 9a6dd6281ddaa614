//! Persisted display preferences: theme and language.
//!
//! Values live in a small key/value store behind [`PreferenceStorage`]. The
//! store is best-effort: any storage failure is logged and the session keeps
//! running on in-memory values.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::StorageError;
use crate::i18n::{self, Language};

pub const THEME_KEY: &str = "policy-portal-theme";
pub const LANGUAGE_KEY: &str = "policy-portal-language";

const APP_DIR: &str = "policy-portal";
const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// English source label, translated at render time.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Theme suggested by the terminal environment.
pub fn system_theme() -> Theme {
    theme_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
}

/// Interprets a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background indices 0-6 and 8 are the dark half of the 16-color palette.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|raw| raw.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(0..=6 | 8) => Theme::Dark,
        _ => Theme::Light,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Root-level attributes the renderer derives its layout and palette from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub lang: Language,
    pub direction: TextDirection,
    pub dark: bool,
}

impl Document {
    pub fn new(theme: Theme, language: Language) -> Self {
        Self {
            lang: language,
            direction: if i18n::is_rtl(language) {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            },
            dark: theme.is_dark(),
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == TextDirection::Rtl
    }
}

/// Key/value storage for preference strings.
pub trait PreferenceStorage {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Session-only storage, used when no persistent location is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML file of string entries. Writes go through a temporary file and a
/// rename so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let serialized = toml::to_string_pretty(entries)?;
        let mut tmp = self.path.clone();
        tmp.set_extension("toml.tmp");
        fs::write(&tmp, serialized).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStorage for FileStorage {
    fn name(&self) -> &str {
        "FileStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt { path, source }) => {
                warn!("Replacing corrupt preference file {}: {}", path.display(), source);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// `$XDG_CONFIG_HOME/policy-portal/preferences.toml`, falling back to
/// `$HOME/.config/...`.
pub fn default_preferences_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|value| !value.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join(APP_DIR).join(PREFERENCES_FILE))
}

/// Picks the file backend when a location resolves, otherwise memory.
pub fn open_storage(path_override: Option<&Path>) -> Box<dyn PreferenceStorage> {
    match path_override
        .map(Path::to_path_buf)
        .or_else(default_preferences_path)
    {
        Some(path) => {
            debug!("Using preference file {}", path.display());
            Box::new(FileStorage::new(path))
        }
        None => {
            info!("No preference location available, preferences last for this session only");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Owns the current theme and language and mirrors every change to storage.
pub struct PreferenceStore {
    storage: Box<dyn PreferenceStorage>,
    theme: Theme,
    language: Language,
}

impl PreferenceStore {
    /// Restores both preferences. Missing, unreadable or unrecognized values
    /// fall back to `system_theme` and the default language.
    pub fn load(storage: Box<dyn PreferenceStorage>, system_theme: Theme) -> Self {
        let theme = read_entry(storage.as_ref(), THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or(system_theme);
        let language = read_entry(storage.as_ref(), LANGUAGE_KEY)
            .and_then(|value| Language::from_code(&value))
            .unwrap_or(Language::DEFAULT);
        info!(
            "Preferences restored from {}: theme={}, language={}",
            storage.name(),
            theme.as_str(),
            language.code()
        );
        Self {
            storage,
            theme,
            language,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn document(&self) -> Document {
        Document::new(self.theme, self.language)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Document {
        self.theme = theme;
        self.persist(THEME_KEY, theme.as_str());
        self.document()
    }

    pub fn toggle_theme(&mut self) -> Document {
        self.set_theme(self.theme.toggle())
    }

    pub fn set_language(&mut self, language: Language) -> Document {
        self.language = language;
        self.persist(LANGUAGE_KEY, language.code());
        self.document()
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value) {
            warn!("Could not persist {} via {}: {}", key, self.storage.name(), err);
        }
    }
}

fn read_entry(storage: &dyn PreferenceStorage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!("Could not read {} via {}: {}", key, storage.name(), err);
            None
        }
    }
}
