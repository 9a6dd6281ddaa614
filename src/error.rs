use std::path::PathBuf;

/// Failures of the preference storage backends.
///
/// None of these ever reach the user; the preference store logs them and
/// keeps running on in-memory values.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failures while loading the embedded content assets.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to parse embedded asset `{asset}`: {source}")]
    Parse {
        asset: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("embedded asset `{0}` is empty")]
    Empty(&'static str),
}
