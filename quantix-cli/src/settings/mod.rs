//! Persisted user preferences.
//!
//! Values are bincode-encoded behind a [`SettingsBackend`]; [`Preferences`]
//! reads the known keys into one typed struct.

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use quantix_lib::ranking::ColorScheme;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure to read, write or validate a preference.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: Setting,
        value: String,
        reason: String,
    },
}

/// Typed access to a settings backend.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Wraps `backend`.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Decodes the value stored under `key`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.load(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Encodes `value` under `key`, replacing any previous value.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.store(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }

    /// Stored keys starting with `prefix`, sorted.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys(prefix).await
    }

    /// Where the backend keeps its values.
    pub fn location(&self) -> String {
        self.backend.location()
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Default width of a ranking bar, in terminal cells.
pub const DEFAULT_BAR_WIDTH: u32 = 20;

/// Widest ranking bar accepted.
pub const MAX_BAR_WIDTH: u32 = 200;

/// A user-editable preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Page size overriding each table's default.
    RowsPerPage,
    /// Color scheme forced onto every ranking bar.
    Scheme,
    /// Ranking bar width in terminal cells.
    BarWidth,
}

impl Setting {
    /// Every setting, in display order.
    pub const ALL: [Setting; 3] = [Setting::RowsPerPage, Setting::Scheme, Setting::BarWidth];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Setting::RowsPerPage => "rows-per-page",
            Setting::Scheme => "scheme",
            Setting::BarWidth => "bar-width",
        }
    }

    /// Storage key.
    pub const fn key(self) -> &'static str {
        match self {
            Setting::RowsPerPage => "table.rows_per_page",
            Setting::Scheme => "ranking.scheme",
            Setting::BarWidth => "ranking.bar_width",
        }
    }

    fn invalid(self, value: &str, reason: impl fmt::Display) -> SettingsError {
        SettingsError::InvalidValue {
            key: self,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Validates `value` and stores it.
    pub async fn store(self, settings: &SettingsProvider, value: &str) -> Result<(), SettingsError> {
        match self {
            Setting::RowsPerPage => {
                let rows = parse_bounded(self, value, 1, u32::MAX)?;
                settings.set(self.key(), &rows).await
            }
            Setting::BarWidth => {
                let width = parse_bounded(self, value, 1, MAX_BAR_WIDTH)?;
                settings.set(self.key(), &width).await
            }
            Setting::Scheme => {
                let scheme: ColorScheme = value.parse().map_err(|e| self.invalid(value, e))?;
                settings.set(self.key(), &scheme.to_string()).await
            }
        }
    }

    /// Reads the stored value as display text.
    pub async fn load(self, settings: &SettingsProvider) -> Result<Option<String>, SettingsError> {
        match self {
            Setting::RowsPerPage | Setting::BarWidth => Ok(settings
                .get::<u32>(self.key())
                .await?
                .map(|n| n.to_string())),
            Setting::Scheme => settings.get::<String>(self.key()).await,
        }
    }
}

fn parse_bounded(setting: Setting, value: &str, min: u32, max: u32) -> Result<u32, SettingsError> {
    let n: u32 = value
        .trim()
        .parse()
        .map_err(|e| setting.invalid(value, e))?;
    if n < min || n > max {
        return Err(setting.invalid(value, format!("must be between {} and {}", min, max)));
    }
    Ok(n)
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == s || setting.key() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

/// Preferences applied to every command.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub rows_per_page: Option<usize>,
    pub scheme: Option<ColorScheme>,
    pub bar_width: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            rows_per_page: None,
            scheme: None,
            bar_width: DEFAULT_BAR_WIDTH as usize,
        }
    }
}

impl Preferences {
    /// Loads preferences, falling back to defaults for unset keys.
    ///
    /// A stored scheme that no longer parses is ignored with a warning.
    pub async fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        let rows_per_page = settings
            .get::<u32>(Setting::RowsPerPage.key())
            .await?
            .map(|n| n as usize);
        let bar_width = settings
            .get::<u32>(Setting::BarWidth.key())
            .await?
            .unwrap_or(DEFAULT_BAR_WIDTH) as usize;
        let scheme = match settings.get::<String>(Setting::Scheme.key()).await? {
            Some(name) => match name.parse() {
                Ok(scheme) => Some(scheme),
                Err(e) => {
                    log::warn!("Ignoring stored color scheme: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            rows_per_page,
            scheme,
            bar_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        let prefs = Preferences::load(&settings).await.unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        Setting::RowsPerPage.store(&settings, "10").await.unwrap();
        Setting::Scheme.store(&settings, "Neutral").await.unwrap();
        Setting::BarWidth.store(&settings, "30").await.unwrap();

        let prefs = Preferences::load(&settings).await.unwrap();
        assert_eq!(prefs.rows_per_page, Some(10));
        assert_eq!(prefs.scheme, Some(ColorScheme::Neutral));
        assert_eq!(prefs.bar_width, 30);
        assert_eq!(
            Setting::Scheme.load(&settings).await.unwrap().as_deref(),
            Some("neutral")
        );
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        assert!(matches!(
            Setting::RowsPerPage.store(&settings, "0").await,
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(Setting::BarWidth.store(&settings, "wide").await.is_err());
        assert!(Setting::Scheme.store(&settings, "rainbow").await.is_err());
        assert_eq!(Setting::RowsPerPage.load(&settings).await.unwrap(), None);
    }

    #[test]
    fn test_setting_names() {
        assert_eq!("bar-width".parse::<Setting>().unwrap(), Setting::BarWidth);
        assert_eq!("table.rows_per_page".parse::<Setting>().unwrap(), Setting::RowsPerPage);
        assert!(matches!(
            "theme".parse::<Setting>(),
            Err(SettingsError::UnknownKey(_))
        ));
    }

    #[tokio::test]
    async fn test_sqlite_backend_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        {
            let settings = SettingsProvider::new(SqliteBackend::new(&path).await.unwrap());
            Setting::BarWidth.store(&settings, "12").await.unwrap();
            settings.set("other.key", &true).await.unwrap();
        }

        let settings = SettingsProvider::new(SqliteBackend::new(&path).await.unwrap());
        assert_eq!(Preferences::load(&settings).await.unwrap().bar_width, 12);
        assert_eq!(
            settings.keys_with_prefix("ranking.").await.unwrap(),
            vec!["ranking.bar_width"]
        );

        settings.delete(Setting::BarWidth.key()).await.unwrap();
        assert_eq!(Setting::BarWidth.load(&settings).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_prefix_listing() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        settings.set("ranking.scheme", &"neutral".to_string()).await.unwrap();
        settings.set("table.rows_per_page", &5u32).await.unwrap();
        assert_eq!(
            settings.keys_with_prefix("table.").await.unwrap(),
            vec!["table.rows_per_page"]
        );
    }
}
