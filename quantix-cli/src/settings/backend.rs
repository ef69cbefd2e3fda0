//! Storage seam behind [`SettingsProvider`](super::SettingsProvider).

use async_trait::async_trait;

use super::SettingsError;

/// Byte-level preference storage.
///
/// Values arrive already bincode-encoded; backends only map keys to bytes.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Reads the bytes stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;

    /// Keys starting with `prefix`, sorted.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;

    /// Where values are kept, for log output.
    fn location(&self) -> String;
}
