use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Maximum length for a content id (security limit)
const MAX_CONTENT_ID_LENGTH: usize = 128;

/// NewType wrapper for a content-derived primary key.
///
/// Two structurally identical records always carry the same id, so the id is
/// both the dedup key and the stored row's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: String) -> Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Content id cannot be empty");
        }

        if id.len() > MAX_CONTENT_ID_LENGTH {
            anyhow::bail!(
                "Content id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_CONTENT_ID_LENGTH
            );
        }

        // Ids end up as SQL parameters and log fields; keep them to plain
        // alphanumerics plus '-' and '_'.
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Content id contains invalid characters. Only ASCII alphanumerics, hyphens and underscores are allowed."
            );
        }

        Ok(Self(id))
    }

    /// Id for a blake3 digest: 64 lowercase hex characters.
    pub fn from_digest(hash: &blake3::Hash) -> Self {
        Self(hash.to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
