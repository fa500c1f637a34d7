use serde::Deserialize;

/// How a run writes reports to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    /// One transaction per analysis, record by record through the dedup
    /// cache (default)
    #[default]
    Resolve,
    /// One transaction for the whole corpus, written kind by kind
    Bulk,
}

impl std::str::FromStr for IngestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resolve" => Ok(IngestMode::Resolve),
            "bulk" | "batch" => Ok(IngestMode::Bulk),
            _ => Err(format!(
                "Invalid mode: {}. Please specify 'resolve' or 'bulk'",
                s
            )),
        }
    }
}

impl std::fmt::Display for IngestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestMode::Resolve => write!(f, "resolve"),
            IngestMode::Bulk => write!(f, "bulk"),
        }
    }
}
