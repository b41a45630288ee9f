/// Placeholder shown in log lines when the OS omits an identity field.
pub const UNKNOWN: &str = "Unknown";

/// One application termination as reported by a lifecycle source.
///
/// Both fields come straight from the OS and may be missing. They are
/// consumed by the watcher and dropped right after filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationEvent {
    /// Localized display name (e.g. "Microsoft Edge").
    pub name: Option<String>,
    /// Bundle / application identifier (e.g. "com.microsoft.edgemac.Beta").
    pub identifier: Option<String>,
}

impl TerminationEvent {
    pub fn new(name: Option<String>, identifier: Option<String>) -> Self {
        Self { name, identifier }
    }

    /// Display name for logging; falls back to [`UNKNOWN`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Identifier for logging; falls back to [`UNKNOWN`].
    pub fn display_identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or(UNKNOWN)
    }
}
