use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// The single transient message shown to the user.
///
/// `sequence` increases with every `notify`, so a stale dismiss timer can tell
/// that its message has been replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub sequence: u64,
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}
