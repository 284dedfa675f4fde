use serde::{Deserialize, Serialize};

/// Title shown before the first fetch completes.
pub const PLACEHOLDER_TITLE: &str = "placeholder title";
/// Title used when the service answered but had no usable title.
pub const NO_TITLE: &str = "No Title Available";
/// Description used when the service answered but had no description.
pub const NO_DESCRIPTION: &str = "No Description Available";
/// Title used when the fetch cycle failed.
pub const NO_PREVIEW: &str = "No Preview Available";

/// Lifecycle flag for the fetch controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
}

impl Status {
    pub fn is_loading(self) -> bool {
        self == Status::Loading
    }
}

/// Display-ready result of one fetch cycle.  Always replaced as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRecord {
    pub title: String,
    pub description: String,
    pub image: String,
    pub canonical_link: String,
    pub accent_color: String,
}

impl PreviewRecord {
    /// The record a freshly created card shows.
    pub fn placeholder() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            description: String::new(),
            image: String::new(),
            canonical_link: String::new(),
            accent_color: String::new(),
        }
    }

    /// The degraded record shown after a failed cycle.
    pub fn failed(accent_color: String) -> Self {
        Self {
            title: NO_PREVIEW.to_string(),
            description: String::new(),
            image: String::new(),
            canonical_link: String::new(),
            accent_color,
        }
    }
}

impl Default for PreviewRecord {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Full observable state of one card.  `rev` is bumped on every change so
/// observers can skip redundant redraws.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    #[serde(default)]
    pub rev: u64,
    pub target_address: String,
    pub record: PreviewRecord,
    pub status: Status,
    /// Display text of the most recent failure; cleared by a successful cycle.
    pub last_error: Option<String>,
    /// Ticket of the most recently triggered cycle (0 = never triggered).
    pub latest_ticket: u64,
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Broadcast to observers while cycles progress.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    Loading { ticket: u64, address: String },
    Loaded { ticket: u64, record: PreviewRecord },
    Failed { ticket: u64, address: String, error: String },
    /// A response arrived for a cycle that is no longer the latest.
    Discarded { ticket: u64 },
}

impl PreviewEvent {
    pub fn ticket(&self) -> u64 {
        match self {
            PreviewEvent::Loading { ticket, .. }
            | PreviewEvent::Loaded { ticket, .. }
            | PreviewEvent::Failed { ticket, .. }
            | PreviewEvent::Discarded { ticket } => *ticket,
        }
    }
}

/// How one fetch cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied(PreviewRecord),
    Failed { record: PreviewRecord, error: String },
    Discarded { ticket: u64 },
}

impl FetchOutcome {
    /// The record this cycle wrote, if it wrote one.
    pub fn record(&self) -> Option<&PreviewRecord> {
        match self {
            FetchOutcome::Applied(record) | FetchOutcome::Failed { record, .. } => Some(record),
            FetchOutcome::Discarded { .. } => None,
        }
    }
}
