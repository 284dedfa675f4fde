use crate::config::Sequencing;
use crate::protocol::{PreviewRecord, PreviewState, Status};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owner of the single mutable `PreviewState`.  Every mutation happens under
/// one write lock so observers never see a half-applied record.
pub struct PreviewStore {
    state: Arc<RwLock<PreviewState>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(PreviewState::default())),
        }
    }

    pub async fn get_state(&self) -> PreviewState {
        self.state.read().await.clone()
    }

    /// Record a new target address.  Returns the ticket of the cycle to run
    /// when the address changed to a non-empty value, and flips the status to
    /// Loading before returning.
    pub async fn assign_target(&self, address: &str) -> Option<u64> {
        let mut state = self.state.write().await;
        if state.target_address == address {
            return None;
        }
        state.target_address = address.to_string();
        state.rev += 1;
        if address.is_empty() {
            return None;
        }
        state.latest_ticket += 1;
        state.status = Status::Loading;
        Some(state.latest_ticket)
    }

    /// Apply the outcome of cycle `ticket`.  Returns false when the result was
    /// discarded because a newer cycle owns the record.
    pub async fn complete(
        &self,
        ticket: u64,
        record: PreviewRecord,
        error: Option<String>,
        sequencing: Sequencing,
    ) -> bool {
        let mut state = self.state.write().await;
        if sequencing == Sequencing::LatestTrigger && ticket != state.latest_ticket {
            return false;
        }
        state.record = record;
        state.last_error = error;
        state.status = Status::Idle;
        state.fetched_at = Some(chrono::Utc::now());
        state.rev += 1;
        true
    }
}

impl Default for PreviewStore {
    fn default() -> Self {
        Self::new()
    }
}
