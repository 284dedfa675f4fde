//! Action enum: all user-initiated intents and internal events.

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Point the card at a new address (kicks off a fetch cycle).
    SubmitAddress(String),
    CycleLocale,
    Quit,
}
