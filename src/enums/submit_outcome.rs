#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted by the portal; the draft was discarded.
    Submitted,
    /// The response belonged to a draft that is no longer current and was ignored.
    Stale,
}
