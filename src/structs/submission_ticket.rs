/// Issued when a submission starts; identifies the draft it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub generation: u64,
}
