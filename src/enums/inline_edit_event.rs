/// Events delivered to an inline row editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineEditEvent {
    /// Replace the buffered text.
    Input(String),
    Enter,
    Blur,
}
