//! Keyword intent classifier for the menu flow

/// Coarse intent of a free-text service selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Verify,
    Points,
    Unknown,
}

/// Classify `text` by case-insensitive substring match.
///
/// `"verify"` is checked before `"points"`, so text containing both is a
/// [`Intent::Verify`].
pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();

    if text.contains("verify") {
        Intent::Verify
    } else if text.contains("points") {
        Intent::Points
    } else {
        Intent::Unknown
    }
}
