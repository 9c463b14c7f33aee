//! Submission actions
//!
//! An action label selects either a local text transform or remote image
//! generation. Labels are matched exactly; anything unrecognised is answered
//! with an echo rather than an error.

pub const SUMMARY: &str = "Summary";
pub const FIX_GRAMMAR: &str = "Fix Spelling and Grammar";
pub const MAKE_SHORTER: &str = "Make shorter";
pub const GENERATE_IMAGE: &str = "Generate Image";

/// Labels offered to input widgets, in display order
pub const ACTION_LABELS: [&str; 4] = [SUMMARY, FIX_GRAMMAR, MAKE_SHORTER, GENERATE_IMAGE];

/// Pure text transforms applied locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Summary,
    FixGrammar,
    Shorten,
    Echo,
}

impl Transform {
    pub fn apply(self, text: &str) -> String {
        match self {
            Transform::Summary => format!("Here's a summary of your text: {text}"),
            Transform::FixGrammar => format!("Corrected version: {text}"),
            Transform::Shorten => {
                // Halve by characters so multi-byte text is never split mid-char
                let half = text.chars().count() / 2;
                let head: String = text.chars().take(half).collect();
                format!("Shortened: {head}...")
            }
            Transform::Echo => format!("Received: {text}"),
        }
    }
}

/// What a submission's action resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Local(Transform),
    GenerateImage,
}

impl Action {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(SUMMARY) => Action::Local(Transform::Summary),
            Some(FIX_GRAMMAR) => Action::Local(Transform::FixGrammar),
            Some(MAKE_SHORTER) => Action::Local(Transform::Shorten),
            Some(GENERATE_IMAGE) => Action::GenerateImage,
            Some(other) => {
                tracing::debug!(label = other, "Unknown action, falling back to echo");
                Action::Local(Transform::Echo)
            }
            None => Action::Local(Transform::Echo),
        }
    }

    pub fn is_remote(self) -> bool {
        matches!(self, Action::GenerateImage)
    }
}
