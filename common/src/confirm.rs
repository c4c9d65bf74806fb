//! What a guarded click does once the user answered the confirmation prompt.

/// Outcome of a confirmation prompt guarding a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDecision {
    /// Let the click through untouched.
    Proceed,
    /// Cancel the default action and keep later handlers on the element from
    /// running.
    Cancel,
}

impl ClickDecision {
    /// `None` means the prompt could not be shown, which counts as declined.
    pub fn from_answer(answer: Option<bool>) -> Self {
        match answer {
            Some(true) => Self::Proceed,
            Some(false) | None => Self::Cancel,
        }
    }

    pub fn prevents_default(self) -> bool {
        self == Self::Cancel
    }

    pub fn stops_other_handlers(self) -> bool {
        self == Self::Cancel
    }
}
