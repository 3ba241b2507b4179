//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App
//! processes them to update state.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // App Lifecycle
    /// Regular tick, used to collect finished queries
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // Date Inputs
    /// Move focus to the next control (start, end, trigger)
    FocusNext,
    /// Move focus to the previous control
    FocusPrev,
    /// Type a character into the focused date input
    DateInput(char),
    /// Delete the last character of the focused date input
    DateBackspace,
    /// Empty the focused date input
    ClearField,
    /// Restore the configured default range
    ResetRange,

    // Query
    /// Run the commissions query for the current range
    RunQuery,

    // Results Scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Modals
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::FocusNext => write!(f, "FocusNext"),
            Action::FocusPrev => write!(f, "FocusPrev"),
            Action::DateInput(c) => write!(f, "DateInput('{}')", c),
            Action::DateBackspace => write!(f, "DateBackspace"),
            Action::ClearField => write!(f, "ClearField"),
            Action::ResetRange => write!(f, "ResetRange"),
            Action::RunQuery => write!(f, "RunQuery"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(Action::RunQuery.to_string(), "RunQuery");
        assert_eq!(Action::DateInput('7').to_string(), "DateInput('7')");
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
    }
}
