/// Crawl loop state definitions
///
/// The loop walks `Fetching → Locating → ExtractingEach → Pacing → Fetching`
/// one page at a time until it reaches a terminal state.
use std::fmt;

/// Represents the current state of the crawl loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// Requesting a catalog page
    Fetching { page: u32 },

    /// Looking for listing cards in the fetched page
    Locating { page: u32 },

    /// Extracting records from the located cards
    ExtractingEach { page: u32 },

    /// Waiting before the next page request
    Pacing { page: u32 },

    // ===== Terminal States =====
    /// A page without listings ended the catalog (or the page cap was reached)
    DoneSuccess,

    /// A page could not be fetched
    DoneFailure,
}

impl CrawlState {
    /// The state every crawl starts in
    pub fn initial() -> Self {
        Self::Fetching { page: 1 }
    }

    /// Returns true if the crawl loop has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::DoneSuccess | Self::DoneFailure)
    }

    /// Page number the state refers to, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Fetching { page }
            | Self::Locating { page }
            | Self::ExtractingEach { page }
            | Self::Pacing { page } => Some(*page),
            Self::DoneSuccess | Self::DoneFailure => None,
        }
    }

    /// Checks whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: &CrawlState) -> bool {
        match (self, next) {
            (Self::Fetching { page: a }, Self::Locating { page: b }) => a == b,
            (Self::Fetching { .. }, Self::DoneFailure) => true,
            (Self::Locating { page: a }, Self::ExtractingEach { page: b }) => a == b,
            (Self::Locating { .. }, Self::DoneSuccess) => true,
            (Self::ExtractingEach { page: a }, Self::Pacing { page: b }) => a == b,
            // page cap reached
            (Self::ExtractingEach { .. }, Self::DoneSuccess) => true,
            (Self::Pacing { page: a }, Self::Fetching { page: b }) => a.checked_add(1) == Some(*b),
            _ => false,
        }
    }

    /// Short lowercase name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetching { .. } => "fetching",
            Self::Locating { .. } => "locating",
            Self::ExtractingEach { .. } => "extracting",
            Self::Pacing { .. } => "pacing",
            Self::DoneSuccess => "done_success",
            Self::DoneFailure => "done_failure",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page() {
            Some(page) => write!(f, "{}({})", self.name(), page),
            None => write!(f, "{}", self.name()),
        }
    }
}
