/// Outcome definitions for evaluated crawl targets
///
/// A target moves unvisited -> in-flight -> visited exactly once; this type
/// is what "visited" carries.
use std::fmt;

/// The terminal outcome of evaluating a crawl target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visit {
    /// The target responded with a status of 299 or lower
    Live,

    /// The target responded with a status above 299
    Dead,

    /// The target could not be evaluated (network error, timeout, render failure)
    ///
    /// Neither counted as dead nor expanded, and never retried within a crawl.
    Inconclusive,
}

impl Visit {
    /// Classifies an HTTP status code
    pub fn from_status(status_code: u16) -> Self {
        if status_code > 299 {
            Self::Dead
        } else {
            Self::Live
        }
    }

    /// Returns true if the target is a dead link
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Returns true if the target was reachable and healthy
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Returns a short lowercase label for logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Dead => "dead",
            Self::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
