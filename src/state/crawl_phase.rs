//! Crawl phase definitions for a single crawl step
//!
//! A step moves `Ready -> Running` once, and then ends in exactly one of the
//! two terminal phases depending on why the loop stopped.

use crate::SweepError;
use std::fmt;

/// Represents the current phase of one crawl step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Session built, nothing fetched yet
    Ready,

    /// The BFS loop is fetching pages
    Running,

    /// The frontier ran dry; the site is fully crawled
    Exhausted,

    /// The page budget was spent with URLs still waiting
    BudgetReached,
}

impl CrawlPhase {
    /// Returns true if this is a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::BudgetReached)
    }

    /// Returns true if `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Ready, Self::Running)
                | (Self::Running, Self::Exhausted)
                | (Self::Running, Self::BudgetReached)
        )
    }

    /// Moves to `next`, rejecting illegal transitions
    pub fn transition(&mut self, next: CrawlPhase) -> Result<(), SweepError> {
        if !self.can_transition_to(next) {
            return Err(SweepError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    /// Returns a short lowercase name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Exhausted => "exhausted",
            Self::BudgetReached => "budget_reached",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
