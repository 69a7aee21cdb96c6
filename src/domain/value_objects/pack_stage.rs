//! Pack Stage Value Object
//!
//! The progress of one packaging run:
//!
//! ```text
//! Init -> Fetched -> Built -> Assembled -> Cleaned
//! ```
//!
//! Stages only move forward. `Cleaned` is terminal and reachable from any stage.

use std::fmt;

/// Stage reached by a packaging run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PackStage {
    /// Workspace not yet populated
    #[default]
    Init,
    /// App directory holds the checked-out source
    Fetched,
    /// Dependencies vendored or found unnecessary
    Built,
    /// Archive written outside the workspace
    Assembled,
    /// Workspace removed
    Cleaned,
}

impl PackStage {
    /// Lowercase name used in events and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            PackStage::Init => "init",
            PackStage::Fetched => "fetched",
            PackStage::Built => "built",
            PackStage::Assembled => "assembled",
            PackStage::Cleaned => "cleaned",
        }
    }

    /// Whether the run has already passed `stage`
    pub fn has_reached(&self, stage: PackStage) -> bool {
        *self >= stage
    }

    /// Whether no further step (other than `clean`) may run
    pub fn is_terminal(&self) -> bool {
        *self == PackStage::Cleaned
    }

    /// Advance to `next`, never moving backwards
    pub fn advance(self, next: PackStage) -> PackStage {
        self.max(next)
    }
}

impl fmt::Display for PackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
