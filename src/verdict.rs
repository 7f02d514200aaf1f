use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Safe,
    Risky,
    Unsafe,
}

impl Status {
    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Safe => 0,
            Status::Risky => 1,
            Status::Unsafe => 2,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Safe => "Safe",
            Status::Risky => "Risky",
            Status::Unsafe => "Unsafe",
        };
        f.write_str(s)
    }
}

/// Outcome of a single URL classification.
///
/// Scores are a fixed lookup per branch: 0 is the most severe (blacklisted),
/// 100 means nothing fired and the target answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: Status,
    pub reason: String,
    pub score: u8,
}

impl Verdict {
    pub fn new(status: Status, reason: impl Into<String>, score: u8) -> Self {
        Self {
            status,
            reason: reason.into(),
            score: score.min(100),
        }
    }

    pub fn safe(reason: impl Into<String>) -> Self {
        Self::new(Status::Safe, reason, 100)
    }

    pub fn risky(reason: impl Into<String>, score: u8) -> Self {
        Self::new(Status::Risky, reason, score)
    }

    pub fn unsafe_(reason: impl Into<String>, score: u8) -> Self {
        Self::new(Status::Unsafe, reason, score)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/100): {}", self.status, self.score, self.reason)
    }
}
