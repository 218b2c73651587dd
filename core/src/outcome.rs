//! Terminal workflow outcomes.
//!
//! # Design
//! The workflow is single-shot: each operation either hands control to the
//! next step or ends the run with an HTTP-style status and an operator
//! message. `Outcome` is that terminal value. The core never exits the
//! process or writes to the process boundary itself — the orchestrator
//! receives the outcome and decides how to present it (process exit, HTTP
//! response, log line).

use std::fmt;

/// A terminal outcome: HTTP-style status code plus operator-facing message.
///
/// `200` reports success, `400` a carrier-reported failure, `502` a
/// transport failure. Displayed as `"<code>: <message>"`, the form shown to
/// the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub message: String,
}

impl Outcome {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for Outcome {}
