use std::error::Error;
use std::time::{Duration, Instant};

pub const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied {
        until: Instant,
    },
    Failed,
}

/// Copy button attached to one code block.
#[derive(Debug, Default)]
pub struct CopyButton {
    state: CopyState,
}

impl CopyButton {
    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            CopyState::Idle => "Copy",
            CopyState::Copied { .. } => "Copied!",
            CopyState::Failed => "Error",
        }
    }

    /// Hands `code` to `write` (the clipboard) and records the feedback state.
    pub fn copy<F>(&mut self, code: &str, now: Instant, write: F)
    where
        F: FnOnce(&str) -> Result<(), Box<dyn Error>>,
    {
        match write(code) {
            Ok(()) => {
                self.state = CopyState::Copied {
                    until: now + COPIED_FEEDBACK,
                };
            }
            Err(e) => {
                log::error!("Failed to copy: {}", e);
                self.state = CopyState::Failed;
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            CopyState::Copied { until } => Some(until),
            _ => None,
        }
    }

    /// Reverts "Copied!" once the feedback period is over.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            CopyState::Copied { until } if now >= until => {
                self.state = CopyState::Idle;
                true
            }
            _ => false,
        }
    }
}
