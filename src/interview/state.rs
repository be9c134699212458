use anyhow::{bail, Result};
use std::fmt;

/// Why an interview stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The elicitor emitted the end-of-interview sentinel
    Signaled,
    /// The respondent typed a cancellation token or input ended
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    AwaitingElicitor,
    AwaitingRespondent,
    Terminated(TerminationReason),
}

impl InterviewState {
    /// Check if transitioning from the current state to `next` is valid.
    ///
    /// Valid transitions:
    /// - `AwaitingElicitor` -> `AwaitingRespondent` | `Terminated(Signaled)`
    /// - `AwaitingRespondent` -> `AwaitingElicitor` | `Terminated(Cancelled)`
    /// - `Terminated` is a terminal state
    pub fn can_transition_to(&self, next: &InterviewState) -> bool {
        if self == next {
            return true;
        }

        match self {
            InterviewState::AwaitingElicitor => matches!(
                next,
                InterviewState::AwaitingRespondent
                    | InterviewState::Terminated(TerminationReason::Signaled)
            ),
            InterviewState::AwaitingRespondent => matches!(
                next,
                InterviewState::AwaitingElicitor
                    | InterviewState::Terminated(TerminationReason::Cancelled)
            ),
            InterviewState::Terminated(_) => false,
        }
    }

    pub fn try_transition(&self, next: InterviewState) -> Result<InterviewState> {
        if self.can_transition_to(&next) {
            Ok(next)
        } else {
            bail!("Invalid interview state transition: {self} -> {next}")
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewState::Terminated(_))
    }
}

impl fmt::Display for InterviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewState::AwaitingElicitor => write!(f, "AwaitingElicitor"),
            InterviewState::AwaitingRespondent => write!(f, "AwaitingRespondent"),
            InterviewState::Terminated(TerminationReason::Signaled) => {
                write!(f, "Terminated(Signaled)")
            }
            InterviewState::Terminated(TerminationReason::Cancelled) => {
                write!(f, "Terminated(Cancelled)")
            }
        }
    }
}
