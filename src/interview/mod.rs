//! Conversational knowledge extraction.
//!
//! The elicitor (a [`Generator`]) asks questions and the respondent (usually
//! a human at a terminal) answers, one line per turn, until the elicitor
//! emits the sentinel or the respondent cancels.

pub mod conversation;
pub mod respondent;
pub mod state;

use anyhow::Result;

pub use conversation::{Conversation, Speaker, Turn};
pub use respondent::{Respondent, StdinRespondent};
pub use state::{InterviewState, TerminationReason};

use crate::config::InterviewConfig;
use crate::llm::Generator;

/// Synthetic opening respondent turn that starts every interview.
pub const SEED_TURN: &str = "Please begin the interview.";

/// Fixed instruction for the elicitor.
pub fn interview_instruction(sentinel: &str) -> String {
    format!(
        "You are a senior knowledge engineer. Your goal is to draw out the tacit \
knowledge in the expert's head through questions: their logic, thresholds, and \
strategies for handling exceptions.

Interview in depth along these dimensions: role, capabilities, decision chain, \
constraints, and output spec. Ask one focused question at a time.

During the interview you must cover these key questions:
1. What are the success criteria for this task?
2. What red lines must never be crossed?
3. When data is missing, how do you usually decide?

When you judge that the information is sufficient, reply with {sentinel}."
    )
}

/// Settings that shape one interview run.
#[derive(Debug, Clone)]
pub struct InterviewSettings {
    pub sentinel: String,
    pub cancel_tokens: Vec<String>,
}

impl InterviewSettings {
    fn is_cancel(&self, answer: &str) -> bool {
        let answer = answer.trim();
        self.cancel_tokens
            .iter()
            .any(|token| token.trim().eq_ignore_ascii_case(answer))
    }
}

impl From<&InterviewConfig> for InterviewSettings {
    fn from(config: &InterviewConfig) -> Self {
        Self {
            sentinel: config.sentinel.clone(),
            cancel_tokens: config.cancel_tokens.clone(),
        }
    }
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self::from(&InterviewConfig::default())
    }
}

/// Result of a finished interview.
#[derive(Debug, Clone)]
pub struct InterviewOutcome {
    pub conversation: Conversation,
    pub reason: TerminationReason,
}

impl InterviewOutcome {
    /// Whether there is enough content to synthesize a document from.
    pub fn is_sufficient(&self) -> bool {
        self.conversation.has_substantive_answers()
    }
}

/// The interview state machine.
pub struct Interview<'g, G: Generator + ?Sized> {
    generator: &'g G,
    settings: InterviewSettings,
    instruction: String,
    conversation: Conversation,
    state: InterviewState,
}

impl<'g, G: Generator + ?Sized> Interview<'g, G> {
    pub fn new(generator: &'g G, settings: InterviewSettings) -> Self {
        let instruction = interview_instruction(&settings.sentinel);
        Self {
            generator,
            settings,
            instruction,
            conversation: Conversation::new(),
            state: InterviewState::AwaitingElicitor,
        }
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Advance by one transition. A terminated interview stays terminated.
    pub fn step(&mut self, respondent: &mut dyn Respondent) -> Result<InterviewState> {
        let next = match self.state {
            InterviewState::AwaitingElicitor => self.elicit(respondent)?,
            InterviewState::AwaitingRespondent => self.listen(respondent)?,
            InterviewState::Terminated(_) => return Ok(self.state),
        };
        self.state = self.state.try_transition(next)?;
        Ok(self.state)
    }

    /// Drive the machine until it terminates.
    pub fn run(mut self, respondent: &mut dyn Respondent) -> Result<InterviewOutcome> {
        loop {
            if let InterviewState::Terminated(reason) = self.step(respondent)? {
                tracing::info!(
                    ?reason,
                    turns = self.conversation.len(),
                    "Interview finished"
                );
                return Ok(InterviewOutcome {
                    conversation: self.conversation,
                    reason,
                });
            }
        }
    }

    fn elicit(&mut self, respondent: &mut dyn Respondent) -> Result<InterviewState> {
        if self.conversation.is_empty() {
            self.conversation.push(Speaker::Respondent, SEED_TURN)?;
        }

        let reply = self
            .generator
            .generate(&self.instruction, &self.conversation.messages())?;
        self.conversation.push(Speaker::Elicitor, reply.as_str())?;
        respondent.hear(&reply)?;

        if reply.contains(&self.settings.sentinel) {
            Ok(InterviewState::Terminated(TerminationReason::Signaled))
        } else {
            Ok(InterviewState::AwaitingRespondent)
        }
    }

    fn listen(&mut self, respondent: &mut dyn Respondent) -> Result<InterviewState> {
        let Some(answer) = respondent.answer()? else {
            return Ok(InterviewState::Terminated(TerminationReason::Cancelled));
        };

        if self.settings.is_cancel(&answer) {
            return Ok(InterviewState::Terminated(TerminationReason::Cancelled));
        }

        let answer = answer.trim();
        if answer.is_empty() {
            // Ask again without recording an empty turn
            return Ok(InterviewState::AwaitingRespondent);
        }

        self.conversation.push(Speaker::Respondent, answer)?;
        Ok(InterviewState::AwaitingElicitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn scripted(answers: &[&str]) -> impl FnMut() -> Result<Option<String>> {
        let mut queue: VecDeque<String> = answers.iter().map(|s| s.to_string()).collect();
        move || Ok(queue.pop_front())
    }

    #[test]
    fn test_seed_turn_is_sent_on_first_call() {
        let seen = RefCell::new(Vec::new());
        let generator = |_: &str, messages: &[Message]| -> Result<String> {
            seen.borrow_mut().push(messages.to_vec());
            Ok("First question?".to_string())
        };

        let mut interview = Interview::new(&generator, InterviewSettings::default());
        let mut respondent = scripted(&[]);
        let state = interview.step(&mut respondent).unwrap();

        assert_eq!(state, InterviewState::AwaitingRespondent);
        let calls = seen.borrow();
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0], Message::user(SEED_TURN));
        assert_eq!(interview.conversation().turns()[0].content, SEED_TURN);
    }

    #[test]
    fn test_terminates_on_sentinel() {
        let calls = RefCell::new(0);
        let generator = |_: &str, _: &[Message]| -> Result<String> {
            *calls.borrow_mut() += 1;
            if *calls.borrow() == 2 {
                Ok("Thanks, that is enough. [INTERVIEW COMPLETE]".to_string())
            } else {
                Ok("What are your red lines?".to_string())
            }
        };

        let mut respondent = scripted(&["Never exceed 3x leverage."]);
        let outcome = Interview::new(&generator, InterviewSettings::default())
            .run(&mut respondent)
            .unwrap();

        assert_eq!(outcome.reason, TerminationReason::Signaled);
        assert_eq!(outcome.conversation.len(), 4);
        assert!(outcome.is_sufficient());
    }

    #[test]
    fn test_cancel_token_is_case_insensitive() {
        let generator = |_: &str, _: &[Message]| -> Result<String> { Ok("Question?".to_string()) };

        let mut respondent = scripted(&["  QUIT  "]);
        let outcome = Interview::new(&generator, InterviewSettings::default())
            .run(&mut respondent)
            .unwrap();

        assert_eq!(outcome.reason, TerminationReason::Cancelled);
        assert_eq!(outcome.conversation.len(), 2);
        assert!(!outcome.is_sufficient());
    }

    #[test]
    fn test_end_of_input_cancels() {
        let generator = |_: &str, _: &[Message]| -> Result<String> { Ok("Question?".to_string()) };
        let mut respondent = scripted(&["An answer"]);
        let outcome = Interview::new(&generator, InterviewSettings::default())
            .run(&mut respondent)
            .unwrap();

        assert_eq!(outcome.reason, TerminationReason::Cancelled);
        assert_eq!(outcome.conversation.answer_count(), 1);
    }

    #[test]
    fn test_never_terminates_without_sentinel_or_cancel() {
        let generator = |_: &str, _: &[Message]| -> Result<String> { Ok("And then?".to_string()) };
        let mut answered = 0;
        let mut respondent = || -> Result<Option<String>> {
            answered += 1;
            Ok(Some(format!("answer {answered}")))
        };

        let mut interview = Interview::new(&generator, InterviewSettings::default());
        for _ in 0..200 {
            assert!(!interview.step(&mut respondent).unwrap().is_terminal());
        }
        // 100 elicitor and 100 respondent turns plus the seed
        assert_eq!(interview.conversation().len(), 201);
    }

    #[test]
    fn test_empty_answer_is_not_recorded() {
        let generator = |_: &str, _: &[Message]| -> Result<String> { Ok("Question?".to_string()) };
        let mut respondent = scripted(&["", "   ", "real answer", "exit"]);
        let outcome = Interview::new(&generator, InterviewSettings::default())
            .run(&mut respondent)
            .unwrap();

        let answers: Vec<&str> = outcome
            .conversation
            .turns()
            .iter()
            .filter(|t| t.speaker == Speaker::Respondent)
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(answers, vec![SEED_TURN, "real answer"]);
    }

    #[test]
    fn test_generator_failure_propagates() {
        let generator =
            |_: &str, _: &[Message]| -> Result<String> { Err(anyhow::anyhow!("service down")) };
        let mut respondent = scripted(&[]);
        let result = Interview::new(&generator, InterviewSettings::default()).run(&mut respondent);
        assert!(result.is_err());
    }

    #[test]
    fn test_instruction_names_sentinel() {
        assert!(interview_instruction("[DONE]").contains("reply with [DONE]."));
    }
}
