use anyhow::{bail, Result};

use crate::llm::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// Asks the questions (the generative service)
    Elicitor,
    /// The human expert
    Respondent,
}

impl Speaker {
    /// Label used in transcripts handed to document synthesis
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Elicitor => "Interviewer",
            Speaker::Respondent => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

/// Append-only history of an interview.
///
/// Turns strictly alternate, starting with the respondent (the seed turn).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, content: impl Into<String>) -> Result<()> {
        let expected = match self.turns.last() {
            None | Some(Turn { speaker: Speaker::Elicitor, .. }) => Speaker::Respondent,
            Some(Turn { speaker: Speaker::Respondent, .. }) => Speaker::Elicitor,
        };
        if speaker != expected {
            bail!(
                "Out-of-order turn: expected {}, got {}",
                expected.label(),
                speaker.label()
            );
        }
        self.turns.push(Turn {
            speaker,
            content: content.into(),
        });
        Ok(())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_elicitor(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Elicitor)
            .map(|t| t.content.as_str())
    }

    /// Respondent turns after the seed.
    pub fn answer_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Respondent)
            .count()
            .saturating_sub(1)
    }

    /// Whether the expert contributed anything beyond the opening seed.
    pub fn has_substantive_answers(&self) -> bool {
        self.answer_count() > 0
    }

    /// History as service messages: respondent turns are user messages.
    pub fn messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .map(|turn| match turn.speaker {
                Speaker::Respondent => Message::user(turn.content.clone()),
                Speaker::Elicitor => Message::assistant(turn.content.clone()),
            })
            .collect()
    }

    /// Labelled plain-text transcript, one paragraph per turn.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}\n\n", turn.speaker.label(), turn.content))
            .collect()
    }
}
