//! The package's `SKILL.md` and the section editor that splices into it.

use crate::parser::markdown::{self, Heading, Section};

/// Canonical sections of a skill document, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalSection {
    Role,
    Capabilities,
    DecisionChain,
    Constraints,
    OutputSpec,
}

impl CanonicalSection {
    pub fn title(&self) -> &'static str {
        match self {
            CanonicalSection::Role => "Role",
            CanonicalSection::Capabilities => "Capabilities",
            CanonicalSection::DecisionChain => "Decision Chain",
            CanonicalSection::Constraints => "Constraints",
            CanonicalSection::OutputSpec => "Output Spec",
        }
    }

    /// The level-2 heading line for this section
    pub fn heading(&self) -> String {
        format!("## {}", self.title())
    }

    fn placeholder(&self) -> &'static str {
        match self {
            CanonicalSection::Role => "<!-- The expert role this skill plays -->\n",
            CanonicalSection::Capabilities => "<!-- Key capabilities of this skill -->\n",
            CanonicalSection::DecisionChain => {
                "<!-- How the expert reasons and decides -->\n1.\n2.\n3.\n"
            }
            CanonicalSection::Constraints => "<!-- Boundaries and limits of this skill -->\n-\n",
            CanonicalSection::OutputSpec => "<!-- Output format and quality requirements -->\n",
        }
    }

    pub fn all() -> &'static [CanonicalSection] {
        &[
            CanonicalSection::Role,
            CanonicalSection::Capabilities,
            CanonicalSection::DecisionChain,
            CanonicalSection::Constraints,
            CanonicalSection::OutputSpec,
        ]
    }
}

/// Raw text of a skill document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    text: String,
}

impl SkillDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Initial document: a title plus the five canonical headings with placeholders.
    pub fn template(name: &str) -> Self {
        let mut text = format!("# {name}\n");
        for section in CanonicalSection::all() {
            text.push('\n');
            text.push_str(&section.heading());
            text.push('\n');
            text.push_str(section.placeholder());
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn headings(&self) -> Vec<Heading> {
        markdown::headings(&self.text)
    }

    pub fn sections(&self) -> Vec<Section> {
        markdown::sections(&self.text)
    }

    /// Canonical sections with no heading in this document.
    pub fn missing_sections(&self) -> Vec<CanonicalSection> {
        let headings = self.headings();
        CanonicalSection::all()
            .iter()
            .copied()
            .filter(|section| {
                !headings
                    .iter()
                    .any(|h| h.level == 2 && h.title == section.title())
            })
            .collect()
    }

    /// Accumulate `content` under `heading` (see [`append_to_section`]).
    pub fn append_to_section(&mut self, heading: &str, content: &str) {
        self.text = append_to_section(&self.text, heading, content);
    }

    /// Whole-document replacement, normalized to a single trailing newline.
    pub fn replace(&mut self, text: &str) {
        self.text = format!("{}\n", text.trim());
    }
}

/// Insert `content` at the end of the section introduced by `heading`.
///
/// The section ends at the next heading of the same or higher level, or at
/// the end of the document. Existing bytes are never removed: only newlines
/// needed for a blank-line separation, the content, and a closing newline
/// are inserted. Repeated calls accumulate content in order.
///
/// When `heading` is not present, the heading and content are appended at
/// the end of the document; later calls then find and extend that section.
pub fn append_to_section(text: &str, heading: &str, content: &str) -> String {
    let wanted = heading.trim_end();
    let content = content.trim_matches('\n');
    let headings = markdown::headings(text);

    let Some(idx) = headings
        .iter()
        .position(|h| text[h.start..h.end].trim_end() == wanted)
    else {
        let mut out = String::with_capacity(text.len() + heading.len() + content.len() + 4);
        out.push_str(text);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(wanted);
        out.push('\n');
        out.push_str(content);
        out.push('\n');
        return out;
    };

    let level = headings[idx].level;
    let insert_at = headings[idx + 1..]
        .iter()
        .find(|h| h.level <= level)
        .map_or(text.len(), |h| h.start);

    let (before, after) = text.split_at(insert_at);
    let mut out = String::with_capacity(text.len() + content.len() + 4);
    out.push_str(before);
    out.push_str(separator(before));
    out.push_str(content);
    out.push('\n');
    if !after.is_empty() {
        out.push('\n');
    }
    out.push_str(after);
    out
}

/// Newlines needed so that one blank line precedes the inserted content.
fn separator(before: &str) -> &'static str {
    if before.ends_with("\n\n") {
        ""
    } else if before.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    }
}
