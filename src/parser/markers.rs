//! Marker-delimited block protocol used by every generative response.
//!
//! A response may carry several named blocks, each wrapped in a start/end
//! marker pair such as `---SCHEMA_START---` / `---SCHEMA_END---`. Only the
//! first occurrence of each marker counts; nesting is not supported.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// Kinds of blocks the generative counterpart is asked to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    SkillDocument,
    ManifestUpdate,
    Analysis,
    ToolCode,
    SkillDoc,
    Schema,
}

impl BlockKind {
    /// Start and end marker strings for this block kind
    pub fn markers(&self) -> (&'static str, &'static str) {
        match self {
            BlockKind::SkillDocument => ("---SKILL_MD_START---", "---SKILL_MD_END---"),
            BlockKind::ManifestUpdate => ("---MANIFEST_JSON_START---", "---MANIFEST_JSON_END---"),
            BlockKind::Analysis => ("---ANALYSIS_START---", "---ANALYSIS_END---"),
            BlockKind::ToolCode => ("---TOOL_CODE_START---", "---TOOL_CODE_END---"),
            BlockKind::SkillDoc => ("---SKILL_DOC_START---", "---SKILL_DOC_END---"),
            BlockKind::Schema => ("---SCHEMA_START---", "---SCHEMA_END---"),
        }
    }

    /// Wrap a body in this kind's markers, the shape the generator is asked to produce.
    pub fn wrap(&self, body: &str) -> String {
        let (start, end) = self.markers();
        format!("{start}\n{body}\n{end}")
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::SkillDocument => "skill document",
            BlockKind::ManifestUpdate => "manifest update",
            BlockKind::Analysis => "analysis",
            BlockKind::ToolCode => "tool code",
            BlockKind::SkillDoc => "capability doc",
            BlockKind::Schema => "tool schema",
        };
        write!(f, "{name}")
    }
}

/// Byte range of the body between the first `start` and first `end` marker.
///
/// Returns `None` when either marker is missing, or when the first end marker
/// precedes the first start marker.
pub fn block_span(text: &str, start: &str, end: &str) -> Option<Range<usize>> {
    let start_pos = text.find(start)?;
    let end_pos = text.find(end)?;
    let body_start = start_pos + start.len();
    if end_pos < body_start {
        return None;
    }
    Some(body_start..end_pos)
}

/// Raw text strictly between the first occurrence of each marker. Not trimmed.
pub fn extract_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    block_span(text, start, end).map(|span| &text[span])
}

/// Replace the body of a block in place, leaving everything else byte-identical.
pub fn replace_block(text: &str, kind: BlockKind, body: &str) -> Option<String> {
    let (start, end) = kind.markers();
    let span = block_span(text, start, end)?;
    let mut out = String::with_capacity(text.len() + body.len());
    out.push_str(&text[..span.start]);
    out.push_str(body);
    out.push_str(&text[span.end..]);
    Some(out)
}

/// Blocks decoded from one generative response.
#[derive(Debug, Clone, Default)]
pub struct BlockSet {
    blocks: HashMap<BlockKind, String>,
}

impl BlockSet {
    /// Raw block body, if the response contained it
    pub fn get(&self, kind: BlockKind) -> Option<&str> {
        self.blocks.get(&kind).map(String::as_str)
    }

    /// Block body with surrounding whitespace trimmed; blank bodies count as absent
    pub fn trimmed(&self, kind: BlockKind) -> Option<&str> {
        self.get(kind).map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.blocks.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Decode the requested block kinds from a response.
pub fn decode(text: &str, kinds: &[BlockKind]) -> BlockSet {
    let mut blocks = HashMap::new();
    for kind in kinds {
        let (start, end) = kind.markers();
        if let Some(body) = extract_between(text, start, end) {
            blocks.insert(*kind, body.to_string());
        }
    }
    BlockSet { blocks }
}
