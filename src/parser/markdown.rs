//! Heading-level view of a Markdown document.
//!
//! Headings inside fenced code blocks are ignored, so `# comment` lines in
//! embedded Python never split a section.

/// An ATX heading and the byte range of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub title: String,
    /// Byte offset where the heading line starts
    pub start: usize,
    /// Byte offset just past the heading line, including its newline
    pub end: usize,
}

impl Heading {
    /// The heading as written, e.g. `## Capabilities`
    pub fn marker(&self) -> String {
        format!("{} {}", "#".repeat(self.level as usize), self.title)
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn trimmed_content(&self) -> String {
        self.content.trim().to_string()
    }
}

/// Level and title of a heading line, if the line is one.
pub fn parse_heading(line: &str) -> Option<(u8, String)> {
    let line = line.trim_end_matches(['\n', '\r']);
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level as u8, rest.trim().to_string()))
}

/// Tracks whether the current line is inside a fenced code block.
#[derive(Debug, Default)]
struct FenceState {
    open: Option<(char, usize)>,
}

impl FenceState {
    /// Feed one line; returns true when the line is fenced content or a fence marker.
    fn consume(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let fence_char = match trimmed.chars().next() {
            Some(c @ ('`' | '~')) => c,
            _ => return self.open.is_some(),
        };
        let run = trimmed.chars().take_while(|&c| c == fence_char).count();
        if run < 3 {
            return self.open.is_some();
        }
        match self.open {
            None => {
                self.open = Some((fence_char, run));
                true
            }
            Some((open_char, open_run)) if open_char == fence_char && run >= open_run => {
                if trimmed[run..].trim().is_empty() {
                    self.open = None;
                }
                true
            }
            Some(_) => true,
        }
    }
}

/// All headings outside fenced code blocks, in document order.
pub fn headings(text: &str) -> Vec<Heading> {
    let mut found = Vec::new();
    let mut fence = FenceState::default();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if fence.consume(line) {
            continue;
        }
        if let Some((level, title)) = parse_heading(line) {
            found.push(Heading {
                level,
                title,
                start,
                end: offset,
            });
        }
    }

    found
}

/// Split a document into headed sections. Text before the first heading is dropped.
pub fn sections(text: &str) -> Vec<Section> {
    let found = headings(text);
    found
        .iter()
        .enumerate()
        .map(|(idx, heading)| {
            let body_end = found.get(idx + 1).map_or(text.len(), |next| next.start);
            Section {
                level: heading.level,
                title: heading.title.clone(),
                content: text[heading.end..body_end].to_string(),
            }
        })
        .collect()
}
