//! Line scanner for command documents.
//!
//! The document is read line by line. Every line is classified as a fence
//! line, a heading, or text, and a [`FenceTracker`] decides whether the line
//! sits inside fenced content. Only headings outside fences drive the
//! [`Segmenter`], a two-state machine:
//!
//! | state   | input                                        | next                     |
//! |---------|----------------------------------------------|--------------------------|
//! | Outside | command heading                              | Inside(new)              |
//! | Inside  | command heading                              | emit, Inside(new)        |
//! | Inside  | other `##` heading, [`BoundaryRule::CommandHeadings`] | Inside (body line) |
//! | Inside  | other `##` heading, [`BoundaryRule::SameLevel`]       | emit, Outside      |
//! | Inside  | end of document                              | emit                     |
//!
//! Fences do not follow CommonMark: inside a fence, a fence line with an info
//! string opens a nested level instead of being content. The generated
//! module's document reader applies the same line rules, so a block found
//! here is the block found at run time.
//!
//! # Examples
//!
//! ```
//! use toolgen_extract::{ScanOptions, segment};
//!
//! let text = "# Commands\n\n## /flow-status\nShow status\n\n## /flow-next\nAdvance\n";
//! let sections = segment(text, &ScanOptions::default());
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].name, "/flow-status");
//! assert_eq!(sections[0].line, 3);
//! assert_eq!(sections[1].body, "Advance\n");
//! ```

use toolgen_core::{BoundaryRule, SourceConfig};

/// Default command heading prefix.
pub const DEFAULT_COMMAND_PREFIX: &str = "/flow-";

/// Default info string of instruction blocks.
pub const DEFAULT_INSTRUCTION_LANGUAGE: &str = "markdown";

/// Options controlling segmentation and instruction lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Prefix a level-2 heading must start with to open a command section
    pub command_prefix: String,

    /// Whether non-command level-2 headings end a section
    pub boundary: BoundaryRule,

    /// Info string identifying a section's instruction block
    pub instruction_language: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            boundary: BoundaryRule::default(),
            instruction_language: DEFAULT_INSTRUCTION_LANGUAGE.to_string(),
        }
    }
}

impl From<&SourceConfig> for ScanOptions {
    fn from(config: &SourceConfig) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            boundary: config.boundary,
            instruction_language: config.instruction_language.clone(),
        }
    }
}

/// Classification of one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A code fence delimiter (three or more backticks or tildes)
    Fence {
        /// Trimmed info string after the delimiter, empty for a bare fence
        info: &'a str,
    },
    /// An ATX heading
    Heading {
        /// Number of leading `#` characters
        level: usize,
        /// Trimmed heading text
        text: &'a str,
    },
    /// Anything else
    Text,
}

/// Classifies a single line.
///
/// # Examples
///
/// ```
/// use toolgen_extract::{LineKind, classify};
///
/// assert_eq!(classify("```markdown"), LineKind::Fence { info: "markdown" });
/// assert_eq!(
///     classify("## /flow-init"),
///     LineKind::Heading { level: 2, text: "/flow-init" }
/// );
/// assert_eq!(classify("#hashtag"), LineKind::Text);
/// ```
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    let unindented = line.trim_start_matches(' ');
    if line.len() - unindented.len() <= 3
        && let Some(info) = fence_info(unindented)
    {
        return LineKind::Fence { info };
    }

    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&level) {
        let rest = &line[level..];
        if rest.is_empty() || rest.starts_with([' ', '\t']) {
            return LineKind::Heading {
                level,
                text: rest.trim(),
            };
        }
    }

    LineKind::Text
}

fn fence_info(line: &str) -> Option<&str> {
    let marker = line.chars().next().filter(|&c| c == '`' || c == '~')?;
    let run = line.chars().take_while(|&c| c == marker).count();
    if run < 3 {
        return None;
    }

    let info = line[run..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(info)
}

/// Returns `true` if `text` names a command: the prefix followed by one or
/// more word characters or hyphens, and nothing else.
///
/// # Examples
///
/// ```
/// use toolgen_extract::is_command_heading;
///
/// assert!(is_command_heading("/flow-task-add", "/flow-"));
/// assert!(!is_command_heading("/flow-", "/flow-"));
/// assert!(!is_command_heading("/flow-task add", "/flow-"));
/// assert!(!is_command_heading("Overview", "/flow-"));
/// ```
#[must_use]
pub fn is_command_heading(text: &str, prefix: &str) -> bool {
    text.strip_prefix(prefix).is_some_and(|rest| {
        !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    })
}

/// Balanced fence depth tracking.
///
/// Outside a fence any fence line opens one. Inside, a fence line with an
/// info string opens a nested level and a bare fence line closes one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceTracker {
    depth: usize,
}

impl FenceTracker {
    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` while inside fenced content.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// Feeds one classified line.
    ///
    /// Returns `true` if the line is fenced: a fence delimiter or content
    /// between delimiters.
    pub const fn observe(&mut self, kind: &LineKind<'_>) -> bool {
        match kind {
            LineKind::Fence { info } => {
                if self.depth == 0 || !info.is_empty() {
                    self.depth += 1;
                } else {
                    self.depth -= 1;
                }
                true
            }
            LineKind::Heading { .. } | LineKind::Text => self.depth > 0,
        }
    }
}

/// One command section: the heading and every body line up to the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Command name, the trimmed heading text
    pub name: String,

    /// 1-based line number of the heading
    pub line: usize,

    /// Body lines after the heading, each terminated by `\n`
    pub body: String,
}

impl Section {
    fn open(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
            body: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// Returns the section's instruction block for `language`.
    #[must_use]
    pub fn instruction_block(&self, language: &str) -> Option<String> {
        instruction_block(&self.body, language)
    }
}

#[derive(Debug)]
enum State {
    Outside,
    Inside(Section),
}

/// Two-state segmentation machine.
///
/// Feed lines in order with [`Segmenter::feed`], then call
/// [`Segmenter::finish`] to collect the sections.
#[derive(Debug)]
pub struct Segmenter<'a> {
    options: &'a ScanOptions,
    fences: FenceTracker,
    state: State,
    sections: Vec<Section>,
    line_number: usize,
}

impl<'a> Segmenter<'a> {
    /// Creates a segmenter in the `Outside` state.
    #[must_use]
    pub const fn new(options: &'a ScanOptions) -> Self {
        Self {
            options,
            fences: FenceTracker { depth: 0 },
            state: State::Outside,
            sections: Vec::new(),
            line_number: 0,
        }
    }

    /// Returns `true` while a section is open.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        matches!(self.state, State::Inside(_))
    }

    /// Feeds the next document line (without its line terminator).
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;

        let kind = classify(line);
        let fenced = self.fences.observe(&kind);
        let heading = match kind {
            LineKind::Heading { level: 2, text } if !fenced => Some(text),
            _ => None,
        };
        let command = heading.filter(|text| is_command_heading(text, &self.options.command_prefix));

        let state = std::mem::replace(&mut self.state, State::Outside);
        self.state = match (state, heading, command) {
            (State::Outside, _, Some(name)) => State::Inside(Section::open(name, self.line_number)),
            (State::Outside, _, None) => State::Outside,
            (State::Inside(section), _, Some(name)) => {
                self.sections.push(section);
                State::Inside(Section::open(name, self.line_number))
            }
            (State::Inside(section), Some(_), None)
                if self.options.boundary == BoundaryRule::SameLevel =>
            {
                self.sections.push(section);
                State::Outside
            }
            (State::Inside(mut section), _, None) => {
                section.push_line(line);
                State::Inside(section)
            }
        };
    }

    /// Ends the document and returns the sections in document order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Section> {
        if let State::Inside(section) = self.state {
            self.sections.push(section);
        }
        self.sections
    }
}

/// Splits `text` into command sections.
#[must_use]
pub fn segment(text: &str, options: &ScanOptions) -> Vec<Section> {
    let mut segmenter = Segmenter::new(options);
    for line in text.lines() {
        segmenter.feed(line);
    }
    segmenter.finish()
}

/// Returns the content of the first fenced block in `body` whose info string
/// starts with `language`.
///
/// Content is every line between the opening fence and its balanced closing
/// fence, each followed by `\n`. An unterminated block yields `None`.
///
/// # Examples
///
/// ```
/// use toolgen_extract::instruction_block;
///
/// let body = "Intro\n```markdown\nstep 1\n```bash\nls\n```\n```\n";
/// assert_eq!(
///     instruction_block(body, "markdown").as_deref(),
///     Some("step 1\n```bash\nls\n```\n")
/// );
/// ```
#[must_use]
pub fn instruction_block(body: &str, language: &str) -> Option<String> {
    let mut fences = FenceTracker::default();
    let mut capturing = false;
    let mut content = String::new();

    for line in body.lines() {
        let kind = classify(line);
        let opens_block = !fences.is_open()
            && matches!(kind, LineKind::Fence { info } if info.split_whitespace().next() == Some(language));
        fences.observe(&kind);

        if capturing {
            if !fences.is_open() {
                return Some(content);
            }
            content.push_str(line);
            content.push('\n');
        } else if opens_block {
            capturing = true;
        }
    }

    None
}
