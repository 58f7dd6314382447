//! Line-oriented markdown builders.

use std::fmt::Display;

use crate::record::{Preview, Record};

/// Heading for a record, combining a name and an id.
pub fn heading(level: usize, name: Option<String>, id: Option<String>) -> String {
    format!(
        "{} {} (ID: {})",
        "#".repeat(level),
        name.unwrap_or_else(|| "Unnamed".to_string()),
        id.unwrap_or_else(|| "N/A".to_string())
    )
}

/// One formatting unit: the lines describing a single record.
#[derive(Debug, Default)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            lines: vec![heading.into()],
        }
    }

    /// Heading from the record's `name_keys` (first present wins) and `id`.
    pub fn for_record(level: usize, record: &Record<'_>, name_keys: &[&str]) -> Self {
        Self::new(heading(level, record.first_text(name_keys), record.text("id")))
    }

    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// `**label**: value`, only when a value exists.
    pub fn field(&mut self, label: &str, value: Option<impl Display>) -> &mut Self {
        if let Some(v) = value {
            self.lines.push(format!("**{}**: {}", label, v));
        }
        self
    }

    /// Bounded preview line plus an `...and N more` line when truncated.
    pub fn preview(&mut self, label: &str, preview: Option<Preview>) -> &mut Self {
        if let Some(p) = preview {
            self.lines.push(format!("**{}**: {}", label, p.shown));
            if let Some(more) = p.more_suffix() {
                self.lines.push(format!("  *{}*", more));
            }
        }
        self
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// A whole markdown document: title, summary, record blocks and optional footer.
#[derive(Debug)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn titled(title: impl Display) -> Self {
        Self {
            lines: vec![format!("# {}", title), String::new()],
        }
    }

    /// A paragraph followed by a blank line.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self.lines.push(String::new());
        self
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    /// `## title` section header.
    pub fn section(self, title: impl Display) -> Self {
        self.line(format!("## {}", title))
    }

    pub fn blocks<I: IntoIterator<Item = String>>(mut self, blocks: I) -> Self {
        for block in blocks {
            self.lines.push(block);
            self.lines.push(String::new());
        }
        self
    }

    /// Italic advisory footer, e.g. a next-page hint.
    pub fn footer(self, hint: Option<String>) -> Self {
        match hint {
            Some(h) => self.line(format!("*{}*", h)),
            None => self,
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
