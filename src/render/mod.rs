//! Rendering of search envelopes to JSON or markdown
//!
//! A single markdown renderer is driven by a [`MarkdownLayout`]; the two
//! presets reproduce the historical outputs of the plain and detailed
//! search entry points.

use crate::error::ConfigurationError;
use crate::results::SearchEnvelope;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Literal emitted in markdown when there is nothing to list
pub const NO_RESULTS: &str = "No results found.";

/// Rendered output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(ConfigurationError::invalid(
                "format",
                format!("expected `json` or `markdown`, got `{}`", other),
            )),
        }
    }
}

/// JSON whitespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Pretty,
    Compact,
}

/// Named markdown layouts, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Numbered list with bold links
    List,
    /// One subheading per source, query in the title
    Detailed,
}

impl LayoutKind {
    pub fn layout(&self) -> MarkdownLayout {
        match self {
            Self::List => MarkdownLayout::list(),
            Self::Detailed => MarkdownLayout::detailed(),
        }
    }
}

/// How each source is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStyle {
    /// `1. **[title](url)**` then the content indented on the next line
    BoldList,
    /// `### 1. [title](url)` then the content on the next line
    Heading,
}

/// Parameters of the markdown renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLayout {
    /// Append `: <query>` to the top heading
    pub title_with_query: bool,
    /// Heading text of the answer section
    pub answer_heading: &'static str,
    /// Blank line between the answer heading and the answer
    pub answer_spaced: bool,
    pub source_style: SourceStyle,
}

impl MarkdownLayout {
    /// Layout used by the plain search entry point
    pub fn list() -> Self {
        Self {
            title_with_query: false,
            answer_heading: "Answer",
            answer_spaced: true,
            source_style: SourceStyle::BoldList,
        }
    }

    /// Layout used by the detailed search entry point
    pub fn detailed() -> Self {
        Self {
            title_with_query: true,
            answer_heading: "Summary",
            answer_spaced: false,
            source_style: SourceStyle::Heading,
        }
    }
}

/// Render an envelope as markdown
pub fn render_markdown(envelope: &SearchEnvelope, layout: &MarkdownLayout) -> String {
    let mut md = String::new();

    if layout.title_with_query {
        md.push_str(&format!("# Search Results: {}\n\n", envelope.query));
    } else {
        md.push_str("# Search Results\n\n");
    }

    if let Some(answer) = &envelope.answer {
        let gap = if layout.answer_spaced { "\n" } else { "" };
        md.push_str(&format!(
            "## {}\n{}{}\n\n",
            layout.answer_heading, gap, answer
        ));
    }

    if envelope.results.is_empty() {
        md.push_str(NO_RESULTS);
        return md;
    }

    md.push_str("## Sources\n\n");
    for (idx, result) in envelope.results.iter().enumerate() {
        let n = idx + 1;
        match layout.source_style {
            SourceStyle::BoldList => {
                md.push_str(&format!(
                    "{}. **[{}]({})**\n   {}\n\n",
                    n, result.title, result.url, result.content
                ));
            }
            SourceStyle::Heading => {
                md.push_str(&format!(
                    "### {}. [{}]({})\n{}\n\n",
                    n, result.title, result.url, result.content
                ));
            }
        }
    }

    md
}

/// Render an envelope as JSON
pub fn render_json(envelope: &SearchEnvelope, style: JsonStyle) -> serde_json::Result<String> {
    match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(envelope),
        JsonStyle::Compact => serde_json::to_string(envelope),
    }
}

/// Render according to `format`
pub fn render(
    envelope: &SearchEnvelope,
    format: OutputFormat,
    layout: &MarkdownLayout,
    style: JsonStyle,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => render_json(envelope, style),
        OutputFormat::Markdown => Ok(render_markdown(envelope, layout)),
    }
}
