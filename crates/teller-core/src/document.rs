use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::ValidationProblem;
use crate::story::{Choice, Ending, Page, PageBody, Story};

/// A story as written by its author, before validation.
///
/// The title sits next to the page records, which are keyed by page name:
///
/// ```yaml
/// title: The house that killed Sam
/// start:
///   description: You are in a house.
///   options:
///     - text: Turn on the light
///       page: death-by-light
/// death-by-light:
///   description: You turn on the light...
///   ending: death
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StoryDocument {
    /// Story title, unique across the catalog.
    pub title: String,
    /// Page records keyed by page name.
    #[serde(flatten)]
    pub pages: BTreeMap<String, PageRecord>,
}

/// One page as written in a story document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRecord {
    /// Optional heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Display text.
    pub description: String,
    /// Options, for branching pages.
    #[serde(default)]
    pub options: Vec<Choice>,
    /// Ending tag, for terminal pages.
    #[serde(default)]
    pub ending: Option<Ending>,
}

impl PageRecord {
    fn into_page(self, name: String) -> Result<Page, ValidationProblem> {
        let body = match (self.options.is_empty(), self.ending) {
            (false, None) => PageBody::Choices(self.options),
            (true, Some(ending)) => PageBody::Ending(ending),
            (false, Some(_)) => return Err(ValidationProblem::OptionsAndEnding(name)),
            (true, None) => return Err(ValidationProblem::DeadEnd(name)),
        };
        Ok(Page {
            name,
            title: self.title,
            description: self.description,
            body,
        })
    }
}

impl StoryDocument {
    /// Validate the document and turn it into a [`Story`].
    pub fn into_story(self) -> Result<Story, ValidationProblem> {
        let pages = self
            .pages
            .into_iter()
            .map(|(name, record)| record.into_page(name))
            .collect::<Result<Vec<_>, _>>()?;
        Story::new(self.title, pages)
    }
}

/// Serialization format of a story document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension. Returns `None` for files that
    /// are not story documents.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse a document. The error is a human-readable parser message.
    pub fn parse(self, source: &str) -> Result<StoryDocument, String> {
        match self {
            Self::Yaml => parse_yaml(source).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        }
    }
}

fn parse_yaml(source: &str) -> Result<StoryDocument, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(source)?;
    serde_yaml::from_value(scalars_as_text(value))
}

/// Numbered sections (`2:`, `page: 2`) are page names, not numbers.
fn scalars_as_text(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(scalars_as_text).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (scalars_as_text(k), scalars_as_text(v)))
                .collect(),
        ),
        other => other,
    }
}
