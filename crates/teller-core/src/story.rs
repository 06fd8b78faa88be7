use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult, ValidationProblem};

/// Name of the page every story begins on.
pub const START_PAGE: &str = "start";

/// A labeled choice on a page leading to another page of the same story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label the user selects. Matched by exact string equality.
    pub text: String,
    /// Name of the target page.
    pub page: String,
}

impl Choice {
    /// Create a choice with the given label and target page.
    pub fn new(text: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: page.into(),
        }
    }
}

/// How a story ends on a terminal page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ending {
    /// The reader won.
    Won,
    /// The reader died.
    Death,
    /// Any other author-defined tag, kept verbatim.
    Other(String),
}

impl Ending {
    /// The tag as written in a story document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Won => "won",
            Self::Death => "death",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Ending {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "won" => Self::Won,
            "death" => Self::Death,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Ending {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Ending> for String {
    fn from(ending: Ending) -> Self {
        ending.as_str().to_string()
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What follows a page: more choices, or the end of the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// Ordered options. Must be non-empty in a validated story.
    Choices(Vec<Choice>),
    /// Terminal page.
    Ending(Ending),
}

/// One narrative unit of a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page name, unique within its story.
    pub name: String,
    /// Optional heading shown above the description.
    pub title: Option<String>,
    /// Display text. May contain markdown.
    pub description: String,
    /// Options or ending.
    pub body: PageBody,
}

impl Page {
    /// Create a branching page with no options yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            body: PageBody::Choices(Vec::new()),
        }
    }

    /// Create a terminal page.
    pub fn ending(
        name: impl Into<String>,
        description: impl Into<String>,
        ending: impl Into<Ending>,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            body: PageBody::Ending(ending.into()),
        }
    }

    /// Set the heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an option. Turns a terminal page back into a branching one.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        match &mut self.body {
            PageBody::Choices(choices) => choices.push(choice),
            PageBody::Ending(_) => self.body = PageBody::Choices(vec![choice]),
        }
        self
    }

    /// Options in display order. Empty on terminal pages.
    pub fn options(&self) -> &[Choice] {
        match &self.body {
            PageBody::Choices(choices) => choices,
            PageBody::Ending(_) => &[],
        }
    }

    /// The ending tag, if this is a terminal page.
    pub fn ending_tag(&self) -> Option<&Ending> {
        match &self.body {
            PageBody::Ending(ending) => Some(ending),
            PageBody::Choices(_) => None,
        }
    }

    /// Whether this page ends the story.
    pub fn is_terminal(&self) -> bool {
        matches!(self.body, PageBody::Ending(_))
    }

    /// Resolve the user's text to a target page name.
    ///
    /// Options are scanned in order and the first one whose text is exactly
    /// equal to `choice_text` wins. No trimming or case folding is applied.
    pub fn resolve_option(&self, choice_text: &str) -> StoryResult<&str> {
        self.options()
            .iter()
            .find(|c| c.text == choice_text)
            .map(|c| c.page.as_str())
            .ok_or_else(|| StoryError::InvalidChoice {
                page: self.name.clone(),
                choice: choice_text.to_string(),
            })
    }
}

/// A validated story: a directed graph of pages starting at `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    title: String,
    pages: BTreeMap<String, Page>,
}

impl Story {
    /// Build and validate a story.
    ///
    /// Fails if the title is empty, a page name repeats, there is no `start`
    /// page, a page is a dead end, or an option leads nowhere.
    pub fn new(
        title: impl Into<String>,
        pages: impl IntoIterator<Item = Page>,
    ) -> Result<Self, ValidationProblem> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationProblem::EmptyTitle);
        }

        let mut by_name = BTreeMap::new();
        for page in pages {
            if by_name.contains_key(&page.name) {
                return Err(ValidationProblem::DuplicatePage(page.name));
            }
            by_name.insert(page.name.clone(), page);
        }

        let story = Self {
            title,
            pages: by_name,
        };
        story.validate()?;
        Ok(story)
    }

    fn validate(&self) -> Result<(), ValidationProblem> {
        if !self.pages.contains_key(START_PAGE) {
            return Err(ValidationProblem::MissingStart);
        }

        for page in self.pages.values() {
            if let PageBody::Choices(choices) = &page.body {
                if choices.is_empty() {
                    return Err(ValidationProblem::DeadEnd(page.name.clone()));
                }
                if let Some(dangling) = choices.iter().find(|c| !self.pages.contains_key(&c.page)) {
                    return Err(ValidationProblem::DanglingOption {
                        page: page.name.clone(),
                        option: dangling.text.clone(),
                        target: dangling.page.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The story title, which is also its catalog key.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Look up a page by name.
    pub fn get_page(&self, name: &str) -> StoryResult<&Page> {
        self.pages.get(name).ok_or_else(|| StoryError::UnknownPage {
            story: self.title.clone(),
            page: name.to_string(),
        })
    }

    /// The entry page.
    pub fn start_page(&self) -> StoryResult<&Page> {
        self.get_page(START_PAGE)
    }

    /// Resolve `choice_text` against the options of page `page_name`.
    pub fn resolve_option(&self, page_name: &str, choice_text: &str) -> StoryResult<&str> {
        self.get_page(page_name)?.resolve_option(choice_text)
    }

    /// All pages, ordered by name.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Terminal pages, ordered by name.
    pub fn endings(&self) -> impl Iterator<Item = &Page> {
        self.pages.values().filter(|p| p.is_terminal())
    }
}
