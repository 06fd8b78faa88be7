use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one chat with one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a user inside a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Title of the active story.
    pub story: String,
    /// Name of the current page.
    pub page: String,
}

/// Where a user is in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No story is active; the next message should name one.
    AwaitingStoryChoice,
    /// Reading a story; the next message should be one of the page's options.
    InStory,
}

/// One user's conversation state.
///
/// The story and page are stored together, so a page is set exactly when a
/// story is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    cursor: Option<Cursor>,
}

impl Session {
    /// An empty session awaiting a story choice.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session positioned on `page` of `story`.
    pub fn at(story: impl Into<String>, page: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_cursor(story, page);
        session
    }

    /// Current state of the conversation.
    pub fn state(&self) -> SessionState {
        if self.cursor.is_some() {
            SessionState::InStory
        } else {
            SessionState::AwaitingStoryChoice
        }
    }

    /// The cursor, if a story is active.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Title of the active story.
    pub fn active_story(&self) -> Option<&str> {
        self.cursor.as_ref().map(|c| c.story.as_str())
    }

    /// Name of the current page.
    pub fn current_page(&self) -> Option<&str> {
        self.cursor.as_ref().map(|c| c.page.as_str())
    }

    /// Move to `page` of `story`.
    pub fn set_cursor(&mut self, story: impl Into<String>, page: impl Into<String>) {
        self.cursor = Some(Cursor {
            story: story.into(),
            page: page.into(),
        });
    }

    /// Forget the active story.
    pub fn clear(&mut self) {
        self.cursor = None;
    }
}
