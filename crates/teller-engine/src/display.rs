use serde::{Deserialize, Serialize};
use teller_core::{Ending, Page, Story};

/// Which user mistake an error reply reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The text named no known story.
    UnknownStory,
    /// The text matched no option on the current page.
    InvalidChoice,
}

/// What the presentation adapter should show in reply to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayResult {
    /// Ask the user to pick a story.
    PromptStoryList {
        /// Greeting shown above the list.
        message: String,
        /// Story titles, sorted.
        stories: Vec<String>,
    },
    /// A non-terminal page.
    Page {
        /// Title of the story being read.
        story: String,
        /// Acknowledgement shown above the first page of a story.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intro: Option<String>,
        /// Optional page heading.
        title: Option<String>,
        /// Page text.
        description: String,
        /// Option labels in display order.
        options: Vec<String>,
    },
    /// A terminal page. The session has been cleared.
    Ending {
        /// Title of the finished story.
        story: String,
        /// Optional page heading.
        title: Option<String>,
        /// Page text.
        description: String,
        /// Which ending was reached.
        ending: Ending,
        /// Closing message for this kind of ending.
        message: String,
    },
    /// The session was reset.
    Reset {
        /// Acknowledgement text.
        message: String,
    },
    /// The input was rejected; nothing changed.
    Error {
        /// What went wrong.
        code: ErrorCode,
        /// Human-readable explanation.
        reason: String,
        /// Inputs that would have been accepted, for a retry keyboard.
        options: Vec<String>,
    },
}

impl DisplayResult {
    /// Reply for a non-terminal page.
    pub fn page(story: &Story, page: &Page) -> Self {
        Self::Page {
            story: story.title().to_string(),
            intro: None,
            title: page.title.clone(),
            description: page.description.clone(),
            options: page.options().iter().map(|c| c.text.clone()).collect(),
        }
    }

    /// Whether this reply reports a rejected input.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let reply = DisplayResult::Ending {
            story: "The Tower".to_string(),
            title: None,
            description: "You fall.".to_string(),
            ending: Ending::Death,
            message: "Better luck next time, I hope!".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "ending");
        assert_eq!(json["ending"], "death");

        let reply = DisplayResult::Error {
            code: ErrorCode::InvalidChoice,
            reason: "no".to_string(),
            options: vec![],
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["code"], "invalid_choice");
    }
}
