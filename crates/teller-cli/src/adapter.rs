//! Chat presentation: engine replies become text plus a reply keyboard, and
//! raw chat lines become engine calls.

use teller_engine::{DisplayResult, UserId};

/// A chat message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body, in markdown.
    pub text: String,
    /// One button per row, as chat reply keyboards show them.
    pub keyboard: Vec<Vec<String>>,
}

fn rows(labels: impl IntoIterator<Item = String>) -> Vec<Vec<String>> {
    labels.into_iter().map(|label| vec![label]).collect()
}

/// Render an engine reply.
pub fn render(result: &DisplayResult, reset_keyword: &str) -> Reply {
    match result {
        DisplayResult::PromptStoryList { message, stories } => Reply {
            text: message.clone(),
            keyboard: rows(
                stories
                    .iter()
                    .cloned()
                    .chain(std::iter::once(reset_keyword.to_string())),
            ),
        },
        DisplayResult::Page {
            intro,
            title,
            description,
            options,
            ..
        } => Reply {
            text: match intro {
                Some(intro) => format!("{intro}\n\n{}", with_heading(title.as_deref(), description)),
                None => with_heading(title.as_deref(), description),
            },
            keyboard: rows(options.iter().cloned()),
        },
        DisplayResult::Ending {
            title,
            description,
            message,
            ..
        } => Reply {
            text: format!("{}\n\n{message}", with_heading(title.as_deref(), description)),
            keyboard: rows([reset_keyword.to_string()]),
        },
        DisplayResult::Reset { message } => Reply {
            text: message.clone(),
            keyboard: Vec::new(),
        },
        DisplayResult::Error {
            reason, options, ..
        } => Reply {
            text: reason.clone(),
            keyboard: rows(options.iter().cloned()),
        },
    }
}

fn with_heading(title: Option<&str>, description: &str) -> String {
    match title {
        Some(title) => format!("**{title}**\n{description}"),
        None => description.to_string(),
    }
}

/// What an inbound chat line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// The `/start` command.
    Start,
    /// Free text: a story title, an option label or the reset keyword.
    Text(String),
}

/// An inbound line, optionally addressed to a specific chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Chat named by an `@<id>` prefix.
    pub chat: Option<UserId>,
    /// The request.
    pub inbound: Inbound,
}

/// Parse a line typed into the terminal chat.
///
/// `@<id> <text>` speaks as chat `<id>`. The text is otherwise passed on
/// untouched, since option labels are matched exactly.
pub fn route(line: &str) -> Message {
    let (chat, text) = match line
        .strip_prefix('@')
        .and_then(|rest| rest.split_once(' '))
        .and_then(|(id, text)| id.parse::<i64>().ok().map(|id| (UserId(id), text)))
    {
        Some((chat, text)) => (Some(chat), text),
        None => (None, line),
    };

    let inbound = if text == "/start" {
        Inbound::Start
    } else {
        Inbound::Text(text.to_string())
    };

    Message { chat, inbound }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_core::Ending;
    use teller_engine::ErrorCode;

    fn labels(reply: &Reply) -> Vec<&str> {
        reply.keyboard.iter().flatten().map(String::as_str).collect()
    }

    #[test]
    fn story_list_offers_titles_and_done() {
        let reply = render(
            &DisplayResult::PromptStoryList {
                message: "Hi!".to_string(),
                stories: vec!["A".to_string(), "B".to_string()],
            },
            "Done",
        );
        assert_eq!(reply.text, "Hi!");
        assert_eq!(labels(&reply), ["A", "B", "Done"]);
        assert!(reply.keyboard.iter().all(|row| row.len() == 1));
    }

    #[test]
    fn page_with_heading() {
        let reply = render(
            &DisplayResult::Page {
                story: "S".to_string(),
                intro: None,
                title: Some("The House".to_string()),
                description: "It is dark.".to_string(),
                options: vec!["Turn on the light".to_string(), "Offer food".to_string()],
            },
            "Done",
        );
        assert_eq!(reply.text, "**The House**\nIt is dark.");
        assert_eq!(labels(&reply), ["Turn on the light", "Offer food"]);
    }

    #[test]
    fn intro_precedes_first_page() {
        let reply = render(
            &DisplayResult::Page {
                story: "S".to_string(),
                intro: Some("You have chosen S.".to_string()),
                title: None,
                description: "It is dark.".to_string(),
                options: vec!["Wait".to_string()],
            },
            "Done",
        );
        assert_eq!(reply.text, "You have chosen S.\n\nIt is dark.");
    }

    #[test]
    fn ending_offers_done_only() {
        let reply = render(
            &DisplayResult::Ending {
                story: "S".to_string(),
                title: None,
                description: "You fall.".to_string(),
                ending: Ending::Death,
                message: "Better luck next time, I hope!".to_string(),
            },
            "Done",
        );
        assert_eq!(reply.text, "You fall.\n\nBetter luck next time, I hope!");
        assert_eq!(labels(&reply), ["Done"]);
    }

    #[test]
    fn reset_and_error() {
        let reply = render(
            &DisplayResult::Reset {
                message: "Until next time!".to_string(),
            },
            "Done",
        );
        assert!(reply.keyboard.is_empty());

        let reply = render(
            &DisplayResult::Error {
                code: ErrorCode::InvalidChoice,
                reason: "That is not one of the options.".to_string(),
                options: vec!["Back".to_string()],
            },
            "Done",
        );
        assert_eq!(reply.text, "That is not one of the options.");
        assert_eq!(labels(&reply), ["Back"]);
    }

    #[test]
    fn route_plain_text_and_start() {
        assert_eq!(
            route("/start"),
            Message {
                chat: None,
                inbound: Inbound::Start
            }
        );
        assert_eq!(
            route(" Offer food "),
            Message {
                chat: None,
                inbound: Inbound::Text(" Offer food ".to_string())
            }
        );
    }

    #[test]
    fn route_addressed_lines() {
        assert_eq!(
            route("@-5 /start"),
            Message {
                chat: Some(UserId(-5)),
                inbound: Inbound::Start
            }
        );
        assert_eq!(
            route("@2 Turn on the light"),
            Message {
                chat: Some(UserId(2)),
                inbound: Inbound::Text("Turn on the light".to_string())
            }
        );
        assert_eq!(
            route("@home is where"),
            Message {
                chat: None,
                inbound: Inbound::Text("@home is where".to_string())
            }
        );
    }
}
