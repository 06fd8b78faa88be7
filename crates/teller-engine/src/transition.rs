use teller_core::{Catalog, Page, PageBody, Story, StoryError};

use crate::config::EngineConfig;
use crate::display::{DisplayResult, ErrorCode};
use crate::error::TurnError;
use crate::session::{Session, SessionState};

/// Outcome of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Session to store once the step is committed.
    pub next: Session,
    /// Reply for the user.
    pub display: DisplayResult,
}

/// Compute the next session and reply for `input`.
///
/// The current session is never modified; on error the caller keeps it as
/// is, so a rejected input leaves the user where they were.
pub fn transition(
    catalog: &Catalog,
    config: &EngineConfig,
    session: &Session,
    input: &str,
) -> Result<Step, TurnError> {
    // Reset wins over an option that happens to carry the same label.
    if config.is_reset(input) {
        return Ok(Step {
            next: Session::new(),
            display: DisplayResult::Reset {
                message: config.farewell.clone(),
            },
        });
    }

    match session.cursor() {
        None => {
            let story = catalog
                .get(input)
                .ok_or_else(|| TurnError::UnknownStory(input.to_string()))?;
            let page = story.start_page()?;
            let mut step = land(config, story, page);
            if let DisplayResult::Page { intro, .. } = &mut step.display {
                *intro = config.chosen_message(story.title());
            }
            Ok(step)
        }
        Some(cursor) => {
            let story = catalog
                .get(&cursor.story)
                .ok_or_else(|| StoryError::UnknownPage {
                    story: cursor.story.clone(),
                    page: cursor.page.clone(),
                })?;
            let target = story.resolve_option(&cursor.page, input)?;
            let page = story.get_page(target)?;
            Ok(land(config, story, page))
        }
    }
}

/// Arrive on `page`: either keep reading or finish the story.
fn land(config: &EngineConfig, story: &Story, page: &Page) -> Step {
    match &page.body {
        PageBody::Ending(ending) => Step {
            next: Session::new(),
            display: DisplayResult::Ending {
                story: story.title().to_string(),
                title: page.title.clone(),
                description: page.description.clone(),
                ending: ending.clone(),
                message: config.ending_message(ending).to_string(),
            },
        },
        PageBody::Choices(_) => Step {
            next: Session::at(story.title(), page.name.as_str()),
            display: DisplayResult::page(story, page),
        },
    }
}

/// Reply for a recoverable rejection, offering the inputs that would work.
pub(crate) fn rejection(catalog: &Catalog, session: &Session, error: &TurnError) -> DisplayResult {
    let code = match error {
        TurnError::UnknownStory(_) => ErrorCode::UnknownStory,
        TurnError::InvalidChoice(_) | TurnError::UnknownPage(_) => ErrorCode::InvalidChoice,
    };

    let options = match session.state() {
        SessionState::AwaitingStoryChoice => {
            catalog.titles().into_iter().map(str::to_string).collect()
        }
        SessionState::InStory => session
            .cursor()
            .and_then(|c| catalog.get(&c.story)?.get_page(&c.page).ok())
            .map(|page| page.options().iter().map(|o| o.text.clone()).collect())
            .unwrap_or_default(),
    };

    let reason = match error {
        TurnError::UnknownStory(title) => format!("I don't know a story called \"{title}\"."),
        TurnError::InvalidChoice(_) | TurnError::UnknownPage(_) => {
            "That is not one of the options.".to_string()
        }
    };

    DisplayResult::Error {
        code,
        reason,
        options,
    }
}
