//! The traversal engine: one entry point per inbound message.

use std::sync::Arc;

use teller_core::Catalog;

use crate::config::EngineConfig;
use crate::display::DisplayResult;
use crate::error::{EngineError, EngineResult, TurnError};
use crate::session::{SessionState, UserId};
use crate::store::SessionStore;
use crate::transition::{rejection, transition};

/// Drives every user's walk through the shared story catalog.
///
/// `Engine` is `Send + Sync`; share one instance between all message
/// handlers.
#[derive(Debug)]
pub struct Engine {
    catalog: Arc<Catalog>,
    sessions: SessionStore,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with no sessions.
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self::with_sessions(catalog, config, SessionStore::new())
    }

    /// Create an engine over existing sessions, e.g. restored from a snapshot.
    pub fn with_sessions(catalog: Arc<Catalog>, config: EngineConfig, sessions: SessionStore) -> Self {
        Self {
            catalog,
            sessions,
            config,
        }
    }

    /// The story catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Where the user currently is.
    pub fn state(&self, user: UserId) -> SessionState {
        self.sessions.get_or_create(user).state()
    }

    /// Greet the user and list the stories. Leaves any active story.
    pub fn start(&self, user: UserId) -> DisplayResult {
        self.sessions.clear(user);
        tracing::debug!(%user, "conversation started");
        DisplayResult::PromptStoryList {
            message: self.config.greeting.clone(),
            stories: self.catalog.titles().into_iter().map(str::to_string).collect(),
        }
    }

    /// Clear sessions whose cursor no longer resolves against the catalog,
    /// such as ones restored from a snapshot taken before a story changed.
    /// Returns how many were cleared.
    pub fn prune_stale_sessions(&self) -> usize {
        self.sessions
            .users()
            .into_iter()
            .filter(|&user| self.prune_session(user))
            .count()
    }

    /// Clear the user's cursor if it no longer resolves. The check and the
    /// clear happen under the user's lock, so a turn cannot slip between them.
    fn prune_session(&self, user: UserId) -> bool {
        self.sessions.with_session(user, |session| {
            let Some(cursor) = session.cursor() else {
                return false;
            };
            let resolves = self
                .catalog
                .get(&cursor.story)
                .is_some_and(|story| story.get_page(&cursor.page).is_ok_and(|p| !p.is_terminal()));
            if resolves {
                return false;
            }
            tracing::warn!(%user, ?cursor, "clearing stale session");
            session.clear();
            true
        })
    }

    /// Handle one message from `user`.
    ///
    /// User mistakes come back as [`DisplayResult::Error`] and leave the
    /// session untouched. `Err` is reserved for sessions that no longer
    /// match the catalog, which is a bug rather than user error.
    pub fn on_user_choice(&self, user: UserId, text: &str) -> EngineResult<DisplayResult> {
        self.sessions.with_session(user, |session| {
            match transition(&self.catalog, &self.config, session, text) {
                Ok(step) => {
                    tracing::debug!(
                        %user,
                        from = ?session.cursor(),
                        to = ?step.next.cursor(),
                        "transition"
                    );
                    *session = step.next;
                    Ok(step.display)
                }
                Err(TurnError::UnknownPage(source)) => {
                    tracing::error!(%user, cursor = ?session.cursor(), error = %source, "session does not match catalog");
                    Err(EngineError::Inconsistent { user, source })
                }
                Err(error) => {
                    tracing::debug!(%user, %error, "input rejected");
                    Ok(rejection(&self.catalog, session, &error))
                }
            }
        })
    }
}
