use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::persist::{SessionRecord, SessionSnapshot};
use crate::session::{Session, UserId};

/// Sessions keyed by user, each behind its own lock.
///
/// Operations on different users never wait on each other; operations on
/// the same user run one at a time, in the order they take the lock.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: DashMap<UserId, Arc<Mutex<Session>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's slot, created empty on first use. The map guard is
    /// released before the slot is returned.
    fn slot(&self, user: UserId) -> Arc<Mutex<Session>> {
        if let Some(slot) = self.slots.get(&user) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(user).or_default().value())
    }

    /// Run `f` with exclusive access to the user's session.
    pub fn with_session<R>(&self, user: UserId, f: impl FnOnce(&mut Session) -> R) -> R {
        let slot = self.slot(user);
        let mut session = slot.lock();
        f(&mut session)
    }

    /// A copy of the user's session, creating an empty one if needed.
    pub fn get_or_create(&self, user: UserId) -> Session {
        self.with_session(user, |session| session.clone())
    }

    /// Put the user on `page` of `story`.
    pub fn set_cursor(&self, user: UserId, story: &str, page: &str) {
        self.with_session(user, |session| session.set_cursor(story, page));
    }

    /// Clear the user's story and page. The record itself is kept.
    pub fn clear(&self, user: UserId) {
        self.with_session(user, Session::clear);
    }

    /// Whether the user has a record.
    pub fn contains(&self, user: UserId) -> bool {
        self.slots.contains_key(&user)
    }

    /// Every user with a record, sorted.
    pub fn users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.slots.iter().map(|entry| *entry.key()).collect();
        users.sort();
        users
    }

    /// Number of user records.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no user has interacted yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Copy every session into a snapshot, ordered by user.
    pub fn snapshot(&self) -> SessionSnapshot {
        let slots: Vec<(UserId, Arc<Mutex<Session>>)> = self
            .slots
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut records: Vec<SessionRecord> = slots
            .into_iter()
            .map(|(user, slot)| SessionRecord {
                user,
                session: slot.lock().clone(),
            })
            .collect();
        records.sort_by_key(|r| r.user);
        SessionSnapshot::new(records)
    }

    /// Load sessions from a snapshot, replacing those of the same users.
    pub fn restore(&self, snapshot: SessionSnapshot) {
        for record in snapshot.sessions {
            self.with_session(record.user, |session| *session = record.session);
        }
    }

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let store = Self::new();
        store.restore(snapshot);
        store
    }
}
