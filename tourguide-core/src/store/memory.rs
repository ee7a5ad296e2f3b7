use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::{UserHandle, UserStore};
use crate::{User, UserId};

/// In-memory [`UserStore`] backed by a hash map of per-user mutexes.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, UserHandle>>,
}

impl MemoryUserStore {
    /// Create a store pre-populated with `users`; later duplicates are ignored.
    pub fn with_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = User>,
    {
        let store = Self::default();
        for user in users {
            store.put(user);
        }
        store
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Report whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, id: &UserId) -> Option<UserHandle> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn put(&self, user: User) -> bool {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(user.id()) {
            return false;
        }
        users.insert(user.id().clone(), Arc::new(Mutex::new(user)));
        true
    }

    fn list(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort_unstable();
        ids
    }
}
