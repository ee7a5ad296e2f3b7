//! User storage with per-user locking.
//!
//! The `UserStore` trait hands out shared [`UserHandle`]s. Each handle wraps
//! one user in its own mutex, so operations on one user serialise while
//! operations on different users proceed independently. Stores only guard
//! their index while looking up or inserting a handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{User, UserId};

mod memory;

pub use memory::MemoryUserStore;

/// Shared, individually locked user record.
pub type UserHandle = Arc<Mutex<User>>;

/// Keyed storage for users.
///
/// # Examples
///
/// ```rust
/// use tourguide_core::{MemoryUserStore, User, UserId, UserStore, lock_user};
///
/// let store = MemoryUserStore::default();
/// assert!(store.put(User::new(UserId::new("jon"), "Jon")));
/// assert!(!store.put(User::new(UserId::new("jon"), "Impostor")));
///
/// let handle = store.get(&UserId::new("jon")).expect("stored user");
/// assert_eq!(lock_user(&handle).name(), "Jon");
/// assert_eq!(store.list(), vec![UserId::new("jon")]);
/// ```
pub trait UserStore: Send + Sync {
    /// Look up a user's handle.
    fn get(&self, id: &UserId) -> Option<UserHandle>;

    /// Insert `user` unless its id is already present.
    ///
    /// Returns `true` when the user was inserted.
    fn put(&self, user: User) -> bool;

    /// Identifiers of all stored users, in ascending order.
    fn list(&self) -> Vec<UserId>;
}

/// Lock a user handle, recovering the guard if a previous holder panicked.
///
/// User state is append-only, so a poisoned lock never exposes a partially
/// applied mutation.
pub fn lock_user(handle: &UserHandle) -> MutexGuard<'_, User> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
