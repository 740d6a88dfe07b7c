use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn matches_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Where users live. Implementations must be safe to share between
/// connections.
pub trait UserStore: Send + Sync {
    /// Stores `user`, replacing any user with the same id.
    fn add_user(&self, user: User);

    fn find_user_by_id(&self, user_id: &str) -> Option<User>;

    /// Every user, ordered by id.
    fn find_all(&self) -> Vec<User>;
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn add_user(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.user_id.clone(), user);
    }

    fn find_user_by_id(&self, user_id: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    fn find_all(&self) -> Vec<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
