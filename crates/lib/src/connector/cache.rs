//! Users seen by the role synchronizer during one traversal cycle.

use std::collections::HashSet;

use crate::connector::extract::ExtractedUser;

/// Append-only record of every [`ExtractedUser`] a role synchronizer has
/// listed, across all databases.
///
/// Grants for a role are only complete once the role's database has been
/// recorded with [`UsersCache::record`]; [`UsersCache::has_database`] lets the
/// caller check that precondition.
#[derive(Debug, Clone, Default)]
pub struct UsersCache {
    users: Vec<ExtractedUser>,
    databases: HashSet<String>,
}

impl UsersCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the users extracted from `database`.
    ///
    /// The database is marked as seen even when it yields no users. Nothing is
    /// deduplicated; listing a database twice records its users twice.
    pub fn record(&mut self, database: &str, users: impl IntoIterator<Item = ExtractedUser>) {
        self.databases.insert(database.to_string());
        self.users.extend(users);
    }

    /// Users whose `database/role` equals `role_id`, in insertion order.
    pub fn members_of<'a>(&'a self, role_id: &'a str) -> impl Iterator<Item = &'a ExtractedUser> {
        self.users.iter().filter(move |user| user.role_id() == role_id)
    }

    /// Whether `database` has been recorded.
    pub fn has_database(&self, database: &str) -> bool {
        self.databases.contains(database)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
