//! User synchronization.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::client::AdminApi;
use crate::connector::ResourceSyncer;
use crate::connector::extract::{ExtractedUser, MismatchPolicy, load_database_users};
use crate::connector::types::{
    Entitlement, Grant, Page, Profile, Resource, ResourceId, ResourceKind, UserProfile,
    UserStatus, scoped_display_name,
};

/// Lists the users named in a database's security object.
///
/// Users are grant targets only: they expose no entitlements and hold no
/// grants of their own.
pub struct UserSyncer {
    api: Arc<dyn AdminApi>,
    policy: MismatchPolicy,
}

impl UserSyncer {
    pub fn new(api: Arc<dyn AdminApi>, policy: MismatchPolicy) -> Self {
        Self { api, policy }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    /// Returns all the users of the parent database as resources, one per
    /// extracted (user, role) pair. A user listed in both security classes
    /// appears twice with the same identity.
    async fn list(
        &mut self,
        parent: Option<&ResourceId>,
        _token: Option<&str>,
    ) -> Result<Page<Resource>> {
        let Some(parent) = parent else {
            return Ok(Page::empty());
        };
        let database = parent.resource.as_str();

        let users = load_database_users(self.api.as_ref(), database, self.policy).await?;
        tracing::debug!(database, count = users.len(), "Listed users");

        Ok(Page::complete(
            users
                .iter()
                .map(|user| user_resource(user, Some(parent)))
                .collect(),
        ))
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _token: Option<&str>,
    ) -> Result<Page<Entitlement>> {
        Ok(Page::empty())
    }

    async fn grants(&self, _resource: &Resource, _token: Option<&str>) -> Result<Page<Grant>> {
        Ok(Page::empty())
    }
}

/// Identity of the user resource for `user`.
pub fn user_resource_id(user: &ExtractedUser) -> ResourceId {
    ResourceId::new(ResourceKind::User, user.user_id())
}

pub fn user_resource(user: &ExtractedUser, parent: Option<&ResourceId>) -> Resource {
    let id = user_resource_id(user);
    Resource {
        resource_trait: id.kind.resource_trait(),
        display_name: scoped_display_name(&user.database, &user.username),
        description: None,
        parent: parent.cloned(),
        profile: Profile::User(UserProfile {
            id: id.resource.clone(),
            username: user.username.clone(),
            database: user.database.clone(),
            status: UserStatus::Enabled,
        }),
        id,
        child_kinds: Vec::new(),
    }
}
