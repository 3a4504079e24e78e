//! Role synchronization.
//!
//! Every distinct role string in a database's security object becomes a role
//! resource `database/role` with a single `assigned` entitlement. Grants are
//! answered from the [`UsersCache`] filled by this synchronizer's own `list`
//! calls, so `list` must have run for a database before its roles' grants are
//! complete.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::client::AdminApi;
use crate::connector::ResourceSyncer;
use crate::connector::cache::UsersCache;
use crate::connector::extract::{ExtractedUser, MismatchPolicy, load_database_users};
use crate::connector::types::{
    ASSIGNED, Entitlement, Grant, Page, Profile, Resource, ResourceId, ResourceKind, RoleProfile,
    scoped_display_name,
};
use crate::connector::user::user_resource_id;

pub struct RoleSyncer {
    api: Arc<dyn AdminApi>,
    policy: MismatchPolicy,
    cache: UsersCache,
}

impl RoleSyncer {
    /// Create a synchronizer with an empty cache.
    pub fn new(api: Arc<dyn AdminApi>, policy: MismatchPolicy) -> Self {
        Self {
            api,
            policy,
            cache: UsersCache::new(),
        }
    }

    /// Users recorded so far.
    pub fn cache(&self) -> &UsersCache {
        &self.cache
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Role
    }

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
        let roles = users
            .iter()
            .map(|user| role_resource(user, parent))
            .collect::<Vec<_>>();
        self.cache.record(database, users);

        tracing::debug!(database, count = roles.len(), "Listed roles");
        Ok(Page::complete(roles))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: Option<&str>,
    ) -> Result<Page<Entitlement>> {
        Ok(Page::complete(vec![Entitlement::permission(
            resource,
            ASSIGNED,
            vec![ResourceKind::User],
        )]))
    }

    async fn grants(&self, resource: &Resource, _token: Option<&str>) -> Result<Page<Grant>> {
        let database = resource.database();
        if !self.cache.has_database(database) {
            tracing::warn!(
                role = %resource.id.resource,
                database,
                "Grants requested before roles were listed for this database"
            );
        }

        let grants = self
            .cache
            .members_of(&resource.id.resource)
            .map(|user| Grant::new(&resource.id, ASSIGNED, user_resource_id(user)))
            .collect();

        Ok(Page::complete(grants))
    }
}

/// Role resource for the role held by `user`, parented to its database.
pub fn role_resource(user: &ExtractedUser, parent: &ResourceId) -> Resource {
    let id = user.role_id();
    Resource {
        id: ResourceId::new(ResourceKind::Role, id.clone()),
        resource_trait: ResourceKind::Role.resource_trait(),
        display_name: scoped_display_name(&user.database, &user.role),
        description: Some(format!(
            "CouchDB role '{}' of database '{}'",
            user.role, user.database
        )),
        parent: Some(parent.clone()),
        profile: Profile::Role(RoleProfile {
            id,
            role: user.role.clone(),
            database: user.database.clone(),
        }),
        child_kinds: Vec::new(),
    }
}
