//! Database enumeration: one group-like resource per database.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::client::AdminApi;
use crate::connector::ResourceSyncer;
use crate::connector::types::{
    DatabaseProfile, Entitlement, Grant, Page, Profile, Resource, ResourceId, ResourceKind,
};

/// Lists every database on the instance. Databases carry no entitlements;
/// they only scope the role and user resources beneath them.
pub struct DatabaseSyncer {
    api: Arc<dyn AdminApi>,
}

impl DatabaseSyncer {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceSyncer for DatabaseSyncer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Database
    }

    async fn list(
        &mut self,
        _parent: Option<&ResourceId>,
        _token: Option<&str>,
    ) -> Result<Page<Resource>> {
        let names = self.api.list_all_databases().await?;
        tracing::debug!(count = names.len(), "Listed databases");

        Ok(Page::complete(
            names.into_iter().map(database_resource).collect(),
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

/// Resource for database `name`, declaring user and role children.
pub fn database_resource(name: String) -> Resource {
    Resource {
        id: ResourceId::new(ResourceKind::Database, name.clone()),
        resource_trait: ResourceKind::Database.resource_trait(),
        display_name: name.clone(),
        description: None,
        parent: None,
        profile: Profile::Database(DatabaseProfile {
            database_name: name,
        }),
        child_kinds: vec![ResourceKind::User, ResourceKind::Role],
    }
}
