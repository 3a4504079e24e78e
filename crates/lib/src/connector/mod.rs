//! Mapping of CouchDB security objects into the identity graph.
//!
//! The [`Connector`] owns an [`AdminApi`] handle and hands out one
//! [`ResourceSyncer`] per resource kind. A host engine drives those
//! synchronizers: it lists databases, lists roles and users beneath each
//! database, then asks every resource for its entitlements and grants.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::Result;
use crate::client::{AdminApi, CouchClient};
use crate::config::Config;

pub mod cache;
pub mod database;
pub mod errors;
pub mod extract;
pub mod role;
pub mod types;
pub mod user;

pub use cache::UsersCache;
pub use database::DatabaseSyncer;
pub use errors::ConnectorError;
pub use extract::{ExtractedUser, MismatchPolicy};
pub use role::RoleSyncer;
pub use types::*;
pub use user::UserSyncer;

/// Capability shared by the synchronizer of every resource kind.
///
/// Methods are called serially by the host engine. `list` takes `&mut self`
/// because synchronizers may record what they have listed.
///
/// Page tokens are accepted for host compatibility; every result produced
/// here is a single complete page.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Resource kind this synchronizer produces.
    fn kind(&self) -> ResourceKind;

    /// List resources of this kind beneath `parent`.
    ///
    /// Kinds that only exist inside a database return an empty page when
    /// `parent` is `None`.
    async fn list(
        &mut self,
        parent: Option<&ResourceId>,
        token: Option<&str>,
    ) -> Result<Page<Resource>>;

    /// Entitlements exposed by `resource`.
    async fn entitlements(
        &self,
        resource: &Resource,
        token: Option<&str>,
    ) -> Result<Page<Entitlement>>;

    /// Grants of `resource`'s entitlements.
    async fn grants(&self, resource: &Resource, token: Option<&str>) -> Result<Page<Grant>>;
}

/// Descriptive metadata about the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

/// Entry point composing the resource synchronizers around one admin API.
#[derive(Clone)]
pub struct Connector {
    api: Arc<dyn AdminApi>,
    policy: MismatchPolicy,
}

impl Connector {
    /// Validate `config` and connect to the configured instance.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = CouchClient::new(&config.instance_url, &config.username, &config.password)?;
        Ok(Self::with_api(Arc::new(client), config.mismatch_policy))
    }

    /// Build a connector around any [`AdminApi`] implementation.
    pub fn with_api(api: Arc<dyn AdminApi>, policy: MismatchPolicy) -> Self {
        Self { api, policy }
    }

    pub fn mismatch_policy(&self) -> MismatchPolicy {
        self.policy
    }

    /// One synchronizer per resource kind: users, roles, databases.
    ///
    /// Each call returns fresh synchronizers; the role synchronizer starts with
    /// an empty cache, so one set should serve one whole traversal.
    pub fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        vec![
            Box::new(UserSyncer::new(self.api.clone(), self.policy)),
            Box::new(RoleSyncer::new(self.api.clone(), self.policy)),
            Box::new(DatabaseSyncer::new(self.api.clone())),
        ]
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "CouchDB Connector".to_string(),
            description: "Connector for a CouchDB instance. It retrieves the users and roles of the databases on the instance.".to_string(),
        }
    }

    /// Exercise the configured credential with a single database listing.
    ///
    /// Returns the number of visible databases.
    pub async fn validate(&self) -> Result<usize> {
        let databases = self.api.list_all_databases().await?;
        tracing::debug!(count = databases.len(), "Credential check succeeded");
        Ok(databases.len())
    }
}
