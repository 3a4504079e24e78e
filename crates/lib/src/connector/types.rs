//! Identity graph types produced by the resource synchronizers.
//!
//! The graph has three tiers: [`Resource`]s, the [`Entitlement`]s they expose,
//! and [`Grant`]s of those entitlements to principals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slug of the single entitlement every role exposes.
pub const ASSIGNED: &str = "assigned";

/// Resource kind tag; selects which synchronizer handles a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Database,
    Role,
    User,
}

impl ResourceKind {
    /// Stable type identifier used in entitlement and grant ids.
    pub fn id(&self) -> &'static str {
        match self {
            ResourceKind::Database => "database",
            ResourceKind::Role => "role",
            ResourceKind::User => "user",
        }
    }

    /// Shape of the resource in the host engine's vocabulary.
    pub fn resource_trait(&self) -> ResourceTrait {
        match self {
            ResourceKind::Database => ResourceTrait::Group,
            ResourceKind::Role => ResourceTrait::Role,
            ResourceKind::User => ResourceTrait::User,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Shape a resource takes in the host engine: databases are group-like,
/// roles are role-like and users are principals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTrait {
    Group,
    Role,
    User,
}

/// Stable key of a resource: its kind plus its identity string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub resource: String,
}

impl ResourceId {
    pub fn new(kind: ResourceKind, resource: impl Into<String>) -> Self {
        Self {
            kind,
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.resource)
    }
}

/// Identity of a resource scoped to a database: `database/name`.
pub fn scoped_id(database: &str, name: &str) -> String {
    format!("{database}/{name}")
}

/// Human-facing name of a resource scoped to a database.
pub fn scoped_display_name(database: &str, name: &str) -> String {
    format!("db:{database} / {name}")
}

/// Account status reported for users. Only `Enabled` is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum UserStatus {
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseProfile {
    pub database_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub id: String,
    pub role: String,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub database: String,
    pub status: UserStatus,
}

/// Kind-specific attributes attached to a [`Resource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Database(DatabaseProfile),
    Role(RoleProfile),
    User(UserProfile),
}

/// A node in the identity graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    #[serde(rename = "trait")]
    pub resource_trait: ResourceTrait,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ResourceId>,
    pub profile: Profile,
    /// Resource kinds the host engine should list beneath this resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_kinds: Vec<ResourceKind>,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        self.id.kind
    }

    /// Database this resource belongs to (or is).
    pub fn database(&self) -> &str {
        match &self.profile {
            Profile::Database(p) => &p.database_name,
            Profile::Role(p) => &p.database,
            Profile::User(p) => &p.database,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitlementPurpose {
    Permission,
}

/// A grantable capability attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: ResourceId,
    pub slug: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub grantable_to: Vec<ResourceKind>,
    pub purpose: EntitlementPurpose,
}

impl Entitlement {
    /// Permission entitlement named `slug` on `resource`, inheriting its
    /// display name and description.
    pub fn permission(resource: &Resource, slug: &str, grantable_to: Vec<ResourceKind>) -> Self {
        Self {
            id: entitlement_id(&resource.id, slug),
            resource: resource.id.clone(),
            slug: slug.to_string(),
            display_name: resource.display_name.clone(),
            description: resource.description.clone(),
            grantable_to,
            purpose: EntitlementPurpose::Permission,
        }
    }
}

/// `{kind}:{resource}:{slug}`
pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}:{}", resource.kind, resource.resource, slug)
}

/// Assertion that `principal` holds entitlement `entitlement_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: String,
    pub entitlement_id: String,
    pub resource: ResourceId,
    pub principal: ResourceId,
}

impl Grant {
    pub fn new(resource: &ResourceId, slug: &str, principal: ResourceId) -> Self {
        let entitlement_id = entitlement_id(resource, slug);
        Self {
            id: format!("{entitlement_id}:{principal}"),
            entitlement_id,
            resource: resource.clone(),
            principal,
        }
    }
}

/// Page-level annotations. Nothing produced here sets any.
pub type Annotations = Vec<serde_json::Value>;

/// One page of results from a synchronizer operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token; `None` means the result set is complete.
    pub next_token: Option<String>,
    pub annotations: Annotations,
}

impl<T> Page<T> {
    /// A complete, single-page result.
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
            annotations: Annotations::new(),
        }
    }

    pub fn empty() -> Self {
        Self::complete(Vec::new())
    }
}
