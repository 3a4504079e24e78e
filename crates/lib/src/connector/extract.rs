//! Reconstruction of (user, role) pairs from database security objects.
//!
//! A security component lists principal names and role names as two
//! independent arrays. They are paired by position; when the lengths differ
//! the pairing is undefined and the [`MismatchPolicy`] decides the outcome.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::client::{AdminApi, SecurityComponent, SecurityDocument};
use crate::connector::errors::ConnectorError;
use crate::connector::types::scoped_id;

/// A user holding a role in a database, as read from a security object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedUser {
    pub username: String,
    pub role: String,
    pub database: String,
}

impl ExtractedUser {
    /// Identity of the role resource this user belongs to (`database/role`).
    pub fn role_id(&self) -> String {
        scoped_id(&self.database, &self.role)
    }

    /// Identity of this user's resource (`database/username`).
    pub fn user_id(&self) -> String {
        scoped_id(&self.database, &self.username)
    }
}

/// How to treat a component whose name and role lists differ in length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Extract nothing from the component and carry on.
    #[default]
    Skip,
    /// Fail with [`ConnectorError::ComponentMismatch`].
    Reject,
}

/// The two security classes of a security object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityClass {
    Admins,
    Members,
}

impl SecurityClass {
    pub fn name(&self) -> &'static str {
        match self {
            SecurityClass::Admins => "admins",
            SecurityClass::Members => "members",
        }
    }
}

/// Pair `names[i]` with `roles[i]` for every index of one component.
///
/// Components that are not [paired](SecurityComponent::is_paired) are handled
/// according to `policy`; under [`MismatchPolicy::Skip`] the result is empty
/// and no error is raised.
pub fn pair_component(
    component: &SecurityComponent,
    database: &str,
    class: SecurityClass,
    policy: MismatchPolicy,
) -> Result<Vec<ExtractedUser>> {
    let SecurityComponent { names, roles } = component;
    if !component.is_paired() {
        return match policy {
            MismatchPolicy::Skip => {
                tracing::warn!(
                    database,
                    component = class.name(),
                    names = names.len(),
                    roles = roles.len(),
                    "Security component names and roles differ in length, skipping component"
                );
                Ok(Vec::new())
            }
            MismatchPolicy::Reject => Err(ConnectorError::ComponentMismatch {
                database: database.to_string(),
                component: class.name(),
                names: names.len(),
                roles: roles.len(),
            }
            .into()),
        };
    }

    Ok(names
        .iter()
        .zip(roles)
        .map(|(username, role)| ExtractedUser {
            username: username.clone(),
            role: role.clone(),
            database: database.to_string(),
        })
        .collect())
}

/// Extract users from both components, admins first, without deduplication.
pub fn extract_users(
    document: &SecurityDocument,
    database: &str,
    policy: MismatchPolicy,
) -> Result<Vec<ExtractedUser>> {
    let mut users = pair_component(&document.admins, database, SecurityClass::Admins, policy)?;
    users.extend(pair_component(
        &document.members,
        database,
        SecurityClass::Members,
        policy,
    )?);
    Ok(users)
}

/// Fetch a database's security object and extract its users.
///
/// A `null` security object is fatal for the database.
pub async fn load_database_users(
    api: &dyn AdminApi,
    database: &str,
    policy: MismatchPolicy,
) -> Result<Vec<ExtractedUser>> {
    let document = api
        .security_document(database)
        .await?
        .ok_or_else(|| ConnectorError::MissingSecurityDocument {
            database: database.to_string(),
        })?;

    extract_users(&document, database, policy)
}
