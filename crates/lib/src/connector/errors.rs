//! Error types for the resource synchronizers.

use thiserror::Error;

/// Errors raised while mapping security documents into the identity graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectorError {
    /// The database's security object decoded to `null`.
    #[error("the security object of '{database}' database couldn't be retrieved")]
    MissingSecurityDocument { database: String },

    /// A security component's name and role lists cannot be paired.
    ///
    /// Only raised under [`MismatchPolicy::Reject`](super::MismatchPolicy::Reject).
    #[error(
        "the {component} of '{database}' database list {names} names but {roles} roles; user roles cannot be identified"
    )]
    ComponentMismatch {
        database: String,
        component: &'static str,
        names: usize,
        roles: usize,
    },
}

impl ConnectorError {
    /// Check if this error reports malformed upstream security data.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, ConnectorError::ComponentMismatch { .. })
    }

    /// Check if this error indicates the security document was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConnectorError::MissingSecurityDocument { .. })
    }
}

// Conversion from ConnectorError to the main Error type
impl From<ConnectorError> for crate::Error {
    fn from(err: ConnectorError) -> Self {
        crate::Error::Connector(err)
    }
}
