//!
//! couchsync: synchronizes the access-control model of a CouchDB instance into
//! a Resource → Entitlement → Grant identity graph for access-review tooling.
//!
//! ## Core Concepts
//!
//! * **Client (`client::CouchClient`)**: Authenticated access to the CouchDB admin API
//!   (`/_all_dbs` and `/{db}/_security`), behind the `client::AdminApi` trait.
//! * **Synchronizers (`connector::ResourceSyncer`)**: One per resource kind:
//!     * **Databases (`connector::DatabaseSyncer`)**: Group-like resources scoping everything else.
//!     * **Roles (`connector::RoleSyncer`)**: One resource per `database/role`, each with a single
//!       `assigned` entitlement granted to the users holding the role.
//!     * **Users (`connector::UserSyncer`)**: One resource per `database/username`; grant targets only.
//! * **Extraction (`connector::extract`)**: Pairs the name and role lists of each security
//!   component by position.
//! * **Traversal (`traversal::traverse`)**: Drives the synchronizers in host-engine order and
//!   collects the resulting graph.

pub mod client;
pub mod config;
pub mod connector;
pub mod traversal;

pub use config::Config;
pub use connector::Connector;
pub use traversal::{SyncedGraph, traverse};

/// Result type used throughout the couchsync library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the couchsync library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured transport errors from the client module
    #[error(transparent)]
    Client(client::ClientError),

    /// Structured mapping errors from the connector module
    #[error(transparent)]
    Connector(connector::ConnectorError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Client(_) => "client",
            Error::Connector(_) => "connector",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error came from the transport layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Client(_))
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Connector(connector_err) => connector_err.is_not_found(),
            Error::Client(client_err) => {
                client_err.status() == Some(reqwest::StatusCode::NOT_FOUND)
            }
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Client(client_err) => client_err.is_unauthorized(),
            _ => false,
        }
    }

    /// Check if this error is configuration-related.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::Client(client_err) => client_err.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error indicates malformed upstream data.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Connector(connector_err) => connector_err.is_integrity_error(),
            Error::Client(client_err) => client_err.is_decode_error(),
            _ => false,
        }
    }
}
