//! Connector configuration.

use std::fmt;

use thiserror::Error;

use crate::connector::MismatchPolicy;

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";
pub const INSTANCE_URL_FIELD: &str = "instance-url";

/// Credentials and location of the CouchDB instance to synchronize.
#[derive(Clone, Default)]
pub struct Config {
    /// Username of the CouchDB admin account
    pub username: String,
    /// Password of the CouchDB admin account
    pub password: String,
    /// URL of the CouchDB instance, including the port if needed
    pub instance_url: String,
    /// Treatment of security components whose names and roles differ in length
    pub mismatch_policy: MismatchPolicy,
}

impl Config {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        instance_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            instance_url: instance_url.into(),
            mismatch_policy: MismatchPolicy::default(),
        }
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    /// Check that every required field is non-empty.
    ///
    /// All empty fields are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields: Vec<&'static str> = [
            (USERNAME_FIELD, &self.username),
            (PASSWORD_FIELD, &self.password),
            (INSTANCE_URL_FIELD, &self.instance_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields { fields })
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"***")
            .field("instance_url", &self.instance_url)
            .field("mismatch_policy", &self.mismatch_policy)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the required fields {} can't be empty", format_fields(fields))]
    MissingFields { fields: Vec<&'static str> },
}

fn format_fields(fields: &[&'static str]) -> String {
    fields
        .iter()
        .map(|field| format!("'--{field}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// Conversion from ConfigError to the main Error type
impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
