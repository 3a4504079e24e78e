//! Transport client for the CouchDB admin API.
//!
//! [`CouchClient`] issues authenticated `GET` requests against the two admin
//! endpoints the connector needs and decodes the JSON bodies. It holds no
//! business logic; the connector talks to it through the [`AdminApi`] trait.

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

pub mod errors;
pub mod models;

pub use errors::ClientError;
pub use models::{SecurityComponent, SecurityDocument};

/// Read access to the administrative surface of a CouchDB instance.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// List every database visible to the admin credential (`GET /_all_dbs`).
    async fn list_all_databases(&self) -> Result<Vec<String>, ClientError>;

    /// Fetch the security object of a database (`GET /{db}/_security`).
    ///
    /// Returns `None` when the server answers with a JSON `null`.
    async fn security_document(
        &self,
        database: &str,
    ) -> Result<Option<SecurityDocument>, ClientError>;
}

/// HTTP client bound to one CouchDB instance and one basic-auth credential.
#[derive(Clone, Debug)]
pub struct CouchClient {
    http: reqwest::Client,
    base: Url,
}

impl CouchClient {
    /// Create a client for `instance_url`, authenticating every request as
    /// `username`.
    ///
    /// The credential is encoded once here and never refreshed.
    pub fn new(instance_url: &str, username: &str, password: &str) -> Result<Self, ClientError> {
        let base = Url::parse(instance_url).map_err(|e| ClientError::InvalidUrl {
            url: instance_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: instance_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut authorization =
            HeaderValue::from_str(&format!("Basic {}", basic_auth_token(username, password)))
                .map_err(|_| ClientError::InvalidCredentials)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, base })
    }

    /// Build `{base}/{segments...}`, pushing each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                url: self.base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl AdminApi for CouchClient {
    async fn list_all_databases(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["_all_dbs"])?;
        self.get_json(url).await
    }

    async fn security_document(
        &self,
        database: &str,
    ) -> Result<Option<SecurityDocument>, ClientError> {
        let url = self.endpoint(&[database, "_security"])?;
        self.get_json(url).await
    }
}

/// `base64(username:password)` as used in the `Authorization: Basic` header.
pub fn basic_auth_token(username: &str, password: &str) -> String {
    Base64::encode_string(format!("{username}:{password}").as_bytes())
}
