//! Tests for connector composition, metadata and validation.

use couchsync::{
    Config, Connector,
    connector::{MismatchPolicy, ResourceKind},
};

use crate::helpers::*;

#[test]
fn test_new_rejects_empty_fields() {
    let err = Connector::new(&Config::new(ADMIN_USER, "", "http://localhost:5984"))
        .err()
        .expect("Empty password should be rejected");
    assert!(err.is_configuration_error());
    assert_eq!(err.module(), "config");
}

#[test]
fn test_new_rejects_invalid_url() {
    let err = Connector::new(&Config::new(ADMIN_USER, ADMIN_PASSWORD, "localhost 5984"))
        .err()
        .expect("Invalid URL should be rejected");
    assert!(err.is_configuration_error());
    assert_eq!(err.module(), "client");
}

#[tokio::test]
async fn test_resource_syncers_order() {
    let server = shop_server().await;
    let connector = server.connector();

    let kinds: Vec<_> = connector
        .resource_syncers()
        .iter()
        .map(|s| s.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![ResourceKind::User, ResourceKind::Role, ResourceKind::Database]
    );
    assert_eq!(connector.mismatch_policy(), MismatchPolicy::Skip);
}

#[tokio::test]
async fn test_policy_flows_from_config() {
    let server = shop_server().await;
    let connector = server.connector_with_policy(MismatchPolicy::Reject);
    assert_eq!(connector.mismatch_policy(), MismatchPolicy::Reject);
}

#[tokio::test]
async fn test_metadata() {
    let server = shop_server().await;
    let metadata = server.connector().metadata();
    assert_eq!(metadata.display_name, "CouchDB Connector");
    assert!(!metadata.description.is_empty());
}

#[tokio::test]
async fn test_validate_counts_databases() {
    let server = shop_server().await;
    assert_eq!(server.connector().validate().await.unwrap(), 1);
}

#[tokio::test]
async fn test_validate_rejects_bad_credentials() {
    let server = shop_server().await;
    let connector =
        Connector::new(&Config::new(ADMIN_USER, "wrong", server.url())).unwrap();

    let err = connector.validate().await.unwrap_err();
    assert!(err.is_authentication_error());
}
