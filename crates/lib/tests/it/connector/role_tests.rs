//! Tests for the role synchronizer and its users cache.

use std::sync::Arc;

use couchsync::connector::{
    ASSIGNED, EntitlementPurpose, MismatchPolicy, Profile, Resource, ResourceKind,
    ResourceSyncer, ResourceTrait, RoleSyncer,
};
use serde_json::json;

use crate::helpers::*;

fn role_syncer(server: &MockCouch) -> RoleSyncer {
    RoleSyncer::new(Arc::new(server.client()), MismatchPolicy::Skip)
}

fn role<'a>(roles: &'a [Resource], id: &str) -> &'a Resource {
    roles
        .iter()
        .find(|r| r.id.resource == id)
        .unwrap_or_else(|| panic!("role {id} not listed"))
}

#[tokio::test]
async fn test_list_without_parent_is_empty() {
    let server = shop_server().await;
    let mut syncer = role_syncer(&server);

    let page = syncer.list(None, None).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_token.is_none());
    assert!(syncer.cache().is_empty());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_list_roles_of_database() {
    let server = shop_server().await;
    let mut syncer = role_syncer(&server);

    let page = syncer.list(Some(&database_id("shop")), None).await.unwrap();
    assert_eq!(ids(&page.items), vec!["shop/admin", "shop/r1", "shop/r2"]);
    assert!(page.next_token.is_none());

    let admin = role(&page.items, "shop/admin");
    assert_eq!(admin.kind(), ResourceKind::Role);
    assert_eq!(admin.resource_trait, ResourceTrait::Role);
    assert_eq!(admin.display_name, "db:shop / admin");
    assert_eq!(admin.parent, Some(database_id("shop")));
    match &admin.profile {
        Profile::Role(profile) => {
            assert_eq!(profile.id, "shop/admin");
            assert_eq!(profile.role, "admin");
            assert_eq!(profile.database, "shop");
        }
        other => panic!("unexpected profile: {other:?}"),
    }

    assert_eq!(syncer.cache().len(), 3);
    assert!(syncer.cache().has_database("shop"));
    assert_eq!(server.requests(), vec!["/shop/_security"]);
}

#[tokio::test]
async fn test_list_keeps_one_entry_per_user() {
    let server = MockCouch::start().await;
    server.add_database(
        "shop",
        json!({"members": {"names": ["bob", "carol"], "roles": ["r1", "r1"]}}),
    );
    let mut syncer = role_syncer(&server);

    let page = syncer.list(Some(&database_id("shop")), None).await.unwrap();
    assert_eq!(ids(&page.items), vec!["shop/r1", "shop/r1"]);
}

#[tokio::test]
async fn test_entitlements_single_assigned() {
    let server = shop_server().await;
    let mut syncer = role_syncer(&server);
    let roles = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;
    let admin = role(&roles, "shop/admin");

    let page = syncer.entitlements(admin, None).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.next_token.is_none());

    let entitlement = &page.items[0];
    assert_eq!(entitlement.slug, ASSIGNED);
    assert_eq!(entitlement.id, "role:shop/admin:assigned");
    assert_eq!(entitlement.resource, admin.id);
    assert_eq!(entitlement.grantable_to, vec![ResourceKind::User]);
    assert_eq!(entitlement.display_name, admin.display_name);
    assert_eq!(entitlement.description, admin.description);
    assert_eq!(entitlement.purpose, EntitlementPurpose::Permission);
}

#[tokio::test]
async fn test_grants_after_list() {
    let server = shop_server().await;
    let mut syncer = role_syncer(&server);
    let roles = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;

    for (role_id, user_id) in [
        ("shop/admin", "shop/alice"),
        ("shop/r1", "shop/bob"),
        ("shop/r2", "shop/carol"),
    ] {
        let page = syncer.grants(role(&roles, role_id), None).await.unwrap();
        assert_eq!(page.items.len(), 1, "{role_id}");
        let grant = &page.items[0];
        assert_eq!(grant.resource.resource, role_id);
        assert_eq!(grant.entitlement_id, format!("role:{role_id}:assigned"));
        assert_eq!(grant.principal.kind, ResourceKind::User);
        assert_eq!(grant.principal.resource, user_id);
    }

    // Grants are answered from the cache without further requests
    assert_eq!(server.requests(), vec!["/shop/_security"]);
}

#[tokio::test]
async fn test_grants_before_list_are_empty() {
    let server = shop_server().await;

    let mut lister = role_syncer(&server);
    let roles = lister
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;

    // A fresh synchronizer has not listed the database yet
    let fresh = role_syncer(&server);
    let page = fresh.grants(role(&roles, "shop/r1"), None).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!fresh.cache().has_database("shop"));
}

#[tokio::test]
async fn test_grants_for_shared_role_in_cache_order() {
    let server = MockCouch::start().await;
    server.add_database(
        "shop",
        json!({
            "admins": {"names": ["alice"], "roles": ["r1"]},
            "members": {"names": ["carol", "bob"], "roles": ["r1", "r2"]}
        }),
    );
    let mut syncer = role_syncer(&server);
    let roles = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;

    let page = syncer.grants(role(&roles, "shop/r1"), None).await.unwrap();
    let principals: Vec<_> = page
        .items
        .iter()
        .map(|g| g.principal.resource.as_str())
        .collect();
    assert_eq!(principals, vec!["shop/alice", "shop/carol"]);
}

#[tokio::test]
async fn test_same_role_name_in_other_database_not_granted() {
    let server = shop_server().await;
    server.add_database(
        "blog",
        json!({"members": {"names": ["dave"], "roles": ["r1"]}}),
    );
    let mut syncer = role_syncer(&server);

    let shop_roles = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;
    let blog_roles = syncer
        .list(Some(&database_id("blog")), None)
        .await
        .unwrap()
        .items;

    let shop_r1 = syncer.grants(role(&shop_roles, "shop/r1"), None).await.unwrap();
    assert_eq!(shop_r1.items.len(), 1);
    assert_eq!(shop_r1.items[0].principal.resource, "shop/bob");

    let blog_r1 = syncer.grants(role(&blog_roles, "blog/r1"), None).await.unwrap();
    assert_eq!(blog_r1.items.len(), 1);
    assert_eq!(blog_r1.items[0].principal.resource, "blog/dave");
}

#[tokio::test]
async fn test_relisting_duplicates_cached_users() {
    let server = shop_server().await;
    let mut syncer = role_syncer(&server);

    let roles = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap()
        .items;
    syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap();

    assert_eq!(syncer.cache().len(), 6);
    let page = syncer.grants(role(&roles, "shop/r1"), None).await.unwrap();
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_mismatched_component_yields_no_roles() {
    let server = MockCouch::start().await;
    server.add_database(
        "shop",
        json!({"members": {"names": ["dave", "erin"], "roles": ["only-one"]}}),
    );
    let mut syncer = role_syncer(&server);

    let page = syncer.list(Some(&database_id("shop")), None).await.unwrap();
    assert!(page.items.is_empty());
    assert!(syncer.cache().is_empty());
    assert!(syncer.cache().has_database("shop"));
}

#[tokio::test]
async fn test_mismatched_component_rejected_when_strict() {
    let server = MockCouch::start().await;
    server.add_database(
        "shop",
        json!({"members": {"names": ["dave", "erin"], "roles": ["only-one"]}}),
    );
    let mut syncer = RoleSyncer::new(Arc::new(server.client()), MismatchPolicy::Reject);

    let err = syncer
        .list(Some(&database_id("shop")), None)
        .await
        .unwrap_err();
    assert!(err.is_integrity_error());
    assert!(syncer.cache().is_empty());
}

#[tokio::test]
async fn test_missing_security_document_is_error() {
    let server = MockCouch::start().await;
    server.add_database_raw("ghost", "null");
    let mut syncer = role_syncer(&server);

    let err = syncer
        .list(Some(&database_id("ghost")), None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "the security object of 'ghost' database couldn't be retrieved"
    );
    assert!(!syncer.cache().has_database("ghost"));
}
