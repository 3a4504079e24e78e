//! In-process traversal of the connector's resource synchronizers.
//!
//! [`traverse`] walks the synchronizers in the order a host engine does:
//! top-level listings, then child listings for every resource that declares
//! child kinds, then entitlements, then grants. Because every listing happens
//! before any grants are requested, the role synchronizer's cache is complete
//! when grants are computed.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::Result;
use crate::connector::{
    Connector, Entitlement, Grant, Page, Resource, ResourceId, ResourceKind, ResourceSyncer,
};

/// Everything produced by one traversal cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncedGraph {
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

impl SyncedGraph {
    /// Resources of one kind, in discovery order.
    pub fn resources_of(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.kind() == kind)
    }

    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }
}

/// Run one full traversal with a fresh set of synchronizers.
pub async fn traverse(connector: &Connector) -> Result<SyncedGraph> {
    let mut syncers = connector.resource_syncers();
    traverse_syncers(&mut syncers).await
}

/// Run one full traversal over the given synchronizers.
///
/// Resources are deduplicated by identity (first occurrence wins);
/// entitlements and grants by id. Any error aborts the traversal.
pub async fn traverse_syncers(syncers: &mut [Box<dyn ResourceSyncer>]) -> Result<SyncedGraph> {
    let index: HashMap<ResourceKind, usize> = syncers
        .iter()
        .enumerate()
        .map(|(i, syncer)| (syncer.kind(), i))
        .collect();

    let mut graph = SyncedGraph::default();
    let mut seen = HashSet::new();
    let mut pending = VecDeque::new();

    for syncer in syncers.iter_mut() {
        for resource in list_all(syncer, None).await? {
            if seen.insert(resource.id.clone()) {
                pending.push_back(resource);
            }
        }
    }

    while let Some(resource) = pending.pop_front() {
        for kind in &resource.child_kinds {
            let Some(&i) = index.get(kind) else {
                tracing::warn!(
                    parent = %resource.id,
                    child = %kind,
                    "No synchronizer for child kind"
                );
                continue;
            };
            for child in list_all(&mut syncers[i], Some(&resource.id)).await? {
                if seen.insert(child.id.clone()) {
                    pending.push_back(child);
                }
            }
        }
        graph.resources.push(resource);
    }

    let mut entitlement_ids = HashSet::new();
    for resource in &graph.resources {
        let Some(&i) = index.get(&resource.kind()) else {
            continue;
        };
        let syncer = &syncers[i];
        let mut token: Option<String> = None;
        loop {
            let page = syncer.entitlements(resource, token.as_deref()).await?;
            for entitlement in page.items {
                if entitlement_ids.insert(entitlement.id.clone()) {
                    graph.entitlements.push(entitlement);
                }
            }
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }
    }

    let mut grant_ids = HashSet::new();
    for resource in &graph.resources {
        let Some(&i) = index.get(&resource.kind()) else {
            continue;
        };
        let syncer = &syncers[i];
        let mut token: Option<String> = None;
        loop {
            let page = syncer.grants(resource, token.as_deref()).await?;
            for grant in page.items {
                if grant_ids.insert(grant.id.clone()) {
                    graph.grants.push(grant);
                }
            }
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }
    }

    tracing::info!(
        resources = graph.resources.len(),
        entitlements = graph.entitlements.len(),
        grants = graph.grants.len(),
        "Traversal completed"
    );
    Ok(graph)
}

/// Follow page tokens until a listing is exhausted.
async fn list_all(
    syncer: &mut Box<dyn ResourceSyncer>,
    parent: Option<&ResourceId>,
) -> Result<Vec<Resource>> {
    let mut resources = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let Page {
            items, next_token, ..
        } = syncer.list(parent, token.as_deref()).await?;
        resources.extend(items);
        match next_token {
            Some(next) => token = Some(next),
            None => return Ok(resources),
        }
    }
}
