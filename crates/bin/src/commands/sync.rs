//! Sync command - runs one traversal and prints the identity graph.

use couchsync::{Connector, SyncedGraph, connector::ResourceKind, traverse};

use crate::output::{OutputFormat, print_section};

/// Run the sync command
pub async fn run(
    connector: &Connector,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = traverse(connector).await?;

    match format {
        OutputFormat::Human => print_graph(&graph),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
    }

    Ok(())
}

fn print_graph(graph: &SyncedGraph) {
    let databases: Vec<Vec<String>> = graph
        .resources_of(ResourceKind::Database)
        .map(|r| vec![r.id.resource.clone()])
        .collect();
    print_section("Databases", &["NAME"], &databases);

    for (title, kind) in [("Roles", ResourceKind::Role), ("Users", ResourceKind::User)] {
        let rows: Vec<Vec<String>> = graph
            .resources_of(kind)
            .map(|r| {
                vec![
                    r.id.resource.clone(),
                    r.display_name.clone(),
                    r.database().to_string(),
                ]
            })
            .collect();
        print_section(title, &["ID", "DISPLAY NAME", "DATABASE"], &rows);
    }

    let entitlements: Vec<Vec<String>> = graph
        .entitlements
        .iter()
        .map(|e| vec![e.id.clone(), e.display_name.clone()])
        .collect();
    print_section("Entitlements", &["ID", "DISPLAY NAME"], &entitlements);

    let grants: Vec<Vec<String>> = graph
        .grants
        .iter()
        .map(|g| vec![g.resource.resource.clone(), g.principal.resource.clone()])
        .collect();
    print_section("Grants", &["ROLE", "USER"], &grants);
}
