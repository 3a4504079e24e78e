//! Check command - validates configuration and credentials.

use couchsync::Connector;

use crate::output::OutputFormat;

/// Run the check command
pub async fn run(
    connector: &Connector,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = connector.metadata();
    let databases = connector.validate().await?;

    match format {
        OutputFormat::Human => {
            println!("Connector:   {}", metadata.display_name);
            println!("Credentials: ok");
            println!("Databases:   {databases}");
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "connector": metadata,
                "credentials": "ok",
                "databases": databases,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
