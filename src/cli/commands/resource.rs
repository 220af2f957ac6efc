use std::io::Read;

use anyhow::Context;
use clap::Subcommand;
use reqwest::Method;
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_collection, output_document, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ResourceCommands {
    #[command(about = "List every document in the collection")]
    List,

    #[command(about = "Show one document")]
    Get {
        #[arg(help = "Document ID")]
        id: String,
    },

    #[command(about = "Create a document from --data or stdin")]
    Create {
        #[arg(long, help = "JSON body (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Replace a document from --data or stdin")]
    Update {
        #[arg(help = "Document ID")]
        id: String,
        #[arg(long, help = "JSON body (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Delete a document")]
    Delete {
        #[arg(help = "Document ID")]
        id: String,
    },
}

pub async fn handle(
    client: &ApiClient,
    collection: &str,
    cmd: ResourceCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ResourceCommands::List => {
            let documents = client.request(Method::GET, &[collection], None).await?;
            output_collection(&output_format, collection, &documents)
        }
        ResourceCommands::Get { id } => {
            let document = client
                .request(Method::GET, &[collection, id.as_str()], None)
                .await?;
            output_document(&output_format, &document)
        }
        ResourceCommands::Create { data } => {
            let body = read_body(data)?;
            let created = client.request(Method::POST, &[collection], Some(&body)).await?;
            let id = created.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
            output_success(&output_format, &format!("Created {}", id), Some(created))
        }
        ResourceCommands::Update { id, data } => {
            let body = read_body(data)?;
            client
                .request(Method::PUT, &[collection, id.as_str()], Some(&body))
                .await?;
            output_success(&output_format, &format!("Updated {}", id), None)
        }
        ResourceCommands::Delete { id } => {
            let deleted = client
                .request(Method::DELETE, &[collection, id.as_str()], None)
                .await?;
            let message = deleted
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Deleted {}", id));
            output_success(&output_format, &message, None)
        }
    }
}

/// `--data` wins; otherwise the body is read from stdin.
fn read_body(data: Option<String>) -> anyhow::Result<Value> {
    let raw = match data {
        Some(raw) => raw,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read body from stdin")?;
            raw
        }
    };
    parse_body(&raw)
}

fn parse_body(raw: &str) -> anyhow::Result<Value> {
    let body: Value = serde_json::from_str(raw).context("body is not valid JSON")?;
    if !body.is_object() {
        anyhow::bail!("body must be a JSON object");
    }
    Ok(body)
}
