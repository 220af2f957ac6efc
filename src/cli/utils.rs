use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a single document in the appropriate format
pub fn output_document(output_format: &OutputFormat, document: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(document)?),
        OutputFormat::Text => println!("{}", render_document(document)),
    }
    Ok(())
}

/// Output a list of documents, or a note when there are none
pub fn output_collection(output_format: &OutputFormat, collection: &str, documents: &Value) -> anyhow::Result<()> {
    let items = documents.as_array().map(Vec::as_slice).unwrap_or_default();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(documents)?),
        OutputFormat::Text if items.is_empty() => println!("No {} found", collection),
        OutputFormat::Text => {
            for item in items {
                println!("{}\n", render_document(item));
            }
        }
    }
    Ok(())
}

/// `key: value` lines with `_id` first.
fn render_document(document: &Value) -> String {
    let Some(map) = document.as_object() else {
        return document.to_string();
    };

    let mut lines = Vec::with_capacity(map.len());
    if let Some(id) = map.get("_id") {
        lines.push(format!("_id: {}", scalar(id)));
    }
    for (key, value) in map.iter().filter(|(key, _)| key.as_str() != "_id") {
        lines.push(format!("{}: {}", key, scalar(value)));
    }
    lines.join("\n")
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
