use reqwest::Method;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_document;
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let health = client.request(Method::GET, &["health"], None).await?;
    output_document(&output_format, &health)
}
