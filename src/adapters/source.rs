use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::validate_url;
use url::Url;

/// Fetch document bytes from an http(s) endpoint. Returns the filename
/// derived from the URL path together with the raw bytes. Transport and
/// status failures surface immediately; nothing is retried.
pub async fn fetch_remote_document(endpoint: &str) -> Result<(String, Vec<u8>)> {
    validate_url("document_url", endpoint)?;

    tracing::debug!("Fetching document from: {}", endpoint);
    let response = reqwest::get(endpoint).await?;
    tracing::debug!("Document fetch status: {}", response.status());

    if !response.status().is_success() {
        return Err(AnalyzerError::DocumentFormat {
            reason: format!("document fetch returned HTTP {}", response.status()),
        });
    }

    let filename = remote_filename(endpoint);
    let bytes = response.bytes().await?.to_vec();
    Ok((filename, bytes))
}

fn remote_filename(endpoint: &str) -> String {
    Url::parse(endpoint)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| "document.txt".to_string())
}
