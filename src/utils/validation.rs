use crate::utils::error::{AnalyzerError, Result};
use url::Url;

/// Extensions the shipped plain-text extractor can handle.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "log"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AnalyzerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AnalyzerError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {scheme}"),
            }),
        },
        Err(e) => Err(AnalyzerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {e}"),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyzerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyzerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AnalyzerError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {min_value}"),
        });
    }
    Ok(())
}

/// Upload gate: only extensions the plain-text extractor supports get past
/// intake, mirroring the reject-before-processing behavior of the API.
pub fn validate_document_filename(filename: &str) -> Result<()> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AnalyzerError::DocumentFormat {
            reason: format!(
                "unsupported file type for {:?}; supported extensions: {}",
                filename,
                SUPPORTED_EXTENSIONS.join(", ")
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("endpoint", "https://example.com/doc.txt").is_ok());
        assert!(validate_url("endpoint", "http://example.com").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
        assert!(validate_url("endpoint", "not a url").is_err());
        assert!(validate_url("endpoint", "").is_err());
    }

    #[test]
    fn path_must_be_non_empty() {
        assert!(validate_path("upload_dir", "./uploads").is_ok());
        assert!(validate_path("upload_dir", "").is_err());
    }

    #[test]
    fn worker_count_must_meet_minimum() {
        assert!(validate_positive_number("workers", 2, 1).is_ok());
        assert!(validate_positive_number("workers", 0, 1).is_err());
    }

    #[test]
    fn document_filenames_are_gated_by_extension() {
        assert!(validate_document_filename("report.txt").is_ok());
        assert!(validate_document_filename("notes.MD").is_ok());
        assert!(validate_document_filename("scan.pdf").is_err());
        assert!(validate_document_filename("no_extension").is_err());
    }
}
