//! Response-schema adapters for the supported resolver upstreams.

use serde::Deserialize;
use serde_json::Value;

use super::{ResolveError, Resolution};

/// Which JSON envelope the configured upstream speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverSchema {
    /// alphaapis style: `{ success, data: { downloadLink, size } }`
    Alpha,
    /// teradl style: `{ status, message?, data: { download_url, file_name?, file_size } }`
    TeraDl,
}

/// File size as upstreams report it: raw bytes, or a human string such
/// as `"15MB"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FileSize {
    Bytes(u64),
    // Some upstreams report fractional byte counts
    Fractional(f64),
    Text(String),
}

impl FileSize {
    fn to_bytes(&self) -> u64 {
        match self {
            FileSize::Bytes(n) => *n,
            FileSize::Fractional(f) => *f as u64,
            FileSize::Text(s) => parse_size(s),
        }
    }
}

/// Parse a size string. A value containing `MB` is the leading float times
/// 1,048,576; anything else is read as raw bytes. Unparseable input counts
/// as zero so the ceiling check stays permissive.
pub fn parse_size(text: &str) -> u64 {
    let text = text.trim();
    let leading: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if text.contains("MB") {
        let mb: f64 = leading.parse().unwrap_or(0.0);
        (mb * 1_048_576.0) as u64
    } else {
        leading.parse().unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct AlphaEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<AlphaData>,
}

#[derive(Debug, Deserialize)]
struct AlphaData {
    #[serde(rename = "downloadLink")]
    download_link: Option<String>,
    size: Option<FileSize>,
}

#[derive(Debug, Deserialize)]
struct TeraEnvelope {
    #[serde(default)]
    status: String,
    message: Option<String>,
    data: Option<TeraData>,
}

#[derive(Debug, Deserialize)]
struct TeraData {
    download_url: Option<String>,
    file_name: Option<String>,
    file_size: Option<FileSize>,
}

/// Decode an upstream response body into a [`Resolution`].
pub fn decode(schema: ResolverSchema, body: Value) -> Result<Resolution, ResolveError> {
    match schema {
        ResolverSchema::Alpha => {
            let envelope: AlphaEnvelope =
                serde_json::from_value(body).map_err(|_| ResolveError::Upstream(None))?;
            if !envelope.success {
                return Err(ResolveError::Upstream(None));
            }
            let data = envelope.data.ok_or(ResolveError::MissingLink)?;
            let download_url = data.download_link.ok_or(ResolveError::MissingLink)?;
            Ok(Resolution {
                download_url,
                file_name: None,
                size_bytes: data.size.map(|s| s.to_bytes()).unwrap_or(0),
            })
        }
        ResolverSchema::TeraDl => {
            let envelope: TeraEnvelope =
                serde_json::from_value(body).map_err(|_| ResolveError::Upstream(None))?;
            if envelope.status != "success" {
                return Err(ResolveError::Upstream(envelope.message));
            }
            let data = envelope.data.ok_or(ResolveError::MissingLink)?;
            let download_url = data.download_url.ok_or(ResolveError::MissingLink)?;
            Ok(Resolution {
                download_url,
                file_name: data.file_name,
                size_bytes: data.file_size.map(|s| s.to_bytes()).unwrap_or(0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_size_mb_suffix() {
        assert_eq!(parse_size("15MB"), 15 * 1024 * 1024);
        assert_eq!(parse_size("1.5MB"), (1.5f64 * 1_048_576.0) as u64);
    }

    #[test]
    fn test_parse_size_raw_bytes() {
        assert_eq!(parse_size("52428800"), 52428800);
        assert_eq!(parse_size("garbage"), 0);
    }

    #[test]
    fn test_alpha_success() {
        let body = json!({
            "success": true,
            "data": { "downloadLink": "https://dl.example/abc", "size": 42 }
        });
        let resolution = decode(ResolverSchema::Alpha, body).unwrap();
        assert_eq!(resolution.download_url, "https://dl.example/abc");
        assert_eq!(resolution.file_name, None);
        assert_eq!(resolution.size_bytes, 42);
    }

    #[test]
    fn test_alpha_failure_flag() {
        let body = json!({ "success": false });
        assert!(matches!(
            decode(ResolverSchema::Alpha, body),
            Err(ResolveError::Upstream(None))
        ));
    }

    #[test]
    fn test_alpha_missing_link() {
        let body = json!({ "success": true, "data": { "size": 10 } });
        assert!(matches!(
            decode(ResolverSchema::Alpha, body),
            Err(ResolveError::MissingLink)
        ));
    }

    #[test]
    fn test_teradl_success_with_string_size() {
        let body = json!({
            "status": "success",
            "data": {
                "download_url": "https://dl.example/xyz",
                "file_name": "movie.mp4",
                "file_size": "15MB"
            }
        });
        let resolution = decode(ResolverSchema::TeraDl, body).unwrap();
        assert_eq!(resolution.file_name.as_deref(), Some("movie.mp4"));
        assert_eq!(resolution.size_bytes, 15 * 1024 * 1024);
    }

    #[test]
    fn test_teradl_failure_carries_server_message() {
        let body = json!({ "status": "error", "message": "link expired" });
        match decode(ResolverSchema::TeraDl, body) {
            Err(ResolveError::Upstream(Some(msg))) => assert_eq!(msg, "link expired"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_fractional_size_decodes() {
        let body = json!({
            "status": "success",
            "data": { "download_url": "u", "file_size": 1500000.5 }
        });
        let resolution = decode(ResolverSchema::TeraDl, body).unwrap();
        assert_eq!(resolution.size_bytes, 1_500_000);
    }

    #[test]
    fn test_numeric_size_passes_through() {
        let body = json!({
            "status": "success",
            "data": { "download_url": "u", "file_size": 52428800u64 }
        });
        let resolution = decode(ResolverSchema::TeraDl, body).unwrap();
        assert_eq!(resolution.size_bytes, 52428800);
    }
}
