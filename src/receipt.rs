use std::path::Path;

use base64::Engine;

use crate::error::{ClaimsError, Result};

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Read an image file and return its bare filename and a data URI.
pub fn encode_file(path: &Path) -> Result<(String, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ClaimsError::Other(format!("Not a file: {}", path.display())))?
        .to_string();
    let bytes = std::fs::read(path)?;
    Ok((name, to_data_url(mime_for(path), &bytes)))
}

/// Decode a `data:<mime>;base64,<payload>` URI. Anything else yields `None`.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for(Path::new("r.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("r.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_encode_file_then_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap();
        let (name, url) = encode_file(&path).unwrap();
        assert_eq!(name, "receipt.png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), vec![0x89, b'P', b'N', b'G', 0, 1, 2]);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_data_url("not a data url").is_none());
        assert!(decode_data_url("data:image/png,plain").is_none());
        assert!(decode_data_url("data:image/png;base64,@@@").is_none());
    }

    #[test]
    fn test_encode_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(encode_file(&dir.path().join("gone.jpg")).is_err());
    }
}
