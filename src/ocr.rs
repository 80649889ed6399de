use std::path::Path;

use reqwest::blocking::multipart;
use serde::Deserialize;

use crate::error::{ClaimsError, Result};

pub const ENDPOINT: &str = "https://api.ocr.space/parse/image";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcrResponse {
    #[serde(default)]
    pub parsed_results: Vec<ParsedResult>,
    #[serde(default)]
    pub is_errored_on_processing: bool,
    #[serde(default)]
    pub error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedResult {
    #[serde(default)]
    pub parsed_text: String,
}

impl OcrResponse {
    /// Text of the first result, as the service returned it.
    pub fn first_text(&self) -> Option<&str> {
        self.parsed_results.first().map(|r| r.parsed_text.as_str())
    }
}

/// Send one image to the OCR service. Single attempt, no retry.
pub fn recognize(image: &Path, api_key: &str) -> Result<OcrResponse> {
    let form = multipart::Form::new()
        .file("file", image)?
        .text("language", "eng")
        .text("apikey", api_key.to_string());

    tracing::debug!(image = %image.display(), "posting image to OCR service");
    let response = reqwest::blocking::Client::new()
        .post(ENDPOINT)
        .multipart(form)
        .send()?
        .error_for_status()?
        .json::<OcrResponse>()?;

    if response.is_errored_on_processing && response.parsed_results.is_empty() {
        let message = response
            .error_message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "OCR processing failed".to_string());
        return Err(ClaimsError::Other(message));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_response() {
        let json = r#"{
            "ParsedResults": [{"ParsedText": "CAFE\r\nTOTAL 12.50\r\n", "FileParseExitCode": 1}],
            "OCRExitCode": 1,
            "IsErroredOnProcessing": false
        }"#;
        let resp: OcrResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_text(), Some("CAFE\r\nTOTAL 12.50\r\n"));
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"IsErroredOnProcessing": true, "ErrorMessage": ["Invalid API key"]}"#;
        let resp: OcrResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_errored_on_processing);
        assert_eq!(resp.first_text(), None);
    }
}
