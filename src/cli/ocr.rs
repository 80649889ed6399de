use std::path::Path;

use crate::error::Result;
use crate::settings::load_settings;

pub fn run(image: &str, key: Option<String>) -> Result<()> {
    let key = key.unwrap_or_else(|| load_settings().ocr_key);
    let response = crate::ocr::recognize(Path::new(image), &key)?;
    match response.first_text() {
        Some(text) => println!("OCR Text:\n{text}"),
        None => println!("OCR Text:\n(no text recognized)"),
    }
    Ok(())
}
