use std::path::PathBuf;

use crate::error::{ClaimsError, Result};
use crate::settings::{ledgers_dir, load_settings, save_settings, shellexpand_path};

pub fn run(path: &str) -> Result<()> {
    let resolved = PathBuf::from(shellexpand_path(path));
    let ledgers = ledgers_dir(&resolved);

    if !ledgers.is_dir() {
        return Err(ClaimsError::Settings(format!(
            "No ledgers found at {}\nRun `quickclaims init --data-dir {}` to create one.",
            ledgers.display(),
            resolved.display()
        )));
    }

    let mut settings = load_settings();
    settings.data_dir = resolved.to_string_lossy().to_string();
    save_settings(&settings)?;

    println!("Switched to {}", resolved.display());
    Ok(())
}
