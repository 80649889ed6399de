use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{
    exports_dir, ledgers_dir, load_settings, save_settings, shellexpand_path, Settings,
};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let defaults = Settings::default();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if settings.data_dir == defaults.data_dir {
        // First run — prompt for data dir
        let default = &settings.data_dir;
        println!("Data directory [{}]: ", default);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(ledgers_dir(&resolved))?;
    std::fs::create_dir_all(exports_dir(&resolved))?;

    println!("Initialized quickclaims at {}", resolved.display());
    Ok(())
}
