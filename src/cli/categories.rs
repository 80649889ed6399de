use crate::error::Result;
use crate::models::CATEGORIES;

pub fn run() -> Result<()> {
    for name in CATEGORIES {
        println!("{name}");
    }
    Ok(())
}
