use std::path::Path;

use crate::data::persistence::get_data_dir;
use crate::data::{AppSettings, Persistable, SelectionFile};
use anyhow::Result;

pub fn run() -> Result<()> {
    let dir = get_data_dir()?;
    run_in_dir(&dir)?;
    println!("Config files initialized in {}.", dir.display());
    Ok(())
}

/// Writes default config files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    SelectionFile::default().save_to(dir)?;
    Ok(())
}
