use std::collections::BTreeSet;

use crate::data::persistence::Persistable;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional starting selection, read from selection.json. Construction
/// input only: the picker never writes the selection back to disk.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct SelectionFile {
    #[serde(default)]
    pub selected_dates: Vec<String>,
}

impl Persistable for SelectionFile {
    fn filename() -> &'static str {
        "selection.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl SelectionFile {
    /// Validates every entry, failing with the offending value when a date
    /// is malformed. Duplicates collapse into the set.
    pub fn parse_dates(&self) -> Result<BTreeSet<NaiveDate>> {
        self.selected_dates
            .iter()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{raw}' in selection file"))
            })
            .collect()
    }
}
