use crate::calc::{date_key, dates_in_range};
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn run(start: &str, end: &str) -> Result<()> {
    let start = parse(start)?;
    let end = parse(end)?;
    write_range(start, end, &mut std::io::stdout())
}

fn parse(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}' (expected YYYY-MM-DD)"))
}

/// Writes every date in the inclusive range, one per line.
pub(crate) fn write_range<W: std::io::Write>(
    start: NaiveDate,
    end: NaiveDate,
    out: &mut W,
) -> Result<()> {
    for date in dates_in_range(start, end) {
        writeln!(out, "{}", date_key(date))?;
    }
    Ok(())
}
