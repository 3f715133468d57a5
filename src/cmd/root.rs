use std::collections::BTreeSet;
use std::time::Duration;

use crate::data::{AppSettings, Persistable, SelectionFile};
use crate::ui::locale::Locale;
use crate::ui::picker_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};

pub fn run(months_override: Option<u32>, dates_override: Option<&str>) -> Result<()> {
    let settings = AppSettings::load()?;

    let number_of_months = months_override.unwrap_or(settings.number_of_months);
    if number_of_months == 0 {
        bail!("number of months must be at least 1");
    }

    let locale = Locale::from_name(&settings.locale)?;

    let initial = match dates_override {
        Some(list) => parse_date_list(list)?,
        None => SelectionFile::load()?.parse_dates()?,
    };

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(
        number_of_months,
        Duration::from_millis(settings.hold_threshold_ms),
        locale,
        initial,
        today,
    );

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // The picker's output: the final sorted selection, one line on stdout.
    println!("{}", app.input_value());

    result
}

/// Parses a comma-separated list of YYYY-MM-DD dates. Blank entries are
/// skipped so a trailing comma is harmless.
pub(crate) fn parse_date_list(list: &str) -> Result<BTreeSet<NaiveDate>> {
    list.split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{raw}' in --dates"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_list_valid() {
        let dates = parse_date_list("2025-05-01,2025-05-02").unwrap();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
    }

    #[test]
    fn test_parse_date_list_trims_and_skips_blanks() {
        let dates = parse_date_list(" 2025-05-01 , ,2025-05-02,").unwrap();
        assert_eq!(dates.len(), 2);
    }

    #[test]
    fn test_parse_date_list_empty_string() {
        assert!(parse_date_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_date_list_rejects_malformed() {
        let err = parse_date_list("2025-05-01,05/02/2025").unwrap_err();
        assert!(err.to_string().contains("05/02/2025"));
    }

    #[test]
    fn test_parse_date_list_dedups() {
        let dates = parse_date_list("2025-05-01,2025-05-01").unwrap();
        assert_eq!(dates.len(), 1);
    }
}
