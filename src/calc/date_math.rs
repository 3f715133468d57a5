use chrono::{Datelike, NaiveDate};

/// Formats a date as the "YYYY-MM-DD" key used throughout the app.
/// ISO keys sort lexicographically in chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = ((new_total % 12 + 12) % 12 + 1) as u32;
    let year_delta = new_total.div_euclid(12);
    let new_year = year + year_delta;
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

/// Every calendar day from the earlier to the later of `a` and `b`,
/// inclusive. Argument order does not matter. Stepping happens on
/// `NaiveDate`, so clock shifts cannot skip or repeat a day.
pub fn dates_in_range(a: NaiveDate, b: NaiveDate) -> Vec<NaiveDate> {
    let (start, end) = if b < a { (b, a) } else { (a, b) };
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}
