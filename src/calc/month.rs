use chrono::{Datelike, NaiveDate};

use crate::calc::date_math::days_in_month;

/// One calendar day prepared for grid rendering. Transient: rebuilt from
/// scratch whenever a month is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDescriptor {
    pub date: NaiveDate,
    /// 0-6 with Sunday = 0 and Monday = 1, matching the header position
    /// labels used for column lookups.
    pub weekday_position: u32,
    pub is_first_of_month: bool,
    pub is_last_of_month: bool,
    pub is_today: bool,
    /// Strictly before `today`. Past days render dimmed and take no input.
    pub is_past: bool,
}

/// Builds one descriptor per day of the given month in ascending date order.
/// The caller captures `today` once per pass so every descriptor is judged
/// against the same reference day.
pub fn build_month(year: i32, month: u32, today: NaiveDate) -> Vec<DayDescriptor> {
    let last_day = days_in_month(year, month);
    (1..=last_day)
        .map(|day| {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            DayDescriptor {
                date,
                weekday_position: date.weekday().num_days_from_sunday(),
                is_first_of_month: day == 1,
                is_last_of_month: day == last_day,
                is_today: date == today,
                is_past: date < today,
            }
        })
        .collect()
}

/// Monday-first grid column (0-6) for a weekday position. Sunday lands in
/// the last column.
pub fn grid_column(weekday_position: u32) -> u16 {
    if weekday_position == 0 {
        6
    } else {
        weekday_position as u16 - 1
    }
}
