pub mod date_math;
pub mod month;

pub use date_math::{add_months, date_key, dates_in_range, days_in_month};
pub use month::{DayDescriptor, build_month, grid_column};
