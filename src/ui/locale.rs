use anyhow::{Result, bail};

/// Weekday position of each Monday-first header column: Monday = 1 through
/// Saturday = 6, with Sunday = 0 closing the week.
pub const DAY_POSITIONS: [u32; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Month and weekday name tables injected into the renderer instead of
/// read from process-wide state.
#[derive(Debug, Clone)]
pub struct Locale {
    pub month_names: [&'static str; 12],
    /// Two-letter header labels in Monday-first column order.
    pub day_names_short: [&'static str; 7],
}

impl Locale {
    pub fn english() -> Self {
        Locale {
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            day_names_short: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }

    pub fn spanish() -> Self {
        Locale {
            month_names: [
                "Enero",
                "Febrero",
                "Marzo",
                "Abril",
                "Mayo",
                "Junio",
                "Julio",
                "Agosto",
                "Septiembre",
                "Octubre",
                "Noviembre",
                "Diciembre",
            ],
            day_names_short: ["Lu", "Ma", "Mi", "Ju", "Vi", "Sá", "Do"],
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "english" | "en" => Ok(Self::english()),
            "spanish" | "es" => Ok(Self::spanish()),
            other => bail!("unknown locale '{}' (expected 'english' or 'spanish')", other),
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|index| self.month_names.get(index as usize))
            .copied()
            .unwrap_or("Unknown")
    }
}
