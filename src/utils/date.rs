use chrono::{Datelike, Local, NaiveDate};

/// Lower-case `<month>_<year>` label used in report file names, e.g. `october_2026`
#[must_use]
pub fn month_and_year(date: NaiveDate) -> String {
    format!("{}_{}", date.format("%B").to_string().to_lowercase(), date.year())
}

/// [`month_and_year`] for today's local date
#[must_use]
pub fn current_month_and_year() -> String {
    month_and_year(Local::now().date_naive())
}
