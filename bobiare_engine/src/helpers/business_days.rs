//! # Delivery date estimates
//!
//! Turnaround times are quoted in business days. Saturdays and Sundays do not count; public holidays are not taken
//! into account.
//!
//! Dates are shown to customers in the long Argentine Spanish form, e.g. `30 de octubre de 2026`.
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The number of business days quoted on the order confirmation page.
pub const CONFIRMATION_BUSINESS_DAYS: u32 = 10;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const WEEKDAYS_ES: [&str; 7] = ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"];

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Steps forward one calendar day at a time from `start`, counting only weekdays, until `days` business days have
/// been added. `start` itself is never counted.
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut date = start;
    let mut added = 0;
    while added < days {
        date += Duration::days(1);
        if !is_weekend(date) {
            added += 1;
        }
    }
    date
}

pub fn estimated_delivery_date(today: NaiveDate) -> NaiveDate {
    add_business_days(today, CONFIRMATION_BUSINESS_DAYS)
}

/// `30 de octubre de 2026`
pub fn format_long_date_es(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), month_name_es(date.month()), date.year())
}

/// `month` is 1-based. Out-of-range values yield an empty string.
pub fn month_name_es(month: u32) -> &'static str {
    month.checked_sub(1).and_then(|i| MONTHS_ES.get(i as usize)).copied().unwrap_or_default()
}

pub fn weekday_name_es(date: NaiveDate) -> &'static str {
    WEEKDAYS_ES[date.weekday().num_days_from_sunday() as usize]
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn skips_weekends() {
        // Friday 2026-10-16 + 10 business days lands on Friday 2026-10-30, jumping two weekends
        assert_eq!(add_business_days(date(2026, 10, 16), 10), date(2026, 10, 30));
        // Saturday start: the next business day is Monday
        assert_eq!(add_business_days(date(2026, 10, 17), 1), date(2026, 10, 19));
        assert_eq!(add_business_days(date(2026, 10, 14), 0), date(2026, 10, 14));
    }

    #[test]
    fn span_contains_exactly_the_weekend_days() {
        let start = date(2023, 8, 22);
        let end = estimated_delivery_date(start);
        let span = (end - start).num_days();
        let weekend_days = (1..=span).filter(|d| is_weekend(start + Duration::days(*d))).count() as i64;
        assert_eq!(span - weekend_days, 10);
        assert!(!is_weekend(end));
    }

    #[test]
    fn spanish_long_dates() {
        assert_eq!(format_long_date_es(date(2026, 10, 30)), "30 de octubre de 2026");
        assert_eq!(format_long_date_es(date(2023, 8, 1)), "1 de agosto de 2023");
        assert_eq!(month_name_es(13), "");
        assert_eq!(weekday_name_es(date(2023, 8, 20)), "domingo");
    }
}
