//! Date filters for expense queries.
//!
//! A [`DateFilter`] carries the optional `(year, month, day)` arguments of a
//! query. [`DateFilter::resolve`] turns it into a [`DateRange`] over
//! `created_at`, evaluated against the current instant:
//!
//! 1. year only, and it is the current year: `[start of year, now]` (closed).
//! 2. year + month: the calendar month, December ending at the next new year.
//! 3. year + month + day: that UTC day.
//! 4. anything else with a year: the whole calendar year.
//!
//! Without a year there is no range and `month`/`day` are ignored. A day
//! without a month is ignored as well.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::{EngineError, ResultEngine};

/// Interval over UTC instants.
///
/// `start` is always inclusive. `end` is exclusive unless `end_inclusive` is
/// set, which only happens for the year-so-far range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_inclusive: bool,
}

impl DateRange {
    /// Half-open range `[start, end)`.
    pub fn half_open(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    /// Closed range `[start, end]`.
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_inclusive: true,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if instant < self.start {
            return false;
        }
        if self.end_inclusive {
            instant <= self.end
        } else {
            instant < self.end
        }
    }
}

/// Optional calendar components used to filter expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateFilter {
    pub fn new(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    /// Computes the range selected by this filter at instant `now`.
    ///
    /// Returns `Ok(None)` when no year is given (match everything). Components
    /// that take part in the range must name a real calendar date, otherwise
    /// [`EngineError::InvalidDate`] is returned.
    pub fn resolve(&self, now: DateTime<Utc>) -> ResultEngine<Option<DateRange>> {
        let Some(year) = self.year else {
            return Ok(None);
        };

        let range = match (self.month, self.day) {
            (None, None) if year == now.year() => DateRange::closed(start_of_year(year)?, now),
            (Some(month), None) => {
                let month = validate_month(month)?;
                let start = start_of_day(year, month, 1)?;
                let end = if month == 12 {
                    start_of_year(next_year(year)?)?
                } else {
                    start_of_day(year, month + 1, 1)?
                };
                DateRange::half_open(start, end)
            }
            (Some(month), Some(day)) => {
                let month = validate_month(month)?;
                let start = start_of_day(year, month, day)?;
                let end = start
                    .checked_add_signed(Duration::days(1))
                    .ok_or_else(|| out_of_range(year))?;
                DateRange::half_open(start, end)
            }
            (None, _) => {
                DateRange::half_open(start_of_year(year)?, start_of_year(next_year(year)?)?)
            }
        };

        Ok(Some(range))
    }
}

fn validate_month(month: u32) -> ResultEngine<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(EngineError::InvalidDate(format!(
            "month must be between 1 and 12, got {month}"
        )))
    }
}

fn next_year(year: i32) -> ResultEngine<i32> {
    year.checked_add(1).ok_or_else(|| out_of_range(year))
}

fn start_of_year(year: i32) -> ResultEngine<DateTime<Utc>> {
    start_of_day(year, 1, 1)
}

fn start_of_day(year: i32, month: u32, day: u32) -> ResultEngine<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            EngineError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02} is not a calendar date"
            ))
        })
}

fn out_of_range(year: i32) -> EngineError {
    EngineError::InvalidDate(format!("year {year} is out of range"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        utc(2024, 6, 15, 10, 0, 0)
    }

    fn resolve(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<DateRange> {
        DateFilter::new(year, month, day).resolve(now()).unwrap()
    }

    #[test]
    fn no_year_means_no_range() {
        assert_eq!(resolve(None, None, None), None);
        assert_eq!(resolve(None, Some(6), None), None);
        assert_eq!(resolve(None, Some(6), Some(15)), None);
        assert_eq!(resolve(None, None, Some(15)), None);
    }

    #[test]
    fn month_and_day_without_year_are_not_validated() {
        assert_eq!(resolve(None, Some(13), Some(42)), None);
    }

    #[test]
    fn current_year_is_year_so_far() {
        let range = resolve(Some(2024), None, None).unwrap();
        assert_eq!(range, DateRange::closed(utc(2024, 1, 1, 0, 0, 0), now()));
        assert!(range.contains(now()));
        assert!(!range.contains(now() + Duration::nanoseconds(1)));
    }

    #[test]
    fn past_year_is_half_open() {
        let range = resolve(Some(2023), None, None).unwrap();
        assert_eq!(
            range,
            DateRange::half_open(utc(2023, 1, 1, 0, 0, 0), utc(2024, 1, 1, 0, 0, 0))
        );
        assert!(range.contains(utc(2023, 12, 31, 23, 59, 59)));
        assert!(!range.contains(utc(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn future_year_is_full_year() {
        let range = resolve(Some(2025), None, None).unwrap();
        assert!(!range.end_inclusive);
        assert_eq!(range.end, utc(2026, 1, 1, 0, 0, 0));
    }

    #[test]
    fn month_of_current_year_is_whole_month() {
        let range = resolve(Some(2024), Some(6), None).unwrap();
        assert_eq!(
            range,
            DateRange::half_open(utc(2024, 6, 1, 0, 0, 0), utc(2024, 7, 1, 0, 0, 0))
        );
    }

    #[test]
    fn december_ends_at_next_new_year() {
        let range = resolve(Some(2023), Some(12), None).unwrap();
        assert_eq!(range.start, utc(2023, 12, 1, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn day_filter_is_one_utc_day() {
        let range = resolve(Some(2024), Some(6), Some(15)).unwrap();
        assert_eq!(
            range,
            DateRange::half_open(utc(2024, 6, 15, 0, 0, 0), utc(2024, 6, 16, 0, 0, 0))
        );
        assert!(range.contains(utc(2024, 6, 15, 9, 0, 0)));
        assert!(!range.contains(utc(2024, 6, 14, 9, 0, 0)));
    }

    #[test]
    fn last_day_of_year_rolls_over() {
        let range = resolve(Some(2023), Some(12), Some(31)).unwrap();
        assert_eq!(range.end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn day_without_month_falls_back_to_full_year() {
        // Even for the current year: the day disables year-so-far.
        let range = resolve(Some(2024), None, Some(15)).unwrap();
        assert_eq!(
            range,
            DateRange::half_open(utc(2024, 1, 1, 0, 0, 0), utc(2025, 1, 1, 0, 0, 0))
        );

        let range = resolve(Some(2022), None, Some(99)).unwrap();
        assert_eq!(range.start, utc(2022, 1, 1, 0, 0, 0));
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        assert!(resolve(Some(2024), Some(2), Some(29)).is_some());

        let err = DateFilter::new(Some(2023), Some(2), Some(29))
            .resolve(now())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidDate("2023-02-29 is not a calendar date".to_string())
        );
    }

    #[test]
    fn invalid_components_are_rejected() {
        for (month, day) in [(Some(0), None), (Some(13), None), (Some(13), Some(1))] {
            let err = DateFilter::new(Some(2024), month, day)
                .resolve(now())
                .unwrap_err();
            assert!(matches!(err, EngineError::InvalidDate(_)), "{err:?}");
        }

        for day in [0, 31, 32] {
            let err = DateFilter::new(Some(2024), Some(2), Some(day))
                .resolve(now())
                .unwrap_err();
            assert!(matches!(err, EngineError::InvalidDate(_)), "{err:?}");
        }
    }

    #[test]
    fn unsupported_year_is_rejected() {
        let err = DateFilter::new(Some(i32::MAX), None, None)
            .resolve(now())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDate(_)));
    }

    #[test]
    fn resolving_twice_is_stable() {
        let filter = DateFilter::new(Some(2024), Some(3), None);
        assert_eq!(filter.resolve(now()).unwrap(), filter.resolve(now()).unwrap());

        let filter = DateFilter::new(Some(2024), None, None);
        assert_eq!(filter.resolve(now()).unwrap(), filter.resolve(now()).unwrap());
    }
}
