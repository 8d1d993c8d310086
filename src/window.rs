/// Change Window Module
///
/// Computes the half-open date range `[start, end)` used to select source rows
/// by their `last_update` column. Pure date arithmetic: the run date is always
/// supplied by the caller so a retried run selects the same rows.
use crate::error::EtlError;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ChangeWindow {
    /// The calendar day before `run_date`
    pub fn yesterday(run_date: NaiveDate) -> Result<Self, EtlError> {
        Self::lookback(run_date, 1)
    }

    /// The `days` calendar days before `run_date`, excluding `run_date` itself
    pub fn lookback(run_date: NaiveDate, days: u32) -> Result<Self, EtlError> {
        if days == 0 {
            return Err(EtlError::InvalidLookback(days));
        }

        let start =
            run_date.checked_sub_days(Days::new(u64::from(days))).ok_or(EtlError::WindowOutOfRange(run_date))?;

        Ok(Self { start, end: run_date })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive lower bound, bound to the first `?` of the window predicate
    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Exclusive upper bound, bound to the second `?` of the window predicate
    pub fn end_bound(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    /// Same test the SQL predicate applies to `last_update`
    pub fn contains(&self, last_update: NaiveDateTime) -> bool {
        last_update >= self.start_bound() && last_update < self.end_bound()
    }
}

impl fmt::Display for ChangeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
