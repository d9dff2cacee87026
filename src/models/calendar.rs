//! Interval and work window models.
//!
//! # Time Model
//! All instants are naive local date-times. There is exactly one clock;
//! no timezone conversion happens anywhere in this crate.
//!
//! # Work Window
//! A work window is a daily recurring availability rule `[start_hour, end_hour)`
//! applied identically to every calendar day, with no weekend or holiday
//! exceptions. A placement must start and end inside the window of a
//! single day.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Whether an instant falls within this interval.
    #[inline]
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether two intervals overlap. Touching intervals do not.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Daily recurring availability rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    /// First hour of the day at which work may start.
    pub start_hour: u32,
    /// Hour of the day by which work must end. 24 = midnight.
    pub end_hour: u32,
}

impl Default for WorkWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 22,
        }
    }
}

impl WorkWindow {
    /// Creates a new work window.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Checks `0 <= start_hour < end_hour <= 24`.
    pub fn validate(&self) -> Result<(), String> {
        if self.end_hour > 24 {
            return Err(format!("end_hour {} exceeds 24", self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(format!(
                "start_hour {} must be before end_hour {}",
                self.start_hour, self.end_hour
            ));
        }
        Ok(())
    }

    /// Length of one day's window.
    #[inline]
    pub fn length(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.end_hour) - i64::from(self.start_hour))
    }

    /// Window opening instant on `day`.
    pub fn opens_on(&self, day: NaiveDate) -> Option<NaiveDateTime> {
        day.and_hms_opt(0, 0, 0)?
            .checked_add_signed(TimeDelta::hours(i64::from(self.start_hour)))
    }

    /// Window closing instant on `day`.
    pub fn closes_on(&self, day: NaiveDate) -> Option<NaiveDateTime> {
        day.and_hms_opt(0, 0, 0)?
            .checked_add_signed(TimeDelta::hours(i64::from(self.end_hour)))
    }

    /// Window opening on the calendar day after `t`.
    pub fn next_opening(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        self.opens_on(t.date().succ_opt()?)
    }

    /// Whether `t` lies in `[start_hour, end_hour)` of its day.
    pub fn is_open_at(&self, t: NaiveDateTime) -> bool {
        t.hour() >= self.start_hour && t.hour() < self.end_hour
    }

    /// Whether the interval starts and ends inside the window of one day.
    pub fn contains_interval(&self, interval: &Interval) -> bool {
        let day = interval.start.date();
        match (self.opens_on(day), self.closes_on(day)) {
            (Some(open), Some(close)) => {
                interval.start >= open && interval.start < close && interval.end <= close
            }
            _ => false,
        }
    }

    /// Initial search cursor for a batch run started at `now`.
    ///
    /// Outside the window the cursor moves to the next opening. Inside,
    /// a partial hour is rounded up to the next whole hour.
    pub fn initial_cursor(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let day = now.date();
        let open = self.opens_on(day)?;
        let close = self.closes_on(day)?;

        if now < open {
            return Some(open);
        }
        if now >= close {
            return self.next_opening(now);
        }

        let hour_floor = now.with_nanosecond(0)?.with_second(0)?.with_minute(0)?;
        if hour_floor == now {
            Some(now)
        } else {
            hour_floor.checked_add_signed(TimeDelta::hours(1))
        }
    }
}
