// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Five-field cron expressions with POSIX semantics, backed by `croner`.
//!
//! Fields are `minute hour day-of-month month day-of-week`. Each field accepts
//! `*`, single values, `a-b` ranges, comma lists and `/n` steps. Months and
//! weekdays also accept three-letter English names, and day-of-week accepts
//! both 0 and 7 for Sunday. The `@hourly` family of macros is expanded here
//! before the pattern reaches `croner`.
//!
//! When day-of-month and day-of-week are both restricted, a day matches if
//! either of them matches (classic cron behaviour).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use croner::Cron;
use thiserror::Error;

/// Look-back windows for `prev_at_or_before`, widened until a fire is found.
/// The last one covers leap-day schedules (`0 0 29 2 *`).
const LOOKBACK_MINUTES: &[i64] = &[60, 60 * 24, 60 * 24 * 32, 60 * 24 * 366, 60 * 24 * 366 * 8];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronParseError {
    #[error("cron expression is empty")]
    Empty,

    #[error("expected 5 fields (minute hour day-of-month month day-of-week), found {0}")]
    FieldCount(usize),

    #[error("unknown cron macro '{0}'")]
    UnknownMacro(String),

    #[error("invalid cron expression '{expression}': {message}")]
    Invalid { expression: String, message: String },
}

/// A parsed cron schedule
#[derive(Clone)]
pub struct CronExpr {
    source: String,
    cron: Arc<Cron>,
}

impl CronExpr {
    pub fn parse(expression: &str) -> Result<Self, CronParseError> {
        let source = expression.trim();
        if source.is_empty() {
            return Err(CronParseError::Empty);
        }

        let expanded = if source.starts_with('@') { expand_macro(source)? } else { source };
        let fields = expanded.split_whitespace().count();
        if fields != 5 {
            return Err(CronParseError::FieldCount(fields));
        }

        let pattern = expanded.to_ascii_uppercase();
        let cron = Cron::new(&pattern).parse().map_err(|e| CronParseError::Invalid {
            expression: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { source: source.to_string(), cron: Arc::new(cron) })
    }

    /// The expression as written (macros are not expanded)
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the schedule fires in the minute containing `at`.
    /// Seconds and sub-second parts are ignored.
    pub fn is_due<T: Datelike + Timelike>(&self, at: &T) -> bool {
        let Some(minute) = NaiveDate::from_ymd_opt(at.year(), at.month(), at.day())
            .and_then(|date| date.and_hms_opt(at.hour(), at.minute(), 0))
        else {
            return false;
        };
        self.cron.is_time_matching(&utc(minute)).unwrap_or(false)
    }

    /// First firing minute strictly after `at`
    pub fn next_after(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let from = truncate_to_minute(at)?;
        self.next_from(from, false)
    }

    /// Latest firing minute at or before `at`
    pub fn prev_at_or_before(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let until = truncate_to_minute(at)?;
        for window in LOOKBACK_MINUTES {
            let mut cursor = until.checked_sub_signed(Duration::minutes(*window))?;
            let mut latest = None;
            while let Some(fire) = self.next_from(cursor, latest.is_none()) {
                if fire > until {
                    break;
                }
                latest = Some(fire);
                cursor = fire;
            }
            if latest.is_some() {
                return latest;
            }
        }
        None
    }

    fn next_from(&self, from: NaiveDateTime, inclusive: bool) -> Option<NaiveDateTime> {
        self.cron
            .find_next_occurrence(&utc(from), inclusive)
            .ok()
            .map(|fire| fire.naive_utc())
    }
}

impl fmt::Debug for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CronExpr").field(&self.source).finish()
    }
}

impl PartialEq for CronExpr {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CronExpr {}

impl FromStr for CronExpr {
    type Err = CronParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn expand_macro(source: &str) -> Result<&'static str, CronParseError> {
    match source.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Ok("0 0 1 1 *"),
        "@monthly" => Ok("0 0 1 * *"),
        "@weekly" => Ok("0 0 * * 0"),
        "@daily" | "@midnight" => Ok("0 0 * * *"),
        "@hourly" => Ok("0 * * * *"),
        _ => Err(CronParseError::UnknownMacro(source.to_string())),
    }
}

fn utc(at: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&at)
}

fn truncate_to_minute(at: NaiveDateTime) -> Option<NaiveDateTime> {
    at.date().and_hms_opt(at.hour(), at.minute(), 0)
}

#[cfg(test)]
#[path = "cron_expr_tests.rs"]
mod tests;
