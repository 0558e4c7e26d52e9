//! ISO-8601 content durations as emitted by the video platform

use crate::{Result, ScoutCoreError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const SECONDS_PER_WEEK: f64 = 604_800.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
        )
        .expect("duration pattern is valid")
    })
}

/// Elapsed content time parsed from an ISO-8601 duration such as `PT5M30S`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ContentDuration {
    total_seconds: f64,
}

impl ContentDuration {
    /// Parse the `P[nW][nD][T[nH][nM][n[.n]S]]` subset.
    ///
    /// Year and month designators are rejected since their length depends on
    /// the calendar.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = || ScoutCoreError::InvalidDuration(value.to_string());

        // "PT" or "P1DT" would otherwise match with an empty time part
        if value.ends_with('T') {
            return Err(invalid());
        }

        let captures = duration_pattern().captures(value).ok_or_else(invalid)?;

        let mut matched_any = false;
        let mut component = |index: usize| -> Result<f64> {
            match captures.get(index) {
                Some(m) => {
                    matched_any = true;
                    m.as_str().parse::<f64>().map_err(|_| invalid())
                }
                None => Ok(0.0),
            }
        };

        let weeks = component(1)?;
        let days = component(2)?;
        let hours = component(3)?;
        let minutes = component(4)?;
        let seconds = component(5)?;

        if !matched_any {
            return Err(invalid());
        }

        Ok(Self {
            total_seconds: weeks * SECONDS_PER_WEEK
                + days * SECONDS_PER_DAY
                + hours * 3600.0
                + minutes * 60.0
                + seconds,
        })
    }

    pub fn from_seconds(total_seconds: f64) -> Self {
        Self { total_seconds: total_seconds.max(0.0) }
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Length in minutes as a real number
    pub fn minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    /// Human-readable `H:MM:SS` (one hour or more) or `M:SS`
    pub fn display(&self) -> String {
        let total = self.total_seconds as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if self.total_seconds >= 3600.0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", total / 60, seconds)
        }
    }
}

impl fmt::Display for ContentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
