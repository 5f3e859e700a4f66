//! Piecewise fountain height schedule.
//!
//! Each site raises its spray pole a handful of times over a winter; the
//! measured raising events form a step function of outlet height over time.
//! The simulator consults this schedule to infer spray radius at each step.

use crate::error::{IcestupaError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One measured spray-pole state: from `time` onward the fountain outlet
/// sits `height_m` metres above the ice base, until the next breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FountainBreakpoint {
    pub time: NaiveDateTime,
    pub height_m: f64,
}

/// Right-continuous step function of fountain outlet height over time.
///
/// Built from hand-curated per-site breakpoint tables; construction
/// validates them rather than trusting the literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FountainSchedule {
    breakpoints: Vec<FountainBreakpoint>,
}

impl FountainSchedule {
    /// Validate and build a schedule from ordered breakpoints.
    ///
    /// Fails if the list is empty, timestamps are not strictly increasing,
    /// or any height is negative.
    pub fn build(breakpoints: Vec<FountainBreakpoint>) -> Result<FountainSchedule> {
        if breakpoints.is_empty() {
            return Err(IcestupaError::InvalidSchedule(
                "breakpoint list is empty".to_string(),
            ));
        }
        for bp in &breakpoints {
            if bp.height_m < 0.0 {
                return Err(IcestupaError::InvalidSchedule(format!(
                    "negative height {} at {}",
                    bp.height_m, bp.time
                )));
            }
        }
        for pair in breakpoints.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(IcestupaError::InvalidSchedule(format!(
                    "timestamps not strictly increasing: {} then {}",
                    pair[0].time, pair[1].time
                )));
            }
        }
        Ok(FountainSchedule { breakpoints })
    }

    /// Fountain height at time `t`: the height of the latest breakpoint at
    /// or before `t`.
    ///
    /// A query before the first breakpoint returns the first breakpoint's
    /// height. Nothing sprays before a site's start date, so the only
    /// callers that hit this branch are plotting ranges padded past the
    /// deployment window; holding the initial height keeps those total.
    pub fn height_at(&self, t: NaiveDateTime) -> f64 {
        match self.breakpoints.partition_point(|bp| bp.time <= t) {
            0 => self.breakpoints[0].height_m,
            n => self.breakpoints[n - 1].height_m,
        }
    }

    pub fn breakpoints(&self) -> &[FountainBreakpoint] {
        &self.breakpoints
    }

    /// Timestamp of the first raising event. Site validation pins this to
    /// the site's start date.
    pub fn start_time(&self) -> NaiveDateTime {
        self.breakpoints[0].time
    }

    pub fn initial_height(&self) -> f64 {
        self.breakpoints[0].height_m
    }
}

/// Shorthand for literal schedule tables.
pub fn breakpoint(time: NaiveDateTime, height_m: f64) -> FountainBreakpoint {
    FountainBreakpoint { time, height_m }
}
