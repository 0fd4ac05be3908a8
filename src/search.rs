use crate::{
    calendar,
    field::{FieldSet, FieldValue, ValueSet},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::borrow::Cow;
use tracing::{trace, warn};

/// Full Gregorian cycle: if nothing matches within it, nothing ever matches.
const MAX_YEARS_SCANNED: u32 = 400;

/// Direction of the scan in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Closest candidate strictly beyond `value` in the scan direction.
    #[inline]
    fn nearest(self, candidates: &ValueSet, value: FieldValue) -> Option<FieldValue> {
        match self {
            Self::Forward => candidates.after(value),
            Self::Backward => candidates.before(value),
        }
    }

    /// Candidate a finer level rolls over to.
    #[inline]
    fn extreme(self, candidates: &ValueSet) -> Option<FieldValue> {
        match self {
            Self::Forward => candidates.first(),
            Self::Backward => candidates.last(),
        }
    }

    #[inline]
    fn year_step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Granularity levels, from the finest to the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Level {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Level {
    #[inline]
    fn coarser(self) -> Self {
        match self {
            Self::Minute => Self::Hour,
            Self::Hour => Self::Day,
            Self::Day => Self::Month,
            Self::Month | Self::Year => Self::Year,
        }
    }

    /// Levels below this one, coarse to fine: days depend on month and year, so they are reset first.
    #[inline]
    fn finer(self) -> &'static [Level] {
        match self {
            Self::Minute => &[],
            Self::Hour => &[Self::Minute],
            Self::Day => &[Self::Hour, Self::Minute],
            Self::Month => &[Self::Day, Self::Hour, Self::Minute],
            Self::Year => &[Self::Month, Self::Day, Self::Hour, Self::Minute],
        }
    }
}

/// Minute-precision time broken into the components the scan works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TimeComponents {
    pub(crate) minute: FieldValue,
    pub(crate) hour: FieldValue,
    pub(crate) day: FieldValue,
    pub(crate) month: FieldValue,
    pub(crate) year: i32,
}

impl TimeComponents {
    #[inline]
    fn get(&self, level: Level) -> FieldValue {
        match level {
            Level::Minute => self.minute,
            Level::Hour => self.hour,
            Level::Day => self.day,
            Level::Month => self.month,
            Level::Year => unreachable!("year isn't a bounded field"),
        }
    }

    #[inline]
    fn set(&mut self, level: Level, value: FieldValue) {
        match level {
            Level::Minute => self.minute = value,
            Level::Hour => self.hour = value,
            Level::Day => self.day = value,
            Level::Month => self.month = value,
            Level::Year => unreachable!("year isn't a bounded field"),
        }
    }

    /// Returns `None` if the year is beyond the range `chrono` can represent.
    pub(crate) fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month.into(), self.day.into())?.and_hms_opt(
            self.hour.into(),
            self.minute.into(),
            0,
        )
    }
}

impl From<NaiveDateTime> for TimeComponents {
    /// Seconds and fractions are truncated.
    fn from(value: NaiveDateTime) -> Self {
        Self {
            minute: value.minute() as FieldValue,
            hour: value.hour() as FieldValue,
            day: value.day() as FieldValue,
            month: value.month() as FieldValue,
            year: value.year(),
        }
    }
}

/// Outcome of a single level visit.
enum Step {
    /// Current value is permitted.
    Kept,
    /// Value was moved to the nearest candidate.
    Moved,
    /// No candidate in the scan direction, coarser level has to roll over.
    Exhausted,
}

/// Five parsed fields of a cron expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Fields {
    pub(crate) minute: FieldSet,
    pub(crate) hour: FieldSet,
    pub(crate) dom: FieldSet,
    pub(crate) month: FieldSet,
    pub(crate) dow: FieldSet,
}

impl Fields {
    /// Permitted values of the level under the current coarser components.
    fn candidates(&self, level: Level, current: &TimeComponents) -> Cow<'_, ValueSet> {
        match level {
            Level::Minute => Cow::Borrowed(self.minute.values()),
            Level::Hour => Cow::Borrowed(self.hour.values()),
            Level::Day => Cow::Owned(calendar::resolve_days(
                current.year,
                current.month,
                &self.dom,
                &self.dow,
            )),
            Level::Month => Cow::Borrowed(self.month.values()),
            Level::Year => unreachable!("year isn't a bounded field"),
        }
    }

    /// Returns `true` if every component is permitted.
    pub(crate) fn matches(&self, time: &TimeComponents) -> bool {
        self.minute.contains(time.minute)
            && self.hour.contains(time.hour)
            && self.month.contains(time.month)
            && calendar::resolve_days(time.year, time.month, &self.dom, &self.dow).contains(time.day)
    }

    /// Looks for the nearest match strictly after (or before) `start`.
    ///
    /// Levels are visited from minutes up to years.
    /// If the current value of a level is permitted, the scan goes one level up.
    /// Otherwise, it moves the value to the nearest candidate in the scan direction
    /// and resets all finer levels to their first (or last) candidates.
    /// If there is no such candidate, the next coarser level has to roll over, i.e. move even if its value is permitted.
    /// Day candidates depend on month and year, so every change of them sends the scan back to days.
    ///
    /// Returns `None` if nothing matches within [`MAX_YEARS_SCANNED`] years, or the match isn't representable.
    pub(crate) fn scan(&self, start: TimeComponents, direction: Direction) -> Option<TimeComponents> {
        trace!(?start, ?direction, "scan started");

        let mut current = start;
        let mut level = Level::Minute;
        let mut roll_over = true;

        loop {
            if current.year.abs_diff(start.year) > MAX_YEARS_SCANNED {
                warn!(?start, ?direction, years = MAX_YEARS_SCANNED, "cron expression never matches");
                return None;
            }

            let step = if level == Level::Year {
                if !roll_over {
                    trace!(?start, found = ?current, "scan finished");
                    return Some(current);
                }
                current.year += direction.year_step();
                Step::Moved
            } else {
                let candidates = self.candidates(level, &current);
                let value = current.get(level);

                if !roll_over && candidates.contains(value) {
                    Step::Kept
                } else if let Some(found) = direction.nearest(&candidates, value) {
                    current.set(level, found);
                    Step::Moved
                } else {
                    Step::Exhausted
                }
            };

            match step {
                Step::Kept => level = level.coarser(),
                Step::Moved => {
                    for &finer in level.finer() {
                        // An empty day set leaves the stale day, the day level rejects it on the next visit.
                        if let Some(value) = direction.extreme(&self.candidates(finer, &current)) {
                            current.set(finer, value);
                        }
                    }
                    roll_over = false;
                    level = if level >= Level::Month { Level::Day } else { level.coarser() };
                }
                Step::Exhausted => {
                    roll_over = true;
                    level = level.coarser();
                }
            }
        }
    }
}
