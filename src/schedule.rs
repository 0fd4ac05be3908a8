use crate::{
    field::{FieldKind, FieldSet},
    search::{Direction, Fields, TimeComponents},
    CronError, Result,
};
use chrono::{DateTime, TimeZone, Utc};
use std::{fmt::Display, str::FromStr};
use tracing::debug;

/// Months with 31 days.
const LONG_MONTHS: [u8; 7] = [1, 3, 5, 7, 8, 10, 12];

/// Represents a cron schedule expression with its methods.
///
/// Schedule is immutable, so it can be shared between threads and queried concurrently.
/// All calculations are done in UTC with minute precision:
/// seconds and fractions of the provided instants are truncated,
/// and results are converted back to the time zone of the provided instant.
///
/// For cron expression format and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    expression: String,
    fields: Fields,
}

impl Schedule {
    /// Parses and validates provided `expression` and constructs [`Schedule`] instance.
    ///
    /// Alternative way to construct [`Schedule`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided expression doesn't have five fields,
    /// some field is unparsable, or the expression obviously never matches.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        let elements: Vec<&str> = expression.split_whitespace().collect();

        if elements.len() != 5 {
            return Err(CronError::MalformedExpression(expression));
        }

        let fields = Fields {
            minute: FieldSet::parse(FieldKind::Minutes, elements[0])?,
            hour: FieldSet::parse(FieldKind::Hours, elements[1])?,
            dom: FieldSet::parse(FieldKind::DaysOfMonth, elements[2])?,
            month: FieldSet::parse(FieldKind::Months, elements[3])?,
            dow: FieldSet::parse(FieldKind::DaysOfWeek, elements[4])?,
        };

        if never_matches(&fields) {
            return Err(CronError::UnsatisfiableExpression(expression));
        }

        debug!(
            %expression,
            dom_wildcard = fields.dom.is_wildcard(),
            dow_wildcard = fields.dow.is_wildcard(),
            "cron expression parsed"
        );

        Ok(Self { expression, fields })
    }

    /// Returns the expression exactly as it was provided.
    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns `true` if the minute of the `instant` matches the schedule.
    pub fn matches<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        self.fields.matches(&components(instant))
    }

    /// Returns the earliest match strictly after the minute of `instant`.
    ///
    /// Returns `None` only if the expression never matches
    /// or the match is beyond the range of dates `chrono` can represent.
    pub fn next_match<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.scan(instant, Direction::Forward)
    }

    /// Returns the latest match strictly before the minute of `instant`.
    ///
    /// Returns `None` only if the expression never matches
    /// or the match is beyond the range of dates `chrono` can represent.
    pub fn previous_match<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.scan(instant, Direction::Backward)
    }

    /// Returns the earliest match starting from the minute of `instant` (inclusively).
    pub fn upcoming<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.matches(instant) {
            restore(components(instant), &instant.timezone())
        } else {
            self.next_match(instant)
        }
    }

    /// Returns the latest match up to the minute of `instant` (inclusively).
    pub fn latest<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.matches(instant) {
            restore(components(instant), &instant.timezone())
        } else {
            self.previous_match(instant)
        }
    }

    /// Returns all matches between `start` and `end`, both inclusively, in ascending order.
    ///
    /// The result is empty if `start` is later than `end`.
    pub fn matches_between<Tz: TimeZone>(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> Vec<DateTime<Tz>> {
        // Matches are whole minutes, so comparing with the untruncated end is the same.
        self.iter(start).take_while(|time| time <= end).collect()
    }

    /// Returns iterator of matches starting from `start` (inclusively) forward in time.
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, start: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        ScheduleIterator {
            next: self.upcoming(start),
            schedule: self.clone(),
            direction: Direction::Forward,
        }
    }

    /// Consumes [`Schedule`] and returns iterator of matches starting from `start` (inclusively) forward in time.
    #[inline]
    pub fn into_iter<Tz: TimeZone>(self, start: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        ScheduleIterator {
            next: self.upcoming(start),
            schedule: self,
            direction: Direction::Forward,
        }
    }

    /// Returns iterator of matches starting from `start` (inclusively) backward in time.
    #[inline]
    pub fn iter_rev<Tz: TimeZone>(&self, start: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        ScheduleIterator {
            next: self.latest(start),
            schedule: self.clone(),
            direction: Direction::Backward,
        }
    }

    fn scan<Tz: TimeZone>(&self, instant: &DateTime<Tz>, direction: Direction) -> Option<DateTime<Tz>> {
        let found = self.fields.scan(components(instant), direction)?;
        restore(found, &instant.timezone())
    }
}

/// The only two shapes which are rejected as never matching.
///
/// Both apply when day of week isn't restricted only:
/// otherwise every matching weekday of the permitted months matches.
fn never_matches(fields: &Fields) -> bool {
    let days = fields.dom.values().as_slice();
    let months = fields.month.values().as_slice();

    let day_31_in_short_months = days == [31_u8] && !LONG_MONTHS.iter().any(|month| fields.month.contains(*month));
    let after_29_in_february = months == [2_u8] && days.iter().all(|day| *day > 29);

    fields.dow.is_wildcard() && (day_31_in_short_months || after_29_in_february)
}

/// Breaks the UTC representation of `instant` into the components.
#[inline]
fn components<Tz: TimeZone>(instant: &DateTime<Tz>) -> TimeComponents {
    TimeComponents::from(instant.naive_utc())
}

/// Assembles UTC components back into an instant of `tz` time zone.
#[inline]
fn restore<Tz: TimeZone>(components: TimeComponents, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = components.to_naive()?;
    Some(Utc.from_utc_datetime(&naive).with_timezone(tz))
}

/// Contains iterator state.
#[derive(Debug, Clone)]
struct ScheduleIterator<Tz: TimeZone> {
    schedule: Schedule,
    next: Option<DateTime<Tz>>,
    direction: Direction,
}

impl<Tz: TimeZone> Iterator for ScheduleIterator<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.schedule.scan(&current, self.direction);
        Some(current)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.expression
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.expression.clone()
    }
}

impl TryFrom<String> for Schedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}
