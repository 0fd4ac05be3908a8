use crate::Schedule;
#[cfg(feature = "now")]
use chrono::Utc;
use chrono::{DateTime, TimeZone};

/// Schedule bound to a movable reference instant.
///
/// This is a convenience layer over the stateless [`Schedule`] queries:
/// it remembers the instant and can step it from one match to another.
/// Moving requires `&mut self`, so a cursor has a single owner by construction,
/// share the [`Schedule`] itself if concurrent access is needed.
///
/// ```rust
/// use chrono::DateTime;
/// use cron_scan::{Cursor, Result, Schedule};
///
/// fn cursor() -> Result<()> {
///     let schedule = Schedule::new("0 9 * * MON-FRI")?;
///     let start = DateTime::parse_from_rfc3339("2024-01-05T10:00:00Z").unwrap();
///     let mut cursor = Cursor::new(schedule, start);
///
///     assert_eq!(cursor.advance().unwrap().to_rfc3339(), "2024-01-08T09:00:00+00:00");
///     assert_eq!(cursor.advance().unwrap().to_rfc3339(), "2024-01-09T09:00:00+00:00");
///     assert_eq!(cursor.retreat().unwrap().to_rfc3339(), "2024-01-08T09:00:00+00:00");
///
///     Ok(())
/// }
/// # cursor().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<Tz: TimeZone> {
    schedule: Schedule,
    reference: DateTime<Tz>,
}

impl<Tz: TimeZone> Cursor<Tz> {
    /// Constructs cursor which points to `reference`.
    pub fn new(schedule: Schedule, reference: DateTime<Tz>) -> Self {
        Self { schedule, reference }
    }

    /// Returns the underlying schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the current reference instant.
    #[inline]
    pub fn reference(&self) -> &DateTime<Tz> {
        &self.reference
    }

    /// Moves cursor to `reference`.
    #[inline]
    pub fn set_reference(&mut self, reference: DateTime<Tz>) {
        self.reference = reference;
    }

    /// Returns `true` if the reference instant matches the schedule.
    pub fn is_match(&self) -> bool {
        self.schedule.matches(&self.reference)
    }

    /// Returns the next match after the reference without moving the cursor.
    pub fn peek_next(&self) -> Option<DateTime<Tz>> {
        self.schedule.next_match(&self.reference)
    }

    /// Returns the previous match before the reference without moving the cursor.
    pub fn peek_previous(&self) -> Option<DateTime<Tz>> {
        self.schedule.previous_match(&self.reference)
    }

    /// Moves cursor to the next match and returns it.
    ///
    /// Cursor stays in place if there is no next match.
    pub fn advance(&mut self) -> Option<DateTime<Tz>> {
        let next = self.peek_next()?;
        self.reference = next.clone();
        Some(next)
    }

    /// Moves cursor to the previous match and returns it.
    ///
    /// Cursor stays in place if there is no previous match.
    pub fn retreat(&mut self) -> Option<DateTime<Tz>> {
        let previous = self.peek_previous()?;
        self.reference = previous.clone();
        Some(previous)
    }
}

#[cfg(feature = "now")]
impl Cursor<Utc> {
    /// Constructs cursor which points to the current time.
    pub fn now(schedule: Schedule) -> Self {
        Self::new(schedule, Utc::now())
    }
}
