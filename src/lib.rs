//! Cron expression matcher: searches for the nearest schedule match before or after an instant.
#![deny(unsafe_code, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse classic five-field cron expressions;
//! - test whether an instant matches the expression;
//! - find the next or the previous match of the expression and enumerate matches within a time range.
//!
//! _This is not a cron jobs scheduler or runner._ It's the calculation engine a scheduler would call into:
//! no clocks, threads or I/O inside, all queries are pure functions of the schedule and the provided instant.
//!
//! ## Cron expression format
//!
//! Expression consists of exactly five whitespace-separated fields:
//!
//! | Field        | Allowed values  | Allowed special characters |
//! |--------------|-----------------|----------------------------|
//! | Minutes      | 0-59            | * , - /                    |
//! | Hours        | 0-23            | * , - /                    |
//! | Day of Month | 1-31            | * , - /                    |
//! | Month        | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | 0-6 or SUN-SAT  | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `MON-FRI`;
//! - `/` - repeating values up to the end of the field's range, i.e. `*/12`, `10/5`, `30-59/2`.
//!
//! Names are case-insensitive. There are no seconds or years fields and no `@daily`-like aliases.
//!
//! ### Days of month and days of week
//!
//! If only one of these fields is restricted (not `*`), it alone defines the matching days.
//! If both are restricted, a day matches when it satisfies _either_ of them,
//! i.e. `0 0 1 * 5` matches at midnight on the first day of every month and on every Friday.
//!
//! ### Time zones and precision
//!
//! Matching is done in UTC with minute precision. Instants of any [`chrono::TimeZone`] are accepted:
//! they are converted to UTC and seconds are truncated, results are returned in the time zone of the argument.
//!
//! ## How to use
//!
//! The main entity of the crate is a [`Schedule`] structure:
//! - [new()](Schedule::new): parses and validates the expression;
//! - [matches()](Schedule::matches): checks if an instant matches;
//! - [next_match()](Schedule::next_match) and [previous_match()](Schedule::previous_match):
//!   the nearest match strictly after or before an instant;
//! - [matches_between()](Schedule::matches_between): all matches within a time range;
//! - [iter()](Schedule::iter) and [iter_rev()](Schedule::iter_rev): endless series of matches.
//!
//! [`Cursor`] wraps a schedule and a reference instant which moves from one match to another.
//!
//! ### Example with `next_match`
//! ```rust
//! use chrono::DateTime;
//! use cron_scan::{Result, Schedule};
//!
//! fn next_match() -> Result<()> {
//!     let schedule = Schedule::new("0 0 1 * 5")?;
//!     let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
//!
//!     // 2024-01-01 is the 1st, 2024-01-05 is Friday
//!     assert!(schedule.matches(&now));
//!     let next = schedule.next_match(&now).unwrap();
//!     assert_eq!(next.to_rfc3339(), "2024-01-05T00:00:00+00:00");
//!
//!     Ok(())
//! }
//! # next_match().unwrap();
//! ```
//!
//! ### Example with `matches_between`
//! ```rust
//! use chrono::DateTime;
//! use cron_scan::{Result, Schedule};
//!
//! fn matches_between() -> Result<()> {
//!     let schedule = Schedule::new("0 */6 * * *")?;
//!     let start = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
//!     let end = DateTime::parse_from_rfc3339("2024-01-01T23:59:59Z").unwrap();
//!
//!     schedule.matches_between(&start, &end).iter().for_each(|t| println!("match: {t}"));
//!     assert_eq!(schedule.matches_between(&start, &end).len(), 4);
//!
//!     Ok(())
//! }
//! # matches_between().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`].
//! * `now`: adds [`Cursor::now`] constructor which starts from the current time.

mod calendar;
/// Stateful cursor over schedule matches.
pub mod cursor;
/// Crate specific Error implementation.
pub mod error;
mod field;
/// Cron expression parser and match search.
pub mod schedule;
mod search;
mod series;

// Re-export of public entities.
pub use cursor::Cursor;
pub use error::CronError;
pub use field::FieldKind;
pub use schedule::Schedule;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
