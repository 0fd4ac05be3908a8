use crate::{series::StepSeries, CronError, Result};
use std::{collections::BTreeSet, fmt::Display};

pub(crate) type FieldValue = u8;

/// Large enough to hold every minute of an hour.
const CAPACITY: usize = 60;

/// Sorted set of distinct field values with fixed capacity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ValueSet {
    len: u8,
    items: [FieldValue; CAPACITY],
}

impl ValueSet {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[FieldValue] {
        &self.items[..self.len as usize]
    }

    #[inline]
    pub(crate) fn contains(&self, value: FieldValue) -> bool {
        self.as_slice().binary_search(&value).is_ok()
    }

    #[inline]
    pub(crate) fn first(&self) -> Option<FieldValue> {
        self.as_slice().first().copied()
    }

    #[inline]
    pub(crate) fn last(&self) -> Option<FieldValue> {
        self.as_slice().last().copied()
    }

    /// Smallest value strictly greater than `value`.
    pub(crate) fn after(&self, value: FieldValue) -> Option<FieldValue> {
        let values = self.as_slice();
        values.get(values.partition_point(|v| *v <= value)).copied()
    }

    /// Largest value strictly less than `value`.
    pub(crate) fn before(&self, value: FieldValue) -> Option<FieldValue> {
        let values = self.as_slice();
        values[..values.partition_point(|v| *v < value)].last().copied()
    }
}

impl FromIterator<FieldValue> for ValueSet {
    /// Values above capacity are dropped, callers feed domain-checked values only.
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let sorted: BTreeSet<FieldValue> = iter.into_iter().collect();
        let mut set = Self {
            len: 0,
            items: [0; CAPACITY],
        };

        for value in sorted.into_iter().take(CAPACITY) {
            set.items[set.len as usize] = value;
            set.len += 1;
        }

        set
    }
}

impl std::fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.as_slice()).finish()
    }
}

/// Kind of the cron expression field, defines its domain and accepted mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minutes, `0-59`.
    Minutes,
    /// Hours, `0-23`.
    Hours,
    /// Days of month, `1-31`.
    DaysOfMonth,
    /// Months, `1-12` or `JAN-DEC`.
    Months,
    /// Days of week, `0-6` or `SUN-SAT`, Sunday is `0`.
    DaysOfWeek,
}

impl FieldKind {
    const DAYS_OF_WEEK: [&'static str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    const MONTHS: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Inclusive domain of the field.
    pub(crate) fn min_max(self) -> (FieldValue, FieldValue) {
        match self {
            Self::Minutes => (0, 59),
            Self::Hours => (0, 23),
            Self::DaysOfMonth => (1, 31),
            Self::Months => (1, 12),
            Self::DaysOfWeek => (0, 6),
        }
    }

    /// Parses single value: number or mnemonic where the field allows it.
    fn parse_value(self, input: &str) -> Option<FieldValue> {
        let (min, max) = self.min_max();
        if let Some(value) = parse_digital_value(input, min, max) {
            return Some(value);
        }

        match self {
            Self::Months => parse_string_value(input, &Self::MONTHS).map(|value| value + 1),
            Self::DaysOfWeek => parse_string_value(input, &Self::DAYS_OF_WEEK),
            Self::Minutes | Self::Hours | Self::DaysOfMonth => None,
        }
    }

    /// Expands a single list element (everything except the bare `*`) into its values.
    fn parse_part(self, part: &str) -> Option<StepSeries> {
        let (min, max) = self.min_max();
        let (base, step) = match part.split_once('/') {
            Some((base, step)) => {
                let step = parse_digital_value(step, 1, FieldValue::MAX)?;
                (base, Some(step))
            }
            None => (part, None),
        };

        let (start, end) = if base == "*" && step.is_some() {
            (min, max)
        } else if let Some((start, end)) = base.split_once('-') {
            let start = self.parse_value(start)?;
            let end = self.parse_value(end)?;
            if start > end {
                return None;
            }
            (start, end)
        } else {
            let value = self.parse_value(base)?;
            // `a/n` runs up to the end of the domain
            (value, if step.is_some() { max } else { value })
        };

        Some(StepSeries::new(start, end, step.unwrap_or(1)))
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::DaysOfMonth => "day of month",
            Self::Months => "month",
            Self::DaysOfWeek => "day of week",
        };
        write!(f, "{name}")
    }
}

/// Parsed cron field: permitted values and the wildcard marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FieldSet {
    values: ValueSet,
    wildcard: bool,
}

impl FieldSet {
    pub(crate) fn parse(kind: FieldKind, input: &str) -> Result<Self> {
        let invalid = || CronError::InvalidField {
            kind,
            value: input.to_owned(),
        };

        if input.is_empty() {
            return Err(invalid());
        }

        let (min, max) = kind.min_max();
        let mut wildcard = false;
        let mut values = BTreeSet::new();

        for part in input.split(',') {
            if part == "*" {
                wildcard = true;
                values.extend(min..=max);
            } else {
                values.extend(kind.parse_part(part).ok_or_else(invalid)?);
            }
        }

        Ok(Self {
            values: values.into_iter().collect(),
            wildcard,
        })
    }

    #[inline]
    pub(crate) fn values(&self) -> &ValueSet {
        &self.values
    }

    #[inline]
    pub(crate) fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    #[inline]
    pub(crate) fn contains(&self, value: FieldValue) -> bool {
        self.values.contains(value)
    }
}

/// Converts string of decimal digits into a number with bounds validation.
fn parse_digital_value(input: &str, min: FieldValue, max: FieldValue) -> Option<FieldValue> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    input
        .parse::<FieldValue>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}

/// Converts case-insensitive mnemonic into its index in `values`.
fn parse_string_value(input: &str, values: &[&str]) -> Option<FieldValue> {
    values
        .iter()
        .position(|name| name.eq_ignore_ascii_case(input))
        .map(|index| index as FieldValue)
}
