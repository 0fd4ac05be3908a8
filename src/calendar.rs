//! Gregorian calendar helpers and resolution of the cron day fields into calendar days.
use crate::field::{FieldSet, FieldValue, ValueSet};

/// Offsets of the five (possibly partial) weeks a month spans.
const WEEK_OFFSETS: [i32; 5] = [0, 7, 14, 21, 28];

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: FieldValue) -> FieldValue {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => panic!("Invalid month: {month}"),
    }
}

/// Calculates day of week for specified date, `0` is Sunday.
pub(crate) fn day_of_week(year: i32, month: FieldValue, day: FieldValue) -> FieldValue {
    if day == 0 || day > days_in_month(year, month) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let month_offset = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[(month - 1) as usize];

    let year = year - 1;
    let sum = i32::from(day)
        + month_offset
        + 5 * year.rem_euclid(4)
        + 4 * year.rem_euclid(100)
        + 6 * year.rem_euclid(400);

    sum.rem_euclid(7) as FieldValue
}

/// Calendar days of the month which satisfy day of month and day of week fields together.
///
/// If both fields are wildcards, every day matches.
/// If only one of them is restricted, the other one is ignored:
/// an unrestricted field would match any day and hide the restriction.
/// If both are restricted, a day matches when it satisfies either of them.
///
/// For example:
/// - `0 0 1 * *` - the first day of every month;
/// - `0 0 1 * 5` - the first day of every month, and every Friday;
/// - `0 0 * * 5` - every Friday.
pub(crate) fn resolve_days(year: i32, month: FieldValue, dom: &FieldSet, dow: &FieldSet) -> ValueSet {
    let last_day = days_in_month(year, month);
    let first_dow = i32::from(day_of_week(year, month, 1));
    let mut days = Vec::with_capacity(usize::from(last_day));

    if !(dow.is_wildcard() && !dom.is_wildcard()) {
        for offset in WEEK_OFFSETS {
            for weekday in dow.values().as_slice() {
                // 35 is a multiple of 7, so wrapping a position before day 1 keeps its weekday.
                let day = (i32::from(*weekday) + offset + 1 - first_dow).rem_euclid(35);
                if (1..=i32::from(last_day)).contains(&day) {
                    days.push(day as FieldValue);
                }
            }
        }
    }

    if !(dom.is_wildcard() && !dow.is_wildcard()) {
        days.extend(dom.values().as_slice().iter().copied().filter(|day| *day <= last_day));
    }

    days.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;
    use rstest::rstest;

    #[rstest]
    // Test leap years divisible by 4 but not 100
    #[case(2024, true)]
    #[case(1996, true)]
    // Test leap years divisible by 400
    #[case(2000, true)]
    #[case(1600, true)]
    #[case(0, true)]
    // Test non-leap years not divisible by 4
    #[case(2023, false)]
    #[case(2021, false)]
    // Test non-leap years divisible by 100 but not 400
    #[case(1900, false)]
    #[case(2100, false)]
    fn test_is_leap_year(#[case] year: i32, #[case] expected: bool) {
        assert_eq!(
            is_leap_year(year),
            expected,
            "{year:} is {}",
            if expected { "leap" } else { "not-leap" }
        );
    }

    #[rstest]
    #[case(2023, 1, 31)]
    #[case(2023, 3, 31)]
    #[case(2023, 7, 31)]
    #[case(2023, 8, 31)]
    #[case(2023, 12, 31)]
    #[case(2023, 4, 30)]
    #[case(2023, 11, 30)]
    #[case(2023, 2, 28)]
    #[case(2024, 2, 29)]
    #[case(2000, 2, 29)]
    // century years are not leap unless divisible by 400
    #[case(1900, 2, 28)]
    #[case(2100, 2, 28)]
    fn test_days_in_month(#[case] y: i32, #[case] m: u8, #[case] expected: u8) {
        assert_eq!(days_in_month(y, m), expected, "{y:04}-{m:02} has {expected} days");
    }

    #[rstest]
    #[case(2023, 0)]
    #[case(2023, 13)]
    #[should_panic(expected = "Invalid month")]
    fn test_days_in_month_invalid(#[case] y: i32, #[case] m: u8) {
        days_in_month(y, m);
    }

    #[rstest]
    #[case(2023, 12, 25, 1)] // Monday
    #[case(2024, 1, 1, 1)] // Monday
    #[case(2025, 1, 1, 3)] // Wednesday
    #[case(2024, 2, 29, 4)] // Thursday (leap year)
    #[case(2024, 6, 1, 6)] // Saturday
    #[case(2023, 1, 1, 0)] // Sunday
    #[case(2000, 1, 1, 6)] // Saturday (century leap year)
    #[case(1900, 1, 1, 1)] // Monday (non-leap century year)
    #[case(2023, 7, 4, 2)]
    #[case(1971, 8, 21, 6)]
    #[case(1945, 6, 22, 5)]
    #[case(2100, 1, 1, 5)]
    #[case(2400, 1, 1, 6)]
    fn test_day_of_week(#[case] y: i32, #[case] m: u8, #[case] d: u8, #[case] expected: u8) {
        assert_eq!(
            day_of_week(y, m, d),
            expected,
            "date {y}-{m:02}-{d:02}, should be {expected}"
        );
    }

    #[rstest]
    #[case(2023, 2, 29)]
    #[case(2025, 1, 0)]
    #[case(2023, 4, 31)]
    #[should_panic(expected = "Invalid date: ")]
    fn test_day_of_week_invalid(#[case] y: i32, #[case] m: u8, #[case] d: u8) {
        day_of_week(y, m, d);
    }

    fn days(year: i32, month: u8, dom: &str, dow: &str) -> Vec<u8> {
        let dom = FieldSet::parse(FieldKind::DaysOfMonth, dom).unwrap();
        let dow = FieldSet::parse(FieldKind::DaysOfWeek, dow).unwrap();
        resolve_days(year, month, &dom, &dow).as_slice().to_vec()
    }

    #[rstest]
    // neither is restricted
    #[case(2024, 2, "*", "*", (1..=29).collect())]
    #[case(2023, 2, "*", "*", (1..=28).collect())]
    #[case(2024, 4, "*", "*", (1..=30).collect())]
    // day of month only
    #[case(2024, 4, "1,15,31", "*", vec![1, 15])]
    #[case(2024, 2, "31", "*", vec![])]
    #[case(2024, 2, "28-31", "*", vec![28, 29])]
    // day of week only, 2024-01-01 is Monday
    #[case(2024, 1, "*", "MON", vec![1, 8, 15, 22, 29])]
    #[case(2024, 1, "*", "SUN", vec![7, 14, 21, 28])]
    #[case(2024, 1, "*", "TUE,WED", vec![2, 3, 9, 10, 16, 17, 23, 24, 30, 31])]
    // 2024-06-01 is Saturday
    #[case(2024, 6, "*", "0", vec![2, 9, 16, 23, 30])]
    #[case(2024, 6, "*", "5", vec![7, 14, 21, 28])]
    #[case(2024, 6, "*", "6", vec![1, 8, 15, 22, 29])]
    // 2024-09-01 is Sunday
    #[case(2024, 9, "*", "SAT", vec![7, 14, 21, 28])]
    #[case(2024, 9, "*", "SUN", vec![1, 8, 15, 22, 29])]
    #[case(2024, 9, "*", "MON", vec![2, 9, 16, 23, 30])]
    // both are restricted: union
    #[case(2024, 1, "1", "5", vec![1, 5, 12, 19, 26])]
    #[case(2024, 2, "31", "FRI", vec![2, 9, 16, 23])]
    #[case(2024, 1, "1-31", "MON", (1..=31).collect())]
    #[case(2024, 1, "1", "0-6", (1..=31).collect())]
    fn test_resolve_days(
        #[case] year: i32,
        #[case] month: u8,
        #[case] dom: &str,
        #[case] dow: &str,
        #[case] expected: Vec<u8>,
    ) {
        assert_eq!(
            days(year, month, dom, dow),
            expected,
            "{year:04}-{month:02}, dom = {dom}, dow = {dow}"
        );
    }

    #[test]
    fn resolved_weekdays_agree_with_day_of_week() {
        let dom = FieldSet::parse(FieldKind::DaysOfMonth, "*").unwrap();
        for weekday in 0..7u8 {
            let dow = FieldSet::parse(FieldKind::DaysOfWeek, &weekday.to_string()).unwrap();
            for year in [1999, 2000, 2023, 2024] {
                for month in 1..=12 {
                    let resolved = resolve_days(year, month, &dom, &dow);
                    let expected: Vec<u8> = (1..=days_in_month(year, month))
                        .filter(|day| day_of_week(year, month, *day) == weekday)
                        .collect();
                    assert_eq!(resolved.as_slice(), expected.as_slice(), "{year}-{month:02}, dow = {weekday}");
                }
            }
        }
    }
}
