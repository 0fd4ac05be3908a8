use chrono::{DateTime, Duration, Utc};
use cron_scan::{CronError, Cursor, FieldKind, Result, Schedule};

#[test]
fn matches_between() -> Result<()> {
    let schedule = Schedule::new("0 0 * * *")?;
    let now = Utc::now();

    // Get all midnights of the next ten days
    let matches = schedule.matches_between(&now, &(now + Duration::days(10)));
    matches.iter().for_each(|t| println!("match: {t}"));

    assert!(matches.len() == 10 || matches.len() == 11);
    assert!(matches.windows(2).all(|pair| pair[1] - pair[0] == Duration::days(1)));

    Ok(())
}

#[test]
fn matches_between_agrees_with_iter() -> Result<()> {
    let schedule = Schedule::new("*/7 9-17 1,15 * MON")?;
    let start = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
    let end = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap();

    let matches = schedule.matches_between(&start, &end);
    let iterated = schedule.iter(&start).take_while(|t| t <= &end).collect::<Vec<_>>();

    assert!(!matches.is_empty());
    assert_eq!(matches, iterated);
    assert!(matches.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(matches.iter().all(|t| schedule.matches(t)));

    Ok(())
}

#[test]
fn cursor_walks_the_same_series() -> Result<()> {
    let schedule = Schedule::new("30 12 * * SAT,SUN")?;
    let start = DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z").unwrap();
    let end = DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z").unwrap();

    let mut cursor = Cursor::new(schedule.clone(), start);
    let mut walked = Vec::new();
    while let Some(next) = cursor.advance().filter(|t| t <= &end) {
        walked.push(next);
    }

    assert_eq!(walked, schedule.matches_between(&start, &end));
    assert_eq!(walked.len(), 8);

    Ok(())
}

#[test]
fn construction_errors() {
    assert!(matches!(
        Schedule::new("* * * *"),
        Err(CronError::MalformedExpression(_))
    ));
    assert!(matches!(
        Schedule::new("* * * * MOON"),
        Err(CronError::InvalidField {
            kind: FieldKind::DaysOfWeek,
            ..
        })
    ));
    assert!(matches!(
        Schedule::new("0 0 31 2 *"),
        Err(CronError::UnsatisfiableExpression(_))
    ));
    assert_eq!(
        Schedule::new("0 0 31 2 *").unwrap_err().to_string(),
        "cron expression never matches: 0 0 31 2 *"
    );
}
