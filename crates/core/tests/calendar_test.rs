use carehive_core::calendar::{date_range, month_range, step, DateRange, ViewMode};
use chrono::Datelike;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case(date(2026, 10, 14), date(2026, 10, 11), date(2026, 10, 17))]
#[case(date(2026, 10, 11), date(2026, 10, 11), date(2026, 10, 17))]
#[case(date(2026, 10, 17), date(2026, 10, 11), date(2026, 10, 17))]
#[case(date(2026, 10, 1), date(2026, 9, 27), date(2026, 10, 3))]
fn test_week_range_starts_on_sunday(
    #[case] reference: NaiveDate,
    #[case] start: NaiveDate,
    #[case] end: NaiveDate,
) {
    assert_eq!(date_range(ViewMode::Week, reference).unwrap(), DateRange { start, end });
}

#[rstest]
#[case(date(2026, 10, 14), date(2026, 10, 1), date(2026, 10, 31))]
#[case(date(2026, 2, 28), date(2026, 2, 1), date(2026, 2, 28))]
#[case(date(2024, 2, 10), date(2024, 2, 1), date(2024, 2, 29))]
#[case(date(2026, 12, 31), date(2026, 12, 1), date(2026, 12, 31))]
fn test_month_range(#[case] reference: NaiveDate, #[case] start: NaiveDate, #[case] end: NaiveDate) {
    assert_eq!(date_range(ViewMode::Month, reference).unwrap(), DateRange { start, end });
}

#[test]
fn test_range_days_are_inclusive() {
    let range = date_range(ViewMode::Week, date(2026, 10, 14)).unwrap();
    let days: Vec<_> = range.days().collect();

    assert_eq!(days.len(), 7);
    assert_eq!(range.len_days(), 7);
    assert_eq!(days.first(), Some(&range.start));
    assert_eq!(days.last(), Some(&range.end));
    assert!(range.contains(date(2026, 10, 17)));
    assert!(!range.contains(date(2026, 10, 18)));
}

#[test]
fn test_step_navigation() {
    assert_eq!(step(ViewMode::Week, date(2026, 10, 14), 1).unwrap(), date(2026, 10, 21));
    assert_eq!(step(ViewMode::Week, date(2026, 10, 14), -2).unwrap(), date(2026, 9, 30));
    assert_eq!(step(ViewMode::Month, date(2026, 1, 31), 1).unwrap(), date(2026, 2, 28));
    assert_eq!(step(ViewMode::Month, date(2026, 3, 15), -3).unwrap(), date(2025, 12, 15));
    assert_eq!(step(ViewMode::Month, date(2026, 3, 15), 0).unwrap(), date(2026, 3, 15));
}

#[test]
fn test_week_range_at_calendar_edges_is_an_error() {
    assert!(date_range(ViewMode::Week, NaiveDate::MIN).is_err());
    assert!(date_range(ViewMode::Week, NaiveDate::MAX).is_err());
}

#[test]
fn test_month_range_at_calendar_edges() {
    let last = date_range(ViewMode::Month, NaiveDate::MAX).unwrap();
    assert_eq!(last.start, NaiveDate::MAX.with_day(1).unwrap());
    assert_eq!(last.end, NaiveDate::MAX);
    assert_eq!(last.len_days(), 31);

    let first = month_range(NaiveDate::MIN);
    assert_eq!(first.start, NaiveDate::MIN);
    assert_eq!(first.end.month(), NaiveDate::MIN.month());
    assert_eq!(first.end.succ_opt().unwrap().day(), 1);
}

#[rstest]
#[case(ViewMode::Week, NaiveDate::MAX, 1)]
#[case(ViewMode::Week, NaiveDate::MIN, -1)]
#[case(ViewMode::Month, NaiveDate::MAX, 1)]
#[case(ViewMode::Month, NaiveDate::MIN, -1)]
fn test_step_past_calendar_edges_is_an_error(
    #[case] view: ViewMode,
    #[case] reference: NaiveDate,
    #[case] delta: i32,
) {
    assert!(step(view, reference, delta).is_err());
}

#[test]
fn test_view_mode_parsing() {
    assert_eq!("week".parse::<ViewMode>().unwrap(), ViewMode::Week);
    assert_eq!("Month".parse::<ViewMode>().unwrap(), ViewMode::Month);
    assert!("year".parse::<ViewMode>().is_err());
}
