//! Comprehensive unit tests for the Temporal module
//!
//! Tests cover billing month construction, period arithmetic across
//! year boundaries, due-date derivation, and serialization.

use chrono::NaiveDate;
use core_kernel::{BillingMonth, TemporalError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn test_new_creates_first_of_month() {
        let march = BillingMonth::new(2026, 3).unwrap();
        assert_eq!(march.first_day(), date(2026, 3, 1));
        assert_eq!(march.year(), 2026);
        assert_eq!(march.month(), 3);
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(matches!(
            BillingMonth::new(2026, 0),
            Err(TemporalError::InvalidMonth { .. })
        ));
        assert!(matches!(
            BillingMonth::new(2026, 13),
            Err(TemporalError::InvalidMonth { .. })
        ));
    }

    #[test]
    fn test_containing_snaps_any_day_to_its_month() {
        assert_eq!(
            BillingMonth::containing(date(2026, 3, 1)),
            BillingMonth::new(2026, 3).unwrap()
        );
        assert_eq!(
            BillingMonth::containing(date(2026, 3, 31)),
            BillingMonth::new(2026, 3).unwrap()
        );
    }

    #[test]
    fn test_from_naive_date() {
        let month: BillingMonth = date(2026, 3, 17).into();
        assert_eq!(month, BillingMonth::new(2026, 3).unwrap());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_previous_within_a_year() {
        let march = BillingMonth::new(2026, 3).unwrap();
        assert_eq!(march.previous(), BillingMonth::new(2026, 2).unwrap());
    }

    #[test]
    fn test_previous_crosses_the_year_boundary() {
        let january = BillingMonth::new(2026, 1).unwrap();
        assert_eq!(january.previous(), BillingMonth::new(2025, 12).unwrap());
    }

    #[test]
    fn test_next_crosses_the_year_boundary() {
        let december = BillingMonth::new(2025, 12).unwrap();
        assert_eq!(december.next(), BillingMonth::new(2026, 1).unwrap());
    }

    #[test]
    fn test_previous_and_next_are_inverses() {
        let month = BillingMonth::new(2026, 7).unwrap();
        assert_eq!(month.previous().next(), month);
        assert_eq!(month.next().previous(), month);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec_2025 = BillingMonth::new(2025, 12).unwrap();
        let jan_2026 = BillingMonth::new(2026, 1).unwrap();
        assert!(dec_2025 < jan_2026);
    }
}

mod due_dates {
    use super::*;

    #[test]
    fn test_due_on_the_fifth_of_the_following_month() {
        let march = BillingMonth::new(2026, 3).unwrap();
        assert_eq!(march.due_date(), date(2026, 4, 5));
    }

    #[test]
    fn test_december_bill_falls_due_in_january() {
        let december = BillingMonth::new(2025, 12).unwrap();
        assert_eq!(december.due_date(), date(2026, 1, 5));
    }
}

mod membership {
    use super::*;

    #[test]
    fn test_contains_both_ends_of_the_month() {
        let february = BillingMonth::new(2026, 2).unwrap();
        assert!(february.contains(date(2026, 2, 1)));
        assert!(february.contains(date(2026, 2, 28)));
        assert!(!february.contains(date(2026, 3, 1)));
        assert!(!february.contains(date(2026, 1, 31)));
    }
}

mod display_and_serde {
    use super::*;

    #[test]
    fn test_display_format() {
        let march = BillingMonth::new(2026, 3).unwrap();
        assert_eq!(march.to_string(), "2026-03");
    }

    #[test]
    fn test_serializes_as_its_first_day() {
        let march = BillingMonth::new(2026, 3).unwrap();
        let json = serde_json::to_string(&march).unwrap();
        assert_eq!(json, "\"2026-03-01\"");

        let back: BillingMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, march);
    }
}
