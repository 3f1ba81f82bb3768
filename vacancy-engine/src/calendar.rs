//! Stay calendar calculator
//!
//! Turns a (check-in, check-out) pair into the set of nights the stay
//! covers. Dates are naive calendar days; no timezone is involved anywhere.

use chrono::{Days, NaiveDate};

/// Compute the nights of a stay: every date in `[check_in, check_out)`,
/// ascending, duplicate-free.
///
/// A check-out on or before the check-in yields an empty set. That empty
/// set is the single invalid-range signal; policy (whether to error) is the
/// caller's decision.
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    if check_out <= check_in {
        return Vec::new();
    }

    let mut nights = Vec::new();
    let mut night = check_in;
    while night < check_out {
        nights.push(night);
        match night.checked_add_days(Days::new(1)) {
            Some(next) => night = next,
            None => break,
        }
    }
    nights
}

/// Number of nights in a stay, zero for an invalid range.
pub fn night_count(check_in: NaiveDate, check_out: NaiveDate) -> usize {
    if check_out <= check_in {
        0
    } else {
        (check_out - check_in).num_days() as usize
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_night_stay() {
        let nights = stay_nights(date(2025, 12, 1), date(2025, 12, 3));
        assert_eq!(nights, vec![date(2025, 12, 1), date(2025, 12, 2)]);
        assert_eq!(night_count(date(2025, 12, 1), date(2025, 12, 3)), 2);
    }

    #[test]
    fn test_check_out_excluded() {
        let nights = stay_nights(date(2025, 12, 1), date(2025, 12, 2));
        assert_eq!(nights, vec![date(2025, 12, 1)]);
    }

    #[test]
    fn test_equal_dates_yield_empty_set() {
        assert!(stay_nights(date(2025, 12, 1), date(2025, 12, 1)).is_empty());
        assert_eq!(night_count(date(2025, 12, 1), date(2025, 12, 1)), 0);
    }

    #[test]
    fn test_inverted_range_yields_empty_set() {
        assert!(stay_nights(date(2025, 12, 3), date(2025, 12, 1)).is_empty());
        assert_eq!(night_count(date(2025, 12, 3), date(2025, 12, 1)), 0);
    }

    #[test]
    fn test_spans_month_and_year_boundaries() {
        let nights = stay_nights(date(2025, 12, 30), date(2026, 1, 2));
        assert_eq!(
            nights,
            vec![date(2025, 12, 30), date(2025, 12, 31), date(2026, 1, 1)]
        );
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        // Any day within a few decades around the epoch of interest
        (0u64..20_000).prop_map(|offset| {
            date(2000, 1, 1)
                .checked_add_days(Days::new(offset))
                .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_count_matches_day_difference(a in arb_date(), b in arb_date()) {
            let nights = stay_nights(a, b);
            if b > a {
                prop_assert_eq!(nights.len() as i64, (b - a).num_days());
            } else {
                prop_assert!(nights.is_empty());
            }
            prop_assert_eq!(nights.len(), night_count(a, b));
        }

        #[test]
        fn prop_nights_sorted_unique_and_bounded(a in arb_date(), b in arb_date()) {
            let nights = stay_nights(a, b);
            prop_assert!(nights.windows(2).all(|w| w[0] < w[1]));
            for night in &nights {
                prop_assert!(*night >= a && *night < b);
            }
        }
    }
}
