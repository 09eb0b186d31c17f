// Booking price calculator.
// Pure functions over the unit's rate card and the requested stay; the UI
// recomputes the total whenever any input changes, so nothing here may have
// side effects.

use chrono::NaiveDate;

/// Daily rate for the requested party size. The base rate covers
/// `base_guests` people; every guest beyond that adds `extra_person_rate`
/// per day. A party smaller than the base count still pays the base rate.
pub fn effective_daily_rate(
    base_rate: f64,
    base_guests: u32,
    extra_person_rate: f64,
    guests: u32,
) -> f64 {
    let extra_guests = guests.saturating_sub(base_guests);
    base_rate + f64::from(extra_guests) * extra_person_rate
}

/// Inclusive length of stay in days: both the start and the end day are
/// billed, so `start == end` is a one-day stay. An inverted range counts
/// as zero days rather than an error.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }
    (end - start).num_days() + 1
}

/// Total price for a stay. Zero when either date is missing or the range is
/// inverted; callers treat a zero total as "no valid stay selected", not as
/// a failure.
pub fn total_price(
    base_rate: f64,
    base_guests: u32,
    extra_person_rate: f64,
    guests: u32,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };
    let days = inclusive_days(start, end);
    if days == 0 {
        return 0.0;
    }
    effective_daily_rate(base_rate, base_guests, extra_person_rate, guests) * days as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test_case(50_000.0, 2, 10_000.0, 2 => 50_000.0 ; "party at base size pays the base rate")]
    #[test_case(50_000.0, 2, 10_000.0, 4 => 70_000.0 ; "two extra guests add two surcharges")]
    #[test_case(50_000.0, 2, 10_000.0, 1 => 50_000.0 ; "party below base size gets no discount")]
    #[test_case(95_000.0, 2, 8_000.0, 3 => 103_000.0 ; "one extra guest on the retro rate card")]
    #[test_case(120_000.0, 0, 10_000.0, 0 => 120_000.0 ; "zero guests on a zero base card")]
    fn daily_rate(base: f64, base_guests: u32, extra: f64, guests: u32) -> f64 {
        effective_daily_rate(base, base_guests, extra, guests)
    }

    #[test_case("2025-06-01", "2025-06-01" => 1 ; "same day stay counts one day")]
    #[test_case("2025-06-01", "2025-06-03" => 3 ; "both endpoints are billed")]
    #[test_case("2025-06-03", "2025-06-01" => 0 ; "inverted range counts zero days")]
    #[test_case("2025-06-28", "2025-07-02" => 5 ; "count crosses a month boundary")]
    #[test_case("2024-02-28", "2024-03-01" => 3 ; "leap day is billed like any other")]
    fn day_count(start: &str, end: &str) -> i64 {
        inclusive_days(date(start), date(end))
    }

    #[test]
    fn worked_example_from_the_rate_card() {
        // 3 inclusive days at 50000 + 2 extra guests * 10000 = 70000/day
        let total = total_price(
            50_000.0,
            2,
            10_000.0,
            4,
            Some(date("2025-06-01")),
            Some(date("2025-06-03")),
        );
        assert_eq!(total, 210_000.0);
    }

    #[test]
    fn missing_dates_price_to_zero() {
        assert_eq!(
            total_price(50_000.0, 2, 10_000.0, 4, None, Some(date("2025-06-03"))),
            0.0
        );
        assert_eq!(
            total_price(50_000.0, 2, 10_000.0, 4, Some(date("2025-06-01")), None),
            0.0
        );
        assert_eq!(total_price(50_000.0, 2, 10_000.0, 4, None, None), 0.0);
    }

    #[test]
    fn inverted_range_prices_to_zero_for_any_party() {
        for guests in [1, 2, 6, 40] {
            let total = total_price(
                250_000.0,
                2,
                20_000.0,
                guests,
                Some(date("2025-06-10")),
                Some(date("2025-06-01")),
            );
            assert_eq!(total, 0.0);
        }
    }

    #[test]
    fn single_day_stay_bills_one_effective_rate() {
        let day = date("2025-08-15");
        let total = total_price(180_000.0, 4, 15_000.0, 6, Some(day), Some(day));
        assert_eq!(total, 210_000.0);
    }
}
