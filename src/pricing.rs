use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::{PriceTable, PriceType};

/// days per biweekly billing block
pub const BIWEEKLY_BLOCK_DAYS: i64 = 15;
/// days per monthly billing block
pub const MONTHLY_BLOCK_DAYS: i64 = 30;

/// priced stay: definitive total, installment count and audit breakdown
///
/// ephemeral by design, recomputed on every input change and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total_price: Money,
    /// number of installments the schedule will be split into
    pub period_count: u32,
    pub price_type: PriceType,
    pub breakdown: Vec<String>,
}

/// price a stay from its dates and the room's price table
///
/// Two distinct rules coexist and deliberately disagree for 15–29-day
/// stays: the billed total only counts complete 15- or 30-day blocks,
/// while the installment count rounds every started pair of 15-day
/// blocks up to one month-equivalent.
pub fn compute_pricing(
    check_in: NaiveDate,
    check_out: NaiveDate,
    prices: &PriceTable,
) -> Result<PriceQuote> {
    if check_out <= check_in {
        return Err(EngineError::InvalidDateRange {
            check_in,
            check_out,
        });
    }

    let monthly = match prices.monthly_price {
        Some(p) if p.is_positive() => p,
        _ => return Err(EngineError::MissingPrice { room: None }),
    };
    let biweekly = prices
        .biweekly_price
        .filter(|p| p.is_positive())
        .unwrap_or_else(|| monthly.halved());

    let days = (check_out - check_in).num_days();
    let blocks15 = days / BIWEEKLY_BLOCK_DAYS;
    // every started pair of 15-day blocks bills as one installment
    let months_equivalent = (blocks15 + 1) / 2;

    let mut breakdown = Vec::new();
    let (total_price, price_type) = if days < MONTHLY_BLOCK_DAYS {
        if blocks15 == 0 {
            breakdown.push(format!(
                "{days} days: below the first {BIWEEKLY_BLOCK_DAYS}-day block, nothing billable"
            ));
            (Money::ZERO, PriceType::Daily)
        } else {
            let total = biweekly * Decimal::from(blocks15);
            breakdown.push(format!(
                "{days} days ÷ {BIWEEKLY_BLOCK_DAYS} = {blocks15} complete fortnight(s) × €{biweekly}"
            ));
            let remainder = days % BIWEEKLY_BLOCK_DAYS;
            if remainder > 0 {
                breakdown.push(format!(
                    "remaining {remainder} day(s) below the next {BIWEEKLY_BLOCK_DAYS}-day boundary are not charged"
                ));
            }
            (total, PriceType::Biweekly)
        }
    } else {
        let months = days / MONTHLY_BLOCK_DAYS;
        let total = monthly * Decimal::from(months);
        breakdown.push(format!(
            "{days} days ÷ {MONTHLY_BLOCK_DAYS} = {months} complete month(s) × €{monthly}"
        ));
        let remainder = days % MONTHLY_BLOCK_DAYS;
        if remainder > 0 {
            breakdown.push(format!(
                "remaining {remainder} day(s) below the next {MONTHLY_BLOCK_DAYS}-day boundary are not charged"
            ));
        }
        (total, PriceType::Monthly)
    };

    Ok(PriceQuote {
        total_price,
        period_count: months_equivalent as u32,
        price_type,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(monthly: i64, biweekly: Option<i64>) -> PriceTable {
        PriceTable {
            daily_price: None,
            biweekly_price: biweekly.map(Money::from_major),
            monthly_price: Some(Money::from_major(monthly)),
        }
    }

    fn quote_for(days: u32, prices: &PriceTable) -> PriceQuote {
        let check_in = date(2025, 1, 1);
        compute_pricing(check_in, check_in + chrono::Duration::days(days as i64), prices)
            .unwrap()
    }

    #[test]
    fn test_stay_below_first_block_bills_nothing() {
        for days in 1..15 {
            let quote = quote_for(days, &table(500, Some(250)));
            assert_eq!(quote.total_price, Money::ZERO, "{days} days");
            assert_eq!(quote.price_type, PriceType::Daily);
            assert_eq!(quote.period_count, 0);
        }
    }

    #[test]
    fn test_biweekly_band_bills_complete_fortnights() {
        for days in 15..30 {
            let quote = quote_for(days, &table(500, Some(250)));
            assert_eq!(quote.total_price, Money::from_major(250), "{days} days");
            assert_eq!(quote.price_type, PriceType::Biweekly);
            // one started block pair still counts as one installment
            assert_eq!(quote.period_count, 1);
        }
    }

    #[test]
    fn test_monthly_band_bills_complete_months_only() {
        let quote = quote_for(40, &table(500, None));
        assert_eq!(quote.total_price, Money::from_major(500));
        assert_eq!(quote.price_type, PriceType::Monthly);
        assert_eq!(quote.breakdown[0], "40 days ÷ 30 = 1 complete month(s) × €500");
        assert!(quote.breakdown[1].contains("10 day(s)"));
    }

    #[test]
    fn test_twenty_day_stay_bills_one_fortnight() {
        let quote = quote_for(20, &table(500, Some(250)));
        assert_eq!(quote.total_price, Money::from_major(250));
        assert_eq!(quote.price_type, PriceType::Biweekly);
    }

    #[test]
    fn test_biweekly_defaults_to_half_monthly() {
        let quote = quote_for(20, &table(500, None));
        assert_eq!(quote.total_price, Money::from_major(250));
    }

    #[test]
    fn test_ninety_day_stay_splits_into_three_installments() {
        let quote = quote_for(90, &table(500, None));
        assert_eq!(quote.total_price, Money::from_major(1500));
        assert_eq!(quote.period_count, 3);
        assert_eq!(quote.price_type, PriceType::Monthly);
    }

    #[test]
    fn test_installment_count_rounds_half_months_up() {
        // 45 days = 3 fortnights -> 2 installments, but only 1 complete month billed
        let quote = quote_for(45, &table(500, None));
        assert_eq!(quote.period_count, 2);
        assert_eq!(quote.total_price, Money::from_major(500));
    }

    #[test]
    fn test_missing_monthly_price_is_rejected() {
        let result = compute_pricing(
            date(2025, 1, 1),
            date(2025, 2, 1),
            &PriceTable::default(),
        );
        assert!(matches!(result, Err(EngineError::MissingPrice { .. })));

        let zeroed = table(0, None);
        let result = compute_pricing(date(2025, 1, 1), date(2025, 2, 1), &zeroed);
        assert!(matches!(result, Err(EngineError::MissingPrice { .. })));
    }

    #[test]
    fn test_inverted_dates_are_rejected() {
        let result = compute_pricing(date(2025, 2, 1), date(2025, 1, 1), &table(500, None));
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));

        let result = compute_pricing(date(2025, 1, 1), date(2025, 1, 1), &table(500, None));
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }
}
