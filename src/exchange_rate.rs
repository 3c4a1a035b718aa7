use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::table::RawRate;

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    pub date: NaiveDate,
    pub currency: String,
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn from_raw(raw: &RawRate, currency: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(raw.date.clone()))?;

        let normalized = normalize_decimal_string(&raw.value);
        let rate = Decimal::from_str(&normalized).map_err(|source| Error::InvalidValue {
            text: raw.value.clone(),
            source,
        })?;
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(Error::NegativeValue(raw.value.clone()));
        }

        Ok(Self {
            date,
            currency: currency.to_string(),
            rate,
        })
    }

    /// Fails unless `date` lies within `max_age_days` before `today`.
    pub fn check_recency(&self, today: NaiveDate, max_age_days: u32) -> Result<()> {
        let stale = || Error::Stale {
            date: self.date,
            today,
            max_age_days,
        };
        let oldest = today
            .checked_sub_days(Days::new(max_age_days.into()))
            .unwrap_or(NaiveDate::MIN);

        if self.date < oldest || self.date > today {
            return Err(stale());
        }
        Ok(())
    }
}

/// The source writes `1.234,56`: when a comma is present it is the decimal
/// separator and dots group thousands.
fn normalize_decimal_string(s: &str) -> String {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    }
}
