use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::exchange_rate::ExchangeRate;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    fecha: NaiveDate,
    moneda: &'a str,
    valor: Decimal,
}

/// Header plus one row, CRLF terminated.
pub fn to_csv(rate: &ExchangeRate) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.serialize(CsvRow {
        fecha: rate.date,
        moneda: &rate.currency,
        valor: rate.rate,
    })?;

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
