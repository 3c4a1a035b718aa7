use actix_web::http::StatusCode;
use chrono::Utc;
use log::{debug, error};
use reqwest::Client;

use crate::config::Settings;
use crate::encode::to_csv;
use crate::error::Result;
use crate::exchange_rate::ExchangeRate;
use crate::fetch::load_html;
use crate::storage::Bucket;
use crate::table::{TableSpec, extract_last_rate};

/// What the caller sees: the error kind is never exposed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub message: String,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Fetch, parse, encode and publish one rate. Nothing is written unless
/// every earlier step succeeded.
pub async fn run(settings: &Settings, client: &Client, bucket: &Bucket) -> Result<ExchangeRate> {
    let html = load_html(client, &settings.url).await?;

    let spec = TableSpec {
        class: &settings.table_class,
        date_column: &settings.date_column,
        currency_column: &settings.currency_column,
    };
    let raw = extract_last_rate(&html, &spec)?;
    debug!("Last row: {:?}", raw);

    let rate = ExchangeRate::from_raw(&raw, &settings.currency_column)?;
    if let Some(max_age_days) = settings.max_age_days {
        rate.check_recency(Utc::now().date_naive(), max_age_days)?;
    }

    let csv = to_csv(&rate)?;
    bucket.publish(&settings.object_key, csv).await?;

    Ok(rate)
}

/// Runs once and folds every failure into a generic 500.
pub async fn handle(settings: &Settings, client: &Client, bucket: &Bucket) -> Outcome {
    match run(settings, client, bucket).await {
        Ok(rate) => Outcome {
            status: StatusCode::OK,
            message: format!("Data saved: {} - {}", rate.date, rate.rate),
        },
        Err(e) => {
            error!("{:?} error: {}", e.kind(), e);
            Outcome {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Error: {}", e),
            }
        }
    }
}
