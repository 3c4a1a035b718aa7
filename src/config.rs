use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};

pub const DEFAULT_URL: &str =
    "https://www.bcra.gob.ar/PublicacionesEstadisticas/Evolucion_moneda.asp";
pub const DEFAULT_BUCKET: &str = "rpa-poc-files";
pub const DEFAULT_OBJECT_KEY: &str = "precio_dolar.csv";
pub const DEFAULT_TABLE_CLASS: &str = "form-table";
pub const DEFAULT_DATE_COLUMN: &str = "Fecha";
pub const DEFAULT_CURRENCY_COLUMN: &str = "Dólar Estadounidense";

/// Everything one invocation needs to know. Passed explicitly to the
/// pipeline so tests can point it at a fixture page and an in-memory bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub bucket: String,
    pub object_key: String,
    pub table_class: String,
    pub date_column: String,
    pub currency_column: String,
    /// Reject rates older than this many days. `None` accepts any date.
    pub max_age_days: Option<u32>,
    /// Write to this directory instead of the cloud bucket.
    pub local_dir: Option<PathBuf>,
    /// Serve the HTTP trigger on this port instead of running once.
    pub port: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            object_key: DEFAULT_OBJECT_KEY.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            currency_column: DEFAULT_CURRENCY_COLUMN.to_string(),
            max_age_days: None,
            local_dir: None,
            port: None,
        }
    }
}

impl Settings {
    /// Reads overrides from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        Ok(Self {
            url: text("BCRA_URL", defaults.url),
            bucket: text("BCRA_BUCKET", defaults.bucket),
            object_key: text("BCRA_OBJECT_KEY", defaults.object_key),
            table_class: text("BCRA_TABLE_CLASS", defaults.table_class),
            date_column: text("BCRA_DATE_COLUMN", defaults.date_column),
            currency_column: text("BCRA_CURRENCY_COLUMN", defaults.currency_column),
            max_age_days: parse_opt(&lookup, "BCRA_MAX_AGE_DAYS")?,
            local_dir: lookup("BCRA_LOCAL_DIR").map(PathBuf::from),
            port: parse_opt(&lookup, "PORT")?,
        })
    }
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
    }
}
