pub mod config;
pub mod encode;
pub mod error;
pub mod exchange_rate;
pub mod fetch;
pub mod pipeline;
pub mod server;
pub mod storage;
pub mod table;

pub use config::Settings;
pub use error::{Error, ErrorKind};
pub use exchange_rate::ExchangeRate;
pub use pipeline::{Outcome, handle, run};
pub use storage::Bucket;
