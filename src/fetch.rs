use log::debug;
use reqwest::Client;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).build()
}

pub async fn load_html(client: &Client, url: &str) -> Result<String> {
    let request_error = |source| Error::Request {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(request_error)?;
    if !resp.status().is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let text = resp.text().await.map_err(request_error)?;
    debug!("Downloaded {} bytes from {}", text.len(), url);

    Ok(text)
}
