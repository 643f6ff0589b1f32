use reqwest::{Client, StatusCode};
use select::document::Document;

use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// GETs `url` and parses the body. Anything but 200 is a failure.
pub async fn fetch_page(client: &Client, url: &str) -> Result<Document, FetchError> {
    let transport = |source: reqwest::Error| FetchError::Transport {
        url: url.to_owned(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(transport)?;
    Ok(Document::from(&body[..]))
}
