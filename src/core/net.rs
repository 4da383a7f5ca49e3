// src/core/net.rs

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::ScrapeError;
use crate::params::USER_AGENT;

static CLIENT: OnceLock<Client> = OnceLock::new();

fn client() -> &'static Client {
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            // only fails if the TLS backend cannot initialize
            .expect("default HTTP client")
    })
}

/// Blocking GET returning the response body. Non-2xx is an error.
pub fn http_get(url: &str) -> Result<String, ScrapeError> {
    debug!(%url, "GET");
    Ok(client().get(url).send()?.error_for_status()?.text()?)
}
