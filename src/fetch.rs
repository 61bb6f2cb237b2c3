//! HTTP access to the stationboard API.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, Request, Response, Url};

use crate::error::CheckError;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Builds the stationboard query URL for one station, restricted to trams.
pub fn stationboard_url(base: &str, station: &str, limit: u32) -> Result<Url> {
    let url = Url::parse_with_params(
        base,
        &[
            ("station", station),
            ("limit", &limit.to_string()),
            ("transportations[]", "tram"),
        ],
    )?;
    Ok(url)
}

/// Performs a single GET and returns the response body.
///
/// Non-2xx statuses are reported as fetch faults rather than handed to the
/// parser as garbage bytes.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: Url) -> Result<Vec<u8>, CheckError> {
    let req = Request::new(Method::GET, url);
    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}
