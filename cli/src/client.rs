//! HTTP client for the booking API

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use park_booking::domain::{Booking, BookingDetails, DomainError};
use park_booking::interfaces::http::common::ErrorBody;
use park_booking::interfaces::http::modules::bookings::{
    BookingDto, BookingRequest, MessageResponse, StatusResponse,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Invalid(#[from] DomainError),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {detail} ({code})")]
    Api {
        status: StatusCode,
        code: String,
        detail: String,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create(&self, details: BookingDetails) -> ClientResult<i32> {
        details.validate()?;
        let resp = self
            .http
            .post(self.url("/book"))
            .json(&BookingRequest::from(details))
            .send()
            .await?;
        let body: StatusResponse = parse(resp).await?;
        Ok(body.id.unwrap_or_default())
    }

    pub async fn list(&self) -> ClientResult<Vec<Booking>> {
        let resp = self.http.get(self.url("/bookings")).send().await?;
        let rows: Vec<BookingDto> = parse(resp).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    pub async fn get(&self, id: i32) -> ClientResult<Booking> {
        let resp = self
            .http
            .get(self.url(&format!("/bookings/{}", id)))
            .send()
            .await?;
        let row: BookingDto = parse(resp).await?;
        Ok(row.into())
    }

    pub async fn replace(&self, id: i32, details: BookingDetails) -> ClientResult<()> {
        details.validate()?;
        let resp = self
            .http
            .put(self.url(&format!("/bookings/{}", id)))
            .json(&BookingRequest::from(details))
            .send()
            .await?;
        parse::<StatusResponse>(resp).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        let resp = self
            .http
            .delete(self.url(&format!("/bookings/{}", id)))
            .send()
            .await?;
        Ok(parse::<MessageResponse>(resp).await?.message)
    }

    pub async fn delete_all(&self) -> ClientResult<u64> {
        let resp = self.http.delete(self.url("/bookings")).send().await?;
        Ok(parse::<MessageResponse>(resp).await?.deleted.unwrap_or_default())
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let resp = self
            .http
            .post(self.url("/auth/admin"))
            .basic_auth(username, Some(password))
            .send()
            .await?;
        parse::<serde_json::Value>(resp).await?;
        Ok(())
    }
}

async fn parse<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    debug!("{} {}", status, resp.url());
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let (code, detail) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.detail),
        Err(_) => ("unknown".to_string(), text),
    };
    Err(ClientError::Api {
        status,
        code,
        detail,
    })
}
