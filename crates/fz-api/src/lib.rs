//! REST client for the fan dashboard data service.
//!
//! Covers the simulated date, matches, fans, hotels and stadiums, plus the
//! assistant exchange. The assistant is opaque: a message goes in, a reply
//! comes out, and the service keeps the history per fan.
//!
//! Match lists are decoded one record at a time so a single bad record is
//! dropped instead of failing the whole response.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use fz_core::clock::{DATE_FORMAT, parse_date};
use fz_core::fixture::decode_records;
use fz_core::{Fan, Hotel, HotelStay, MatchRecord, Stadium};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the data service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout for API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Data service client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL is unusable.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A message from the assistant conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    /// Speaker, e.g. `human` or `ai`.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DatePayload {
    date: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    user_id: u32,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ChatHistory {
    chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct FanRef {
    user_id: u32,
}

#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
}

/// Data service client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let raw = base_url.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                url: raw,
                reason: "base URL cannot be empty",
            });
        }
        let base_url = Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl {
            url: raw.clone(),
            reason: "not an absolute URL",
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: raw,
                reason: "URL cannot have path segments",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }

    /// `GET /date`
    pub async fn current_date(&self) -> Result<NaiveDate, ApiError> {
        let payload: DatePayload = self.get(&["date"]).await?;
        parse_payload_date(&payload)
    }

    /// `PUT /date`, returning the date the service committed.
    pub async fn set_current_date(&self, date: NaiveDate) -> Result<NaiveDate, ApiError> {
        let body = DatePayload {
            date: date.format(DATE_FORMAT).to_string(),
        };
        let url = self.endpoint(&["date"]);
        tracing::debug!(%url, date = %body.date, "PUT");
        let payload: DatePayload = self.send(self.http.put(url).json(&body)).await?;
        parse_payload_date(&payload)
    }

    /// `GET /games`
    pub async fn matches(&self) -> Result<Vec<MatchRecord>, ApiError> {
        let values: Vec<serde_json::Value> = self.get(&["games"]).await?;
        Ok(decode_records(values))
    }

    /// `GET /date/{date}/games`
    pub async fn matches_on(&self, date: NaiveDate) -> Result<Vec<MatchRecord>, ApiError> {
        let date = date.format(DATE_FORMAT).to_string();
        let values: Vec<serde_json::Value> = self.get(&["date", &date, "games"]).await?;
        Ok(decode_records(values))
    }

    /// `GET /team/{name}/games?date=`: the team's matches from `from` on.
    pub async fn team_matches(
        &self,
        team: &str,
        from: NaiveDate,
    ) -> Result<Vec<MatchRecord>, ApiError> {
        let url = self.endpoint(&["team", team, "games"]);
        let from = from.format(DATE_FORMAT).to_string();
        tracing::debug!(%url, %from, "GET");
        let values: Vec<serde_json::Value> = self
            .send(self.http.get(url).query(&[("date", from.as_str())]))
            .await?;
        Ok(decode_records(values))
    }

    /// `GET /fans/{id}`
    pub async fn fan(&self, id: u32) -> Result<Fan, ApiError> {
        self.get(&["fans", &id.to_string()]).await
    }

    /// A fan's hotel bookings, taken from their profile.
    pub async fn hotel_bookings(&self, fan_id: u32) -> Result<Vec<HotelStay>, ApiError> {
        Ok(self.fan(fan_id).await?.hotel_stays)
    }

    /// `GET /hotels`
    pub async fn hotels(&self) -> Result<Vec<Hotel>, ApiError> {
        self.get(&["hotels"]).await
    }

    /// `GET /stadiums`
    pub async fn stadiums(&self) -> Result<Vec<Stadium>, ApiError> {
        self.get(&["stadiums"]).await
    }

    /// `POST /chat`: sends one message to the assistant and returns its reply.
    pub async fn chat(&self, fan_id: u32, message: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["chat"]);
        tracing::debug!(%url, fan_id, "POST");
        let request = ChatRequest {
            message,
            user_id: fan_id,
        };
        let reply: ChatReply = self.send(self.http.post(url).json(&request)).await?;
        Ok(reply.response)
    }

    /// `GET /chat_history?user_id=`
    pub async fn chat_history(&self, fan_id: u32) -> Result<Vec<ChatMessage>, ApiError> {
        let url = self.endpoint(&["chat_history"]);
        tracing::debug!(%url, fan_id, "GET");
        let history: ChatHistory = self
            .send(
                self.http
                    .get(url)
                    .query(&[("user_id", fan_id.to_string())]),
            )
            .await?;
        Ok(history.chat_history)
    }

    /// `POST /delete_chat_history`
    pub async fn clear_chat_history(&self, fan_id: u32) -> Result<(), ApiError> {
        let url = self.endpoint(&["delete_chat_history"]);
        tracing::debug!(%url, fan_id, "POST");
        let ack: Ack = self
            .send(self.http.post(url).json(&FanRef { user_id: fan_id }))
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::InvalidResponse(
                "chat history deletion not acknowledged".to_string(),
            ))
        }
    }
}

fn parse_payload_date(payload: &DatePayload) -> Result<NaiveDate, ApiError> {
    parse_date(&payload.date).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

/// Builds an error from a `{"error": "..."}` body, falling back to the raw body.
fn parse_api_error(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: String,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .map_or_else(|_| body.trim().to_string(), |payload| payload.error);
    ApiError::Api { status, message }
}
