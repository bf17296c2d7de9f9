//! Reading hours lookup through the Toggl Track proxy

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ApiError;

const GENERIC_FAILURE: &str = "Could not query Toggl Track.";

#[derive(Debug, Deserialize)]
struct BookHoursResponse {
    hours: Option<serde_json::Value>,
}

/// HTTP client for `GET {base}/toggl/books`
#[derive(Debug, Clone)]
pub struct TogglClient {
    client: reqwest::Client,
    base_url: String,
}

impl TogglClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|_| ApiError::Other(GENERIC_FAILURE))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Total tracked hours for a book title
    pub async fn book_hours(&self, title: &str) -> Result<f64, ApiError> {
        let url = format!(
            "{}/toggl/books?title={}",
            self.base_url,
            urlencoding::encode(title.trim())
        );
        debug!(%url, "querying toggl hours");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("toggl request failed: {}", e);
            ApiError::from_transport(&e, GENERIC_FAILURE)
        })?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => return Err(ApiError::NoTimeEntries),
            reqwest::StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
            status if !status.is_success() => {
                warn!("toggl returned status {}", status);
                return Err(ApiError::Other(GENERIC_FAILURE));
            }
            _ => {}
        }

        let body: BookHoursResponse = response
            .json()
            .await
            .map_err(|_| ApiError::InvalidResponse("Toggl Track"))?;

        body.hours
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .ok_or(ApiError::InvalidResponse("Toggl Track"))
    }
}

/// Render tracked hours the way they are typed into the hours field
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(12.0), "12");
        assert_eq!(format_hours(3.14), "3.1");
        assert_eq!(format_hours(0.96), "1");
    }

    #[tokio::test]
    async fn test_book_hours() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/toggl/books"))
            .and(query_param("title", "Duna"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hours": 7.5})))
            .mount(&server)
            .await;

        let client = TogglClient::new(&server.uri(), Duration::from_secs(2)).unwrap();
        assert_eq!(client.book_hours("Duna").await.unwrap(), 7.5);
    }

    #[tokio::test]
    async fn test_non_numeric_hours_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hours": "7"})))
            .mount(&server)
            .await;

        let client = TogglClient::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let err = client.book_hours("Duna").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("title", "missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("title", "locked"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = TogglClient::new(&server.uri(), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            client.book_hours("missing").await.unwrap_err(),
            ApiError::NoTimeEntries
        ));
        assert!(matches!(
            client.book_hours("locked").await.unwrap_err(),
            ApiError::Unauthorized
        ));
    }
}
