use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;

use telemetry_common::{Credentials, TelemetryReading, TransportError, UploadTransport};

const CLIENT_TIMEOUT_DEFAULT: u64 = 5;

/// Form encoded POSTs over reqwest.
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(CLIENT_TIMEOUT_DEFAULT))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        credentials: &Credentials,
        reading: &TelemetryReading,
    ) -> Result<u16, TransportError> {
        let response = self
            .client
            .post(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .form(reading)
            .send()
            .await
            .map_err(classify)?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // base64("test1:telemetry")
    const BASIC_AUTH: &str = "Basic dGVzdDE6dGVsZW1ldHJ5";

    fn reading() -> TelemetryReading {
        let mut reading = TelemetryReading::new();
        reading.push("gravity_x", 0.5).push("gravity_y", -0.25);
        reading
    }

    #[tokio::test]
    async fn test_http_transport_new() {
        HttpTransport::new().expect("Error creating http transport");
    }

    #[tokio::test]
    async fn test_post_form_sends_auth_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ios_sensor_pack/ios_sensor/"))
            .and(header("Authorization", BASIC_AUTH))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("gravity_x=0.5"))
            .and(body_string_contains("gravity_y=-0.25"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let url = format!("{}/ios_sensor_pack/ios_sensor/", mock_server.uri());
        let status = transport
            .post_form(&url, &Credentials::new("test1", "telemetry"), &reading())
            .await
            .unwrap();

        assert_eq!(status, 201);
    }

    #[tokio::test]
    async fn test_post_form_returns_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let status = transport
            .post_form(
                &format!("{}/x/", mock_server.uri()),
                &Credentials::new("test1", "wrong"),
                &reading(),
            )
            .await
            .unwrap();

        assert_eq!(status, 403);
    }

    #[tokio::test]
    async fn test_post_form_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::with_timeout(Duration::from_millis(50)).unwrap();
        let result = transport
            .post_form(
                &format!("{}/x/", mock_server.uri()),
                &Credentials::new("test1", "telemetry"),
                &reading(),
            )
            .await;

        assert!(matches!(result, Err(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_post_form_unreachable_host() {
        let transport = HttpTransport::new().unwrap();
        let result = transport
            .post_form(
                "http://127.0.0.1:1/ios_sensor_pack/ios_sensor/",
                &Credentials::new("test1", "telemetry"),
                &reading(),
            )
            .await;

        assert!(result.is_err());
    }
}
