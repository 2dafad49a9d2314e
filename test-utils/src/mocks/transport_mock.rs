use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use telemetry_common::{Credentials, TelemetryReading, TransportError, UploadTransport};

const HTTP_CREATED: u16 = 201;

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub credentials: Credentials,
    pub reading: TelemetryReading,
}

/// Transport answering from a queue of scripted outcomes.
///
/// Once the queue is empty every request answers 201. Clones share the queue
/// and the request log.
#[derive(Clone, Debug, Default)]
pub struct TransportMock {
    outcomes: Arc<Mutex<VecDeque<Result<u16, TransportError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TransportMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, status: u16) -> &Self {
        self.outcomes.lock().unwrap().push_back(Ok(status));
        self
    }

    pub fn push_error(&self, error: TransportError) -> &Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn pending(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl UploadTransport for TransportMock {
    async fn post_form(
        &self,
        url: &str,
        credentials: &Credentials,
        reading: &TelemetryReading,
    ) -> Result<u16, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            credentials: credentials.clone(),
            reading: reading.clone(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(HTTP_CREATED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_outcomes_then_created() {
        let transport = TransportMock::new();
        transport
            .push_status(500)
            .push_error(TransportError::Timeout("t".to_string()));
        let credentials = Credentials::new("u", "p");
        let reading = TelemetryReading::new();

        assert_eq!(transport.post_form("a", &credentials, &reading).await, Ok(500));
        assert!(transport.post_form("b", &credentials, &reading).await.is_err());
        assert_eq!(transport.post_form("c", &credentials, &reading).await, Ok(201));
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.pending(), 0);
    }
}
