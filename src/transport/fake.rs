// Scripted transport for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{HttpRequest, HttpTransport, TransportResponse};

type Responder = Box<dyn Fn(&HttpRequest) -> TransportResponse + Send + Sync>;
type Delay = Box<dyn Fn(&HttpRequest) -> Option<Duration> + Send + Sync>;

/// Records every request and answers with a scripted response.
pub(crate) struct FakeTransport {
    responder: Responder,
    delay: Option<Delay>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with 200 and the given body.
    pub(crate) fn ok(body: Value) -> Self {
        Self::new(move |_| TransportResponse::from_status(200, Some(body.clone())))
    }

    pub(crate) fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&HttpRequest) -> Option<Duration> + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(delay));
        self
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_to(&self, fragment: &str) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|request| request.url.contains(fragment))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, request: HttpRequest) -> TransportResponse {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay.as_ref().and_then(|delay| delay(&request)) {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(&request)
    }
}
