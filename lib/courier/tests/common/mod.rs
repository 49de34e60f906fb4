//! In-memory transport for dispatch engine tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use courier::{
    BoxError, Client, HeaderField, HeaderFields, Method, Request, Response, ResponseMetadata,
    Transport, TransportError,
};
use serde::{Deserialize, Serialize};

pub const TEST_URL: &str = "https://api.test.com/Test";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    #[serde(rename = "testString")]
    pub test_string: String,
}

impl Test {
    pub fn new(value: &str) -> Self {
        Self {
            test_string: value.to_string(),
        }
    }
}

pub fn test_url() -> url::Url {
    url::Url::parse(TEST_URL).expect("valid URL")
}

/// What the mock answers for one call.
#[derive(Clone)]
pub enum Reply {
    Respond {
        status: u16,
        headers: Vec<(String, String)>,
        body: Option<Bytes>,
    },
    Fail(Arc<dyn Fn() -> BoxError + Send + Sync>),
}

impl Reply {
    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::Respond {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(Bytes::copy_from_slice(body.as_bytes())),
        }
    }

    pub fn transport(error: TransportError) -> Self {
        Self::Fail(Arc::new(move || -> BoxError { Box::new(error.clone()) }))
    }

    pub fn error(make: impl Fn() -> BoxError + Send + Sync + 'static) -> Self {
        Self::Fail(Arc::new(make))
    }
}

/// Transport answering from a route table keyed by method and URL.
///
/// A route holds a sequence of replies; the last one repeats.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Vec<Reply>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, url: &str, replies: impl IntoIterator<Item = Reply>) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, url.to_string()), replies.into_iter().collect());
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn next_reply(&self, request: &Request) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        let replies = routes.get_mut(&(request.method(), request.url().to_string()))?;
        if replies.len() > 1 {
            Some(replies.remove(0))
        } else {
            replies.first().cloned()
        }
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: Request) -> Result<Response, BoxError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match self.next_reply(&request) {
            Some(Reply::Respond {
                status,
                headers,
                body,
            }) => {
                let headers: HeaderFields = headers
                    .into_iter()
                    .map(|(name, value)| (HeaderField::from_wire(&name), value))
                    .collect();
                let metadata = ResponseMetadata::new(status, headers, request.url().clone());
                Ok(Response::new(metadata, body))
            }
            Some(Reply::Fail(make)) => Err(make()),
            None => Err(Box::new(TransportError::connection(format!(
                "no route for {} {}",
                request.method(),
                request.url()
            )))),
        }
    }
}

pub fn client(transport: &Arc<MockTransport>) -> Client<Arc<MockTransport>> {
    Client::builder(Arc::clone(transport)).build()
}
