//! In-memory [`HttpClient`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;

use serde::Serialize;

use crate::client::{HttpClient, Response};
use crate::error::Result;

/// Serves canned responses by exact URL; anything else is a 404.
#[derive(Default)]
pub struct MockClient {
    routes:   HashMap<String, (u16, Vec<u8>)>,
    requests: RefCell<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, url: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes.insert(url.to_string(), (status, body));
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(self, url: &str, body: &T) -> Self {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.with(url, 200, body)
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> { self.requests.borrow().clone() }

    pub fn count(&self, url: &str) -> usize { self.requests.borrow().iter().filter(|u| *u == url).count() }
}

impl HttpClient for MockClient {
    fn get(&self, url: &str) -> Result<Response> {
        self.requests.borrow_mut().push(url.to_string());
        let (status, body) = self.routes.get(url).cloned().unwrap_or((404, b"not found".to_vec()));
        Ok(Response {
            url: url.to_string(),
            status,
            content_length: Some(body.len() as u64),
            body: Box::new(Cursor::new(body)),
        })
    }
}
