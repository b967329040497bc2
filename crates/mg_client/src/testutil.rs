//! Shared test doubles: deterministic entropy sources and a recording
//! transport.

use std::collections::VecDeque;

use mg_crypto::{CryptoError, SecureRandom};
use parking_lot::Mutex;

use crate::error::GatewayError;
use crate::transport::{HttpResponse, Transport};

/// Entropy source that serves bytes from a finite script, then fails.
pub(crate) struct ScriptedRandom(Mutex<VecDeque<u8>>);

impl ScriptedRandom {
    pub(crate) fn new(script: &[u8]) -> Self {
        Self(Mutex::new(script.iter().copied().collect()))
    }
}

impl SecureRandom for ScriptedRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        let mut script = self.0.lock();
        if script.len() < buf.len() {
            return Err(CryptoError::Entropy);
        }
        for byte in buf.iter_mut() {
            *byte = script.pop_front().unwrap();
        }
        Ok(())
    }
}

/// Entropy source that repeats one byte forever.
pub(crate) struct ConstRandom(pub(crate) u8);

impl SecureRandom for ConstRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        buf.fill(self.0);
        Ok(())
    }
}

pub(crate) fn ok(body: &str) -> HttpResponse {
    HttpResponse { status: 200, body: body.into() }
}

pub(crate) fn status(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, body: body.into() }
}

type RecordedCall = (String, Vec<(String, String)>);

/// Transport double that records every call and replays queued responses.
pub(crate) struct MockTransport {
    pub(crate) posts: Mutex<Vec<RecordedCall>>,
    pub(crate) gets: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    fn next_response(&self) -> HttpResponse {
        self.responses
            .lock()
            .pop_front()
            .expect("mock transport ran out of scripted responses")
    }

    fn record(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl Transport for MockTransport {
    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<HttpResponse, GatewayError> {
        self.posts.lock().push((path.to_string(), Self::record(form)));
        Ok(self.next_response())
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<HttpResponse, GatewayError> {
        self.gets.lock().push((path.to_string(), Self::record(query)));
        Ok(self.next_response())
    }
}

/// Look a recorded form field up by name.
pub(crate) fn field<'a>(call: &'a RecordedCall, name: &str) -> Option<&'a str> {
    call.1
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
