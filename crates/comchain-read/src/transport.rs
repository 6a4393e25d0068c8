//! Transport layer for read-only contract evaluation

use async_trait::async_trait;
use comchain_primitives::{Selector, Word};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::types::{BlockTag, CallPayload};

/// Failure reported by a [`RemoteReader`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection or HTTP failure
    #[error("Network error: {0}")]
    Network(String),

    /// JSON-RPC error from the node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Read-only call evaluation against the ledger (object-safe).
///
/// Returns the raw hex return data. Timeouts and retries, if any, belong to
/// the implementation.
#[async_trait]
pub trait RemoteReader: Send + Sync {
    /// Evaluate `payload` at `block` and return the hex return data
    async fn evaluate_call(
        &self,
        payload: &CallPayload,
        block: BlockTag,
    ) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: RemoteReader + ?Sized> RemoteReader for Arc<T> {
    async fn evaluate_call(
        &self,
        payload: &CallPayload,
        block: BlockTag,
    ) -> Result<String, TransportError> {
        (**self).evaluate_call(payload, block).await
    }
}

/// In-memory reader for testing.
///
/// Responses are keyed by call data (selector + argument words), so the
/// target contract does not take part in the lookup. Every evaluated call is
/// recorded in order.
pub struct MockReader {
    responses: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<Selector>>,
    calls: Mutex<Vec<(CallPayload, BlockTag)>>,
}

impl MockReader {
    /// Create a new mock reader with no responses
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the return data of a call
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, selector: Selector, args: &[Word], response: impl Into<String>) {
        let key = call_key(selector, args);
        self.responses
            .lock()
            .expect("MockReader mutex poisoned")
            .insert(key, response.into());
    }

    /// Make every call to `selector` fail with an RPC error
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn fail_selector(&self, selector: Selector) {
        self.failing
            .lock()
            .expect("MockReader mutex poisoned")
            .insert(selector);
    }

    /// Calls evaluated so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn calls(&self) -> Vec<(CallPayload, BlockTag)> {
        self.calls.lock().expect("MockReader mutex poisoned").clone()
    }

    /// Number of calls evaluated so far
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("MockReader mutex poisoned").len()
    }

    /// Number of calls made to `selector`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn calls_to(&self, selector: Selector) -> usize {
        self.calls
            .lock()
            .expect("MockReader mutex poisoned")
            .iter()
            .filter(|(payload, _)| payload.selector == selector)
            .count()
    }

    /// Forget recorded calls
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_calls(&self) {
        self.calls.lock().expect("MockReader mutex poisoned").clear();
    }
}

impl Default for MockReader {
    fn default() -> Self {
        Self::new()
    }
}

fn call_key(selector: Selector, args: &[Word]) -> String {
    let mut key = selector.to_naked_hex();
    for arg in args {
        key.push_str(&arg.to_naked_hex());
    }
    key
}

fn poisoned<T>(_: T) -> TransportError {
    TransportError::Network("MockReader mutex poisoned".to_string())
}

#[async_trait]
impl RemoteReader for MockReader {
    async fn evaluate_call(
        &self,
        payload: &CallPayload,
        block: BlockTag,
    ) -> Result<String, TransportError> {
        self.calls
            .lock()
            .map_err(poisoned)?
            .push((payload.clone(), block));

        if self.failing.lock().map_err(poisoned)?.contains(&payload.selector) {
            return Err(TransportError::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            });
        }

        let key = call_key(payload.selector, &payload.args);
        let response = self.responses.lock().map_err(poisoned)?.get(&key).cloned();

        response.ok_or_else(|| TransportError::Rpc {
            code: -32601,
            message: format!("No mock response for call: 0x{}", key),
        })
    }
}

/// HTTP JSON-RPC reader issuing `eth_call`
#[cfg(feature = "http")]
pub struct HttpReader {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpReader {
    /// Create a new HTTP reader
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RemoteReader for HttpReader {
    async fn evaluate_call(
        &self,
        payload: &CallPayload,
        block: BlockTag,
    ) -> Result<String, TransportError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": "eth_call",
            "params": [payload, block],
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        match response.result {
            Some(serde_json::Value::String(data)) => Ok(data),
            Some(other) => Err(TransportError::InvalidResponse(format!(
                "expected hex string, got {}",
                other
            ))),
            None => Err(TransportError::Rpc {
                code: -32603,
                message: "No result in response".to_string(),
            }),
        }
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use comchain_primitives::Address;

    fn payload(selector: Selector, args: Vec<Word>) -> CallPayload {
        CallPayload {
            to: Address::ZERO,
            selector,
            args,
        }
    }

    #[tokio::test]
    async fn test_mock_reader_response() {
        let reader = MockReader::new();
        let selector = Selector::from_hex("54fd4d50").unwrap();
        reader.set_response(selector, &[], "0x01");

        let result = reader
            .evaluate_call(&payload(selector, vec![]), BlockTag::Pending)
            .await
            .unwrap();
        assert_eq!(result, "0x01");
        assert_eq!(reader.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_reader_keys_on_args() {
        let reader = MockReader::new();
        let selector = Selector::from_hex("70a08231").unwrap();
        reader.set_response(selector, &[Word::from(1u64)], "0xaa");

        let missing = reader
            .evaluate_call(&payload(selector, vec![Word::from(2u64)]), BlockTag::Pending)
            .await;
        assert!(matches!(missing, Err(TransportError::Rpc { code: -32601, .. })));
    }

    #[tokio::test]
    async fn test_mock_reader_failing_selector() {
        let reader = MockReader::new();
        let selector = Selector::from_hex("70a08231").unwrap();
        reader.set_response(selector, &[], "0x");
        reader.fail_selector(selector);

        let result = reader
            .evaluate_call(&payload(selector, vec![]), BlockTag::Latest)
            .await;
        assert!(result.is_err());
        assert_eq!(reader.calls_to(selector), 1);
        assert_eq!(reader.calls()[0].1, BlockTag::Latest);
    }

    #[tokio::test]
    async fn test_arc_reader_delegates() {
        let reader = Arc::new(MockReader::new());
        let selector = Selector::from_hex("54fd4d50").unwrap();
        reader.set_response(selector, &[], "0x");

        let shared: Arc<MockReader> = Arc::clone(&reader);
        shared
            .evaluate_call(&payload(selector, vec![]), BlockTag::Pending)
            .await
            .unwrap();
        assert_eq!(reader.call_count(), 1);

        reader.clear_calls();
        assert_eq!(reader.call_count(), 0);
    }
}
