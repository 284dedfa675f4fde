#![allow(dead_code)]

use preview_proto::client::MetadataSource;
use preview_proto::error::{FetchError, FetchResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Answers synchronously from a plain function of the address.
pub struct FnSource(pub fn(&str) -> FetchResult<Value>);

impl MetadataSource for FnSource {
    async fn fetch(&self, address: &str) -> FetchResult<Value> {
        (self.0)(address)
    }
}

/// Holds every request open until the test releases it, so completion order
/// is under the test's control.
#[derive(Default)]
pub struct ScriptedSource {
    pending: Mutex<HashMap<String, oneshot::Receiver<FetchResult<Value>>>>,
}

impl ScriptedSource {
    /// Register `address`; the returned sender releases its response.
    pub fn script(&self, address: &str) -> oneshot::Sender<FetchResult<Value>> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .insert(address.to_string(), rx);
        tx
    }
}

impl MetadataSource for ScriptedSource {
    async fn fetch(&self, address: &str) -> FetchResult<Value> {
        let rx = self.pending.lock().unwrap().remove(address);
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Aborted("script dropped".into()))),
            None => Err(FetchError::Aborted(format!("unscripted address {address}"))),
        }
    }
}

/// A `{"data": {...}}` body carrying only a title.
pub fn titled(title: &str) -> Value {
    serde_json::json!({ "data": { "title": title } })
}
