//! Submission sink abstraction and submission outcomes

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Flat key/value payload collected from every step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later values for the same key replace earlier ones
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = FormPayload::new();
        for (k, v) in iter {
            payload.insert(k, v);
        }
        payload
    }
}

/// Where collected payloads go. Rejections are opaque.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: FormPayload) -> Result<()>;
}

/// Stand-in sink: waits, logs the payload, then resolves or rejects
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    pub delay: Duration,
    pub reject: bool,
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            reject: false,
        }
    }
}

#[async_trait]
impl SubmissionSink for SimulatedSink {
    async fn submit(&self, payload: FormPayload) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        if self.reject {
            return Err(anyhow!("simulated delivery failure"));
        }
        let json = serde_json::to_string(&payload)?;
        tracing::info!("Form payload delivered: {json}");
        Ok(())
    }
}

/// How a submission attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sink accepted the payload; the success view is shown
    Delivered,
    /// The sink failed; the generic error is shown and all input is kept
    Rejected,
    /// A step failed validation; it is (or becomes) the visible step
    Invalid { step: usize },
    /// The honeypot was filled; nothing was sent and nothing is shown
    Discarded,
    /// Submitted from an earlier step; treated as a request to advance
    Deferred,
    /// Busy, mid-transition, or already delivered
    Ignored,
}

/// First half of a submission, see `MultiStepForm::prepare_submission`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Hand this payload to the sink, then report back with `finish_submission`
    Ready(FormPayload),
    /// Nothing to send
    Settled(SubmitOutcome),
}
