//! Test doubles for the discovery ports
#![allow(dead_code)]

use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{
    AuthCredential, Endpoint, GeoOptions, GeoPosition, NewPostDraft, Post, PostKind, Topic,
};
use around_core::ports::{GeolocationProbe, LocationStore, NearbyQuery, Notifier, PostPublisher};
use around_store::MemoryLocationStore;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn position(latitude: f64, longitude: f64) -> GeoPosition {
    GeoPosition { latitude, longitude }
}

pub fn post(url: &str) -> Post {
    Post {
        url: url.to_string(),
        user: "tester".to_string(),
        message: String::new(),
        kind: PostKind::Image,
        location: None,
    }
}

pub fn credential() -> AuthCredential {
    AuthCredential::new("token-123")
}

/// One recorded nearby query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryCall {
    pub endpoint: Endpoint,
    pub position: GeoPosition,
    pub radius_km: f64,
    pub topic: Topic,
}

/// Query answering from a script; an exhausted script answers with no posts
#[derive(Default)]
pub struct ScriptedQuery {
    responses: Mutex<VecDeque<Result<Vec<Post>>>>,
    calls: Mutex<Vec<QueryCall>>,
}

impl ScriptedQuery {
    pub fn new(responses: Vec<Result<Vec<Post>>>) -> Self {
        Self { responses: Mutex::new(responses.into()), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<QueryCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NearbyQuery for ScriptedQuery {
    async fn query_nearby(
        &self,
        endpoint: Endpoint,
        position: GeoPosition,
        radius_km: f64,
        topic: Topic,
        _credential: &AuthCredential,
    ) -> Result<Vec<Post>> {
        self.calls.lock().unwrap().push(QueryCall { endpoint, position, radius_km, topic });
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Query whose responses are released by the test, in any order
pub struct GatedQuery {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<Vec<Post>>>>>,
    calls: AtomicUsize,
}

impl GatedQuery {
    pub fn new(gates: Vec<oneshot::Receiver<Result<Vec<Post>>>>) -> Self {
        Self { gates: Mutex::new(gates.into()), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NearbyQuery for GatedQuery {
    async fn query_nearby(
        &self,
        _endpoint: Endpoint,
        _position: GeoPosition,
        _radius_km: f64,
        _topic: Topic,
        _credential: &AuthCredential,
    ) -> Result<Vec<Post>> {
        let gate = self.gates.lock().unwrap().pop_front().expect("unexpected query");
        self.calls.fetch_add(1, Ordering::SeqCst);
        gate.await.unwrap_or_else(|_| Ok(Vec::new()))
    }
}

/// Probe answering from a script
pub struct SequenceProbe {
    outcomes: Mutex<VecDeque<Result<GeoPosition>>>,
}

impl SequenceProbe {
    pub fn new(outcomes: Vec<Result<GeoPosition>>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into()) }
    }
}

#[async_trait]
impl GeolocationProbe for SequenceProbe {
    async fn acquire(&self, _options: &GeoOptions) -> Result<GeoPosition> {
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Err(AroundError::GeolocationFailed {
            reason: "Position unavailable".to_string(),
        }))
    }
}

/// Memory store counting reads
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryLocationStore,
    loads: AtomicUsize,
}

impl CountingStore {
    pub fn with_position(position: GeoPosition) -> Self {
        Self { inner: MemoryLocationStore::with_position(position), loads: AtomicUsize::new(0) }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationStore for CountingStore {
    async fn load_position(&self) -> Result<Option<GeoPosition>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_position().await
    }

    async fn save_position(&self, position: GeoPosition) -> Result<()> {
        self.inner.save_position(position).await
    }
}

/// Publisher recording drafts; fails every call when built with a reason
#[derive(Default)]
pub struct RecordingPublisher {
    failure: Option<String>,
    drafts: Mutex<Vec<NewPostDraft>>,
}

impl RecordingPublisher {
    pub fn failing(reason: &str) -> Self {
        Self { failure: Some(reason.to_string()), drafts: Mutex::new(Vec::new()) }
    }

    pub fn drafts(&self) -> Vec<NewPostDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostPublisher for RecordingPublisher {
    async fn publish(&self, draft: &NewPostDraft, _credential: &AuthCredential) -> Result<()> {
        self.drafts.lock().unwrap().push(draft.clone());
        match &self.failure {
            Some(reason) => Err(AroundError::Transport { reason: reason.clone() }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Error(message.to_string()));
    }
}
