// Fakes shared by the poller and app tests

use crate::client::{FetchError, VoteSource};
use crate::models::{Bar, DisplayState, VoteTally};
use crate::render::{ErrorEvent, Renderer};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Show,
    Width(Bar, String),
    Commit(DisplayState),
    Error(ErrorEvent),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
}

impl RecordingRenderer {
    pub fn commits(&self) -> Vec<&DisplayState> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Commit(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&ErrorEvent> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Error(event) => Some(event),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self) {
        self.calls.push(Call::Show);
    }

    fn set_bar_width(&mut self, bar: Bar, width: &str) {
        self.calls.push(Call::Width(bar, width.to_string()));
    }

    fn commit(&mut self, state: &DisplayState) {
        self.calls.push(Call::Commit(state.clone()));
    }

    fn report_error(&mut self, event: &ErrorEvent) {
        self.calls.push(Call::Error(event.clone()));
    }
}

/// Hands out canned answers in order, then repeats the fallback forever.
/// An `Err(status)` answer becomes a `FetchError::Status`.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<VoteTally, StatusCode>>>,
    delays: Mutex<VecDeque<Duration>>,
    fallback: Result<VoteTally, StatusCode>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<VoteTally, StatusCode>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delays: Mutex::new(VecDeque::new()),
            fallback: Err(StatusCode::SERVICE_UNAVAILABLE),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(answer: Result<VoteTally, StatusCode>) -> Self {
        let mut source = Self::new(Vec::new());
        source.fallback = answer;
        source
    }

    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock().unwrap() = delays.into();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoteSource for ScriptedSource {
    async fn fetch_votes(&self) -> Result<VoteTally, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.script.lock().unwrap().pop_front().unwrap_or(self.fallback);
        let delay = self.delays.lock().unwrap().pop_front().unwrap_or(Duration::ZERO);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer.map_err(FetchError::Status)
    }
}
