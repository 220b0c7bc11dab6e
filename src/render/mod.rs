mod console;

pub use console::ConsoleRenderer;

use crate::client::FetchError;
use crate::models::{Bar, DisplayState};
use chrono::{DateTime, Utc};

/// A failed poll cycle, handed to the presentation layer to surface however
/// it likes.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    pub generation: u64,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl ErrorEvent {
    pub fn new(generation: u64, err: &FetchError) -> Self {
        Self {
            generation,
            message: format!("Error:{}", err),
            at: Utc::now(),
        }
    }
}

// Presentation layer driven by the poller
pub trait Renderer: Send + 'static {
    // Called once when polling starts
    fn show(&mut self) {}

    fn set_bar_width(&mut self, bar: Bar, width: &str);

    fn commit(&mut self, state: &DisplayState);

    fn report_error(&mut self, event: &ErrorEvent);
}
