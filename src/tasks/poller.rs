use crate::client::{FetchError, VoteSource};
use crate::models::{Bar, DisplayState, VoteTally};
use crate::render::{ErrorEvent, Renderer};
use crate::voting::compute_percentages;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

pub type SharedBoard<R> = Arc<Mutex<Board<R>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Applied(DisplayState),
    // A newer cycle already updated the board
    Stale,
    Failed(ErrorEvent),
    // The app was shut down while the request was in flight
    Closed,
}

/// The view state plus the renderer it is drawn on.
///
/// Only cycles with a generation newer than the last applied one may
/// overwrite the state, so a slow response can't roll the board back.
pub struct Board<R: Renderer> {
    state: DisplayState,
    issued_generation: u64,
    applied_generation: u64,
    closed: bool,
    renderer: R,
}

impl<R: Renderer> Board<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            state: DisplayState::default(),
            issued_generation: 0,
            applied_generation: 0,
            closed: false,
            renderer,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    #[cfg(test)]
    pub fn applied_generation(&self) -> u64 {
        self.applied_generation
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // Keeps counting across restarts so a new run never looks stale
    pub fn next_generation(&mut self) -> u64 {
        self.issued_generation += 1;
        self.issued_generation
    }

    // Stops rendering until reopened; late responses are dropped
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn reopen(&mut self) {
        self.closed = false;
    }

    pub fn apply(&mut self, generation: u64, tally: VoteTally) -> CycleOutcome {
        if self.closed {
            return CycleOutcome::Closed;
        }
        if generation <= self.applied_generation {
            return CycleOutcome::Stale;
        }

        let percentages = compute_percentages(tally.a, tally.b);
        let state = DisplayState::new(tally, percentages);

        // Bars first, then the bound state in one go
        self.renderer.set_bar_width(Bar::A, &state.width(Bar::A));
        self.renderer.set_bar_width(Bar::B, &state.width(Bar::B));
        self.renderer.commit(&state);

        self.state = state.clone();
        self.applied_generation = generation;
        CycleOutcome::Applied(state)
    }

    pub fn fail(&mut self, generation: u64, err: &FetchError) -> CycleOutcome {
        if self.closed {
            return CycleOutcome::Closed;
        }
        let event = ErrorEvent::new(generation, err);
        self.renderer.report_error(&event);
        CycleOutcome::Failed(event)
    }
}

// Never panic on a poisoned lock, the board is replaced wholesale anyway
pub fn lock_board<R: Renderer>(board: &Mutex<Board<R>>) -> MutexGuard<'_, Board<R>> {
    board.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One fetch-and-update iteration.
pub async fn refresh_cycle<S, R>(generation: u64, source: &S, board: &Mutex<Board<R>>) -> CycleOutcome
where
    S: VoteSource + ?Sized,
    R: Renderer,
{
    let result = source.fetch_votes().await;

    let outcome = {
        let mut board = lock_board(board);
        match &result {
            Ok(tally) => board.apply(generation, *tally),
            Err(e) => board.fail(generation, e),
        }
    };

    match &outcome {
        CycleOutcome::Applied(state) => debug!(
            "Cycle {} applied: {}% / {}% of {} votes",
            generation, state.a_percent, state.b_percent, state.total
        ),
        CycleOutcome::Stale => warn!("Cycle {} finished after a newer one, dropping it", generation),
        CycleOutcome::Failed(event) => error!("Cycle {} failed: {}", generation, event.message),
        CycleOutcome::Closed => debug!("Cycle {} finished after shutdown, dropping it", generation),
    }

    outcome
}

/// Runs forever: one cycle per tick, each in its own task so a slow request
/// never holds up the next tick.
pub async fn run_poller<S, R>(source: Arc<S>, board: SharedBoard<R>, period: Duration)
where
    S: VoteSource,
    R: Renderer,
{
    info!("Polling for votes every {} ms", period.as_millis());
    let mut interval = interval(period);
    // After a stall, fire once and get back on the cadence instead of catching up
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let generation = lock_board(&board).next_generation();

        let source = Arc::clone(&source);
        let board = Arc::clone(&board);
        tokio::spawn(async move {
            refresh_cycle(generation, source.as_ref(), board.as_ref()).await;
        });
    }
}
