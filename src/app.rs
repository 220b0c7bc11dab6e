use crate::client::VoteSource;
use crate::config::Config;
use crate::models::DisplayState;
use crate::render::Renderer;
use crate::tasks::poller::{self, Board, PollerState, SharedBoard};
use log::{info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns the board and the polling timer.
pub struct App<S: VoteSource, R: Renderer> {
    source: Arc<S>,
    board: SharedBoard<R>,
    period: Duration,
    timer: Option<JoinHandle<()>>,
}

impl<S: VoteSource, R: Renderer> App<S, R> {
    pub fn new(config: &Config, source: S, renderer: R) -> Self {
        Self {
            source: Arc::new(source),
            board: Arc::new(Mutex::new(Board::new(renderer))),
            period: config.poll_interval,
            timer: None,
        }
    }

    // Must be called from inside a tokio runtime
    pub fn start(&mut self) {
        if self.timer.is_some() {
            warn!("Poller already running, ignoring start");
            return;
        }

        {
            let mut board = poller::lock_board(&self.board);
            board.reopen();
            board.renderer_mut().show();
        }

        let source = Arc::clone(&self.source);
        let board = Arc::clone(&self.board);
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            poller::run_poller(source, board, period).await;
        }));
        info!("Poller started");
    }

    pub fn poller_state(&self) -> PollerState {
        match self.timer {
            Some(_) => PollerState::Polling,
            None => PollerState::Idle,
        }
    }

    pub fn state(&self) -> DisplayState {
        poller::lock_board(&self.board).state().clone()
    }

    #[cfg(test)]
    pub fn board(&self) -> SharedBoard<R> {
        Arc::clone(&self.board)
    }

    pub fn shutdown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            // Requests still in flight may finish, but they no longer render
            poller::lock_board(&self.board).close();
            info!("Poller stopped");
        }
    }
}

impl<S: VoteSource, R: Renderer> Drop for App<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
