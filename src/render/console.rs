use crate::config::Config;
use crate::models::{Bar, DisplayState};
use crate::render::{ErrorEvent, Renderer};
use log::warn;
use std::io::Write;

const BAR_CELLS: usize = 40;

// Draws the board as two text bars
pub struct ConsoleRenderer<W: Write + Send + 'static> {
    out: W,
    labels: [String; 2],
    bar_ids: [String; 2],
    widths: [String; 2],
}

impl<W: Write + Send + 'static> ConsoleRenderer<W> {
    pub fn new(out: W, config: &Config) -> Self {
        Self {
            out,
            labels: [config.option_a_label.clone(), config.option_b_label.clone()],
            bar_ids: [config.bar_a_id.clone(), config.bar_b_id.clone()],
            widths: ["50%".to_string(), "50%".to_string()],
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn slot(bar: Bar) -> usize {
        match bar {
            Bar::A => 0,
            Bar::B => 1,
        }
    }

    fn line(&self, bar: Bar, percent: u8) -> String {
        let i = Self::slot(bar);
        let filled = BAR_CELLS * percent as usize / 100;
        format!(
            "{:<10} {}{} {:>4}  [{}]",
            self.labels[i],
            "#".repeat(filled),
            ".".repeat(BAR_CELLS - filled),
            self.widths[i],
            self.bar_ids[i],
        )
    }

    fn write_block(&mut self, text: &str) {
        // A broken terminal is not worth taking the poller down for
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }
}

impl<W: Write + Send + 'static> Renderer for ConsoleRenderer<W> {
    fn show(&mut self) {
        let header = format!("{} vs {}\n", self.labels[0], self.labels[1]);
        self.write_block(&header);
    }

    fn set_bar_width(&mut self, bar: Bar, width: &str) {
        self.widths[Self::slot(bar)] = width.to_string();
    }

    fn commit(&mut self, state: &DisplayState) {
        let block = format!(
            "{}\n{}\n{} votes\n",
            self.line(Bar::A, state.a_percent),
            self.line(Bar::B, state.b_percent),
            state.total,
        );
        self.write_block(&block);
    }

    fn report_error(&mut self, event: &ErrorEvent) {
        let line = format!("{}\n", event.message);
        self.write_block(&line);
    }
}
