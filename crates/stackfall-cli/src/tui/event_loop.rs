use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Tracks the recurring tick deadline and whether a redraw is pending, and
/// returns the next event via `next()`. Without a tick interval only terminal
/// events (and the renders they cause) are produced.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            next_tick: None,
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Replaces the tick interval.
    ///
    /// Any pending tick is dropped; the next one fires a full `interval` from
    /// now. Pass `None` to stop ticking.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.next_tick = interval.map(|interval| Instant::now() + interval);
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline passes or a crossterm event occurs.
    /// A pending render is always returned before blocking.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.poll_tick(now) {
                return Ok(event);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(next_tick) = self.next_tick
                && !event::poll(next_tick.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn poll_tick(&mut self, now: Instant) -> Option<TuiEvent> {
        let next_tick = self.next_tick?;
        if now < next_tick {
            return None;
        }
        self.next_tick = self.tick_interval.map(|interval| now + interval);
        self.dirty = true;
        Some(TuiEvent::Tick)
    }
}
