#[cfg(test)]
#[path = "timers_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Event;
use crate::domain::models::LOADING_PHASES;

pub const LOADING_PHASE_INTERVAL_MS: u64 = 1500;
pub const SCORE_TICK_MS: u64 = 50;
pub const SCORE_RAMP_TICKS: u32 = 50;

/// Walks the decorative loading phases. Tick k activates phase k-1, and the
/// tick after the last phase clears the highlight and finishes the cycle.
#[derive(Default)]
pub struct LoadingCycle {
    ticks: usize,
    done: bool,
}

impl LoadingCycle {
    pub fn tick(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }

        self.ticks += 1;
        if self.ticks > LOADING_PHASES.len() {
            self.done = true;
            return None;
        }

        return Some(self.ticks - 1);
    }

    pub fn is_done(&self) -> bool {
        return self.done;
    }
}

/// Counts the displayed score up to its target in fixed increments.
pub struct ScoreRamp {
    target: f64,
    current: f64,
    increment: f64,
    ticks: u32,
    done: bool,
}

impl ScoreRamp {
    pub fn new(target: u8) -> ScoreRamp {
        return ScoreRamp {
            target: f64::from(target),
            current: 0.0,
            increment: f64::from(target) / f64::from(SCORE_RAMP_TICKS),
            ticks: 0,
            done: false,
        };
    }

    pub fn tick(&mut self) -> u8 {
        if !self.done {
            self.ticks += 1;
            self.current += self.increment;

            // Float drift can leave the sum a hair under the target on the last tick.
            if self.current >= self.target || self.ticks >= SCORE_RAMP_TICKS {
                self.current = self.target;
                self.done = true;
            }
        }

        return self.current.round() as u8;
    }

    pub fn is_done(&self) -> bool {
        return self.done;
    }
}

pub async fn run_loading_cycle(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut cycle = LoadingCycle::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Loading cycle cancelled");
                return Ok(());
            }
            _ = time::sleep(Duration::from_millis(LOADING_PHASE_INTERVAL_MS)) => {}
        }

        tx.send(Event::LoadingPhase(cycle.tick()))?;
        if cycle.is_done() {
            return Ok(());
        }
    }
}

pub async fn run_score_ramp(
    target: u8,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut ramp = ScoreRamp::new(target);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                return Ok(());
            }
            _ = time::sleep(Duration::from_millis(SCORE_TICK_MS)) => {}
        }

        tx.send(Event::ScoreTick(ramp.tick()))?;
        if ramp.is_done() {
            return Ok(());
        }
    }
}
