// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground poll loop aligned to wall-clock trigger seconds.

use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use ck_core::Clock;
use tokio_util::sync::CancellationToken;

use crate::Lane;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Pause after a tick so the same trigger second isn't seen twice
const SETTLE: Duration = Duration::from_secs(1);

pub struct PollLoop<C: Clock> {
    lane: Lane,
    clock: C,
}

impl<C: Clock> PollLoop<C> {
    pub fn new(lane: Lane, clock: C) -> Self {
        Self { lane, clock }
    }

    /// Call `tick` once per trigger window until `cancel` fires.
    ///
    /// Cancellation is observed between iterations; a running tick is never
    /// interrupted. Returns the number of ticks.
    pub async fn run<F>(&self, cancel: CancellationToken, mut tick: F) -> usize
    where
        F: FnMut(),
    {
        tracing::info!(lane = %self.lane, "daemon polling");
        let mut last_window: Option<(NaiveDateTime, u32)> = None;
        let mut ticks = 0;

        while !cancel.is_cancelled() {
            let now = self.clock.now();
            let second = now.second();
            if self.lane.trigger_seconds().contains(&second) {
                let window = (minute_of(now), second);
                if last_window != Some(window) {
                    last_window = Some(window);
                    tracing::debug!(lane = %self.lane, at = %now, "trigger");
                    tick();
                    ticks += 1;
                    tokio::time::sleep(SETTLE).await;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }

        tracing::info!(lane = %self.lane, ticks, "daemon shutting down");
        ticks
    }
}

fn minute_of(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(at)
}

/// Cancel `token` on SIGTERM or SIGINT. Must be called inside a runtime.
pub fn cancel_on_signals(token: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    let mut int = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = term.recv() => tracing::info!("received SIGTERM"),
            _ = int.recv() => tracing::info!("received SIGINT"),
        }
        token.cancel();
    });
    Ok(())
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
