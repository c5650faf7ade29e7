use chrono::{DateTime, Utc};

/// Wall-clock source, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub ended: bool,
}

impl CountdownState {
    pub const ENDED: CountdownState = CountdownState {
        hours: 0,
        minutes: 0,
        seconds: 0,
        ended: true,
    };

    /// Remaining whole units until `target`. Hours are not wrapped at 24.
    pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let distance_ms = (target - now).num_milliseconds();
        if distance_ms < 0 {
            return Self::ENDED;
        }
        let total_seconds = distance_ms / 1000;
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
            ended: false,
        }
    }

    /// Recomputes in place. Once ended, stays ended.
    pub fn update(&mut self, target: DateTime<Utc>, now: DateTime<Utc>) {
        if self.ended {
            return;
        }
        *self = Self::remaining(target, now);
        if self.ended {
            tracing::info!(%target, "countdown ended");
        }
    }

    /// `HH:MM:SS`, or `ENDED`.
    pub fn display(&self) -> String {
        if self.ended {
            return "ENDED".to_string();
        }
        format!(
            "{}:{}:{}",
            zero_pad(self.hours),
            zero_pad(self.minutes),
            zero_pad(self.seconds)
        )
    }
}

pub fn zero_pad(n: i64) -> String {
    format!("{n:02}")
}

/// Countdown bound to one target instant.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Utc>,
    state: CountdownState,
}

impl Countdown {
    pub fn start(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            target,
            state: CountdownState::remaining(target, now),
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownState {
        self.state.update(self.target, now);
        self.state
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }
}
