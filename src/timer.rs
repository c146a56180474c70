use std::time::Instant;

/// Minimal frame clock - tracks delta time between ticks
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the last tick, advancing the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-interval repeat driver for held-key navigation. Accumulates frame
/// deltas and reports how many whole intervals elapsed, capped so one long
/// stall cannot burst into a flood of steps.
#[derive(Debug, Clone, Copy)]
pub struct RepeatTimer {
    interval: f32,
    accumulator: f32,
    max_steps: u32,
}

impl RepeatTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            max_steps: 4,
        }
    }

    /// Number of whole intervals elapsed after adding this delta
    pub fn tick(&mut self, delta: f32) -> u32 {
        self.accumulator += delta;

        let steps = ((self.accumulator / self.interval) as u32).min(self.max_steps);
        self.accumulator -= steps as f32 * self.interval;
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Throttled timer - minimum interval between fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            // Allow immediate first tick
            time_since_last: min_interval,
        }
    }

    /// Attempt to fire, returns true if enough time has passed
    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}
