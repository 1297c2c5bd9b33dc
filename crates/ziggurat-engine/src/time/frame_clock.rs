use std::time::{Duration, Instant};

/// Timing for one frame, as handed to the app.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped by the clock.
    pub dt: f32,

    /// Instant the tick was taken.
    pub now: Instant,

    /// Ordinal of this frame, starting at zero.
    pub frame_index: u64,
}

/// Produces one [`FrameTime`] per tick.
///
/// Each window runs its own clock, so delta time never crosses windows.
/// Deltas are clamped on both ends: the floor keeps a tight redraw loop
/// from reporting zero, the ceiling keeps camera motion bounded after a
/// debugger pause or a minimized stretch.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clock with the stock clamps, 0.1 ms floor and 250 ms ceiling.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Clock with caller-chosen clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline to now; the next tick measures from here.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Takes a tick: measure, clamp, advance the frame counter.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let index = self.frame_index;
        self.frame_index = index.wrapping_add(1);

        FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: index,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_to_minimum() {
        let mut clock = FrameClock::new();
        // Two immediate ticks elapse far less than the 0.1ms floor.
        clock.tick();
        let ft = clock.tick();
        assert!(ft.dt >= 0.0001);
    }

    #[test]
    fn dt_respects_custom_maximum() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::ZERO);
        let ft = clock.tick();
        assert_eq!(ft.dt, 0.0);
    }

    #[test]
    fn frame_index_increments_per_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }
}
