use std::time::Instant;

/// Timing for one frame of the render loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Number of frames completed before this one.
    pub index: u64,
}

/// Frame clock - tracks delta time and frame count for the scene runner.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            index: 0,
        }
    }

    /// Advance the clock and report timing for the frame that just began.
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let info = FrameInfo {
            delta: now.duration_since(self.last_tick).as_secs_f32(),
            elapsed: now.duration_since(self.start).as_secs_f32(),
            index: self.index,
        };
        self.last_tick = now;
        self.index += 1;
        info
    }

    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.index = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
