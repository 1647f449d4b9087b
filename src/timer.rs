#[derive(Copy, Clone)]
pub struct Timer {
    last_time: u64,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            last_time: time::precise_time_ns(),
        }
    }

    /// Marks a new tick time and returns the time elapsed in seconds since
    /// the last call to tick().
    pub fn tick(&mut self) -> f64 {
        let n = time::precise_time_ns();
        let dt = n - self.last_time;
        self.last_time = n;

        dt as f64 / 1_000_000_000.0
    }

    /// Returns the time elapsed in seconds since the last call to tick().
    pub fn elapsed(&self) -> f64 {
        let dt = time::precise_time_ns() - self.last_time;
        dt as f64 / 1_000_000_000.0
    }
}
