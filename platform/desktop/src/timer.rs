use std::time::Instant;

/// Measures the time between frames on the monotonic clock.
///
/// All durations are in seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    last_sample: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the baseline to now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.last_sample = Some(now);
    }

    /// Time since the previous update, or since `start` for the first one.
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    /// Same as [`Timer::update`], sampling at `now`. Never negative, an update that is older than
    /// the last sample returns 0 and keeps the baseline.
    pub fn update_at(&mut self, now: Instant) -> f64 {
        let Some(last) = self.last_sample else {
            // Never started, so this sample becomes the baseline.
            self.start_at(now);
            return 0.;
        };
        self.last_sample = Some(now.max(last));
        now.saturating_duration_since(last).as_secs_f64()
    }

    pub fn elapsed_total(&self) -> f64 {
        self.elapsed_total_at(Instant::now())
    }

    pub fn elapsed_total_at(&self, now: Instant) -> f64 {
        self.started_at
            .map_or(0., |started| now.saturating_duration_since(started).as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn deltas_add_up_to_the_elapsed_time() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(t0);

        let mut now = t0;
        let mut total = 0.;
        for millis in [16, 17, 3, 250, 1] {
            now += Duration::from_millis(millis);
            let delta = timer.update_at(now);
            assert!(delta >= 0.);
            total += delta;
        }

        let expected = (now - t0).as_secs_f64();
        assert!((total - expected).abs() < 1e-9);
        assert!((timer.elapsed_total_at(now) - expected).abs() < 1e-9);
    }

    #[test]
    fn first_update_measures_from_start() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(t0);
        assert_eq!(timer.update_at(t0 + Duration::from_millis(500)), 0.5);
    }

    #[test]
    fn start_resets_the_baseline() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(t0);
        timer.update_at(t0 + Duration::from_secs(2));

        let t1 = t0 + Duration::from_secs(3);
        timer.start_at(t1);
        assert_eq!(timer.elapsed_total_at(t1), 0.);
        assert_eq!(timer.update_at(t1 + Duration::from_millis(250)), 0.25);
    }

    #[test]
    fn going_back_in_time_is_never_negative() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(t0 + Duration::from_secs(1));
        assert_eq!(timer.update_at(t0), 0.);
        assert_eq!(timer.update_at(t0 + Duration::from_millis(1500)), 0.5);
    }

    #[test]
    fn unstarted_timer_starts_on_first_update() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        assert_eq!(timer.elapsed_total_at(t0), 0.);
        assert_eq!(timer.update_at(t0), 0.);
        assert_eq!(timer.update_at(t0 + Duration::from_millis(125)), 0.125);
    }
}
