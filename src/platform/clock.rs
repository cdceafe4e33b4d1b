//! Frame and fixed-interval clocks

use super::TickSource;

/// Fires once per rendered frame with the clamped delta since the last frame
#[derive(Debug, Clone)]
pub struct FrameClock {
    running: bool,
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            running: false,
            last_ms: None,
            max_dt,
        }
    }
}

impl TickSource for FrameClock {
    /// Seconds since the previous frame, clamped to `[0, max_dt]`
    type Tick = f32;

    fn start(&mut self, _now_ms: f64) {
        self.running = true;
        self.last_ms = None;
    }

    fn stop(&mut self) {
        self.running = false;
        self.last_ms = None;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    /// Each host frame timestamp yields exactly one tick; the first frame
    /// after `start` yields a zero delta.
    fn poll(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        Some(crate::sim::clamp_frame_dt(dt, self.max_dt))
    }
}

/// Fires every `period_ms` of host time.
///
/// If the host falls further behind than `max_backlog` periods, the oldest
/// owed ticks are dropped.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period_ms: f64,
    max_backlog: u32,
    next_due_ms: Option<f64>,
}

impl IntervalClock {
    pub fn new(period_ms: f64, max_backlog: u32) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            max_backlog: max_backlog.max(1),
            next_due_ms: None,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Host time of the next firing, `None` while stopped
    pub fn next_due_ms(&self) -> Option<f64> {
        self.next_due_ms
    }
}

impl TickSource for IntervalClock {
    type Tick = ();

    fn start(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.period_ms);
    }

    fn stop(&mut self) {
        self.next_due_ms = None;
    }

    fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    fn poll(&mut self, now_ms: f64) -> Option<()> {
        let mut due = self.next_due_ms?;
        if now_ms < due {
            return None;
        }

        let owed = ((now_ms - due) / self.period_ms).floor() + 1.0;
        let limit = self.max_backlog as f64;
        if owed > limit {
            let dropped = owed - limit;
            log::debug!("Interval clock dropping {} missed tick(s)", dropped);
            due += dropped * self.period_ms;
        }

        self.next_due_ms = Some(due + self.period_ms);
        Some(())
    }
}
