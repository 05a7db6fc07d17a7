use std::time::{Duration, Instant};

/// Latest-value-wins scheduler.
///
/// Each `schedule` replaces the pending value and restarts the quiet window,
/// so a burst of calls yields exactly one value: the last one.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_within_window_runs_once_with_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(150));
        let mut executed = Vec::new();

        for (i, text) in ["p", "ph", "phi", "phis", "phish"].iter().enumerate() {
            let now = start + Duration::from_millis(i as u64 * 40);
            debouncer.schedule(text.to_string(), now);
            if let Some(value) = debouncer.poll(now) {
                executed.push(value);
            }
        }
        assert!(executed.is_empty());

        // Last keystroke at 160ms; nothing fires before 310ms.
        assert_eq!(debouncer.poll(start + Duration::from_millis(309)), None);
        if let Some(value) = debouncer.poll(start + Duration::from_millis(310)) {
            executed.push(value);
        }
        assert_eq!(executed, vec!["phish".to_string()]);
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn separated_inputs_each_fire() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(1, start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), Some(1));
        debouncer.schedule(2, start + Duration::from_millis(300));
        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), Some(2));
    }

    #[test]
    fn cancel_discards_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule("query", start);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
