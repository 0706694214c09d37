//! Caret blink ticker.

/// Toggles caret visibility on a fixed period, driven by the caller's clock.
///
/// The ticker starts stopped. [`Blink::reset`] makes the caret visible and
/// restarts the period; [`Blink::cancel`] stops it for good until the next
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    period_ms: u64,
    visible: bool,
    last_flip: Option<u64>,
}

impl Blink {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            visible: true,
            last_flip: None,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn is_running(&self) -> bool {
        self.last_flip.is_some()
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Show the caret and restart the period from `now_ms`.
    pub const fn reset(&mut self, now_ms: u64) {
        self.visible = true;
        self.last_flip = Some(now_ms);
    }

    /// Stop blinking; the caret stays visible.
    pub const fn cancel(&mut self) {
        self.visible = true;
        self.last_flip = None;
    }

    /// Advance to `now_ms`. Returns `true` only when visibility flipped.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(last) = self.last_flip else {
            return false;
        };
        if self.period_ms == 0 || now_ms.saturating_sub(last) < self.period_ms {
            return false;
        }
        let periods = now_ms.saturating_sub(last) / self.period_ms;
        self.last_flip = Some(last + periods * self.period_ms);
        if periods % 2 == 1 {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_ticker_never_flips() {
        let mut blink = Blink::new(500);
        assert!(!blink.tick(10_000));
        assert!(blink.is_visible());
    }

    #[test]
    fn test_flips_once_per_period() {
        let mut blink = Blink::new(500);
        blink.reset(0);
        assert!(!blink.tick(499));
        assert!(blink.tick(500));
        assert!(!blink.is_visible());
        assert!(!blink.tick(700));
        assert!(blink.tick(1000));
        assert!(blink.is_visible());
    }

    #[test]
    fn test_reset_shows_caret_and_restarts_period() {
        let mut blink = Blink::new(500);
        blink.reset(0);
        blink.tick(500);
        assert!(!blink.is_visible());

        blink.reset(600);
        assert!(blink.is_visible());
        assert!(!blink.tick(1000));
        assert!(blink.tick(1100));
    }

    #[test]
    fn test_even_number_of_missed_periods_is_no_flip() {
        let mut blink = Blink::new(500);
        blink.reset(0);
        assert!(!blink.tick(1000));
        assert!(blink.is_visible());
        assert!(blink.tick(1500));
    }

    #[test]
    fn test_cancel_stops_ticking() {
        let mut blink = Blink::new(500);
        blink.reset(0);
        blink.cancel();
        assert!(!blink.is_running());
        assert!(!blink.tick(5000));
        assert!(blink.is_visible());
    }
}
