//! Stream phase and I-frame scheduling.

use std::num::NonZeroU32;

/// Synchronization phase of an encoder or decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecPhase {
    /// Just constructed or reset. The next frame must be an I-frame.
    #[default]
    Fresh,
    /// At least one frame has been exchanged since the last reset.
    Synced,
}

impl CodecPhase {
    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Decides which frames are I-frames.
///
/// The counter starts at zero, advances by one per produced frame and wraps
/// at the rate. A zero counter means the next frame is an I-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IFrameSchedule {
    rate: NonZeroU32,
    counter: u32,
}

impl IFrameSchedule {
    #[must_use]
    pub const fn new(rate: NonZeroU32) -> Self {
        Self { rate, counter: 0 }
    }

    #[must_use]
    pub const fn rate(&self) -> NonZeroU32 {
        self.rate
    }

    /// Frames produced since the last I-frame boundary.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns `true` if the next frame is an I-frame.
    #[must_use]
    pub const fn iframe_due(&self) -> bool {
        self.counter == 0
    }

    /// Counter value after one more frame.
    #[must_use]
    pub const fn next_counter(&self) -> u32 {
        (self.counter + 1) % self.rate.get()
    }

    /// Records one produced frame.
    pub fn advance(&mut self) {
        self.counter = self.next_counter();
    }

    /// Forces the next frame to be an I-frame.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn phase_defaults_to_fresh() {
        assert_eq!(CodecPhase::default(), CodecPhase::Fresh);
        assert!(CodecPhase::Fresh.is_fresh());
        assert!(!CodecPhase::Synced.is_fresh());
    }

    #[test]
    fn schedule_wraps_at_rate() {
        let mut schedule = IFrameSchedule::new(rate(3));
        let due: Vec<bool> = (0..7)
            .map(|_| {
                let due = schedule.iframe_due();
                schedule.advance();
                due
            })
            .collect();
        assert_eq!(due, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn rate_one_is_always_iframe() {
        let mut schedule = IFrameSchedule::new(rate(1));
        for _ in 0..4 {
            assert!(schedule.iframe_due());
            schedule.advance();
        }
    }

    #[test]
    fn reset_restarts_cadence() {
        let mut schedule = IFrameSchedule::new(rate(5));
        schedule.advance();
        schedule.advance();
        assert_eq!(schedule.counter(), 2);
        schedule.reset();
        assert!(schedule.iframe_due());
        assert_eq!(schedule.rate().get(), 5);
    }
}
