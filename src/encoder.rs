//! Decoding of relative rotary encoders.
//!
//! The knobs send "two's complement"-style relative values: 1..=63 turn clockwise by that many
//! ticks, 65..=127 turn counter-clockwise by `128 - raw` ticks, and 0 and 64 mean no movement.

use crate::ValueRange;

/// Number of physical knobs/buttons in a row
pub const SLOT_COUNT: usize = 8;

/// Default number of encoder ticks per step for coarse parameters
pub const DEFAULT_SCROLL_RATE: u32 = 8;

/// Converts a raw relative value into a signed delta
pub fn relative_delta(raw: u8) -> i32 {
	match raw {
		1..=63 => raw as i32,
		65..=127 => raw as i32 - 128,
		_ => 0,
	}
}

/// Applies the relative movement encoded in `raw` to `current`, keeping the result within
/// `lower..upper`
pub fn decode(raw: u8, current: i32, lower: i32, upper: i32) -> i32 {
	ValueRange::new(lower, upper).clamp(current + relative_delta(raw))
}

/// Lets only every Nth tick through, so that a fast turn doesn't fly past every entry of a
/// parameter with few discrete values
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KnobThrottle {
	rate: u32,
	counter: u32,
}

impl KnobThrottle {
	pub fn new(rate: u32) -> Self {
		Self { rate, counter: 0 }
	}

	pub fn rate(&self) -> u32 { self.rate }

	/// Counts one tick. Returns true if this tick should be applied.
	pub fn increase_knob_movement(&mut self) -> bool {
		self.counter += 1;
		if self.counter >= self.rate {
			self.counter = 0;
			return true;
		}
		false
	}

	pub fn reset(&mut self) {
		self.counter = 0;
	}
}

impl Default for KnobThrottle {
	fn default() -> Self {
		Self::new(DEFAULT_SCROLL_RATE)
	}
}

/// What a touch transition asks the caller to do
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TouchOutcome {
	/// Forward the touch to the bound parameter
	Touch,
	/// Delete was held: reset the bound parameter instead of touching it
	Reset,
	/// Forward the release to the bound parameter
	Release,
	/// Forward the release and tell the transport to leave automation write mode
	ReleaseAndStopAutomation,
	/// Duplicate edge, nothing to do
	Unchanged,
}

/// The runtime state of one physical knob.
///
/// A knob whose release message gets lost stays touched until the next release arrives.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PhysicalControl {
	index: u8,
	touched: bool,
	last_raw: Option<u8>,
}

impl PhysicalControl {
	pub(crate) fn new(index: u8) -> Self {
		Self { index, touched: false, last_raw: None }
	}

	pub fn index(&self) -> u8 { self.index }
	pub fn is_touched(&self) -> bool { self.touched }
	pub fn last_raw(&self) -> Option<u8> { self.last_raw }

	pub(crate) fn record_tick(&mut self, raw: u8) {
		self.last_raw = Some(raw);
	}

	/// Tracks a touch edge. `delete_held` turns a touch into a reset; `stop_automation` is the
	/// "stop automation on release" policy.
	///
	/// With the policy on, every release asks to stop automation writing, including a release
	/// whose touch was never seen (e.g. the touch happened before the page was bound).
	pub fn set_touched(&mut self, touched: bool, delete_held: bool, stop_automation: bool) -> TouchOutcome {
		if touched {
			if delete_held {
				return TouchOutcome::Reset;
			}
			if self.touched {
				return TouchOutcome::Unchanged;
			}
			self.touched = true;
			TouchOutcome::Touch
		} else {
			let was_touched = std::mem::replace(&mut self.touched, false);
			match (was_touched, stop_automation) {
				(_, true) => TouchOutcome::ReleaseAndStopAutomation,
				(true, false) => TouchOutcome::Release,
				(false, false) => TouchOutcome::Unchanged,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nanorand::{Rng, WyRand};

	#[test]
	fn decode_law() {
		for raw in 1..=63u8 {
			assert_eq!(relative_delta(raw), raw as i32);
		}
		for raw in 65..=127u8 {
			assert_eq!(relative_delta(raw), raw as i32 - 128);
		}
		assert_eq!(relative_delta(0), 0);
		assert_eq!(relative_delta(64), 0);
	}

	#[test]
	fn decode_clamps_to_range() {
		assert_eq!(decode(1, 5, 0, 10), 6);
		assert_eq!(decode(127, 5, 0, 10), 4);
		assert_eq!(decode(63, 5, 0, 10), 9);
		assert_eq!(decode(65, 5, 0, 10), 0);
		assert_eq!(decode(64, 5, 0, 10), 5);
	}

	#[test]
	fn decode_random_stays_in_bounds() {
		let mut rng = WyRand::new_seed(0x5eed);
		for _ in 0..1000 {
			let raw = rng.generate_range(0u8..128);
			let current = rng.generate_range(0i32..200);
			let value = decode(raw, current, 0, 128);
			assert!((0..128).contains(&value), "raw {} current {} gave {}", raw, current, value);
		}
	}

	#[test]
	fn throttle_fires_once_every_n() {
		let mut throttle = KnobThrottle::new(8);
		let fired: Vec<bool> = (0..24).map(|_| throttle.increase_knob_movement()).collect();
		for (i, &f) in fired.iter().enumerate() {
			assert_eq!(f, i % 8 == 7, "call {}", i);
		}
	}

	#[test]
	fn throttle_with_rate_one_passes_everything() {
		let mut throttle = KnobThrottle::new(1);
		assert!((0..5).all(|_| throttle.increase_knob_movement()));
	}

	#[test]
	fn delete_turns_touch_into_reset() {
		let mut control = PhysicalControl::new(3);
		assert_eq!(control.set_touched(true, true, false), TouchOutcome::Reset);
		assert!(!control.is_touched());
	}

	#[test]
	fn release_signals_stop_when_policy_enabled() {
		let mut control = PhysicalControl::new(0);
		assert_eq!(control.set_touched(true, false, true), TouchOutcome::Touch);
		assert!(control.is_touched());
		assert_eq!(control.set_touched(false, false, true), TouchOutcome::ReleaseAndStopAutomation);
		assert!(!control.is_touched());
	}

	#[test]
	fn release_without_touch_still_signals_stop() {
		let mut control = PhysicalControl::new(5);
		assert_eq!(control.set_touched(false, false, true), TouchOutcome::ReleaseAndStopAutomation);
		assert_eq!(control.set_touched(false, false, false), TouchOutcome::Unchanged);
		assert!(!control.is_touched());
	}

	#[test]
	fn missing_release_leaves_control_touched() {
		let mut control = PhysicalControl::new(0);
		control.set_touched(true, false, false);
		assert_eq!(control.set_touched(true, false, false), TouchOutcome::Unchanged);
		assert!(control.is_touched());
	}
}
