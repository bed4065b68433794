//! The DAW side of the mapping. Everything in here is owned and implemented by the host
//! integration; this crate only calls into it.
//!
//! All mutating calls are fire-and-forget: the host may apply them later, and nothing here ever
//! waits for a result.

use crate::Capability;

/// Identifies a parameter in the host's object graph
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterId(pub u32);

/// The declared numeric range of a parameter. `upper` is exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ValueRange {
	pub lower: i32,
	pub upper: i32,
}

impl ValueRange {
	pub const MIDI: Self = Self { lower: 0, upper: 128 };

	pub fn new(lower: i32, upper: i32) -> Self {
		Self { lower, upper }
	}

	/// The highest value inside the range
	pub fn max(self) -> i32 {
		(self.upper - 1).max(self.lower)
	}

	pub fn clamp(self, value: i32) -> i32 {
		value.clamp(self.lower, self.max())
	}

	/// Maps `value` into 0..=1 relative to this range
	pub fn normalize(self, value: i32) -> f32 {
		let span = self.max() - self.lower;
		if span == 0 {
			return 0.0;
		}
		(self.clamp(value) - self.lower) as f32 / span as f32
	}
}

/// A single automatable value in the host
pub trait Parameter {
	fn value(&self) -> i32;
	fn set_value(&mut self, value: i32);
	fn set_normalized_value(&mut self, value: f64);
	fn reset_value(&mut self);
	/// Tells the host whether the user currently has a finger on the control (used for
	/// automation touch mode)
	fn touch_value(&mut self, touched: bool);
	fn exists(&self) -> bool;
	fn range(&self) -> ValueRange;
	/// Human-readable value, e.g. "-3.2 dB". Defaults to the raw number.
	fn display_value(&self) -> String {
		self.value().to_string()
	}
}

pub trait ParameterHost {
	fn parameter(&self, id: ParameterId) -> Option<&dyn Parameter>;
	fn parameter_mut(&mut self, id: ParameterId) -> Option<&mut dyn Parameter>;
}

pub trait CapabilityQuery {
	fn supports(&self, capability: Capability) -> bool;
}

/// Addresses a single step of the clip currently being edited
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StepPosition {
	pub channel: u8,
	pub x: u32,
	pub y: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StepInfo {
	pub recurrence_length: u8,
	pub recurrence_mask: u8,
	pub is_recurrence_enabled: bool,
}

pub trait StepStore {
	/// Returns None if there is no note at `position`
	fn step(&self, position: StepPosition) -> Option<StepInfo>;
	fn update_step_recurrence_mask(&mut self, position: StepPosition, mask: u8);
	fn update_step_recurrence_mask_toggle_bit(&mut self, position: StepPosition, bit: u8);
	fn update_step_recurrence_length(&mut self, position: StepPosition, length: u8);
	fn update_step_is_recurrence_enabled(&mut self, position: StepPosition, enabled: bool);
}

/// A scrollable window onto the host's tracks or scenes
pub trait Bank {
	/// The number of items that exist in the host, not just in the current page
	fn item_count(&self) -> usize;
	fn item_exists(&self, index: usize) -> bool {
		index < self.item_count()
	}
	fn page_size(&self) -> usize;
	/// Index of the first item in the current page
	fn scroll_position(&self) -> usize;
	fn can_scroll_page_forwards(&self) -> bool;
	fn can_scroll_page_backwards(&self) -> bool;
	fn scroll_page_forwards(&mut self);
	fn scroll_page_backwards(&mut self);
	fn scroll_to(&mut self, position: usize);
}

/// Presentation state of one clip slot, as reported by the host
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlotState {
	Empty,
	HasContent,
	Playing,
	Queued,
	Recording,
	Selected,
}

pub trait SessionView {
	fn track_bank(&self) -> &dyn Bank;
	fn track_bank_mut(&mut self) -> &mut dyn Bank;
	fn scene_bank(&self) -> &dyn Bank;
	fn scene_bank_mut(&mut self) -> &mut dyn Bank;
	/// State of the slot at the given offsets into the current bank pages
	fn slot_state(&self, track: usize, scene: usize) -> SlotState;
	fn launch_slot(&mut self, track: usize, scene: usize);
}

/// Everything a [`crate::Session`] needs from the DAW
pub trait Host: ParameterHost + CapabilityQuery + StepStore + SessionView {}

impl<T: ParameterHost + CapabilityQuery + StepStore + SessionView> Host for T {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn range_clamps_to_exclusive_upper() {
		let range = ValueRange::new(0, 4);
		assert_eq!(range.clamp(10), 3);
		assert_eq!(range.clamp(-2), 0);
	}

	#[test]
	fn degenerate_range_does_not_panic() {
		let range = ValueRange::new(5, 5);
		assert_eq!(range.clamp(9), 5);
		assert_eq!(range.normalize(5), 0.0);
	}

	#[test]
	fn normalize_spans_zero_to_one() {
		assert_eq!(ValueRange::MIDI.normalize(0), 0.0);
		assert_eq!(ValueRange::MIDI.normalize(127), 1.0);
	}
}
