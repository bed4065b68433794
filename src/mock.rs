//! In-memory stand-ins for the host side, for tests and for trying out mappings without a DAW.

use std::collections::HashMap;

use crate::{
	Bank, Capability, CapabilityQuery, Parameter, ParameterHost, ParameterId, SessionView,
	SlotState, StepInfo, StepPosition, StepStore, ValueRange,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MockParameter {
	range: ValueRange,
	value: i32,
	default: i32,
	touched: bool,
	exists: bool,
}

impl MockParameter {
	/// A parameter whose reset value is `initial`
	pub fn new(range: ValueRange, initial: i32) -> Self {
		Self { range, value: initial, default: initial, touched: false, exists: true }
	}

	/// A parameter slot the host reports as gone, e.g. a deleted device's knob
	pub fn missing() -> Self {
		Self { exists: false, ..Self::new(ValueRange::MIDI, 0) }
	}

	pub fn is_touched(&self) -> bool { self.touched }
}

impl Parameter for MockParameter {
	fn value(&self) -> i32 { self.value }

	fn set_value(&mut self, value: i32) {
		self.value = self.range.clamp(value);
	}

	fn set_normalized_value(&mut self, value: f64) {
		let span = (self.range.max() - self.range.lower) as f64;
		self.set_value(self.range.lower + (value.clamp(0.0, 1.0) * span).round() as i32);
	}

	fn reset_value(&mut self) {
		self.value = self.default;
	}

	fn touch_value(&mut self, touched: bool) {
		self.touched = touched;
	}

	fn exists(&self) -> bool { self.exists }

	fn range(&self) -> ValueRange { self.range }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBank {
	item_count: usize,
	page_size: usize,
	position: usize,
}

impl MockBank {
	pub fn new(item_count: usize, page_size: usize) -> Self {
		Self { item_count, page_size, position: 0 }
	}
}

impl Bank for MockBank {
	fn item_count(&self) -> usize { self.item_count }
	fn page_size(&self) -> usize { self.page_size }
	fn scroll_position(&self) -> usize { self.position }

	fn can_scroll_page_forwards(&self) -> bool {
		self.position + self.page_size < self.item_count
	}

	fn can_scroll_page_backwards(&self) -> bool {
		self.position > 0
	}

	fn scroll_page_forwards(&mut self) {
		if self.can_scroll_page_forwards() {
			self.position += self.page_size;
		}
	}

	fn scroll_page_backwards(&mut self) {
		self.position = self.position.saturating_sub(self.page_size);
	}

	fn scroll_to(&mut self, position: usize) {
		self.position = position.min(self.item_count.saturating_sub(1));
	}
}

/// A host that keeps everything in memory and records what it was asked to do
#[derive(Debug, Clone)]
pub struct MockHost {
	parameters: HashMap<ParameterId, MockParameter>,
	capabilities: Vec<Capability>,
	steps: HashMap<StepPosition, StepInfo>,
	tracks: MockBank,
	scenes: MockBank,
	// keyed by absolute track and scene index
	slots: HashMap<(usize, usize), SlotState>,
	launched: Vec<(usize, usize)>,
}

impl MockHost {
	/// Eight tracks and eight scenes, nothing else
	pub fn new() -> Self {
		Self::with_banks(8, 8, 8, 8)
	}

	pub fn with_banks(track_count: usize, track_page: usize, scene_count: usize, scene_page: usize) -> Self {
		Self {
			parameters: HashMap::new(),
			capabilities: Vec::new(),
			steps: HashMap::new(),
			tracks: MockBank::new(track_count, track_page),
			scenes: MockBank::new(scene_count, scene_page),
			slots: HashMap::new(),
			launched: Vec::new(),
		}
	}

	pub fn add_parameter(&mut self, id: ParameterId, parameter: MockParameter) {
		self.parameters.insert(id, parameter);
	}

	pub fn parameter_state(&self, id: ParameterId) -> Option<&MockParameter> {
		self.parameters.get(&id)
	}

	pub fn value_of(&self, id: ParameterId) -> Option<i32> {
		self.parameters.get(&id).map(|p| p.value)
	}

	pub fn support(&mut self, capability: Capability) {
		self.capabilities.push(capability);
	}

	pub fn add_step(&mut self, position: StepPosition, info: StepInfo) {
		self.steps.insert(position, info);
	}

	/// Sets the state of the slot at absolute track and scene indices
	pub fn set_slot_state(&mut self, track: usize, scene: usize, state: SlotState) {
		self.slots.insert((track, scene), state);
	}

	/// Absolute (track, scene) indices of every launched slot, oldest first
	pub fn launched(&self) -> &[(usize, usize)] {
		&self.launched
	}
}

impl Default for MockHost {
	fn default() -> Self {
		Self::new()
	}
}

impl ParameterHost for MockHost {
	fn parameter(&self, id: ParameterId) -> Option<&dyn Parameter> {
		self.parameters.get(&id).map(|p| p as &dyn Parameter)
	}

	fn parameter_mut(&mut self, id: ParameterId) -> Option<&mut dyn Parameter> {
		self.parameters.get_mut(&id).map(|p| p as &mut dyn Parameter)
	}
}

impl CapabilityQuery for MockHost {
	fn supports(&self, capability: Capability) -> bool {
		self.capabilities.contains(&capability)
	}
}

impl StepStore for MockHost {
	fn step(&self, position: StepPosition) -> Option<StepInfo> {
		self.steps.get(&position).copied()
	}

	fn update_step_recurrence_mask(&mut self, position: StepPosition, mask: u8) {
		if let Some(step) = self.steps.get_mut(&position) {
			step.recurrence_mask = mask;
		}
	}

	fn update_step_recurrence_mask_toggle_bit(&mut self, position: StepPosition, bit: u8) {
		if let Some(step) = self.steps.get_mut(&position) {
			step.recurrence_mask ^= 1 << bit;
		}
	}

	fn update_step_recurrence_length(&mut self, position: StepPosition, length: u8) {
		if let Some(step) = self.steps.get_mut(&position) {
			step.recurrence_length = length;
		}
	}

	fn update_step_is_recurrence_enabled(&mut self, position: StepPosition, enabled: bool) {
		if let Some(step) = self.steps.get_mut(&position) {
			step.is_recurrence_enabled = enabled;
		}
	}
}

impl SessionView for MockHost {
	fn track_bank(&self) -> &dyn Bank { &self.tracks }
	fn track_bank_mut(&mut self) -> &mut dyn Bank { &mut self.tracks }
	fn scene_bank(&self) -> &dyn Bank { &self.scenes }
	fn scene_bank_mut(&mut self) -> &mut dyn Bank { &mut self.scenes }

	fn slot_state(&self, track: usize, scene: usize) -> SlotState {
		let key = (self.tracks.position + track, self.scenes.position + scene);
		self.slots.get(&key).copied().unwrap_or(SlotState::Empty)
	}

	fn launch_slot(&mut self, track: usize, scene: usize) {
		self.launched.push((self.tracks.position + track, self.scenes.position + scene));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalized_value_spans_range() {
		let mut p = MockParameter::new(ValueRange::new(0, 11), 5);
		p.set_normalized_value(1.0);
		assert_eq!(p.value(), 10);
		p.set_normalized_value(0.5);
		assert_eq!(p.value(), 5);
		p.reset_value();
		assert_eq!(p.value(), 5);
	}

	#[test]
	fn bank_paging() {
		let mut bank = MockBank::new(20, 8);
		assert!(!bank.can_scroll_page_backwards());
		bank.scroll_page_forwards();
		bank.scroll_page_forwards();
		assert_eq!(bank.scroll_position(), 16);
		assert!(!bank.can_scroll_page_forwards());
		bank.scroll_page_backwards();
		assert_eq!(bank.scroll_position(), 8);
	}
}
