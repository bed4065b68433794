//! Step recurrence: "play this step only on repetition N of the loop".
//!
//! A recurrence is a `length` between 1 and 8 and an 8 bit mask, where bit `i` means the step
//! fires on the `i`th pass (bit 0 is the first pass). Only bits below `length` can be toggled,
//! but bits above it are kept when the length shrinks, so growing it again brings them back.
//! Presets are the only operation that clears bits at or above `length`.

use crate::encoder::{relative_delta, KnobThrottle, DEFAULT_SCROLL_RATE, SLOT_COUNT};
use crate::{ColorId, MappingError, StepInfo, StepPosition, StepStore};

pub const MAX_RECURRENCE_LENGTH: u8 = 8;

const NOT_FIRST: u8 = 0b1111_1110;
const EVEN: u8 = 0b0101_0101;
const ODD: u8 = 0b1010_1010;

/// The bits below `length`
fn low_bits(length: u8) -> u8 {
	((1u16 << length) - 1) as u8
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preset {
	First,
	NotFirst,
	Last,
	NotLast,
	Even,
	Odd,
}

impl Preset {
	/// The presets in the order they appear on the slot buttons
	pub const ALL: [Preset; 6] = [
		Preset::First, Preset::NotFirst, Preset::Last, Preset::NotLast, Preset::Even, Preset::Odd,
	];

	pub fn from_slot(index: usize) -> Option<Self> {
		Self::ALL.get(index).copied()
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|preset| preset.name() == name)
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::First => "first",
			Self::NotFirst => "not_first",
			Self::Last => "last",
			Self::NotLast => "not_last",
			Self::Even => "even",
			Self::Odd => "odd",
		}
	}

	/// Short label for the display
	pub fn label(self) -> &'static str {
		match self {
			Self::First => "First",
			Self::NotFirst => "!First",
			Self::Last => "Last",
			Self::NotLast => "!Last",
			Self::Even => "Even",
			Self::Odd => "Odd",
		}
	}
}

/// What one slot of the recurrence page shows
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecurrenceCell {
	On,
	Off,
	/// The slot is at or beyond the recurrence length
	Unavailable,
	Preset(Preset),
	Blank,
}

impl RecurrenceCell {
	pub fn label(self) -> &'static str {
		match self {
			Self::On => "On",
			Self::Off => "Off",
			Self::Unavailable => "-",
			Self::Preset(preset) => preset.label(),
			Self::Blank => "",
		}
	}

	pub fn color(self) -> ColorId {
		match self {
			Self::On => ColorId::Highlight,
			Self::Off | Self::Preset(_) => ColorId::Normal,
			Self::Unavailable | Self::Blank => ColorId::Off,
		}
	}
}

/// The preset palette. It shows the same thing no matter what the mask is.
pub fn palette_cells() -> [RecurrenceCell; SLOT_COUNT] {
	let mut cells = [RecurrenceCell::Blank; SLOT_COUNT];
	for (cell, &preset) in cells.iter_mut().zip(Preset::ALL.iter()) {
		*cell = RecurrenceCell::Preset(preset);
	}
	cells
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Recurrence {
	length: u8,
	mask: u8,
}

impl Recurrence {
	/// `length` is clamped to 1..=8
	pub fn new(length: u8, mask: u8) -> Self {
		Self { length: length.clamp(1, MAX_RECURRENCE_LENGTH), mask }
	}

	pub fn from_step(info: StepInfo) -> Self {
		Self::new(info.recurrence_length, info.recurrence_mask)
	}

	pub fn length(self) -> u8 { self.length }
	pub fn mask(self) -> u8 { self.mask }

	/// Changes the length without touching the mask
	pub fn set_length(&mut self, length: u8) {
		self.length = length.clamp(1, MAX_RECURRENCE_LENGTH);
	}

	pub fn is_set(self, bit: u8) -> bool {
		bit < 8 && self.mask & (1 << bit) != 0
	}

	/// Flips bit `bit`. Bits at or beyond the length can't be toggled.
	pub fn toggle_bit(&mut self, bit: u8) -> Result<(), MappingError> {
		if bit >= self.length {
			return Err(MappingError::out_of_range("recurrence bit", bit as usize, self.length as usize));
		}
		self.mask ^= 1 << bit;
		Ok(())
	}

	/// The mask `preset` produces for this length
	pub fn preset_mask(self, preset: Preset) -> u8 {
		let low = low_bits(self.length);
		match preset {
			Preset::First => 1,
			Preset::NotFirst => NOT_FIRST & low,
			Preset::Last => 1 << (self.length - 1),
			Preset::NotLast => (1 << (self.length - 1)) - 1,
			Preset::Even => EVEN & low,
			Preset::Odd => ODD & low,
		}
	}

	pub fn apply_preset(&mut self, preset: Preset) {
		self.mask = self.preset_mask(preset);
	}

	/// The state view: one on/off cell per repetition, dashes past the length
	pub fn cells(self) -> [RecurrenceCell; SLOT_COUNT] {
		let mut cells = [RecurrenceCell::Unavailable; SLOT_COUNT];
		for (bit, cell) in cells.iter_mut().enumerate().take(self.length as usize) {
			*cell = if self.is_set(bit as u8) { RecurrenceCell::On } else { RecurrenceCell::Off };
		}
		cells
	}
}

/// Edits the recurrence of whichever step is currently selected in the host's step editor.
///
/// The step store owns the data; this only computes new values and sends them off. Slot 0's knob
/// changes the length, the slot buttons toggle bits, or apply presets while the palette is shown.
#[derive(Debug, Clone)]
pub struct RecurrenceEditor {
	step: Option<StepPosition>,
	throttle: KnobThrottle,
}

impl RecurrenceEditor {
	pub fn new(scroll_rate: u32) -> Self {
		Self { step: None, throttle: KnobThrottle::new(scroll_rate) }
	}

	/// Follows a different step, or none
	pub fn edit_step(&mut self, step: Option<StepPosition>) {
		self.step = step;
		self.throttle.reset();
	}

	pub fn step(&self) -> Option<StepPosition> { self.step }

	/// The recurrence of the edited step, as the store currently reports it
	pub fn recurrence(&self, store: &impl StepStore) -> Option<Recurrence> {
		store.step(self.step?).map(Recurrence::from_step)
	}

	fn target(&self, store: &impl StepStore) -> Result<(StepPosition, StepInfo), MappingError> {
		let position = self.step.ok_or(MappingError::NonexistentTarget)?;
		let info = store.step(position).ok_or(MappingError::NonexistentTarget)?;
		Ok((position, info))
	}

	fn enable(store: &mut impl StepStore, position: StepPosition, info: StepInfo) {
		if !info.is_recurrence_enabled {
			store.update_step_is_recurrence_enabled(position, true);
		}
	}

	pub fn on_knob(&mut self, store: &mut impl StepStore, index: usize, raw: u8) -> Result<(), MappingError> {
		if index != 0 {
			return Ok(());
		}

		let delta = relative_delta(raw);
		if delta == 0 {
			return Ok(());
		}

		let (position, info) = self.target(store)?;
		if !self.throttle.increase_knob_movement() {
			return Ok(());
		}

		let mut recurrence = Recurrence::from_step(info);
		let length = (recurrence.length() as i32 + delta.signum()).clamp(1, MAX_RECURRENCE_LENGTH as i32);
		recurrence.set_length(length as u8);
		if recurrence.length() != info.recurrence_length {
			log::trace!("recurrence length of {:?} -> {}", position, recurrence.length());
			Self::enable(store, position, info);
			store.update_step_recurrence_length(position, recurrence.length());
		}
		Ok(())
	}

	/// A slot button below the recurrence page. With the palette shown the first six slots apply
	/// presets; otherwise each slot toggles its repetition.
	pub fn on_slot_button(&mut self, store: &mut impl StepStore, index: usize, palette: bool)
			-> Result<(), MappingError> {

		if index >= SLOT_COUNT {
			return Err(MappingError::out_of_range("slot", index, SLOT_COUNT));
		}
		let (position, info) = self.target(store)?;
		let mut recurrence = Recurrence::from_step(info);

		if palette {
			let preset = Preset::from_slot(index)
					.ok_or_else(|| MappingError::out_of_range("preset", index, Preset::ALL.len()))?;
			recurrence.apply_preset(preset);
			Self::enable(store, position, info);
			store.update_step_recurrence_mask(position, recurrence.mask());
		} else {
			recurrence.toggle_bit(index as u8)?;
			Self::enable(store, position, info);
			store.update_step_recurrence_mask_toggle_bit(position, index as u8);
		}
		Ok(())
	}

	pub fn cells(&self, store: &impl StepStore, palette: bool) -> [RecurrenceCell; SLOT_COUNT] {
		if palette {
			return palette_cells();
		}
		match self.recurrence(store) {
			Some(recurrence) => recurrence.cells(),
			None => [RecurrenceCell::Blank; SLOT_COUNT],
		}
	}
}

impl Default for RecurrenceEditor {
	fn default() -> Self {
		Self::new(DEFAULT_SCROLL_RATE)
	}
}
