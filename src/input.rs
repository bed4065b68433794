use crate::encoder::SLOT_COUNT;
use crate::grid::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
	Down,
	Up,
}

impl ButtonEvent {
	pub fn from_pressed(pressed: bool) -> Self {
		if pressed { Self::Down } else { Self::Up }
	}
}

/// The button rows of the controller, besides the pad grid
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonRow {
	/// The eight buttons above the knobs that switch pages
	PageSelect,
	/// The eight buttons below the knobs
	Slot,
	/// Shift, delete and the arrows; see [`Modifier`]
	Modifier,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
	Shift,
	Delete,
	Arrow(Direction),
}

impl Modifier {
	pub const COUNT: usize = 6;

	pub fn from_index(index: u8) -> Option<Self> {
		match index {
			0 => Some(Self::Shift),
			1 => Some(Self::Delete),
			2 => Some(Self::Arrow(Direction::Up)),
			3 => Some(Self::Arrow(Direction::Down)),
			4 => Some(Self::Arrow(Direction::Left)),
			5 => Some(Self::Arrow(Direction::Right)),
			_ => None,
		}
	}

	pub fn as_index(self) -> u8 {
		match self {
			Self::Shift => 0,
			Self::Delete => 1,
			Self::Arrow(Direction::Up) => 2,
			Self::Arrow(Direction::Down) => 3,
			Self::Arrow(Direction::Left) => 4,
			Self::Arrow(Direction::Right) => 5,
		}
	}
}

/// A hardware event, already stripped of its transport encoding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControlEvent {
	/// A relative encoder tick; see [`crate::encoder`] for the meaning of `raw`
	Knob { index: u8, raw: u8 },
	KnobTouch { index: u8, touched: bool },
	Button { row: ButtonRow, index: u8, event: ButtonEvent },
	Pad { row: u8, col: u8, event: ButtonEvent },
}

/// Where the controls sit in the controller's MIDI implementation.
///
/// Each base is the number of the first control of its group; the rest follow consecutively.
/// Knobs and buttons send control changes (buttons send 127 on press, 0 on release), touch
/// sensors and pads send notes. Pads are numbered row by row from the top left.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputMap {
	pub knob_cc: u8,
	pub touch_note: u8,
	pub selector_cc: u8,
	pub slot_cc: u8,
	pub modifier_cc: u8,
	pub pad_note: u8,
}

impl Default for InputMap {
	fn default() -> Self {
		Self {
			knob_cc: 21,
			touch_note: 0,
			selector_cc: 104,
			slot_cc: 112,
			modifier_cc: 96,
			pad_note: 36,
		}
	}
}

fn offset_in(number: u8, base: u8, count: usize) -> Option<u8> {
	number.checked_sub(base).filter(|&offset| (offset as usize) < count)
}

impl InputMap {
	/// Decodes a three byte short message from a controller with a `rows` × `cols` pad grid.
	/// Messages that don't belong to any known control yield None.
	pub fn decode(&self, data: &[u8], rows: usize, cols: usize) -> Option<ControlEvent> {
		let (status, number, value) = match *data {
			[status, number, value] => (status & 0xF0, number, value),
			_ => {
				log::warn!("unexpected message {:?}", data);
				return None;
			}
		};

		let event = match status {
			0xB0 => {
				if let Some(index) = offset_in(number, self.knob_cc, SLOT_COUNT) {
					Some(ControlEvent::Knob { index, raw: value })
				} else if let Some(index) = offset_in(number, self.selector_cc, SLOT_COUNT) {
					Some(ControlEvent::Button { row: ButtonRow::PageSelect, index, event: ButtonEvent::from_pressed(value > 0) })
				} else if let Some(index) = offset_in(number, self.slot_cc, SLOT_COUNT) {
					Some(ControlEvent::Button { row: ButtonRow::Slot, index, event: ButtonEvent::from_pressed(value > 0) })
				} else if let Some(index) = offset_in(number, self.modifier_cc, Modifier::COUNT) {
					Some(ControlEvent::Button { row: ButtonRow::Modifier, index, event: ButtonEvent::from_pressed(value > 0) })
				} else {
					None
				}
			}
			0x80 | 0x90 => {
				// note on with velocity zero is a note off
				let on = status == 0x90 && value > 0;
				if let Some(index) = offset_in(number, self.touch_note, SLOT_COUNT) {
					Some(ControlEvent::KnobTouch { index, touched: on })
				} else if let Some(pad) = offset_in(number, self.pad_note, rows * cols) {
					let cols = cols as u8;
					Some(ControlEvent::Pad { row: pad / cols, col: pad % cols, event: ButtonEvent::from_pressed(on) })
				} else {
					None
				}
			}
			_ => None,
		};

		if event.is_none() {
			log::warn!("unexpected short message {:?}", data);
		}
		event
	}
}
