//! Mapping of the physical pad grid onto the host's track × scene launch matrix.
//!
//! Without flipping, columns are tracks and rows are scenes. Flipping swaps what the axes mean.
//! The row mode shows only the upper or lower half of the scenes, on whichever physical axis
//! currently carries them. Birds-eye mode replaces all of that: every pad then stands for a
//! whole page of each bank.

use crate::{Bank, ColorId, MappingError, SessionView, SlotState};

/// Which half of the scene page is visible
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowMode {
	All,
	Upper,
	Lower,
}

impl Default for RowMode {
	fn default() -> Self { Self::All }
}

impl RowMode {
	/// The "upper half" button: toggles between upper and all. Pressing it while the lower half
	/// is shown also goes back to all.
	pub fn toggle_upper(self) -> Self {
		match self {
			Self::All => Self::Upper,
			Self::Upper | Self::Lower => Self::All,
		}
	}

	/// The "lower half" button, mirroring [`RowMode::toggle_upper`]
	pub fn toggle_lower(self) -> Self {
		match self {
			Self::All => Self::Lower,
			Self::Upper | Self::Lower => Self::All,
		}
	}
}

/// A track and scene offset into the current bank pages
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SessionCoord {
	pub track: usize,
	pub scene: usize,
}

/// A page index into each bank, used by birds-eye mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BankPageCoord {
	pub track_page: usize,
	pub scene_page: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

fn page_count(bank: &dyn Bank) -> usize {
	let page_size = bank.page_size();
	if page_size == 0 {
		return 0;
	}
	(bank.item_count() + page_size - 1) / page_size
}

fn current_page(bank: &dyn Bank) -> usize {
	bank.scroll_position() / bank.page_size().max(1)
}

/// Color for a slot in the given host state
pub fn slot_color(state: SlotState) -> ColorId {
	match state {
		SlotState::Empty => ColorId::Off,
		SlotState::HasContent => ColorId::Normal,
		SlotState::Playing => ColorId::Playing,
		SlotState::Queued => ColorId::Queued,
		SlotState::Recording => ColorId::Recording,
		SlotState::Selected => ColorId::Highlight,
	}
}

/// The addressing state of the session grid.
///
/// The visible extent is recomputed whenever flip, row mode or the bank page sizes change, and
/// never exceeds either the physical grid or the bank page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWindow {
	rows: usize,
	cols: usize,
	track_count: usize,
	scene_count: usize,
	flipped: bool,
	row_mode: RowMode,
	birds_eye: bool,
	visible_rows: usize,
	visible_cols: usize,
	scene_offset: usize,
}

impl GridWindow {
	/// A window onto a physical grid of `rows` × `cols` pads, with bank page sizes matching
	/// the grid until the host says otherwise
	pub fn new(rows: usize, cols: usize) -> Self {
		let mut window = Self {
			rows,
			cols,
			track_count: cols,
			scene_count: rows,
			flipped: false,
			row_mode: RowMode::All,
			birds_eye: false,
			visible_rows: 0,
			visible_cols: 0,
			scene_offset: 0,
		};
		window.recompute();
		window
	}

	fn recompute(&mut self) {
		let half = self.scene_count / 2;
		let (scenes, offset) = match self.row_mode {
			RowMode::All => (self.scene_count, 0),
			RowMode::Upper => (half, 0),
			RowMode::Lower => (half, half),
		};

		let (rows, cols) = if self.flipped { (self.track_count, scenes) } else { (scenes, self.track_count) };
		self.visible_rows = rows.min(self.rows);
		self.visible_cols = cols.min(self.cols);
		self.scene_offset = offset;
	}

	pub fn set_page_sizes(&mut self, track_count: usize, scene_count: usize) {
		self.track_count = track_count;
		self.scene_count = scene_count;
		self.recompute();
	}

	/// Takes the page sizes from the host's banks
	pub fn sync_page_sizes(&mut self, view: &impl SessionView) {
		let (tracks, scenes) = (view.track_bank().page_size(), view.scene_bank().page_size());
		if tracks != self.track_count || scenes != self.scene_count {
			log::debug!("bank page sizes changed to {} tracks x {} scenes", tracks, scenes);
			self.set_page_sizes(tracks, scenes);
		}
	}

	pub fn set_flipped(&mut self, flipped: bool) {
		self.flipped = flipped;
		self.recompute();
	}

	pub fn set_row_mode(&mut self, row_mode: RowMode) {
		self.row_mode = row_mode;
		self.recompute();
	}

	pub fn toggle_upper(&mut self) {
		self.set_row_mode(self.row_mode.toggle_upper());
	}

	pub fn toggle_lower(&mut self) {
		self.set_row_mode(self.row_mode.toggle_lower());
	}

	pub fn set_birds_eye(&mut self, birds_eye: bool) {
		self.birds_eye = birds_eye;
	}

	pub fn rows(&self) -> usize { self.rows }
	pub fn cols(&self) -> usize { self.cols }
	pub fn flipped(&self) -> bool { self.flipped }
	pub fn row_mode(&self) -> RowMode { self.row_mode }
	pub fn is_birds_eye(&self) -> bool { self.birds_eye }
	pub fn visible_rows(&self) -> usize { self.visible_rows }
	pub fn visible_cols(&self) -> usize { self.visible_cols }

	/// The track and scene behind pad (`row`, `col`).
	///
	/// Returns None outside the visible window and in birds-eye mode. Inside the window the
	/// coordinates are returned even if the host has fewer tracks or scenes than that.
	pub fn cell(&self, row: usize, col: usize) -> Option<SessionCoord> {
		if self.birds_eye || row >= self.visible_rows || col >= self.visible_cols {
			return None;
		}

		Some(if self.flipped {
			SessionCoord { track: row, scene: col + self.scene_offset }
		} else {
			SessionCoord { track: col, scene: row + self.scene_offset }
		})
	}

	/// The bank pages behind pad (`row`, `col`) in birds-eye mode
	pub fn page_cell(&self, row: usize, col: usize) -> Option<BankPageCoord> {
		if !self.birds_eye || row >= self.rows || col >= self.cols {
			return None;
		}

		Some(if self.flipped {
			BankPageCoord { track_page: row, scene_page: col }
		} else {
			BankPageCoord { track_page: col, scene_page: row }
		})
	}

	fn exists(view: &impl SessionView, coord: SessionCoord) -> bool {
		let tracks = view.track_bank();
		let scenes = view.scene_bank();
		tracks.item_exists(tracks.scroll_position() + coord.track)
				&& scenes.item_exists(scenes.scroll_position() + coord.scene)
	}

	fn page_exists(view: &impl SessionView, coord: BankPageCoord) -> bool {
		coord.track_page < page_count(view.track_bank()) && coord.scene_page < page_count(view.scene_bank())
	}

	pub fn cell_color(&self, view: &impl SessionView, row: usize, col: usize) -> ColorId {
		if self.birds_eye {
			return match self.page_cell(row, col) {
				Some(coord) if Self::page_exists(view, coord) => {
					let here = coord.track_page == current_page(view.track_bank())
							&& coord.scene_page == current_page(view.scene_bank());
					if here { ColorId::Highlight } else { ColorId::Normal }
				}
				_ => ColorId::Off,
			};
		}

		match self.cell(row, col) {
			Some(coord) if Self::exists(view, coord) => slot_color(view.slot_state(coord.track, coord.scene)),
			_ => ColorId::Off,
		}
	}

	/// A pad press: launches the slot, or in birds-eye mode jumps both banks to the page
	pub fn press(&self, view: &mut impl SessionView, row: usize, col: usize) -> Result<(), MappingError> {
		if self.birds_eye {
			let coord = self.page_cell(row, col).ok_or_else(|| {
				if row >= self.rows {
					MappingError::out_of_range("grid row", row, self.rows)
				} else {
					MappingError::out_of_range("grid column", col, self.cols)
				}
			})?;
			if !Self::page_exists(&*view, coord) {
				return Err(MappingError::NonexistentTarget);
			}

			let track_position = coord.track_page * view.track_bank().page_size();
			let scene_position = coord.scene_page * view.scene_bank().page_size();
			view.track_bank_mut().scroll_to(track_position);
			view.scene_bank_mut().scroll_to(scene_position);
			return Ok(());
		}

		let coord = self.cell(row, col).ok_or_else(|| {
			if row >= self.visible_rows {
				MappingError::out_of_range("grid row", row, self.visible_rows)
			} else {
				MappingError::out_of_range("grid column", col, self.visible_cols)
			}
		})?;
		if !Self::exists(&*view, coord) {
			return Err(MappingError::NonexistentTarget);
		}
		view.launch_slot(coord.track, coord.scene);
		Ok(())
	}

	/// The bank an arrow moves, and whether it moves forwards. The vertical arrows move whatever
	/// the rows currently show.
	fn arrow_target(&self, direction: Direction) -> (bool, bool) {
		let vertical = matches!(direction, Direction::Up | Direction::Down);
		let forwards = matches!(direction, Direction::Down | Direction::Right);
		let scenes = vertical != self.flipped;
		(scenes, forwards)
	}

	pub fn can_scroll(&self, view: &impl SessionView, direction: Direction) -> bool {
		let (scenes, forwards) = self.arrow_target(direction);
		let bank = if scenes { view.scene_bank() } else { view.track_bank() };
		if forwards { bank.can_scroll_page_forwards() } else { bank.can_scroll_page_backwards() }
	}

	pub fn scroll(&self, view: &mut impl SessionView, direction: Direction) -> Result<(), MappingError> {
		if !self.can_scroll(&*view, direction) {
			return Err(MappingError::NonexistentTarget);
		}

		let (scenes, forwards) = self.arrow_target(direction);
		let bank = if scenes { view.scene_bank_mut() } else { view.track_bank_mut() };
		if forwards { bank.scroll_page_forwards() } else { bank.scroll_page_backwards() }
		Ok(())
	}
}
