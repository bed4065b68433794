use crate::encoder::DEFAULT_SCROLL_RATE;
use crate::{InputMap, MappingError, TextRenderer};

/// How the controller shows page labels and values
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayKind {
	/// Fixed-width text cells, like the two-line displays of older controllers
	CharacterCell,
	/// A pixel display
	Graphic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
	/// Encoder ticks per step for throttled parameters
	pub scroll_rate: u32,
	/// Ask the transport to leave automation write mode when a knob is let go
	pub stop_automation_on_release: bool,
	pub grid_rows: usize,
	pub grid_cols: usize,
	pub display: DisplayKind,
	/// Width of one slot on a character-cell display
	pub label_width: usize,
	pub input: InputMap,
}

impl Default for ControllerConfig {
	fn default() -> Self {
		Self {
			scroll_rate: DEFAULT_SCROLL_RATE,
			stop_automation_on_release: false,
			grid_rows: 8,
			grid_cols: 8,
			display: DisplayKind::CharacterCell,
			label_width: 8,
			input: InputMap::default(),
		}
	}
}

impl ControllerConfig {
	pub fn validate(&self) -> Result<(), MappingError> {
		if self.scroll_rate == 0 {
			return Err(MappingError::InvalidConfig("scroll_rate must be at least 1".to_string()));
		}

		if self.grid_rows == 0 || self.grid_cols == 0 {
			return Err(MappingError::InvalidConfig(format!(
				"grid must have at least one pad (found {}x{})", self.grid_rows, self.grid_cols
			)));
		}

		// pads are addressed with one note each
		if self.input.pad_note as usize + self.grid_rows * self.grid_cols > 128 {
			return Err(MappingError::InvalidConfig(format!(
				"{}x{} pads starting at note {} don't fit into 128 notes",
				self.grid_rows, self.grid_cols, self.input.pad_note
			)));
		}

		if self.label_width < 2 {
			return Err(MappingError::InvalidConfig("label_width must be at least 2".to_string()));
		}

		#[cfg(not(feature = "embedded-graphics"))]
		if self.display == DisplayKind::Graphic {
			return Err(MappingError::InvalidConfig(
				"graphic displays need the embedded-graphics feature".to_string(),
			));
		}

		Ok(())
	}

	/// The renderer for a character-cell display, None if the display is graphic
	pub fn text_renderer(&self) -> Option<TextRenderer> {
		match self.display {
			DisplayKind::CharacterCell => Some(TextRenderer::new(self.label_width)),
			DisplayKind::Graphic => None,
		}
	}

	/// The renderer matching [`display`](Self::display). `target` is only drawn on by graphic
	/// displays.
	#[cfg(feature = "embedded-graphics")]
	pub fn renderer<D>(&self, target: D) -> crate::render::DisplayRenderer<D>
	where
		D: embedded_graphics::draw_target::DrawTarget<Color = embedded_graphics::pixelcolor::BinaryColor>,
	{
		use crate::render::{DisplayRenderer, GraphicRenderer};

		match self.display {
			DisplayKind::CharacterCell => DisplayRenderer::Text(TextRenderer::new(self.label_width)),
			DisplayKind::Graphic => DisplayRenderer::Graphic(GraphicRenderer::new(target)),
		}
	}
}
