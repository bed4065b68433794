//! Page renderers turn a [`PageView`] into something the controller's display can show.
//!
//! Controllers with a character display use [`TextRenderer`]; the ones with a pixel display use
//! [`GraphicRenderer`] (behind the `embedded-graphics` feature). The configured
//! [`DisplayKind`](crate::DisplayKind) picks one: see [`ControllerConfig::text_renderer`] and,
//! with the feature, `ControllerConfig::renderer`. Nothing else in the crate cares which one it
//! is.
//!
//! [`ControllerConfig::text_renderer`]: crate::ControllerConfig::text_renderer

mod text;
pub use text::*;

#[cfg(feature = "embedded-graphics")]
mod graphic;
#[cfg(feature = "embedded-graphics")]
pub use graphic::*;

use crate::encoder::SLOT_COUNT;
use crate::ColorId;

/// What a single slot shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotView {
	pub label: &'static str,
	/// Display text of the value, None for empty slots
	pub value: Option<String>,
	/// The value mapped into 0..=1, for bar graphs
	pub normalized: Option<f32>,
	pub touched: bool,
	pub color: ColorId,
}

/// Everything a renderer needs to draw the active page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
	pub title: &'static str,
	pub slots: [SlotView; SLOT_COUNT],
}

pub trait PageRenderer {
	type Error;

	fn render(&mut self, view: &PageView) -> Result<(), Self::Error>;
}
