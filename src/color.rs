/// A symbolic LED color. Mapping these onto a concrete device palette is left to the host, since
/// every controller generation has its own color tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorId {
	Off,
	/// The control is usable but not selected
	Normal,
	/// The control is selected or active
	Highlight,
	Playing,
	Queued,
	Recording,
}

impl Default for ColorId {
	fn default() -> Self { Self::Off }
}

impl ColorId {
	/// Whether a monochrome LED should be lit for this color
	pub fn is_lit(self) -> bool {
		self != Self::Off
	}
}

#[cfg(feature = "embedded-graphics")]
impl From<ColorId> for embedded_graphics::pixelcolor::BinaryColor {
	fn from(color: ColorId) -> Self {
		if color.is_lit() { Self::On } else { Self::Off }
	}
}

#[cfg(feature = "embedded-graphics")]
impl From<ColorId> for embedded_graphics::pixelcolor::Rgb888 {
	fn from(color: ColorId) -> Self {
		match color {
			ColorId::Off => Self::new(0, 0, 0),
			ColorId::Normal => Self::new(64, 64, 64),
			ColorId::Highlight => Self::new(255, 255, 255),
			ColorId::Playing => Self::new(0, 255, 0),
			ColorId::Queued => Self::new(255, 160, 0),
			ColorId::Recording => Self::new(255, 0, 0),
		}
	}
}
