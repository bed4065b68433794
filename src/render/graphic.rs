use embedded_graphics::{
	mono_font::{ascii::FONT_4X6, MonoTextStyle},
	pixelcolor::BinaryColor,
	prelude::*,
	primitives::{Line, PrimitiveStyle, Rectangle},
	text::{Baseline, Text},
};

use super::{PageRenderer, PageView, TextRenderer};
use crate::encoder::SLOT_COUNT;

const CHAR_WIDTH: u32 = 4;
const LABEL_HEIGHT: i32 = 8;

/// Draws each slot as a column with its label on top and a value bar below it
pub struct GraphicRenderer<D> {
	target: D,
}

impl<D: DrawTarget<Color = BinaryColor>> GraphicRenderer<D> {
	pub fn new(target: D) -> Self {
		Self { target }
	}

	pub fn target(&self) -> &D { &self.target }

	pub fn into_inner(self) -> D { self.target }
}

impl<D: DrawTarget<Color = BinaryColor>> PageRenderer for GraphicRenderer<D> {
	type Error = D::Error;

	fn render(&mut self, view: &PageView) -> Result<(), Self::Error> {
		self.target.clear(BinaryColor::Off)?;

		let size = self.target.bounding_box().size;
		let slot_width = size.width / SLOT_COUNT as u32;
		let bar_height = size.height.saturating_sub(LABEL_HEIGHT as u32 + 2);
		let label_style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
		let outline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

		for (i, slot) in view.slots.iter().enumerate() {
			let x = (i as u32 * slot_width) as i32;

			let label: String = slot.label.chars().take((slot_width / CHAR_WIDTH) as usize).collect();
			Text::with_baseline(&label, Point::new(x, 0), label_style, Baseline::Top)
					.draw(&mut self.target)?;

			if slot.touched {
				Line::new(Point::new(x, LABEL_HEIGHT - 1), Point::new(x + slot_width as i32 - 2, LABEL_HEIGHT - 1))
						.into_styled(outline)
						.draw(&mut self.target)?;
			}

			let normalized = match slot.normalized {
				Some(n) => n.clamp(0.0, 1.0),
				None => continue,
			};
			let bar_width = slot_width.saturating_sub(2);
			let filled = (bar_height as f32 * normalized).round() as u32;

			Rectangle::new(Point::new(x + 1, LABEL_HEIGHT + 1), Size::new(bar_width, bar_height))
					.into_styled(outline)
					.draw(&mut self.target)?;
			Rectangle::new(
				Point::new(x + 1, LABEL_HEIGHT + 1 + (bar_height - filled) as i32),
				Size::new(bar_width, filled),
			)
					.into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
					.draw(&mut self.target)?;
		}
		Ok(())
	}
}

/// Either kind of renderer, as picked by [`ControllerConfig::renderer`](crate::ControllerConfig::renderer)
pub enum DisplayRenderer<D> {
	Text(TextRenderer),
	Graphic(GraphicRenderer<D>),
}

impl<D: DrawTarget<Color = BinaryColor>> PageRenderer for DisplayRenderer<D> {
	type Error = D::Error;

	fn render(&mut self, view: &PageView) -> Result<(), Self::Error> {
		match self {
			Self::Text(renderer) => match renderer.render(view) {
				Ok(()) => Ok(()),
				Err(never) => match never {},
			},
			Self::Graphic(renderer) => renderer.render(view),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::SlotView;

	const WIDTH: usize = 64;
	const HEIGHT: usize = 32;

	struct Frame {
		pixels: [[bool; WIDTH]; HEIGHT],
	}

	impl OriginDimensions for Frame {
		fn size(&self) -> Size {
			Size::new(WIDTH as u32, HEIGHT as u32)
		}
	}

	impl DrawTarget for Frame {
		type Color = BinaryColor;
		type Error = std::convert::Infallible;

		fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
				where I: IntoIterator<Item = Pixel<Self::Color>> {
			for Pixel(point, color) in pixels {
				if point.x >= 0 && point.y >= 0 && (point.x as usize) < WIDTH && (point.y as usize) < HEIGHT {
					self.pixels[point.y as usize][point.x as usize] = color.is_on();
				}
			}
			Ok(())
		}
	}

	#[test]
	fn full_bar_fills_its_column() {
		let mut view = PageView::default();
		view.slots[1] = SlotView { label: "Vol", normalized: Some(1.0), value: Some("127".to_string()), ..SlotView::default() };

		let mut renderer = GraphicRenderer::new(Frame { pixels: [[false; WIDTH]; HEIGHT] });
		renderer.render(&view).unwrap();
		let frame = renderer.into_inner();

		// slot 1 spans x 8..16; the bar's inside is lit at the bottom
		assert!(frame.pixels[HEIGHT - 2][12]);
		// slot 0 has no value, so nothing below its label
		assert!(!frame.pixels[HEIGHT - 2][4]);
	}

	#[test]
	fn config_picks_the_renderer() {
		use crate::{ControllerConfig, DisplayKind};

		let mut view = PageView::default();
		view.title = "Main";
		view.slots[0] = SlotView { label: "Vol", normalized: Some(1.0), value: Some("127".to_string()), ..SlotView::default() };
		let blank = || Frame { pixels: [[false; WIDTH]; HEIGHT] };

		let mut config = ControllerConfig::default();
		match config.renderer(blank()) {
			DisplayRenderer::Text(mut renderer) => {
				renderer.render(&view).unwrap();
				assert_eq!(renderer.title(), "Main");
			}
			DisplayRenderer::Graphic(_) => panic!("character-cell config got a graphic renderer"),
		}

		config.display = DisplayKind::Graphic;
		assert_eq!(config.validate(), Ok(()));
		let mut renderer = config.renderer(blank());
		renderer.render(&view).unwrap();
		match renderer {
			DisplayRenderer::Graphic(renderer) => assert!(renderer.target().pixels[HEIGHT - 2][4]),
			DisplayRenderer::Text(_) => panic!("graphic config got a text renderer"),
		}
	}
}
