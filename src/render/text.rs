use super::{PageRenderer, PageView};

/// Renders into two lines of fixed-width cells: labels on top, values below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRenderer {
	width: usize,
	title: String,
	lines: [String; 2],
}

/// Fits `text` into a cell of `width` characters, keeping the last one as a gap
fn cell(text: &str, width: usize) -> String {
	let shown: String = text.chars().take(width.saturating_sub(1)).collect();
	format!("{:<width$}", shown, width = width)
}

impl TextRenderer {
	pub fn new(width: usize) -> Self {
		Self { width, title: String::new(), lines: Default::default() }
	}

	pub fn title(&self) -> &str { &self.title }
	pub fn lines(&self) -> &[String; 2] { &self.lines }
}

impl PageRenderer for TextRenderer {
	type Error = std::convert::Infallible;

	fn render(&mut self, view: &PageView) -> Result<(), Self::Error> {
		self.title = view.title.to_string();
		let [labels, values] = &mut self.lines;
		labels.clear();
		values.clear();

		for slot in &view.slots {
			let value = match (&slot.value, slot.touched) {
				(Some(value), true) => format!(">{}", value),
				(Some(value), false) => value.clone(),
				(None, _) => String::new(),
			};
			labels.push_str(&cell(slot.label, self.width));
			values.push_str(&cell(&value, self.width));
		}
		Ok(())
	}
}
