macro_rules! ok_or_return {
	( $e:expr ) => (
		match $e {
			Ok(value) => value,
			Err(e) => {
				log::debug!("ignoring: {}", e);
				return;
			},
		}
	)
}

macro_rules! some_or_continue {
	( $e:expr ) => (
		match $e {
			Some(value) => value,
			None => {
				continue
			},
		}
	)
}

/// Row-major grid of values, e.g. the colors of every pad for one refresh tick
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Array2d<T: Default + Copy> {
	width: usize,
	height: usize,
	vec: Vec<T>,
}

impl<T: Default + Copy> Array2d<T> {
	pub fn new(width: usize, height: usize) -> Self {
		return Self { width, height, vec: vec![T::default(); width * height] };
	}

	/// Returns the value at column `x` of row `y`, or None if out of bounds
	pub fn get(&self, x: usize, y: usize) -> Option<T> {
		if x >= self.width || y >= self.height { return None }

		return Some(self.vec[y * self.width + x]);
	}

	pub fn set(&mut self, x: usize, y: usize, value: T) {
		assert!(x < self.width);
		assert!(y < self.height);

		self.vec[y * self.width + x] = value;
	}

	pub fn width(&self) -> usize { self.width }
	pub fn height(&self) -> usize { self.height }

	/// Iterates the rows from top to bottom
	pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
		self.vec.chunks(self.width.max(1)).take(self.height)
	}
}
