//! Inclusive column/row rectangles used by the bounds index.
//!
//! A `TileBBox` is never empty: it starts as the single tile it was created from
//! and only grows through [`TileBBox::include`].
//!
//! ```
//! use fbtiles_core::TileBBox;
//!
//! let mut bbox = TileBBox::from_point(3, 5);
//! assert!(bbox.include(1, 9));
//! assert!(!bbox.include(2, 6));
//! assert_eq!(bbox.as_array(), [1, 5, 3, 9]);
//! ```

use std::fmt::{self, Debug, Display};

/// Minimal rectangle covering a set of tile columns (`x`) and rows (`y`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBBox {
	pub x_min: u32,
	pub y_min: u32,
	pub x_max: u32,
	pub y_max: u32,
}

impl TileBBox {
	/// Create a bbox from its corners. Swapped corners are put in order.
	#[must_use]
	pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> TileBBox {
		TileBBox {
			x_min: x0.min(x1),
			y_min: y0.min(y1),
			x_max: x0.max(x1),
			y_max: y0.max(y1),
		}
	}

	#[must_use]
	pub fn from_point(x: u32, y: u32) -> TileBBox {
		TileBBox {
			x_min: x,
			y_min: y,
			x_max: x,
			y_max: y,
		}
	}

	/// Compute the bbox of a set of points, `None` if there are none.
	pub fn from_points(points: impl IntoIterator<Item = (u32, u32)>) -> Option<TileBBox> {
		let mut points = points.into_iter();
		let (x, y) = points.next()?;
		let mut bbox = TileBBox::from_point(x, y);
		for (x, y) in points {
			bbox.include(x, y);
		}
		Some(bbox)
	}

	/// Widen the bbox to include `(x, y)`. Never shrinks.
	///
	/// Returns `true` if any edge moved.
	pub fn include(&mut self, x: u32, y: u32) -> bool {
		let mut changed = false;
		if x < self.x_min {
			self.x_min = x;
			changed = true;
		} else if x > self.x_max {
			self.x_max = x;
			changed = true;
		}
		if y < self.y_min {
			self.y_min = y;
			changed = true;
		} else if y > self.y_max {
			self.y_max = y;
			changed = true;
		}
		changed
	}

	#[must_use]
	pub fn width(&self) -> u32 {
		self.x_max - self.x_min + 1
	}

	#[must_use]
	pub fn height(&self) -> u32 {
		self.y_max - self.y_min + 1
	}

	/// Number of cells covered by the rectangle.
	#[must_use]
	pub fn count_tiles(&self) -> u64 {
		u64::from(self.width()) * u64::from(self.height())
	}

	/// `[x_min, y_min, x_max, y_max]`
	#[must_use]
	pub fn as_array(&self) -> [u32; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}
}

impl Debug for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"TileBBox([{},{},{},{}] ({}))",
			self.x_min,
			self.y_min,
			self.x_max,
			self.y_max,
			self.count_tiles()
		)
	}
}

impl Display for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{},{},{},{}]", self.x_min, self.y_min, self.x_max, self.y_max)
	}
}
