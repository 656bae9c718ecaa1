//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] holding tile payloads.
//!
//! ```rust
//! use fbtiles_core::Blob;
//!
//! let blob = Blob::from(vec![0xff, 0xd8, 0xff]);
//! assert_eq!(blob.len(), 3);
//! assert_eq!(blob.as_slice(), &[0xff, 0xd8, 0xff]);
//! ```

use std::fmt::Debug;

/// Raw bytes of a tile.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_slice()
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {:02x?}", self.0.len(), &self.0[..self.0.len().min(16)])
	}
}
