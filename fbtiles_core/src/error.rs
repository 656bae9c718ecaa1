//! Error type shared by all FBTiles operations.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed source error, used to keep the backing store out of this crate's dependencies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the FBTiles store.
///
/// None of these are retried internally; the caller decides what to do.
#[derive(Debug, Error)]
pub enum FBTilesError {
	/// The backing store could not be opened, created, or its schema does not match.
	#[error("cannot open FBTiles store {path:?}")]
	StoreOpen {
		path: PathBuf,
		#[source]
		source: BoxError,
	},

	/// A zoom level, column or row exceeds its bit width in the tile key.
	#[error("{name} ({value}) is out of range, must be <= {max}")]
	OutOfRange { name: &'static str, value: u64, max: u64 },

	/// The tile type is not part of the type registry.
	#[error("unknown tile type '{0}'")]
	UnknownType(String),

	/// The tile payload and its bounds update could not be committed together.
	/// The store keeps its previous committed state.
	#[error("tile transaction failed")]
	TransactionFailure(#[source] BoxError),

	/// A read or maintenance operation on the backing store failed.
	#[error("store operation failed")]
	Store(#[source] BoxError),

	/// The handle was already closed.
	#[error("store is closed")]
	Closed,

	/// Tile content could not be read from disk.
	#[error("cannot read tile content from {path:?}")]
	Load {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl FBTilesError {
	pub fn store_open(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
		FBTilesError::StoreOpen {
			path: path.into(),
			source: source.into(),
		}
	}

	pub fn transaction(source: impl Into<BoxError>) -> Self {
		FBTilesError::TransactionFailure(source.into())
	}

	pub fn store(source: impl Into<BoxError>) -> Self {
		FBTilesError::Store(source.into())
	}
}

/// Result alias used throughout the FBTiles crates.
pub type Result<T, E = FBTilesError> = std::result::Result<T, E>;
