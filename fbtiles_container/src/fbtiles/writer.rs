//! Write tiles into an FBTiles (SQLite) store.
//!
//! The `FBTilesWriter` opens an existing store or bootstraps a new one, then upserts tile
//! payloads. Each tile cell has one row keyed by its [`TileKey`] with two payload slots:
//!
//! - primary: `tile_data` + `tile_datatypes_id`
//! - collared: `tile_collar_data` + `tile_collar_datatypes_id`
//!
//! Writing one slot never touches the other. The payload upsert and the extension of the
//! bounds index run in a single transaction, so a failed write leaves the store unchanged.
//!
//! ## Example
//! ```rust,no_run
//! use fbtiles_container::*;
//! use fbtiles_core::*;
//! use std::path::Path;
//!
//! fn main() -> fbtiles_core::Result<()> {
//!     let mut writer = FBTilesWriter::open_path(Path::new("/tmp/world.fbtiles"))?;
//!     writer.add_tile_from_path(Path::new("/tmp/tile.png"), 293, 200, 7, TileVariant::Primary)?;
//!     assert!(writer.has_tile(293, 200, 7)?);
//!     writer.close()?;
//!     Ok(())
//! }
//! ```

use super::{
	bounds::{self, BoundsRecord},
	schema::{self, TypeRegistry},
};
use crate::{JournalMode, StoreConfig, TileContent};
use fbtiles_core::{Blob, FBTilesError, Result, TileBBox, TileCoord, TileFormat, TileKey, TileVariant};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{Connection, OptionalExtension, params},
};
use std::{
	fmt::Debug,
	fs::remove_file,
	path::{Path, PathBuf},
};

/// Writer for FBTiles (SQLite) stores.
///
/// Designed for a single writer per store. Every write is its own transaction.
pub struct FBTilesWriter {
	path: PathBuf,
	pool: Option<Pool<SqliteConnectionManager>>,
	config: StoreConfig,
	registry: TypeRegistry,
}

impl FBTilesWriter {
	/// Open the store at `path` with the default [`StoreConfig`], creating it if needed.
	///
	/// # Errors
	/// Returns [`FBTilesError::StoreOpen`] if the database cannot be opened or its schema
	/// does not match.
	pub fn open_path(path: &Path) -> Result<FBTilesWriter> {
		FBTilesWriter::open_with_config(path, StoreConfig::default())
	}

	/// Remove any existing file at `path`, then create a fresh store there.
	///
	/// # Errors
	/// Returns [`FBTilesError::StoreOpen`] if the old file cannot be removed or the new
	/// store cannot be created.
	pub fn create_path(path: &Path) -> Result<FBTilesWriter> {
		if path.exists() {
			log::warn!("deleting existing {path:?}");
			remove_file(path).map_err(|e| FBTilesError::store_open(path, e))?;
		}
		FBTilesWriter::open_path(path)
	}

	/// Open the store at `path`, which must already exist. Never creates a file.
	///
	/// # Errors
	/// Returns [`FBTilesError::StoreOpen`] if there is no file at `path`, or for the same
	/// reasons as [`FBTilesWriter::open_with_config`].
	pub fn open_existing(path: &Path, config: StoreConfig) -> Result<FBTilesWriter> {
		if !path.is_file() {
			return Err(FBTilesError::store_open(path, "store does not exist"));
		}
		FBTilesWriter::open_with_config(path, config)
	}

	/// Open the store at `path`, creating it if needed.
	///
	/// A database without any tables is treated as new: the tables, the indexes and the
	/// type registry are created. Otherwise the schema is checked and the type registry
	/// is loaded and compared against [`TileFormat::ALL`].
	///
	/// # Errors
	/// Returns [`FBTilesError::StoreOpen`] if the database cannot be opened or its schema
	/// does not match.
	pub fn open_with_config(path: &Path, config: StoreConfig) -> Result<FBTilesWriter> {
		log::debug!("open {path:?}");

		let init_config = config.clone();
		let manager =
			SqliteConnectionManager::file(path).with_init(move |conn| init_config.init_connection(conn));
		let pool = Pool::builder()
			.max_size(config.pool_size.max(1))
			.connection_timeout(config.connect_timeout())
			.build(manager)
			.map_err(|e| FBTilesError::store_open(path, e))?;

		let registry = {
			let mut conn = pool.get().map_err(|e| FBTilesError::store_open(path, e))?;
			if schema::is_empty(&conn).map_err(schema::open_error(path))? {
				log::info!("creating schema in {path:?}");
				schema::create(&mut conn).map_err(schema::open_error(path))?;
			}
			schema::reconcile(&conn).map_err(schema::open_error(path))?
		};

		Ok(FBTilesWriter {
			path: path.to_path_buf(),
			pool: Some(pool),
			config,
			registry,
		})
	}

	/// Close the store.
	///
	/// In WAL mode the log is checkpointed into the database file first. Closing an
	/// already closed store logs a warning and returns `Ok(false)`.
	///
	/// # Errors
	/// Returns [`FBTilesError::Store`] if the final checkpoint fails. The store is
	/// closed anyway.
	pub fn close(&mut self) -> Result<bool> {
		let Some(pool) = self.pool.take() else {
			log::warn!("close not necessary; store {:?} is already closed", self.path);
			return Ok(false);
		};
		if self.config.journal_mode == JournalMode::Wal {
			let conn = pool.get().map_err(FBTilesError::store)?;
			conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
				.map_err(FBTilesError::store)?;
		}
		drop(pool);
		log::debug!("closed {:?}", self.path);
		Ok(true)
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.pool.is_none()
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	#[must_use]
	pub fn registry(&self) -> &TypeRegistry {
		&self.registry
	}

	fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
		self.pool
			.as_ref()
			.ok_or(FBTilesError::Closed)?
			.get()
			.map_err(FBTilesError::store)
	}

	/// Write the payload of one slot of the tile cell at column `x`, row `y`, zoom `z`.
	///
	/// Creates the cell's row on first write. Afterwards only the slot selected by
	/// `variant` is replaced; the other slot keeps its content. The bounds record of
	/// `(z, variant)` is extended in the same transaction.
	///
	/// # Errors
	/// - [`FBTilesError::OutOfRange`] if `z` > 255 or `x`/`y` > 2^28 - 1
	/// - [`FBTilesError::UnknownType`] if `format` is not registered in the store
	/// - [`FBTilesError::TransactionFailure`] if the write could not be committed
	/// - [`FBTilesError::Closed`] if the store was closed
	///
	/// Nothing is persisted when an error is returned.
	pub fn put_tile(&mut self, x: u32, y: u32, z: u32, blob: &Blob, format: TileFormat, variant: TileVariant) -> Result<()> {
		let coord = TileCoord::new(z, x, y)?;
		let type_id = self.registry.id_of(format)?;
		let key = TileKey::from_coord(&coord);

		let mut conn = self.connection()?;
		let transaction = conn.transaction().map_err(FBTilesError::transaction)?;
		upsert_tile(&transaction, key, &coord, variant, blob, type_id).map_err(FBTilesError::transaction)?;
		bounds::extend(&transaction, &coord, variant).map_err(FBTilesError::transaction)?;
		transaction.commit().map_err(FBTilesError::transaction)?;

		log::trace!("put {variant} {format} tile {coord} ({} bytes)", blob.len());
		Ok(())
	}

	/// Read a tile file and write it into the slot selected by `variant`.
	///
	/// The tile type is sniffed from the file extension.
	///
	/// # Errors
	/// Everything [`TileContent::from_path`] and [`FBTilesWriter::put_tile`] return.
	pub fn add_tile_from_path(&mut self, file: &Path, x: u32, y: u32, z: u32, variant: TileVariant) -> Result<()> {
		let content = TileContent::from_path(file)?;
		self.put_tile(x, y, z, &content.blob, content.format, variant)
	}

	/// Does a row exist for the cell at column `x`, row `y`, zoom `z`?
	///
	/// # Errors
	/// Returns [`FBTilesError::OutOfRange`] for invalid coordinates, or
	/// [`FBTilesError::Store`] if the lookup fails.
	pub fn has_tile(&self, x: u32, y: u32, z: u32) -> Result<bool> {
		let key = TileKey::from_coord(&TileCoord::new(z, x, y)?);
		let conn = self.connection()?;
		let found = conn
			.query_row(
				"SELECT tilekey FROM tiles WHERE tilekey = ?1",
				[key.as_i64()],
				|row| row.get::<_, i64>(0),
			)
			.optional()
			.map_err(FBTilesError::store)?;
		Ok(found.is_some())
	}

	/// Read one slot of a tile cell. `None` if the cell or the slot is empty.
	///
	/// # Errors
	/// Returns [`FBTilesError::UnknownType`] if the slot refers to an unregistered type id.
	pub fn get_tile(&self, coord: &TileCoord, variant: TileVariant) -> Result<Option<TileContent>> {
		let sql = match variant {
			TileVariant::Primary => "SELECT tile_data, tile_datatypes_id FROM tiles WHERE tilekey = ?1",
			TileVariant::Collared => "SELECT tile_collar_data, tile_collar_datatypes_id FROM tiles WHERE tilekey = ?1",
		};
		let conn = self.connection()?;
		let slot = conn
			.query_row(sql, [TileKey::from_coord(coord).as_i64()], |row| {
				Ok((row.get::<_, Option<Vec<u8>>>(0)?, row.get::<_, Option<i64>>(1)?))
			})
			.optional()
			.map_err(FBTilesError::store)?;

		match slot {
			Some((Some(data), Some(type_id))) => {
				let format = TileFormat::from_id(type_id).ok_or_else(|| FBTilesError::UnknownType(type_id.to_string()))?;
				Ok(Some(TileContent::new(Blob::from(data), format)))
			}
			_ => Ok(None),
		}
	}

	/// Stored bounds of `(level, variant)`, `None` if nothing was written under that pair.
	pub fn get_bounds(&self, level: u8, variant: TileVariant) -> Result<Option<TileBBox>> {
		bounds::read(&*self.connection()?, level, variant).map_err(FBTilesError::store)
	}

	/// All bounds records, ordered by level and variant.
	pub fn all_bounds(&self) -> Result<Vec<BoundsRecord>> {
		bounds::read_all(&*self.connection()?).map_err(FBTilesError::store)
	}

	/// Recompute the bounds of `(level, variant)` from the tiles table, ignoring the index.
	pub fn scan_bounds(&self, level: u8, variant: TileVariant) -> Result<Option<TileBBox>> {
		bounds::scan(&*self.connection()?, level, variant).map_err(FBTilesError::store)
	}

	/// Number of tile rows.
	pub fn count_tiles(&self) -> Result<u64> {
		let count: i64 = self
			.connection()?
			.query_row("SELECT COUNT(*) FROM tiles", [], |row| row.get(0))
			.map_err(FBTilesError::store)?;
		Ok(count as u64)
	}

	/// Distinct zoom levels that hold at least one tile row, ascending.
	pub fn levels(&self) -> Result<Vec<u8>> {
		let conn = self.connection()?;
		let mut stmt = conn
			.prepare("SELECT DISTINCT zoom_level FROM tiles ORDER BY zoom_level")
			.map_err(FBTilesError::store)?;
		let levels = stmt
			.query_map([], |row| row.get::<_, u8>(0))
			.map_err(FBTilesError::store)?
			.collect::<Result<Vec<_>, _>>()
			.map_err(FBTilesError::store)?;
		Ok(levels)
	}
}

/// Insert the cell's row, or update only the selected slot if the row exists.
///
/// FBTiles stores the column `x` in `tile_row` and the row `y` in `tile_column`.
fn upsert_tile(
	conn: &Connection,
	key: TileKey,
	coord: &TileCoord,
	variant: TileVariant,
	blob: &Blob,
	type_id: i64,
) -> r2d2_sqlite::rusqlite::Result<()> {
	let sql = match variant {
		TileVariant::Primary => {
			"INSERT INTO tiles (tilekey, zoom_level, tile_row, tile_column, tile_data, tile_datatypes_id)
			VALUES (?1, ?2, ?3, ?4, ?5, ?6)
			ON CONFLICT (tilekey) DO UPDATE SET tile_data = excluded.tile_data, tile_datatypes_id = excluded.tile_datatypes_id"
		}
		TileVariant::Collared => {
			"INSERT INTO tiles (tilekey, zoom_level, tile_row, tile_column, tile_collar_data, tile_collar_datatypes_id)
			VALUES (?1, ?2, ?3, ?4, ?5, ?6)
			ON CONFLICT (tilekey) DO UPDATE SET tile_collar_data = excluded.tile_collar_data, tile_collar_datatypes_id = excluded.tile_collar_datatypes_id"
		}
	};
	log::trace!("SQL: {sql}");
	conn.execute(
		sql,
		params![key.as_i64(), coord.level(), coord.x(), coord.y(), blob.as_slice(), type_id],
	)?;
	Ok(())
}

impl Debug for FBTilesWriter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FBTilesWriter")
			.field("path", &self.path)
			.field("closed", &self.is_closed())
			.finish()
	}
}
