//! Schema of an FBTiles store.
//!
//! ```text
//! datatypes (id INTEGER PRIMARY KEY, datatype TEXT UNIQUE)
//! tiles     (tilekey INTEGER PRIMARY KEY, zoom_level, tile_row, tile_column,
//!            tile_data BLOB, tile_datatypes_id, tile_collar_data BLOB, tile_collar_datatypes_id)
//! bounds    (zoom, collared, maxX, maxY, minX, minY, PRIMARY KEY (zoom, collared))
//! ```
//!
//! Both `*_datatypes_id` columns reference `datatypes(id)`. `tile_row` holds the column `x`
//! and `tile_column` holds the row `y` of a tile, as in every FBTiles file.

use fbtiles_core::{BoxError, FBTilesError, Result, TileFormat};
use itertools::Itertools;
use r2d2_sqlite::rusqlite::{Connection, params};
use std::collections::BTreeMap;

const TILES_COLUMNS: [&str; 8] = [
	"tilekey",
	"zoom_level",
	"tile_row",
	"tile_column",
	"tile_data",
	"tile_datatypes_id",
	"tile_collar_data",
	"tile_collar_datatypes_id",
];

const BOUNDS_COLUMNS: [&str; 6] = ["zoom", "collared", "maxX", "maxY", "minX", "minY"];

const DATATYPES_COLUMNS: [&str; 2] = ["id", "datatype"];

/// Mapping from tile formats to the ids persisted in a store's `datatypes` table.
///
/// Loaded once when a store is opened and checked against [`TileFormat::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRegistry {
	ids: BTreeMap<TileFormat, i64>,
}

impl TypeRegistry {
	/// Id of `format` in the store.
	///
	/// # Errors
	/// Returns [`FBTilesError::UnknownType`] if the store has no entry for `format`.
	pub fn id_of(&self, format: TileFormat) -> Result<i64> {
		self.ids
			.get(&format)
			.copied()
			.ok_or_else(|| FBTilesError::UnknownType(format.to_string()))
	}

	pub fn iter(&self) -> impl Iterator<Item = (TileFormat, i64)> + '_ {
		self.ids.iter().map(|(format, id)| (*format, *id))
	}
}

/// `true` if the database contains no tables, indexes or views at all.
pub(super) fn is_empty(conn: &Connection) -> Result<bool, BoxError> {
	let count: i64 = conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))?;
	Ok(count == 0)
}

/// Create tables and indexes, and seed the type registry, in one transaction.
pub(super) fn create(conn: &mut Connection) -> Result<(), BoxError> {
	let transaction = conn.transaction()?;
	transaction.execute_batch(
		"CREATE TABLE [datatypes] (id INTEGER PRIMARY KEY, datatype TEXT UNIQUE);
		CREATE TABLE tiles (tilekey INTEGER PRIMARY KEY,
			zoom_level INTEGER,
			tile_row INTEGER,
			tile_column INTEGER,
			tile_data BLOB,
			tile_datatypes_id INTEGER,
			tile_collar_data BLOB,
			tile_collar_datatypes_id INTEGER,
			FOREIGN KEY (tile_datatypes_id) REFERENCES datatypes(id),
			FOREIGN KEY (tile_collar_datatypes_id) REFERENCES datatypes(id));
		CREATE TABLE bounds (zoom INTEGER,
			collared INTEGER,
			maxX INTEGER,
			maxY INTEGER,
			minX INTEGER,
			minY INTEGER,
			PRIMARY KEY (zoom, collared));
		CREATE INDEX tiles_idx ON tiles(zoom_level, tile_row, tile_column);
		CREATE INDEX tiles_zoom_idx ON tiles(zoom_level);
		CREATE INDEX datatypes_idx ON datatypes(datatype);",
	)?;
	for format in TileFormat::ALL {
		transaction.execute(
			"INSERT INTO [datatypes] VALUES (?1, ?2)",
			params![format.id(), format.as_str()],
		)?;
	}
	transaction.commit()?;
	Ok(())
}

/// Check the tables of an existing store and load its type registry.
///
/// Every [`TileFormat`] must be registered under its fixed id. Extra entries written by
/// other tools are kept but ignored.
pub(super) fn reconcile(conn: &Connection) -> Result<TypeRegistry, BoxError> {
	check_columns(conn, "datatypes", &DATATYPES_COLUMNS)?;
	check_columns(conn, "tiles", &TILES_COLUMNS)?;
	check_columns(conn, "bounds", &BOUNDS_COLUMNS)?;

	let mut stmt = conn.prepare("SELECT id, datatype FROM datatypes")?;
	let stored = stmt
		.query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(0)?)))?
		.collect::<Result<BTreeMap<String, i64>, _>>()?;

	let mut ids = BTreeMap::new();
	for format in TileFormat::ALL {
		match stored.get(format.as_str()) {
			Some(&id) if id == format.id() => {
				ids.insert(format, id);
			}
			Some(&id) => {
				return Err(format!("type '{format}' is stored with id {id}, expected {}", format.id()).into());
			}
			None => return Err(format!("type '{format}' is not registered").into()),
		}
	}

	for (name, id) in &stored {
		if TileFormat::ALL.iter().all(|f| f.as_str() != name) {
			log::warn!("ignoring unknown type '{name}' (id {id})");
		}
	}

	Ok(TypeRegistry { ids })
}

fn check_columns(conn: &Connection, table: &str, expected: &[&str]) -> Result<(), BoxError> {
	let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
	let columns = stmt
		.query_map([table], |row| row.get::<_, String>(0))?
		.collect::<Result<Vec<_>, _>>()?;

	if columns.is_empty() {
		return Err(format!("table '{table}' is missing").into());
	}
	let missing = expected.iter().filter(|c| !columns.iter().any(|name| name == *c)).join(", ");
	if !missing.is_empty() {
		return Err(format!("table '{table}' lacks columns: {missing}").into());
	}
	Ok(())
}

/// Convert a schema problem into the error reported by `open`.
pub(super) fn open_error(path: &std::path::Path) -> impl FnOnce(BoxError) -> FBTilesError + '_ {
	move |source| FBTilesError::store_open(path, source)
}
