//! Per-level bounds index.
//!
//! For every (zoom level, variant) pair that has received at least one tile, the `bounds`
//! table holds the smallest rectangle covering all columns and rows written under that pair.
//! The rectangle is extended in O(1) on each write and never shrinks, which is sound because a
//! cell's coordinate is fixed by its key and cells are never deleted.

use fbtiles_core::{TileBBox, TileCoord, TileKey, TileVariant};
use r2d2_sqlite::rusqlite::{Connection, OptionalExtension, Result, params};
use std::fmt::{self, Display};

/// One row of the `bounds` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsRecord {
	pub level: u8,
	pub variant: TileVariant,
	pub bbox: TileBBox,
}

impl Display for BoundsRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}: {}", self.level, self.variant, self.bbox)
	}
}

/// Widen the bounds of `(coord.level, variant)` to include `coord`.
///
/// Inserts the record if it does not exist yet. Issues no write if the coordinate is
/// already covered. Must run inside the transaction that writes the tile.
pub(super) fn extend(conn: &Connection, coord: &TileCoord, variant: TileVariant) -> Result<()> {
	match read(conn, coord.level(), variant)? {
		None => {
			log::trace!("create bounds for {} {variant} at {coord}", coord.level());
			conn.execute(
				"INSERT INTO bounds (zoom, collared, maxX, maxY, minX, minY) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
				params![
					coord.level(),
					variant.as_flag(),
					coord.x(),
					coord.y(),
					coord.x(),
					coord.y()
				],
			)?;
		}
		Some(mut bbox) => {
			if bbox.include(coord.x(), coord.y()) {
				log::trace!("extend bounds for {} {variant} to {bbox}", coord.level());
				conn.execute(
					"UPDATE bounds SET maxX = ?1, maxY = ?2, minX = ?3, minY = ?4 WHERE zoom = ?5 AND collared = ?6",
					params![
						bbox.x_max,
						bbox.y_max,
						bbox.x_min,
						bbox.y_min,
						coord.level(),
						variant.as_flag()
					],
				)?;
			}
		}
	}
	Ok(())
}

pub(super) fn read(conn: &Connection, level: u8, variant: TileVariant) -> Result<Option<TileBBox>> {
	conn.query_row(
		"SELECT minX, maxX, minY, maxY FROM bounds WHERE zoom = ?1 AND collared = ?2",
		params![level, variant.as_flag()],
		|row| {
			Ok(TileBBox {
				x_min: row.get(0)?,
				x_max: row.get(1)?,
				y_min: row.get(2)?,
				y_max: row.get(3)?,
			})
		},
	)
	.optional()
}

/// All bounds records, ordered by level and variant.
pub(super) fn read_all(conn: &Connection) -> Result<Vec<BoundsRecord>> {
	let mut stmt = conn.prepare("SELECT zoom, collared, minX, maxX, minY, maxY FROM bounds ORDER BY zoom, collared")?;
	let records = stmt
		.query_map([], |row| {
			let flag: i64 = row.get(1)?;
			Ok(BoundsRecord {
				level: row.get(0)?,
				variant: TileVariant::from_flag(flag).ok_or(
					r2d2_sqlite::rusqlite::Error::IntegralValueOutOfRange(1, flag),
				)?,
				bbox: TileBBox {
					x_min: row.get(2)?,
					x_max: row.get(3)?,
					y_min: row.get(4)?,
					y_max: row.get(5)?,
				},
			})
		})?
		.collect::<Result<Vec<_>>>()?;
	Ok(records)
}

/// Recompute the bounds of `(level, variant)` by scanning every tile key of that level
/// whose slot for `variant` is filled.
///
/// The level is selected by its key range, so only `tilekey` has to be trusted.
pub(super) fn scan(conn: &Connection, level: u8, variant: TileVariant) -> Result<Option<TileBBox>> {
	let sql = match variant {
		TileVariant::Primary => "SELECT tilekey FROM tiles WHERE tilekey BETWEEN ?1 AND ?2 AND tile_data IS NOT NULL",
		TileVariant::Collared => {
			"SELECT tilekey FROM tiles WHERE tilekey BETWEEN ?1 AND ?2 AND tile_collar_data IS NOT NULL"
		}
	};
	let range = TileKey::level_range(level);
	let mut stmt = conn.prepare(sql)?;
	let keys = stmt
		.query_map([range.start().as_i64(), range.end().as_i64()], |row| row.get::<_, i64>(0))?
		.collect::<Result<Vec<_>>>()?;
	Ok(TileBBox::from_points(keys.into_iter().map(|key| {
		let coord = TileKey::from_i64(key).decode();
		(coord.x(), coord.y())
	})))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fbtiles::schema;
	use pretty_assertions::assert_eq;

	fn new_store() -> Connection {
		let mut conn = Connection::open_in_memory().unwrap();
		schema::create(&mut conn).unwrap();
		conn
	}

	fn coord(level: u32, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	fn total_changes(conn: &Connection) -> u64 {
		conn.query_row("SELECT total_changes()", [], |row| row.get::<_, i64>(0))
			.unwrap() as u64
	}

	#[test]
	fn first_write_creates_point_record() {
		let conn = new_store();
		extend(&conn, &coord(7, 293, 200), TileVariant::Primary).unwrap();

		let row = conn
			.query_row("SELECT * FROM bounds", [], |row| {
				Ok((
					row.get::<_, i64>(0)?,
					row.get::<_, i64>(1)?,
					row.get::<_, i64>(2)?,
					row.get::<_, i64>(3)?,
					row.get::<_, i64>(4)?,
					row.get::<_, i64>(5)?,
				))
			})
			.unwrap();
		assert_eq!(row, (7, 0, 293, 200, 293, 200));
	}

	#[test]
	fn widens_each_axis_independently() {
		let conn = new_store();
		let variant = TileVariant::Primary;
		extend(&conn, &coord(3, 4, 4), variant).unwrap();
		extend(&conn, &coord(3, 1, 4), variant).unwrap();
		assert_eq!(read(&conn, 3, variant).unwrap().unwrap().as_array(), [1, 4, 4, 4]);
		extend(&conn, &coord(3, 2, 7), variant).unwrap();
		assert_eq!(read(&conn, 3, variant).unwrap().unwrap().as_array(), [1, 4, 4, 7]);
		extend(&conn, &coord(3, 6, 0), variant).unwrap();
		assert_eq!(read(&conn, 3, variant).unwrap().unwrap().as_array(), [1, 0, 6, 7]);
	}

	#[test]
	fn covered_coordinate_issues_no_write() {
		let conn = new_store();
		let variant = TileVariant::Collared;
		extend(&conn, &coord(5, 10, 10), variant).unwrap();
		extend(&conn, &coord(5, 20, 30), variant).unwrap();

		let before = total_changes(&conn);
		extend(&conn, &coord(5, 15, 12), variant).unwrap();
		extend(&conn, &coord(5, 10, 30), variant).unwrap();
		assert_eq!(total_changes(&conn), before);
		assert_eq!(read(&conn, 5, variant).unwrap().unwrap().as_array(), [10, 10, 20, 30]);
	}

	#[test]
	fn levels_and_variants_are_separate() {
		let conn = new_store();
		extend(&conn, &coord(2, 1, 1), TileVariant::Primary).unwrap();
		extend(&conn, &coord(2, 3, 3), TileVariant::Collared).unwrap();
		extend(&conn, &coord(4, 9, 9), TileVariant::Primary).unwrap();

		let records = read_all(&conn).unwrap();
		assert_eq!(
			records,
			vec![
				BoundsRecord {
					level: 2,
					variant: TileVariant::Primary,
					bbox: TileBBox::from_point(1, 1),
				},
				BoundsRecord {
					level: 2,
					variant: TileVariant::Collared,
					bbox: TileBBox::from_point(3, 3),
				},
				BoundsRecord {
					level: 4,
					variant: TileVariant::Primary,
					bbox: TileBBox::from_point(9, 9),
				},
			]
		);
		assert_eq!(read(&conn, 4, TileVariant::Collared).unwrap(), None);
	}

	#[test]
	fn scan_only_counts_filled_slots() {
		let conn = new_store();
		for (key, data, collar) in [
			(TileKey::encode(1, 2, 6), Some(b"a".as_slice()), None),
			(TileKey::encode(5, 0, 6), None, Some(b"b".as_slice())),
			(TileKey::encode(3, 9, 6), Some(b"c".as_slice()), Some(b"d".as_slice())),
		] {
			let c = key.decode();
			conn.execute(
				"INSERT INTO tiles (tilekey, zoom_level, tile_row, tile_column, tile_data, tile_collar_data) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
				params![key.as_i64(), c.level(), c.x(), c.y(), data, collar],
			)
			.unwrap();
		}
		assert_eq!(scan(&conn, 6, TileVariant::Primary).unwrap(), Some(TileBBox::new(1, 2, 3, 9)));
		assert_eq!(scan(&conn, 6, TileVariant::Collared).unwrap(), Some(TileBBox::new(3, 0, 5, 9)));
		assert_eq!(scan(&conn, 7, TileVariant::Primary).unwrap(), None);
	}

	#[test]
	fn scan_selects_levels_by_key_range() {
		let conn = new_store();
		let max = (1 << 28) - 1;
		for (level, x, y) in [
			(126, 4, 4),
			(127, 0, 0),
			(127, max, max),
			(128, 0, 0),
			(128, 7, max),
			(200, 3, 2),
			(255, max, 0),
		] {
			let key = TileKey::encode(x, y, level);
			conn.execute(
				"INSERT INTO tiles (tilekey, zoom_level, tile_row, tile_column, tile_data) VALUES (?1, ?2, ?3, ?4, x'00')",
				params![key.as_i64(), level, x, y],
			)
			.unwrap();
		}
		assert_eq!(scan(&conn, 127, TileVariant::Primary).unwrap(), Some(TileBBox::new(0, 0, max, max)));
		assert_eq!(scan(&conn, 128, TileVariant::Primary).unwrap(), Some(TileBBox::new(0, 0, 7, max)));
		assert_eq!(scan(&conn, 200, TileVariant::Primary).unwrap(), Some(TileBBox::from_point(3, 2)));
		assert_eq!(scan(&conn, 255, TileVariant::Primary).unwrap(), Some(TileBBox::from_point(max, 0)));
		assert_eq!(scan(&conn, 129, TileVariant::Primary).unwrap(), None);
	}

	#[test]
	fn display() {
		let record = BoundsRecord {
			level: 0,
			variant: TileVariant::Collared,
			bbox: TileBBox::from_point(2, 1),
		};
		assert_eq!(record.to_string(), "0 collared: [2,1,2,1]");
	}
}
