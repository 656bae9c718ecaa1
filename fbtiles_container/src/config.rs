//! Connection settings for an FBTiles store.
//!
//! All fields are optional in YAML; missing ones take their defaults.
//!
//! ```yaml
//! pool_size: 2
//! connect_timeout_ms: 2000
//! busy_timeout_ms: 10000
//! journal_mode: wal
//! synchronous: normal
//! ```

use anyhow::{Context, Result};
use r2d2_sqlite::rusqlite::Connection;
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
	time::Duration,
};

/// SQLite journal mode.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
	/// Rollback journal that is deleted after each transaction, leaving a single file.
	#[default]
	Delete,
	Wal,
	Memory,
}

impl JournalMode {
	#[must_use]
	pub fn pragma_value(self) -> &'static str {
		match self {
			JournalMode::Delete => "delete",
			JournalMode::Wal => "wal",
			JournalMode::Memory => "memory",
		}
	}
}

/// SQLite `synchronous` setting.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
	#[default]
	Full,
	Normal,
	Off,
}

impl SyncMode {
	#[must_use]
	pub fn pragma_value(self) -> &'static str {
		match self {
			SyncMode::Full => "full",
			SyncMode::Normal => "normal",
			SyncMode::Off => "off",
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct StoreConfig {
	/// Maximum number of pooled SQLite connections.
	pub pool_size: u32,

	/// How long opening a connection may take, including retries, before `open` fails.
	pub connect_timeout_ms: u64,

	/// How long a connection waits for a lock held by another connection.
	pub busy_timeout_ms: u64,

	pub journal_mode: JournalMode,

	pub synchronous: SyncMode,
}

impl Default for StoreConfig {
	fn default() -> Self {
		StoreConfig {
			pool_size: 4,
			connect_timeout_ms: 5000,
			busy_timeout_ms: 5000,
			journal_mode: JournalMode::default(),
			synchronous: SyncMode::default(),
		}
	}
}

impl StoreConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening store config {path:?}"))?;
		StoreConfig::from_reader(BufReader::new(file)).with_context(|| format!("parsing store config {path:?}"))
	}

	#[must_use]
	pub fn connect_timeout(&self) -> Duration {
		Duration::from_millis(self.connect_timeout_ms.max(1))
	}

	/// Apply the pragmas of this config to a freshly opened connection.
	///
	/// Foreign keys are always enforced, so tiles can only reference registered types.
	/// The busy handler is installed first, so switching the journal mode waits for locks.
	pub(crate) fn init_connection(&self, conn: &mut Connection) -> Result<(), r2d2_sqlite::rusqlite::Error> {
		conn.busy_timeout(Duration::from_millis(self.busy_timeout_ms))?;
		conn.execute_batch(&format!(
			"PRAGMA foreign_keys = ON; PRAGMA journal_mode = {}; PRAGMA synchronous = {};",
			self.journal_mode.pragma_value(),
			self.synchronous.pragma_value()
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn empty_yaml_gives_defaults() {
		assert_eq!(StoreConfig::from_string("{}").unwrap(), StoreConfig::default());
	}

	#[test]
	fn parse_all_fields() {
		let config = StoreConfig::from_string(
			"pool_size: 2\nconnect_timeout_ms: 2000\nbusy_timeout_ms: 10000\njournal_mode: wal\nsynchronous: normal\n",
		)
		.unwrap();
		assert_eq!(
			config,
			StoreConfig {
				pool_size: 2,
				connect_timeout_ms: 2000,
				busy_timeout_ms: 10000,
				journal_mode: JournalMode::Wal,
				synchronous: SyncMode::Normal,
			}
		);
	}

	#[test]
	fn partial_yaml_keeps_other_defaults() {
		let config = StoreConfig::from_string("journal_mode: memory").unwrap();
		assert_eq!(config.journal_mode, JournalMode::Memory);
		assert_eq!(config.pool_size, 4);
		assert_eq!(config.synchronous, SyncMode::Full);
	}

	#[test]
	fn rejects_unknown_fields_and_values() {
		assert!(StoreConfig::from_string("page_size: 4096").is_err());
		assert!(StoreConfig::from_string("journal_mode: truncate").is_err());
	}

	#[test]
	fn from_path() -> Result<()> {
		let dir = assert_fs::TempDir::new()?;
		let path = dir.path().join("store.yaml");
		std::fs::write(&path, "busy_timeout_ms: 250")?;
		assert_eq!(StoreConfig::from_path(&path)?.busy_timeout_ms, 250);
		assert!(StoreConfig::from_path(&dir.path().join("missing.yaml")).is_err());
		Ok(())
	}

	#[test]
	fn init_connection_enables_foreign_keys() {
		let mut conn = Connection::open_in_memory().unwrap();
		StoreConfig::default().init_connection(&mut conn).unwrap();
		let enabled: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
		assert_eq!(enabled, 1);
	}

	#[test]
	fn switching_to_wal_waits_for_a_held_lock() -> Result<()> {
		let dir = assert_fs::TempDir::new()?;
		let path = dir.path().join("locked.fbtiles");
		let holder = Connection::open(&path)?;
		holder.execute_batch("CREATE TABLE t (v INTEGER); BEGIN EXCLUSIVE; INSERT INTO t VALUES (1);")?;
		let release = std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(200));
			holder.execute_batch("COMMIT").unwrap();
		});

		let config = StoreConfig::from_string("journal_mode: wal
busy_timeout_ms: 5000")?;
		let mut conn = Connection::open(&path)?;
		config.init_connection(&mut conn)?;
		release.join().unwrap();

		let mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
		assert_eq!(mode, "wal");
		Ok(())
	}
}
