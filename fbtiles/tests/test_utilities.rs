#![allow(unused)]

use assert_cmd::{Command, cargo};
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "fbtiles.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "fbtiles";

/// Helper to create a Command for the fbtiles binary.
pub fn fbtiles_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// Helper to get a temp directory with a tile file of the given name in it.
pub fn temp_tile(filename: &str, content: &[u8]) -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join(filename);
	std::fs::write(&path, content).expect("failed to write tile");
	(dir, path)
}

/// Add `tile` to `store` at `z/x/y` and expect success.
pub fn add_tile(store: &Path, tile: &Path, x: u32, y: u32, z: u32, collared: bool) {
	let mut cmd = fbtiles_cmd();
	cmd.args(["add", path_str(store), path_str(tile)]);
	cmd.args(["-x", &x.to_string(), "-y", &y.to_string(), "-z", &z.to_string()]);
	if collared {
		cmd.arg("--collared");
	}
	cmd.assert().success();
}

pub fn path_str(path: &Path) -> &str {
	path.to_str().unwrap()
}
