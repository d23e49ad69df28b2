//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the tailornova binary under test.
pub fn tailornova_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tailornova")
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share config between them.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(tailornova_bin());
    cmd.env("TAILORNOVA_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs `args` against a fresh, empty config directory.
pub fn run_isolated(args: &[&str]) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    isolated_command(args, config_dir.path())
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as a single JSON document.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Minimal catalog in JSON: one garment, two fabrics, one pattern.
pub const SMALL_CATALOG_JSON: &str = r##"{
  "garments": [
    { "id": "apron", "name": "Apron", "base_price": 500, "regions": ["front", "pocket"] }
  ],
  "fabrics": [
    { "id": "canvas", "name": "Canvas", "unit_price": 150 },
    { "id": "hemp", "name": "Hemp", "unit_price": 220 }
  ],
  "patterns": [
    { "id": "gingham", "name": "Gingham", "surcharge": 30 }
  ],
  "colors": [
    { "name": "Mustard", "hex": "#E1AD01" }
  ]
}"##;

/// The same catalog as [`SMALL_CATALOG_JSON`], in TOML.
pub const SMALL_CATALOG_TOML: &str = r##"
[[garments]]
id = "apron"
name = "Apron"
base_price = 500
regions = ["front", "pocket"]

[[fabrics]]
id = "canvas"
name = "Canvas"
unit_price = 150

[[fabrics]]
id = "hemp"
name = "Hemp"
unit_price = 220

[[patterns]]
id = "gingham"
name = "Gingham"
surcharge = 30

[[colors]]
name = "Mustard"
hex = "#E1AD01"
"##;

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Path as a `&str` for command arguments.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("Temp paths are UTF-8")
}
