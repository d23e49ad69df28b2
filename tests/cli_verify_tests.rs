//! End-to-end tests for `tailornova verify`.

mod fixtures;
use fixtures::*;

use sha2::{Digest, Sha256};
use tempfile::TempDir;

fn image(dir: &TempDir) -> std::path::PathBuf {
    write_file(dir.path(), "tiger.png", b"\x89PNG fake tiger")
}

#[test]
fn test_verify_unique_reports_progress() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&["verify", arg(&image), "--assume", "unique", "--json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json = stdout_json(&output);
    assert_eq!(json["file_name"], "tiger.png");
    let events = json["events"].as_array().unwrap();
    assert_eq!(events.len(), 11);
    assert_eq!(events[0]["event"], "progress");
    assert_eq!(events[0]["percent"], 10);
    assert_eq!(events[9]["percent"], 100);
    assert_eq!(events[10]["event"], "finished");
    assert_eq!(json["verdict"]["verdict"], "unique");
    assert!(json.get("submission").is_none());
}

#[test]
fn test_verify_duplicate_exits_with_validation_code() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&["verify", arg(&image), "--assume", "duplicate"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checking... 100%"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Duplicate design"), "stderr: {stderr}");
}

#[test]
fn test_verify_and_submit() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&[
        "verify",
        arg(&image),
        "--assume",
        "unique",
        "--title",
        "Tiger Stripes",
        "--price",
        "1499",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    let submission = &json["submission"];
    assert_eq!(submission["title"], "Tiger Stripes");
    assert_eq!(submission["price"], 1499);
    assert_eq!(submission["file_name"], "tiger.png");

    let expected = format!("{:x}", Sha256::digest(b"\x89PNG fake tiger"));
    assert_eq!(submission["design_hash"], expected.as_str());
}

#[test]
fn test_submit_uses_default_price() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&[
        "verify", arg(&image), "--assume", "unique", "--title", "Tiger", "--json",
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["submission"]["price"], 999);
}

#[test]
fn test_submit_rejects_blank_title() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&["verify", arg(&image), "--assume", "unique", "--title", "  "]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("a title is required"));
}

#[test]
fn test_submit_rejects_zero_price() {
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let output = run_isolated(&[
        "verify", arg(&image), "--assume", "unique", "--title", "Tiger", "--price", "0",
    ]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_verify_respects_progress_step() {
    let config_dir = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let set = isolated_command(&["config", "set", "--progress-step", "25"], config_dir.path())
        .output()
        .unwrap();
    assert_eq!(set.status.code(), Some(0));

    let output = isolated_command(
        &["verify", arg(&image), "--assume", "unique", "--json"],
        config_dir.path(),
    )
    .output()
    .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["events"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_verify_never_duplicate_with_zero_probability() {
    let config_dir = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let image = image(&dir);

    let set = isolated_command(
        &["config", "set", "--duplicate-probability", "0"],
        config_dir.path(),
    )
    .output()
    .unwrap();
    assert_eq!(set.status.code(), Some(0));

    for _ in 0..5 {
        let output = isolated_command(&["verify", arg(&image)], config_dir.path())
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0));
    }
}

#[test]
fn test_verify_missing_image_is_io_error() {
    let output = run_isolated(&["verify", "/nonexistent/tiger.png"]);
    assert_eq!(output.status.code(), Some(2));
}
