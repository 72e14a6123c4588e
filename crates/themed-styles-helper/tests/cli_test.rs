use std::fs;
use std::process::Command;

use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/AdminScreen.tsx";
const EXPECTED: &str = "tests/fixtures/AdminScreen.expected.tsx";

#[test]
fn test_verbose_convert_keeps_stdout_clean() {
    let dir = TempDir::new().unwrap();
    let screen = dir.path().join("AdminScreen.tsx");
    fs::copy(FIXTURE, &screen).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_themed-styles-helper"))
        .arg("convert")
        .arg(&screen)
        .arg("-v")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Expected command to succeed");

    // Both rules ran, and only the rewritten file reached stdout
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = fs::read_to_string(EXPECTED)
        .unwrap()
        .replace("style={styles.", "style={themedStyles.");
    assert_eq!(stdout, expected);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing:"));
    assert!(stderr.contains("Component starts at line: 7"));
    assert!(stderr.contains("Fixed themed-styles"));

    assert_eq!(
        fs::read_to_string(&screen).unwrap(),
        fs::read_to_string(FIXTURE).unwrap(),
        "stdout mode must not touch the input"
    );
}

#[test]
fn test_in_place_convert_reports_on_stdout() {
    let dir = TempDir::new().unwrap();
    let screen = dir.path().join("AdminScreen.tsx");
    fs::copy(FIXTURE, &screen).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_themed-styles-helper"))
        .arg("convert")
        .arg(&screen)
        .arg("--in-place")
        .arg("-r")
        .arg("themed-styles")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Expected command to succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fixed themed-styles"));
    assert_eq!(
        fs::read_to_string(&screen).unwrap(),
        fs::read_to_string(EXPECTED).unwrap()
    );
}
