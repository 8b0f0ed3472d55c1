//! Command-line behavior that does not need a real font
//!
//! Runs the built binary with a scrubbed environment so no user or
//! system config leaks in.

use std::process::{Command, Output};

fn glyphfit(args: &[&str], font_dir: Option<&str>) -> Output {
    let scratch = std::env::temp_dir().join("glyphfit-cli-test-config");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glyphfit"));
    cmd.args(args)
        .env_remove("FONT_DIRECTORY")
        .env("GLYPHFIT_CONFIG", scratch.join("missing.toml"))
        .env("XDG_CONFIG_HOME", &scratch)
        .env("RUST_LOG", "off");
    if let Some(dir) = font_dir {
        cmd.env("FONT_DIRECTORY", dir);
    }
    cmd.output().expect("failed to run glyphfit")
}

#[test]
fn missing_font_directory_is_fatal() {
    let out = glyphfit(&["top", "0.5"], None);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("FONT_DIRECTORY"), "{}", stderr);
}

#[test]
fn missing_font_file_is_fatal() {
    let dir = std::env::temp_dir();
    let out = glyphfit(
        &["--font-file", "glyphfit-no-such-font.ttf", "demo"],
        dir.to_str(),
    );
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("glyphfit-no-such-font.ttf"), "{}", stderr);
}

#[test]
fn invalid_limit_rejected_before_loading_font() {
    let out = glyphfit(&["-n", "0", "top", "0.5"], None);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("limit"), "{}", stderr);
}

#[test]
fn bad_range_is_a_usage_error() {
    let out = glyphfit(&["--range", "0x100..0x10", "demo"], None);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn range_beyond_bmp_rejected_before_loading_font() {
    let out = glyphfit(&["--range", "0..0x110000", "top", "0.5"], None);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("exceeds"), "{}", stderr);
}

#[test]
fn negative_ratio_is_not_a_usage_error() {
    // Gets past argument parsing and fails on the missing font instead
    let out = glyphfit(&["top", "-0.5"], None);
    assert_ne!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("FONT_DIRECTORY"), "{}", stderr);
}

#[test]
fn help_lists_subcommands() {
    let out = glyphfit(&["--help"], None);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for sub in ["demo", "top", "right", "like", "show", "init-config"] {
        assert!(stdout.contains(sub), "missing {} in help", sub);
    }
}
