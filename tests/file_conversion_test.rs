//! Integration tests for file-to-file conversion

use std::fs;

use nextmd_converter::config::Config;
use nextmd_converter::error::ConversionError;
use nextmd_converter::files::convert_file;
use tempfile::tempdir;

#[test]
fn test_markdown_file_to_html() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.md");
    let output = dir.path().join("notes.html");
    fs::write(&input, "# Notes\n\n* one\n* two\n").unwrap();

    convert_file(&input, &output).expect("conversion succeeds");

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Notes</h1>"));
    assert!(html.contains("<li>one</li>"));
}

#[test]
fn test_markdown_file_with_bom() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bom.md");
    let output = dir.path().join("bom.html");
    fs::write(&input, b"\xEF\xBB\xBF# Title\n").unwrap();

    convert_file(&input, &output).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<h1>Title</h1>"));
    assert!(!html.contains('\u{feff}'));
}

#[test]
fn test_html_file_to_markdown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.HTM");
    let output = dir.path().join("page.markdown");
    fs::write(&input, "<h2>Page</h2><p>Body <b>text</b></p>").unwrap();

    convert_file(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "## Page\nBody **text**");
}

#[test]
fn test_html_file_with_declared_charset() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("legacy.html");
    let output = dir.path().join("legacy.md");
    fs::write(
        &input,
        b"<html><head><meta charset=\"iso-8859-1\"></head><body><p>caf\xE9</p></body></html>",
    )
    .unwrap();

    convert_file(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "caf\u{e9}");
}

#[test]
fn test_output_directory_is_created() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("a.md");
    let output = dir.path().join("out").join("nested").join("a.html");
    fs::write(&input, "text").unwrap();

    convert_file(&input, &output).unwrap();

    assert!(output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempdir().unwrap();
    let result = convert_file(&dir.path().join("absent.md"), &dir.path().join("absent.html"));

    match result {
        Err(ConversionError::InvalidInput(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_unsupported_pairing_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("a.txt");
    let output = dir.path().join("a.md");
    fs::write(&input, "plain").unwrap();

    let result = convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::InvalidInput(_))));
    assert!(!output.exists());
}

#[test]
fn test_undecodable_markdown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.md");
    let output = dir.path().join("bad.html");
    fs::write(&input, b"# \xFF\xFE").unwrap();

    match convert_file(&input, &output) {
        Err(ConversionError::EncodingError(msg)) => assert!(msg.contains("bad.md")),
        other => panic!("Expected EncodingError, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_empty_html_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.html");
    let output = dir.path().join("empty.md");
    fs::write(&input, "").unwrap();

    convert_file(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_config_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nextmd.toml");

    let mut config = Config::default();
    config.apply_overrides(Some("docs.local"), Some("8080"));
    config.save(&path).unwrap();

    assert_eq!(Config::load(&path), config);
}

#[test]
fn test_config_missing_or_malformed_file() {
    let dir = tempdir().unwrap();
    assert_eq!(Config::load(&dir.path().join("none.toml")), Config::default());

    let path = dir.path().join("broken.toml");
    fs::write(&path, "port = \"not a number").unwrap();
    assert_eq!(Config::load(&path), Config::default());
}
