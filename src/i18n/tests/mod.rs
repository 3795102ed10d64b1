//! Unit tests for i18n module

#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;

use crate::i18n::{Catalog, I18nError, Translator, format_message};

#[test]
fn format_replaces_indexed_placeholders() {
    let name = "settings.pref";
    let count = 3;

    assert_eq!(
        format_message("{1} entries in {0}", &[&name, &count]),
        "3 entries in settings.pref"
    );
    assert_eq!(format_message("{0}{0}", &[&"ab"]), "abab");
    assert_eq!(format_message("keep {2} and {x}", &[&1]), "keep {2} and {x}");
}

#[test]
fn catalog_parse_skips_comments_and_empty_keys() {
    let catalog = Catalog::parse("# title\ngreeting = Hello, {0}!\n=orphan\nno separator\n");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.text("greeting").unwrap(), " Hello, {0}!");
}

#[test]
fn translator_lookup_and_defaults() {
    let mut catalog = Catalog::new();
    catalog.insert("app.error", "Error in {0}: {1}");

    assert_eq!(
        catalog.text_with("app.error", &[&"load", &"denied"]).unwrap(),
        "Error in load: denied"
    );
    assert!(matches!(
        catalog.text("absent"),
        Err(I18nError::MissingText { key }) if key == "absent"
    ));
    assert_eq!(catalog.optional_text("absent", "fallback"), "fallback");
    assert_eq!(
        catalog.optional_text_with("absent", "{0} items", &[&4]),
        "4 items"
    );
}

#[test]
fn load_reads_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("messages_fr.properties");
    fs::write(&path, "# French\nhello=Bonjour {0}\n").unwrap();

    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.text_with("hello", &[&"Ana"]).unwrap(), "Bonjour Ana");
}

#[test]
fn load_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let err = Catalog::load(&dir.path().join("absent.properties")).err().unwrap();
    assert!(matches!(err, I18nError::Load { .. }));
}
