//! Unit tests for settings module
//! In-memory streams only; file-backed behavior lives in tests/settings_store.rs.

#![allow(clippy::unwrap_used)]

use crate::{
    config::{LineEnding, SettingsFormat},
    convert::{Point, ValueKind},
    settings::{SettingsError, SettingsStore},
};

fn lf_format() -> SettingsFormat {
    SettingsFormat {
        line_ending: LineEnding::Lf,
        ..SettingsFormat::default()
    }
}

fn stored(store: &SettingsStore) -> String {
    let mut out = Vec::new();
    store.store(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn load_skips_comments_and_lines_without_separator() {
    let mut store = SettingsStore::with_format(lf_format());
    let text = "# header\n  name = value with spaces \nbroken line\n\nurl=http://x?a=b\n";

    store.load(text.as_bytes()).unwrap();

    assert_eq!(store.item_names(), vec!["name", "url"]);
    assert_eq!(store.get_raw("name"), Some(" value with spaces "));
    assert_eq!(store.get_raw("url"), Some("http://x?a=b"));
    assert!(!store.is_changed());
}

#[test]
fn store_writes_header_then_sorted_entries() {
    let mut store = SettingsStore::with_format(lf_format());
    store.set_raw("zeta", "1");
    store.set_raw("alpha", "2");
    store.set_comment("  first line \r\nsecond\rthird\nfourth");

    assert_eq!(
        stored(&store),
        "# first line\n# second\n# third\n# fourth\n# Encoding: UTF-8\n\nalpha=2\nzeta=1\n"
    );
}

#[test]
fn store_without_comment_has_no_header() {
    let mut store = SettingsStore::with_format(lf_format());
    store.set_raw("k", "v");
    store.set_comment("");

    assert_eq!(stored(&store), "k=v\n");
}

#[test]
fn custom_marker_separator_and_crlf() {
    let format = SettingsFormat {
        comment_marker: ";".to_string(),
        separator: ":".to_string(),
        line_ending: LineEnding::Crlf,
        ..SettingsFormat::default()
    };
    let mut store = SettingsStore::with_format(format);
    store.load("; note\r\nhost: example\r\nport:80\r\n".as_bytes()).unwrap();

    assert_eq!(store.get_raw("host"), Some(" example"));
    assert_eq!(store.get::<i64>("port", 0).unwrap(), 80);
    assert_eq!(stored(&store), "host: example\r\nport:80\r\n");
}

#[test]
fn typed_access_and_defaults() {
    let mut store = SettingsStore::new();
    store.set("window.origin", Point::new(10, 20)).unwrap();
    store.set_raw("empty", "");
    store.set_raw("bad", "ten");

    assert_eq!(store.get_raw("window.origin"), Some("10-20"));
    assert_eq!(
        store.get("window.origin", Point::default()).unwrap(),
        Point::new(10, 20)
    );
    assert_eq!(store.get("missing", 3_i64).unwrap(), 3);
    assert_eq!(store.get("empty", 4_i64).unwrap(), 4);
    assert_eq!(store.get("bad", 5_i64).unwrap(), 5);
}

#[test]
fn missing_converter_fails_even_for_missing_key() {
    let mut store = SettingsStore::new();
    store.converters_mut().remove(ValueKind::Real);

    let err = store.get("absent", 1.0_f64).err().unwrap();
    assert!(matches!(err, SettingsError::Convert(_)));
    assert!(store.set("x", 2.0_f64).is_err());
    assert!(!store.is_changed());
}

#[test]
fn change_flag_tracks_mutations() {
    let mut store = SettingsStore::new();
    assert!(!store.is_changed());

    store.set_raw("a", "1");
    assert!(store.is_changed());

    let mut fresh = SettingsStore::new();
    assert_eq!(fresh.remove("nothing"), None);
    assert!(!fresh.is_changed());

    fresh.set_comment("hello");
    assert!(fresh.is_changed());
    assert_eq!(fresh.comment(), Some("hello"));
}

#[test]
fn update_merges_or_replaces() {
    let mut target = SettingsStore::new();
    target.set_raw("keep", "1");
    target.set_raw("shared", "old");

    let mut source = SettingsStore::new();
    source.set_raw("shared", "new");
    source.set_raw("added", "2");

    target.update(&source, false);
    assert_eq!(target.item_names(), vec!["added", "keep", "shared"]);
    assert_eq!(target.get_raw("shared"), Some("new"));

    target.update(&source, true);
    assert_eq!(target.item_names(), vec!["added", "shared"]);
    assert!(target.is_changed());
}

#[test]
fn clear_and_entries() {
    let mut store = SettingsStore::new();
    store.set_raw("b", "2");
    store.set_raw("a", "1");

    let pairs: Vec<_> = store.entries().collect();
    assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    assert_eq!(store.item_count(), 2);
    assert!(store.contains("a"));

    store.clear();
    assert_eq!(store.item_count(), 0);
    assert!(!store.contains("a"));
}

#[test]
fn sync_without_backing_file_fails() {
    let mut store = SettingsStore::new();
    store.set_raw("a", "1");

    assert!(matches!(store.sync(), Err(SettingsError::NoBackingFile)));
    assert!(store.is_changed());
}
