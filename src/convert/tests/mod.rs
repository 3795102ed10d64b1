//! Unit tests for convert module
//! No filesystem or external dependencies.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use crate::convert::{
    Color, ConvertError, Converter, ConverterRegistry, Dimension, LocaleTag, Point, Value,
    ValueKind, converter_fn, decode_integer,
};

#[test]
fn decode_integer_notations() {
    assert_eq!(decode_integer("42"), Some(42));
    assert_eq!(decode_integer("-42"), Some(-42));
    assert_eq!(decode_integer("+7"), Some(7));
    assert_eq!(decode_integer("0x1F"), Some(31));
    assert_eq!(decode_integer("0X1f"), Some(31));
    assert_eq!(decode_integer("#FF"), Some(255));
    assert_eq!(decode_integer("010"), Some(8));
    assert_eq!(decode_integer("0"), Some(0));
    assert_eq!(decode_integer("-0x10"), Some(-16));
}

#[test]
fn decode_integer_rejects_malformed() {
    assert_eq!(decode_integer(""), None);
    assert_eq!(decode_integer("-"), None);
    assert_eq!(decode_integer("0x"), None);
    assert_eq!(decode_integer("08"), None);
    assert_eq!(decode_integer("12abc"), None);
    assert_eq!(decode_integer("--1"), None);
    assert_eq!(decode_integer(" 1"), None);
}

#[test]
fn builtins_cover_every_kind() {
    let registry = ConverterRegistry::with_builtins();

    assert_eq!(
        registry.kinds(),
        vec![
            ValueKind::Integer,
            ValueKind::Real,
            ValueKind::Boolean,
            ValueKind::Text,
            ValueKind::Date,
            ValueKind::Locale,
            ValueKind::Point,
            ValueKind::Dimension,
            ValueKind::Color,
        ]
    );
}

#[test]
fn lookup_miss_reports_kind() {
    let registry = ConverterRegistry::empty();

    let err = registry.lookup(ValueKind::Integer).err().unwrap();
    assert!(matches!(
        err,
        ConvertError::MissingConverter {
            kind: ValueKind::Integer
        }
    ));
    assert_eq!(err.to_string(), "no converter registered for integer values");
}

#[test]
fn decode_falls_back_to_default() {
    let registry = ConverterRegistry::default();

    assert_eq!(registry.decode("nope", 5_i64).unwrap(), 5);
    assert_eq!(registry.decode("1.5x", 2.5_f64).unwrap(), 2.5);
    assert_eq!(
        registry.decode("3-x", Point::new(1, 1)).unwrap(),
        Point::new(1, 1)
    );
    assert_eq!(
        registry.decode("800", Dimension::new(1, 2)).unwrap(),
        Dimension::new(1, 2)
    );
    assert_eq!(
        registry.decode("not a color", Color::rgb(1, 2, 3)).unwrap(),
        Color::rgb(1, 2, 3)
    );
}

#[test]
fn i32_out_of_range_uses_default() {
    let registry = ConverterRegistry::default();

    assert_eq!(registry.decode("4294967296", 9_i32).unwrap(), 9);
    assert_eq!(registry.decode("-12", 9_i32).unwrap(), -12);
}

#[test]
fn boolean_only_true_is_true() {
    let registry = ConverterRegistry::default();

    assert!(registry.decode("TRUE", false).unwrap());
    assert!(!registry.decode("yes", true).unwrap());
    assert!(!registry.decode("", true).unwrap());
}

#[test]
fn encodes_structured_values() {
    let registry = ConverterRegistry::default();

    assert_eq!(registry.encode(Point::new(10, 20)).unwrap(), "10-20");
    assert_eq!(registry.encode(Dimension::new(800, 600)).unwrap(), "800-600");
    assert_eq!(registry.encode(Color::rgb(255, 0, 16)).unwrap(), "#FF0010");
    assert_eq!(registry.encode(true).unwrap(), "true");
    assert_eq!(registry.encode(-3_i64).unwrap(), "-3");
}

#[test]
fn negative_pairs_round_trip() {
    let registry = ConverterRegistry::default();

    let encoded = registry.encode(Point::new(-4, -12)).unwrap();
    assert_eq!(encoded, "-4--12");
    assert_eq!(
        registry.decode(&encoded, Point::default()).unwrap(),
        Point::new(-4, -12)
    );
    assert_eq!(
        registry.decode("10-20", Dimension::default()).unwrap(),
        Dimension::new(10, 20)
    );
}

#[test]
fn color_decodes_hex_forms() {
    let registry = ConverterRegistry::default();
    let fallback = Color::default();

    assert_eq!(
        registry.decode("#FF0010", fallback).unwrap(),
        Color::rgb(255, 0, 16)
    );
    assert_eq!(
        registry.decode("0x00FF00", fallback).unwrap(),
        Color::rgb(0, 255, 0)
    );
    assert_eq!(
        registry.decode("255", fallback).unwrap(),
        Color::rgb(0, 0, 255)
    );
}

#[test]
fn date_uses_configured_pattern() {
    let registry = ConverterRegistry::with_date_format("%d/%m/%Y %H:%M");
    let date = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap();
    let fallback = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let encoded = registry.encode(date).unwrap();
    assert_eq!(encoded, "09/03/2024 14:05");
    assert_eq!(registry.decode(&encoded, fallback).unwrap(), date);
    assert_eq!(registry.decode("2024-03-09", fallback).unwrap(), fallback);
}

#[test]
fn locale_tags_are_normalized() {
    assert_eq!(LocaleTag::parse("en_us").unwrap().as_str(), "en-US");
    assert_eq!(LocaleTag::parse("zh-hans-cn").unwrap().as_str(), "zh-Hans-CN");
    assert_eq!(LocaleTag::parse("es-419").unwrap().as_str(), "es-419");
    assert_eq!(LocaleTag::parse("fr").unwrap().language(), "fr");
    assert!(LocaleTag::parse("").is_none());
    assert!(LocaleTag::parse("e").is_none());
    assert!(LocaleTag::parse("en--US").is_none());
}

#[test]
fn reregistration_overwrites() {
    let mut registry = ConverterRegistry::default();

    let yes_no = converter_fn(
        |value: &Value| match value {
            Value::Boolean(true) => "yes".to_string(),
            _ => "no".to_string(),
        },
        |raw: &str| match raw {
            "yes" => Some(Value::Boolean(true)),
            "no" => Some(Value::Boolean(false)),
            _ => None,
        },
    );

    let previous = registry.register(ValueKind::Boolean, yes_no);
    assert!(previous.is_some());

    assert_eq!(registry.encode(true).unwrap(), "yes");
    assert!(registry.decode("yes", false).unwrap());
    assert!(registry.decode("maybe", true).unwrap());
}

#[test]
fn wrong_kind_from_codec_yields_default() {
    let mut registry = ConverterRegistry::default();
    registry.register(
        ValueKind::Integer,
        converter_fn(|v: &Value| v.to_string(), |_raw: &str| Some(Value::Boolean(true))),
    );

    assert_eq!(registry.decode("12", 3_i64).unwrap(), 3);
}

#[test]
fn removed_kind_fails_fast() {
    let mut registry = ConverterRegistry::default();
    registry.remove(ValueKind::Color);

    assert!(!registry.contains(ValueKind::Color));
    assert!(registry.encode(Color::default()).is_err());
}

#[test]
fn converter_encode_of_mismatched_variant_falls_back_to_display() {
    let registry = ConverterRegistry::default();
    let converter = registry.lookup(ValueKind::Date).unwrap();

    assert_eq!(converter.encode(&Value::Integer(4)), "4");
}
