use std::{fmt, sync::OnceLock};

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Discriminator identifying the kind of a typed value.
///
/// The converter registry is keyed by this tag rather than by the Rust type,
/// so several Rust types (for example `i32` and `i64`) share one codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Signed integer.
    Integer,
    /// Floating point number.
    Real,
    /// Boolean flag.
    Boolean,
    /// Plain text.
    Text,
    /// Date and time without timezone.
    Date,
    /// BCP 47 style locale tag.
    Locale,
    /// Integer 2D position.
    Point,
    /// Integer 2D extent.
    Dimension,
    /// Opaque RGB color.
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Real => write!(f, "real"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Date => write!(f, "date"),
            ValueKind::Locale => write!(f, "locale"),
            ValueKind::Point => write!(f, "point"),
            ValueKind::Dimension => write!(f, "dimension"),
            ValueKind::Color => write!(f, "color"),
        }
    }
}

/// A decoded value of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Real(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Plain text.
    Text(String),
    /// Date and time without timezone.
    Date(NaiveDateTime),
    /// Locale tag.
    Locale(LocaleTag),
    /// 2D position.
    Point(Point),
    /// 2D extent.
    Dimension(Dimension),
    /// RGB color.
    Color(Color),
}

impl Value {
    /// Returns the discriminator of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Text(_) => ValueKind::Text,
            Value::Date(_) => ValueKind::Date,
            Value::Locale(_) => ValueKind::Locale,
            Value::Point(_) => ValueKind::Point,
            Value::Dimension(_) => ValueKind::Dimension,
            Value::Color(_) => ValueKind::Color,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Locale(tag) => write!(f, "{tag}"),
            Value::Point(p) => write!(f, "{p}"),
            Value::Dimension(d) => write!(f, "{d}"),
            Value::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Integer position, encoded as `x-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Integer extent, encoded as `width-height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Dimension {
    /// Creates a dimension.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.width, self.height)
    }
}

/// Opaque RGB color, encoded as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Creates a color from its channels.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from a packed `0xRRGGBB` value; higher bits are ignored.
    pub fn from_packed(packed: u32) -> Self {
        let [_, red, green, blue] = packed.to_be_bytes();
        Self { red, green, blue }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Locale identifier such as `en-US` or `zh-Hans-CN`.
///
/// Underscores are accepted as subtag separators and normalized to `-`.
/// Case is normalized per subtag: language lowercase, script titlecase,
/// region uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag(String);

fn locale_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").ok())
        .as_ref()
}

impl LocaleTag {
    /// Parses a locale tag, returning `None` when it is not well formed.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().replace('_', "-");
        if !locale_pattern()?.is_match(&tag) {
            return None;
        }

        let normalized = tag
            .split('-')
            .enumerate()
            .map(|(i, subtag)| normalize_subtag(i, subtag))
            .collect::<Vec<_>>()
            .join("-");

        Some(Self(normalized))
    }

    /// Primary language subtag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// The full normalized tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize_subtag(position: usize, subtag: &str) -> String {
    if position == 0 {
        return subtag.to_ascii_lowercase();
    }

    let is_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
    let is_digit = subtag.chars().all(|c| c.is_ascii_digit());

    match subtag.len() {
        2 if is_alpha => subtag.to_ascii_uppercase(),
        3 if is_digit => subtag.to_string(),
        4 if is_alpha => {
            let lower = subtag.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => lower,
            }
        }
        _ => subtag.to_ascii_lowercase(),
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rust types that have a typed view through a [`ValueKind`] codec.
pub trait Convertible: Sized {
    /// Kind of codec used to store this type.
    const KIND: ValueKind;

    /// Wraps the value into its tagged form.
    fn into_value(self) -> Value;

    /// Extracts the value back, or `None` if the variant or range does not fit.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! convertible {
    ($ty:ty, $kind:ident) => {
        impl Convertible for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

convertible!(i64, Integer);
convertible!(f64, Real);
convertible!(bool, Boolean);
convertible!(String, Text);
convertible!(NaiveDateTime, Date);
convertible!(LocaleTag, Locale);
convertible!(Point, Point);
convertible!(Dimension, Dimension);
convertible!(Color, Color);

impl Convertible for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }
}
