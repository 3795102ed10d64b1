use chrono::NaiveDateTime;

use super::{Color, Dimension, LocaleTag, Point, Value};

/// Default pattern used by [`DateConverter`].
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Bidirectional codec between a raw string and a typed [`Value`].
///
/// Implementations must never fail: `encode` always produces text and
/// `decode` falls back to `default` when the raw text is malformed.
pub trait Converter {
    /// Encodes a value to its persisted text form.
    fn encode(&self, value: &Value) -> String;

    /// Decodes `raw`, returning `default` if it cannot be parsed.
    fn decode(&self, raw: &str, default: Value) -> Value;
}

/// Converter assembled from a pair of closures.
///
/// The decode closure returns `None` for malformed input, in which case the
/// caller's default is used.
pub struct FnConverter<E, D> {
    encode: E,
    decode: D,
}

/// Builds a [`FnConverter`] from an encode and a decode closure.
pub fn converter_fn<E, D>(encode: E, decode: D) -> FnConverter<E, D>
where
    E: Fn(&Value) -> String,
    D: Fn(&str) -> Option<Value>,
{
    FnConverter { encode, decode }
}

impl<E, D> Converter for FnConverter<E, D>
where
    E: Fn(&Value) -> String,
    D: Fn(&str) -> Option<Value>,
{
    fn encode(&self, value: &Value) -> String {
        (self.encode)(value)
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        (self.decode)(raw).unwrap_or(default)
    }
}

/// Decodes an integer literal with optional sign.
///
/// Accepts decimal, hexadecimal (`0x`, `0X` or `#` prefix) and octal
/// (leading `0`) notations.
pub fn decode_integer(raw: &str) -> Option<i64> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .or_else(|| body.strip_prefix('#'))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return None;
    }

    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

/// Splits `a-b` where either side may carry its own sign, e.g. `-4--12`.
fn decode_pair(raw: &str) -> Option<(i32, i32)> {
    let raw = raw.trim();
    let (split, _) = raw.char_indices().skip(1).find(|&(_, c)| c == '-')?;
    let first = raw[..split].trim();
    let second = raw[split + 1..].trim();

    let first = i32::try_from(decode_integer(first)?).ok()?;
    let second = i32::try_from(decode_integer(second)?).ok()?;
    Some((first, second))
}

/// Integer codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerConverter;

impl Converter for IntegerConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        decode_integer(raw).map(Value::Integer).unwrap_or(default)
    }
}

/// Floating point codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealConverter;

impl Converter for RealConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        raw.trim()
            .parse::<f64>()
            .map(Value::Real)
            .unwrap_or(default)
    }
}

/// Boolean codec. Only `true` (any case) decodes to true.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, _default: Value) -> Value {
        Value::Boolean(raw.eq_ignore_ascii_case("true"))
    }
}

/// Identity codec for plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextConverter;

impl Converter for TextConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, _default: Value) -> Value {
        Value::Text(raw.to_string())
    }
}

/// Date/time codec using a `chrono` format pattern.
#[derive(Debug, Clone)]
pub struct DateConverter {
    pattern: String,
}

impl DateConverter {
    /// Creates a converter for the given `strftime`-style pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The pattern used for both directions.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for DateConverter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl Converter for DateConverter {
    fn encode(&self, value: &Value) -> String {
        match value {
            Value::Date(date) => date.format(&self.pattern).to_string(),
            other => other.to_string(),
        }
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        NaiveDateTime::parse_from_str(raw.trim(), &self.pattern)
            .map(Value::Date)
            .unwrap_or(default)
    }
}

/// Locale tag codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocaleConverter;

impl Converter for LocaleConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        LocaleTag::parse(raw).map(Value::Locale).unwrap_or(default)
    }
}

/// Point codec, `x-y`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointConverter;

impl Converter for PointConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        decode_pair(raw)
            .map(|(x, y)| Value::Point(Point::new(x, y)))
            .unwrap_or(default)
    }
}

/// Dimension codec, `width-height`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DimensionConverter;

impl Converter for DimensionConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        decode_pair(raw)
            .map(|(width, height)| Value::Dimension(Dimension::new(width, height)))
            .unwrap_or(default)
    }
}

/// Color codec, `#RRGGBB` (also accepts `0x` and decimal forms).
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorConverter;

impl Converter for ColorConverter {
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str, default: Value) -> Value {
        decode_integer(raw.trim())
            .and_then(|packed| u32::try_from(packed & 0xFF_FFFF).ok())
            .map(|packed| Value::Color(Color::from_packed(packed)))
            .unwrap_or(default)
    }
}
