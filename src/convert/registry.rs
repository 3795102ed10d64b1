use std::collections::HashMap;

use tracing::debug;

use super::{
    BooleanConverter, ColorConverter, ConvertError, Converter, Convertible, DateConverter,
    DimensionConverter, IntegerConverter, LocaleConverter, PointConverter, RealConverter,
    TextConverter, ValueKind,
};

/// Registry mapping each [`ValueKind`] to exactly one [`Converter`].
///
/// A registry built with [`ConverterRegistry::with_builtins`] (also the
/// `Default`) has a codec for every kind. Registering a kind again replaces
/// the previous codec.
pub struct ConverterRegistry {
    converters: HashMap<ValueKind, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Creates a registry without any converters.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in converter registered.
    pub fn with_builtins() -> Self {
        Self::with_date_format(super::DEFAULT_DATE_FORMAT)
    }

    /// Same as [`with_builtins`](Self::with_builtins) with a custom date pattern.
    pub fn with_date_format(pattern: &str) -> Self {
        let mut registry = Self::empty();
        registry.register(ValueKind::Integer, IntegerConverter);
        registry.register(ValueKind::Real, RealConverter);
        registry.register(ValueKind::Boolean, BooleanConverter);
        registry.register(ValueKind::Text, TextConverter);
        registry.register(ValueKind::Date, DateConverter::new(pattern));
        registry.register(ValueKind::Locale, LocaleConverter);
        registry.register(ValueKind::Point, PointConverter);
        registry.register(ValueKind::Dimension, DimensionConverter);
        registry.register(ValueKind::Color, ColorConverter);
        registry
    }

    /// Registers `converter` for `kind`, returning the codec it replaced.
    pub fn register(
        &mut self,
        kind: ValueKind,
        converter: impl Converter + 'static,
    ) -> Option<Box<dyn Converter>> {
        debug!(%kind, "Registering converter");
        self.converters.insert(kind, Box::new(converter))
    }

    /// Removes the codec for `kind`.
    pub fn remove(&mut self, kind: ValueKind) -> Option<Box<dyn Converter>> {
        self.converters.remove(&kind)
    }

    /// Looks up the codec for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::MissingConverter` if no codec is registered.
    pub fn lookup(&self, kind: ValueKind) -> Result<&dyn Converter, ConvertError> {
        self.converters
            .get(&kind)
            .map(|converter| converter.as_ref())
            .ok_or(ConvertError::MissingConverter { kind })
    }

    /// Whether a codec is registered for `kind`.
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.converters.contains_key(&kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> Vec<ValueKind> {
        let mut kinds: Vec<ValueKind> = self.converters.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Encodes a typed value with the codec for `T::KIND`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::MissingConverter` if no codec is registered.
    pub fn encode<T: Convertible>(&self, value: T) -> Result<String, ConvertError> {
        let converter = self.lookup(T::KIND)?;
        Ok(converter.encode(&value.into_value()))
    }

    /// Decodes `raw` into `T`, falling back to `default` on malformed input.
    ///
    /// A codec that answers with a value of the wrong kind also yields
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::MissingConverter` if no codec is registered.
    pub fn decode<T: Convertible + Clone>(&self, raw: &str, default: T) -> Result<T, ConvertError> {
        let converter = self.lookup(T::KIND)?;
        let decoded = converter.decode(raw, default.clone().into_value());
        Ok(T::from_value(decoded).unwrap_or(default))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
