//! String/value converters and their registry.
//!
//! Settings are always stored as raw strings. Typed access goes through a
//! [`Converter`] looked up by an explicit [`ValueKind`] discriminator in a
//! [`ConverterRegistry`].

mod converters;
mod registry;
mod value;

#[cfg(test)]
mod tests;

pub use converters::{
    BooleanConverter, ColorConverter, Converter, DEFAULT_DATE_FORMAT, DateConverter,
    DimensionConverter, FnConverter, IntegerConverter, LocaleConverter, PointConverter,
    RealConverter, TextConverter, converter_fn, decode_integer,
};
pub use registry::ConverterRegistry;
pub use value::{Color, Convertible, Dimension, LocaleTag, Point, Value, ValueKind};

/// Errors raised by converter lookup.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No codec is registered for the requested kind.
    #[error("no converter registered for {kind} values")]
    MissingConverter {
        /// The kind that was looked up
        kind: ValueKind,
    },
}
