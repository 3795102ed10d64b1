use tracing::debug;

use super::{CliError, Context, OptionMatch};
use crate::convert::Convertible;

/// Work done as soon as its option is reached during dispatch.
///
/// Initializers usually decode the option value into the [`Context`] or
/// adjust application state before any command runs.
pub trait Initializer {
    /// Handles one matched option.
    ///
    /// # Errors
    ///
    /// Any error aborts dispatch; no queued command runs.
    fn perform(&self, ctx: &mut Context, matched: &OptionMatch) -> Result<(), CliError>;
}

impl<F> Initializer for F
where
    F: Fn(&mut Context, &OptionMatch) -> Result<(), CliError>,
{
    fn perform(&self, ctx: &mut Context, matched: &OptionMatch) -> Result<(), CliError> {
        self(ctx, matched)
    }
}

/// Work queued during dispatch and run once every initializer is done.
pub trait Command {
    /// Runs the command and returns its exit status.
    ///
    /// `matched` is `None` when the command runs as the default command.
    fn execute(&self, ctx: &mut Context, matched: Option<&OptionMatch>) -> i32;
}

impl<F> Command for F
where
    F: Fn(&mut Context, Option<&OptionMatch>) -> i32,
{
    fn execute(&self, ctx: &mut Context, matched: Option<&OptionMatch>) -> i32 {
        self(ctx, matched)
    }
}

/// What an option does when it appears on the command line.
pub enum Action {
    /// Run immediately, in argument order.
    Initializer(Box<dyn Initializer>),

    /// Queue and run after all initializers.
    Command(Box<dyn Command>),
}

impl Action {
    /// Wraps an [`Initializer`].
    pub fn initializer(initializer: impl Initializer + 'static) -> Self {
        Action::Initializer(Box::new(initializer))
    }

    /// Wraps a [`Command`].
    pub fn command(command: impl Command + 'static) -> Self {
        Action::Command(Box::new(command))
    }

    /// Initializer from a closure.
    pub fn init_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Context, &OptionMatch) -> Result<(), CliError> + 'static,
    {
        Action::Initializer(Box::new(f))
    }

    /// Command from a closure.
    pub fn command_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Context, Option<&OptionMatch>) -> i32 + 'static,
    {
        Action::Command(Box::new(f))
    }
}

type Parser<T> = Box<dyn Fn(&str) -> Result<T, String>>;
type Validator<T> = Box<dyn Fn(&T) -> bool>;

/// Initializer that decodes the option value and stores it in the context.
///
/// The value is stored under the option id unless another key is set with
/// [`with_key`](Self::with_key). A decode failure is reported as
/// `CliError::InvalidValue`, a validator rejection as `CliError::Validation`;
/// in both cases the context is left untouched.
pub struct FetchValue<T> {
    parse: Parser<T>,
    validator: Option<Validator<T>>,
    key: Option<String>,
}

impl<T: Convertible + 'static> FetchValue<T> {
    /// Creates a fetcher using `parse` to decode the raw value.
    pub fn new(parse: impl Fn(&str) -> Result<T, String> + 'static) -> Self {
        Self {
            parse: Box::new(parse),
            validator: None,
            key: None,
        }
    }

    /// Rejects decoded values for which `validator` returns false.
    pub fn with_validator(mut self, validator: impl Fn(&T) -> bool + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Stores the value under `key` instead of the option id.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl FetchValue<i64> {
    /// Decimal integer values.
    pub fn integer() -> Self {
        Self::new(|raw| raw.trim().parse::<i64>().map_err(|e| e.to_string()))
    }
}

impl FetchValue<f64> {
    /// Floating point values.
    pub fn real() -> Self {
        Self::new(|raw| raw.trim().parse::<f64>().map_err(|e| e.to_string()))
    }
}

impl FetchValue<String> {
    /// Text values, taken verbatim.
    pub fn text() -> Self {
        Self::new(|raw| Ok(raw.to_string()))
    }
}

impl<T: Convertible> Initializer for FetchValue<T> {
    fn perform(&self, ctx: &mut Context, matched: &OptionMatch) -> Result<(), CliError> {
        let raw = matched.value().ok_or_else(|| CliError::MissingValue {
            option: matched.id.clone(),
        })?;

        let value = (self.parse)(raw).map_err(|reason| CliError::InvalidValue {
            option: matched.id.clone(),
            value: raw.to_string(),
            reason,
        })?;

        if self.validator.as_ref().is_some_and(|accept| !accept(&value)) {
            return Err(CliError::Validation {
                option: matched.id.clone(),
                value: raw.to_string(),
            });
        }

        let key = self.key.as_deref().unwrap_or(&matched.id);
        debug!(key, raw, "Fetched option value");
        ctx.insert(key, value);
        Ok(())
    }
}
