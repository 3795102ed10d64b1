use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, error::ErrorKind, parser::ValueSource};
use tracing::{debug, instrument};

use super::{Action, CliError, Command, Context, OptionMatch, ParsedInvocation};

/// Argument id collecting positional inputs.
pub const INPUTS_ID: &str = "INPUTS";

const RESERVED_IDS: [&str; 3] = [INPUTS_ID, "help", "version"];
const RESERVED_SHORTS: [char; 2] = ['h', 'V'];

type ErrorHook = Box<dyn Fn(&clap::Error)>;
type ParsedCheck = Box<dyn Fn(&Context) -> bool>;

struct Binding {
    id: String,
    short: Option<char>,
    long: Option<String>,
    takes_values: bool,
    action: Action,
}

/// Aggregate status of a dispatch plus the positional inputs it saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Exit status to report.
    pub status: i32,

    /// Positional arguments not consumed by any option.
    pub inputs: Vec<String>,
}

/// Declares options, parses arguments with `clap` and dispatches the
/// matched options to their actions.
///
/// Dispatch order is the order in which options first appear among the
/// arguments; options given at the same position keep declaration order.
/// Options that only carry a default value are never dispatched.
pub struct OptionDispatcher {
    command: clap::Command,
    bindings: Vec<Binding>,
    default_command: Option<Box<dyn Command>>,
    error_hook: ErrorHook,
    parsed_check: Option<ParsedCheck>,
}

impl OptionDispatcher {
    /// Creates a dispatcher for a program called `name`.
    ///
    /// A `--version` flag is available when `version` is given.
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        let mut command = clap::Command::new(name.into()).arg(
            Arg::new(INPUTS_ID)
                .num_args(1..)
                .action(ArgAction::Append)
                .value_name("INPUTS"),
        );
        if let Some(version) = version {
            command = command.version(version.to_string());
        }

        Self {
            command,
            bindings: Vec::new(),
            default_command: None,
            error_hook: Box::new(|err: &clap::Error| eprint!("{err}")),
            parsed_check: None,
        }
    }

    /// Sets the one-line description shown in help.
    pub fn about(&mut self, about: impl Into<String>) -> &mut Self {
        self.command = self.command.clone().about(about.into());
        self
    }

    /// Declares an option and the action it triggers.
    ///
    /// # Errors
    ///
    /// Returns `CliError::UnflaggedOption` if `arg` has neither a short nor a
    /// long flag, and `CliError::DuplicateOption` if the id, short flag or
    /// long flag is already taken.
    pub fn add_option(&mut self, arg: Arg, action: Action) -> Result<&mut Self, CliError> {
        let id = arg.get_id().as_str().to_string();
        let short = arg.get_short();
        let long = arg.get_long().map(str::to_string);

        if short.is_none() && long.is_none() {
            return Err(CliError::UnflaggedOption(id));
        }
        if RESERVED_IDS.contains(&id.as_str()) || self.bindings.iter().any(|b| b.id == id) {
            return Err(CliError::DuplicateOption(id));
        }
        if let Some(short) = short.filter(|s| {
            RESERVED_SHORTS.contains(s) || self.bindings.iter().any(|b| b.short == Some(*s))
        }) {
            return Err(CliError::DuplicateOption(format!("-{short}")));
        }
        if let Some(long) = long.as_deref().filter(|l| {
            RESERVED_IDS.contains(l) || self.bindings.iter().any(|b| b.long.as_deref() == Some(*l))
        }) {
            return Err(CliError::DuplicateOption(format!("--{long}")));
        }

        let takes_values = arg.get_action().takes_values();
        debug!(id = %id, takes_values, "Declaring option");

        self.command = self.command.clone().arg(arg);
        self.bindings.push(Binding {
            id,
            short,
            long,
            takes_values,
            action,
        });
        Ok(self)
    }

    /// Command run when no queued command was triggered.
    pub fn set_default_command(&mut self, command: impl Command + 'static) -> &mut Self {
        self.default_command = Some(Box::new(command));
        self
    }

    /// Replaces the hook run on malformed command lines.
    ///
    /// The default hook prints clap's report to stderr.
    pub fn set_error_hook(&mut self, hook: impl Fn(&clap::Error) + 'static) -> &mut Self {
        self.error_hook = Box::new(hook);
        self
    }

    /// Check run after all initializers and before any command.
    ///
    /// Returning false aborts dispatch with `CliError::Rejected`.
    pub fn set_parsed_check(&mut self, check: impl Fn(&Context) -> bool + 'static) -> &mut Self {
        self.parsed_check = Some(Box::new(check));
        self
    }

    /// Ids of declared options in declaration order.
    pub fn option_ids(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.id.as_str()).collect()
    }

    /// Parses `args`, which exclude the program name.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Informational` for `--help` and `--version`, and
    /// `CliError::Parse` for malformed input after running the error hook.
    pub fn parse<I, T>(&mut self, args: I) -> Result<ParsedInvocation, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let program = OsString::from(self.command.get_name());
        let argv = std::iter::once(program).chain(args.into_iter().map(Into::into));

        let matches = match self.command.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(err) => {
                return Err(match err.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        CliError::Informational(err.to_string())
                    }
                    _ => {
                        (self.error_hook)(&err);
                        CliError::Parse(err)
                    }
                });
            }
        };

        Ok(self.collect(&matches))
    }

    fn collect(&self, matches: &ArgMatches) -> ParsedInvocation {
        let mut matched: Vec<OptionMatch> = self
            .bindings
            .iter()
            .filter(|b| matches.value_source(&b.id) == Some(ValueSource::CommandLine))
            .map(|b| OptionMatch {
                id: b.id.clone(),
                values: if b.takes_values {
                    raw_values(matches, &b.id)
                } else {
                    Vec::new()
                },
                index: matches.index_of(&b.id).unwrap_or(usize::MAX),
            })
            .collect();

        matched.sort_by_key(|m| m.index);

        ParsedInvocation {
            matched,
            inputs: raw_values(matches, INPUTS_ID),
        }
    }

    /// Runs the actions for `invocation` and returns the aggregate status.
    ///
    /// Initializers run in order as they are reached and commands are queued.
    /// Then the post-parse check runs. Queued commands run in order and their
    /// statuses fold with `min`, starting from 0, so only failures lower it.
    /// With an empty queue the default command decides, or the status is 0.
    ///
    /// # Errors
    ///
    /// Returns the first initializer error, or `CliError::Rejected` when the
    /// post-parse check fails. No command runs in either case.
    #[instrument(skip_all, fields(options = invocation.matched.len()))]
    pub fn dispatch(
        &self,
        invocation: &ParsedInvocation,
        ctx: &mut Context,
    ) -> Result<i32, CliError> {
        ctx.set_inputs(invocation.inputs.clone());

        let mut queue = Vec::new();
        for matched in &invocation.matched {
            let Some(binding) = self.bindings.iter().find(|b| b.id == matched.id) else {
                continue;
            };
            match &binding.action {
                Action::Initializer(initializer) => initializer.perform(ctx, matched)?,
                Action::Command(command) => queue.push((command, matched)),
            }
        }

        if self.parsed_check.as_ref().is_some_and(|check| !check(ctx)) {
            return Err(CliError::Rejected);
        }

        if queue.is_empty() {
            return Ok(self
                .default_command
                .as_ref()
                .map_or(0, |command| command.execute(ctx, None)));
        }

        let mut status = 0;
        for (command, matched) in queue {
            status = status.min(command.execute(ctx, Some(matched)));
        }
        debug!(status, "Commands finished");
        Ok(status)
    }

    /// Parses `args` and dispatches them.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse) and [`dispatch`](Self::dispatch).
    pub fn run<I, T>(&mut self, args: I, ctx: &mut Context) -> Result<DispatchOutcome, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let invocation = self.parse(args)?;
        let status = self.dispatch(&invocation, ctx)?;
        Ok(DispatchOutcome {
            status,
            inputs: invocation.inputs,
        })
    }
}

fn raw_values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .try_get_raw(id)
        .ok()
        .flatten()
        .map(|values| {
            values
                .map(|value| value.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
