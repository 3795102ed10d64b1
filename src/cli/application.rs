use clap::Arg;
use tracing::info;

use super::{Action, CliError, Command, Context, OptionDispatcher};
use crate::app::Application;

/// Command-line application: an [`Application`] driven by an
/// [`OptionDispatcher`] over its own arguments.
pub struct CliApplication {
    app: Application,
    dispatcher: OptionDispatcher,
    context: Context,
}

impl CliApplication {
    /// Wraps `app`, naming the dispatcher after it.
    pub fn new(app: Application) -> Self {
        let dispatcher = OptionDispatcher::new(app.name(), app.version());
        Self {
            app,
            dispatcher,
            context: Context::new(),
        }
    }

    /// The wrapped application.
    pub fn app(&self) -> &Application {
        &self.app
    }

    /// Mutable access to the wrapped application.
    pub fn app_mut(&mut self) -> &mut Application {
        &mut self.app
    }

    /// Dispatcher used to declare options.
    pub fn dispatcher_mut(&mut self) -> &mut OptionDispatcher {
        &mut self.dispatcher
    }

    /// Declares an option.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DuplicateOption` if the option clashes with one
    /// already declared.
    pub fn add_option(&mut self, arg: Arg, action: Action) -> Result<&mut Self, CliError> {
        self.dispatcher.add_option(arg, action)?;
        Ok(self)
    }

    /// Sets the command run when no option command is triggered.
    pub fn set_default_command(&mut self, command: impl Command + 'static) -> &mut Self {
        self.dispatcher.set_default_command(command);
        self
    }

    /// Values collected by the last run.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Parses the application arguments, dispatches them and exits the
    /// application with the resulting status.
    ///
    /// Help and version text is printed to stdout with status 0. Malformed
    /// command lines were already reported by the error hook. Every other
    /// failure is reported through [`Application::report_error`]. Cleanups
    /// run in all cases.
    pub fn run(&mut self) -> i32 {
        let arguments = self.app.arguments().to_vec();

        let status = match self.dispatcher.run(arguments, &mut self.context) {
            Ok(outcome) => outcome.status,
            Err(CliError::Informational(text)) => {
                print!("{text}");
                0
            }
            Err(err @ CliError::Parse(_)) => err.exit_status(),
            Err(err) => {
                self.app.report_error("invalid command line", &err);
                err.exit_status()
            }
        };

        info!(status, "Dispatch finished");
        self.app.exit(status)
    }
}
