//! Gaf demo - edits the `gaf` settings file from the command line.
//!
//! Options are dispatched in the order given: `--set` and `--remove` edit the
//! store as they are reached, then `--get`, `--list` and `--run` report on
//! it. Changes are written back on exit. Logs go to stderr and to
//! `~/.gaf/logs/`.

use std::{env, error::Error, process, rc::Rc};

use clap::{Arg, ArgAction};
use gaf::{
    app::{AppPaths, Application},
    cli::{
        Action, CliApplication, CliError, CommandTable, Context, FetchValue, OptionMatch,
        PARSE_FAILURE_STATUS,
    },
    settings::{SettingsStore, SharedSettings},
    tracing_config,
};
use tracing::{info, instrument};

const DEFAULT_SUMMARY_LIMIT: usize = 10;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let status = match run(args) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("gaf: {e}");
            PARSE_FAILURE_STATUS
        }
    };

    process::exit(status);
}

/// Builds the application, declares its options and runs them.
///
/// # Errors
/// Returns error if the home directory, runtime configuration or settings
/// file cannot be set up.
fn run(args: Vec<String>) -> Result<i32, Box<dyn Error>> {
    let app = Application::new("gaf", Some(env!("CARGO_PKG_VERSION")), args)?;
    app.ensure_home_exists()?;
    tracing_config::init_with_file(&app.config().logging, &AppPaths::log_dir(app.home()))?;

    let mut cli = CliApplication::new(app);
    let settings = cli.app_mut().open_settings("settings", true)?;
    cli.dispatcher_mut().about("Inspect and edit the gaf settings file");

    declare_options(&mut cli, &settings)?;
    info!("Options declared");

    Ok(cli.run())
}

#[instrument(skip_all)]
fn declare_options(cli: &mut CliApplication, settings: &SharedSettings) -> Result<(), CliError> {
    let table = Rc::new(maintenance_commands());

    cli.add_option(
        Arg::new("count")
            .short('c')
            .long("count")
            .value_name("N")
            .help("Number of keys shown in the summary"),
        Action::initializer(FetchValue::integer().with_validator(|n| *n > 0)),
    )?;

    let target = Rc::clone(settings);
    cli.add_option(
        Arg::new("set")
            .short('s')
            .long("set")
            .value_name("KEY=VALUE")
            .action(ArgAction::Append)
            .help("Set a value"),
        Action::init_fn(move |_ctx: &mut Context, matched: &OptionMatch| {
            let mut store = target.borrow_mut();
            for assignment in &matched.values {
                let (key, value) = assignment.split_once('=').ok_or_else(|| {
                    CliError::Initializer {
                        option: matched.id.clone(),
                        details: format!("expected KEY=VALUE, got '{assignment}'"),
                    }
                })?;
                store.set_raw(key.trim(), value);
            }
            Ok(())
        }),
    )?;

    let target = Rc::clone(settings);
    cli.add_option(
        Arg::new("remove")
            .short('r')
            .long("remove")
            .value_name("KEY")
            .action(ArgAction::Append)
            .help("Remove a key"),
        Action::init_fn(move |_ctx: &mut Context, matched: &OptionMatch| {
            let mut store = target.borrow_mut();
            for key in &matched.values {
                store.remove(key);
            }
            Ok(())
        }),
    )?;

    let target = Rc::clone(settings);
    cli.add_option(
        Arg::new("get")
            .short('g')
            .long("get")
            .value_name("KEY")
            .help("Print the value of a key"),
        Action::command_fn(move |_ctx: &mut Context, matched: Option<&OptionMatch>| {
            let Some(key) = matched.and_then(OptionMatch::value) else {
                return PARSE_FAILURE_STATUS;
            };
            match target.borrow().get_raw(key) {
                Some(value) => {
                    println!("{value}");
                    0
                }
                None => {
                    eprintln!("gaf: no such key: {key}");
                    -1
                }
            }
        }),
    )?;

    let (target, commands) = (Rc::clone(settings), Rc::clone(&table));
    cli.add_option(
        Arg::new("list")
            .short('l')
            .long("list")
            .action(ArgAction::SetTrue)
            .help("Print every key and value"),
        Action::command_fn(move |_ctx: &mut Context, _: Option<&OptionMatch>| {
            perform(&commands, "list", &target)
        }),
    )?;

    let (target, commands) = (Rc::clone(settings), Rc::clone(&table));
    let names = table.names().join(", ");
    cli.add_option(
        Arg::new("run")
            .long("run")
            .value_name("NAME")
            .help(format!("Run a maintenance command ({names})")),
        Action::command_fn(move |_ctx: &mut Context, matched: Option<&OptionMatch>| {
            match matched.and_then(OptionMatch::value) {
                Some(name) => perform(&commands, name, &target),
                None => PARSE_FAILURE_STATUS,
            }
        }),
    )?;

    let target = Rc::clone(settings);
    cli.set_default_command(move |ctx: &mut Context, _: Option<&OptionMatch>| {
        let limit = ctx
            .get_as::<i64>("count")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_SUMMARY_LIMIT);
        print_summary(&target.borrow(), limit);
        0
    });

    Ok(())
}

fn maintenance_commands() -> CommandTable<SettingsStore> {
    let mut table = CommandTable::new();

    table.register("list", |store: &mut SettingsStore| {
        for (key, value) in store.entries() {
            println!("{key}={value}");
        }
        0
    });
    table.register("clear", |store: &mut SettingsStore| {
        store.clear();
        0
    });
    table.register("path", |store: &mut SettingsStore| match store.path() {
        Some(path) => {
            println!("{}", path.display());
            0
        }
        None => -1,
    });

    table
}

fn perform(table: &CommandTable<SettingsStore>, name: &str, settings: &SharedSettings) -> i32 {
    match table.perform(name, &mut settings.borrow_mut()) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("gaf: {e}");
            e.exit_status()
        }
    }
}

fn print_summary(store: &SettingsStore, limit: usize) {
    let location = store
        .path()
        .map_or_else(|| "memory".to_string(), |p| p.display().to_string());
    println!("{} settings in {location}", store.item_count());

    for key in store.item_names().into_iter().take(limit) {
        println!("  {key}");
    }
}
