//! Unit tests for CLI module
//!
//! Tests option declaration, argument-order dispatch, status aggregation and
//! the command table. Nothing touches the filesystem.

#![allow(clippy::unwrap_used)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use clap::{Arg, ArgAction};

use crate::cli::{
    Action, CliError, CommandTable, Context, FetchValue, OptionDispatcher, OptionMatch,
    PARSE_FAILURE_STATUS, VALIDATION_FAILURE_STATUS,
};

type Log = Rc<RefCell<Vec<String>>>;

fn dispatcher() -> OptionDispatcher {
    let mut dispatcher = OptionDispatcher::new("demo", Some("1.2.3"));
    dispatcher.set_error_hook(|_| {});
    dispatcher
}

fn flag(id: &'static str) -> Arg {
    Arg::new(id).long(id).action(ArgAction::SetTrue)
}

fn option(id: &'static str) -> Arg {
    Arg::new(id).long(id).action(ArgAction::Set)
}

fn recording_init(log: &Log) -> Action {
    let log = Rc::clone(log);
    Action::init_fn(move |_ctx: &mut Context, matched: &OptionMatch| {
        log.borrow_mut().push(format!("init {}", matched.id));
        Ok(())
    })
}

fn returning_command(log: &Log, status: i32) -> Action {
    let log = Rc::clone(log);
    Action::command_fn(move |_ctx: &mut Context, matched: Option<&OptionMatch>| {
        let id = matched.map_or("default", |m| m.id.as_str());
        log.borrow_mut().push(format!("command {id}"));
        status
    })
}

#[test]
fn fetch_integer_populates_context() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap();
    let mut ctx = Context::new();

    let outcome = dispatcher.run(["--count", "42"], &mut ctx).unwrap();

    assert_eq!(outcome.status, 0);
    assert_eq!(ctx.get_as::<i64>("count"), Some(42));
}

#[test]
fn fetch_value_honors_custom_key() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(
            option("ratio"),
            Action::initializer(FetchValue::real().with_key("scale")),
        )
        .unwrap()
        .add_option(option("name"), Action::initializer(FetchValue::text()))
        .unwrap();
    let mut ctx = Context::new();

    dispatcher
        .run(["--ratio", "0.5", "--name", " spaced "], &mut ctx)
        .unwrap();

    assert_eq!(ctx.get_as::<f64>("scale"), Some(0.5));
    assert!(!ctx.contains("ratio"));
    assert_eq!(ctx.get_as::<String>("name").as_deref(), Some(" spaced "));
}

#[test]
fn validator_rejection_leaves_context_untouched() {
    let mut dispatcher = dispatcher();
    let log = Log::default();
    dispatcher
        .add_option(
            option("count"),
            Action::initializer(FetchValue::integer().with_validator(|n| *n > 0)),
        )
        .unwrap()
        .add_option(flag("list"), returning_command(&log, 0))
        .unwrap();
    let mut ctx = Context::new();

    let err = dispatcher
        .run(["--list", "--count", "0"], &mut ctx)
        .unwrap_err();

    assert!(matches!(
        &err,
        CliError::Validation { option, value } if option == "count" && value == "0"
    ));
    assert_eq!(err.exit_status(), VALIDATION_FAILURE_STATUS);
    assert!(ctx.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn undecodable_value_is_a_parse_failure() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap();
    let mut ctx = Context::new();

    let err = dispatcher.run(["--count", "lots"], &mut ctx).unwrap_err();

    assert!(matches!(err, CliError::InvalidValue { .. }));
    assert_eq!(err.exit_status(), PARSE_FAILURE_STATUS);
    assert!(!ctx.contains("count"));
}

#[test]
fn statuses_fold_with_min_from_zero() {
    let log = Log::default();
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(flag("ok"), returning_command(&log, 0))
        .unwrap()
        .add_option(flag("fail"), returning_command(&log, -1))
        .unwrap()
        .add_option(flag("positive"), returning_command(&log, 3))
        .unwrap();

    let mut ctx = Context::new();
    assert_eq!(dispatcher.run(["--ok", "--fail"], &mut ctx).unwrap().status, -1);
    assert_eq!(dispatcher.run(["--positive"], &mut ctx).unwrap().status, 0);
}

#[test]
fn dispatch_follows_argument_order() {
    let log = Log::default();
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(flag("alpha"), recording_init(&log))
        .unwrap()
        .add_option(flag("beta"), recording_init(&log))
        .unwrap()
        .add_option(flag("gamma"), returning_command(&log, 0))
        .unwrap()
        .add_option(flag("delta"), returning_command(&log, 0))
        .unwrap();

    dispatcher
        .run(["--delta", "--beta", "--gamma", "--alpha"], &mut Context::new())
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["init beta", "init alpha", "command delta", "command gamma"]
    );
}

#[test]
fn commands_see_values_from_later_initializers() {
    let seen = Rc::new(Cell::new(None));
    let mut dispatcher = dispatcher();
    let target = Rc::clone(&seen);
    dispatcher
        .add_option(
            flag("show"),
            Action::command_fn(move |ctx: &mut Context, _: Option<&OptionMatch>| {
                target.set(ctx.get_as::<i64>("count"));
                0
            }),
        )
        .unwrap()
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap();

    dispatcher
        .run(["--show", "--count", "7"], &mut Context::new())
        .unwrap();

    assert_eq!(seen.get(), Some(7));
}

#[test]
fn defaults_never_trigger_actions() {
    let log = Log::default();
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(option("mode").default_value("fast"), recording_init(&log))
        .unwrap();

    let outcome = dispatcher.run(Vec::<String>::new(), &mut Context::new()).unwrap();

    assert_eq!(outcome.status, 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn default_command_runs_only_without_queued_commands() {
    let log = Log::default();
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(flag("list"), returning_command(&log, 0))
        .unwrap()
        .add_option(flag("verbose"), recording_init(&log))
        .unwrap();
    let default_log = Rc::clone(&log);
    dispatcher.set_default_command(move |_: &mut Context, matched: Option<&OptionMatch>| {
        assert!(matched.is_none());
        default_log.borrow_mut().push("default".to_string());
        5
    });

    let outcome = dispatcher.run(["--verbose"], &mut Context::new()).unwrap();
    assert_eq!(outcome.status, 5);

    let outcome = dispatcher.run(["--list"], &mut Context::new()).unwrap();
    assert_eq!(outcome.status, 0);

    assert_eq!(*log.borrow(), vec!["init verbose", "default", "command list"]);
}

#[test]
fn parsed_check_can_abort_before_commands() {
    let log = Log::default();
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap()
        .add_option(flag("list"), returning_command(&log, 0))
        .unwrap();
    dispatcher.set_parsed_check(|ctx| ctx.contains("count"));

    let err = dispatcher.run(["--list"], &mut Context::new()).unwrap_err();
    assert!(matches!(err, CliError::Rejected));
    assert!(log.borrow().is_empty());

    let outcome = dispatcher
        .run(["--list", "--count", "1"], &mut Context::new())
        .unwrap();
    assert_eq!(outcome.status, 0);
}

#[test]
fn positional_inputs_are_kept() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap();
    let mut ctx = Context::new();

    let outcome = dispatcher
        .run(["a.txt", "--count", "2", "b.txt"], &mut ctx)
        .unwrap();

    assert_eq!(outcome.inputs, vec!["a.txt", "b.txt"]);
    assert_eq!(ctx.inputs(), ["a.txt".to_string(), "b.txt".to_string()]);
}

#[test]
fn duplicate_declarations_are_rejected() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(
            option("count").short('c'),
            Action::initializer(FetchValue::integer()),
        )
        .unwrap();

    let same_id = dispatcher
        .add_option(
            Arg::new("count").long("other"),
            Action::initializer(FetchValue::integer()),
        )
        .err();
    let same_short = dispatcher
        .add_option(
            option("cache").short('c'),
            Action::initializer(FetchValue::text()),
        )
        .err();
    let same_long = dispatcher
        .add_option(
            Arg::new("number").long("count"),
            Action::initializer(FetchValue::integer()),
        )
        .err();
    let reserved = dispatcher
        .add_option(flag("help"), Action::initializer(FetchValue::text()))
        .err();

    assert!(matches!(same_id, Some(CliError::DuplicateOption(id)) if id == "count"));
    assert!(matches!(same_short, Some(CliError::DuplicateOption(s)) if s == "-c"));
    assert!(matches!(same_long, Some(CliError::DuplicateOption(l)) if l == "--count"));
    assert!(matches!(reserved, Some(CliError::DuplicateOption(_))));
    assert_eq!(dispatcher.option_ids(), vec!["count"]);
}

#[test]
fn options_without_flags_are_rejected() {
    let log = Log::default();
    let mut dispatcher = dispatcher();

    let unflagged = dispatcher.add_option(Arg::new("file"), recording_init(&log)).err();

    assert!(matches!(unflagged, Some(CliError::UnflaggedOption(id)) if id == "file"));
    assert!(dispatcher.option_ids().is_empty());

    let mut ctx = Context::new();
    let outcome = dispatcher.run(["a.txt"], &mut ctx).unwrap();
    assert_eq!(outcome.status, 0);
    assert_eq!(ctx.inputs(), ["a.txt"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn help_and_version_are_informational() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(
            flag("list").help("List entries"),
            Action::initializer(FetchValue::text()),
        )
        .unwrap();

    let help = dispatcher.parse(["--help"]).unwrap_err();
    let version = dispatcher.parse(["--version"]).unwrap_err();

    assert!(matches!(&help, CliError::Informational(text) if text.contains("--list")));
    assert!(matches!(&version, CliError::Informational(text) if text.contains("1.2.3")));
    assert_eq!(help.exit_status(), 0);
}

#[test]
fn malformed_input_runs_error_hook() {
    let hooked = Rc::new(Cell::new(false));
    let mut dispatcher = OptionDispatcher::new("demo", None);
    let flag_hook = Rc::clone(&hooked);
    dispatcher.set_error_hook(move |_| flag_hook.set(true));
    dispatcher
        .add_option(option("count"), Action::initializer(FetchValue::integer()))
        .unwrap();

    let err = dispatcher.parse(["--unknown"]).unwrap_err();

    assert!(matches!(err, CliError::Parse(_)));
    assert_eq!(err.exit_status(), PARSE_FAILURE_STATUS);
    assert!(hooked.get());
}

#[test]
fn repeated_option_keeps_all_values_and_first_position() {
    let mut dispatcher = dispatcher();
    dispatcher
        .add_option(
            Arg::new("set").long("set").action(ArgAction::Append),
            Action::initializer(FetchValue::text()),
        )
        .unwrap()
        .add_option(flag("list"), Action::initializer(FetchValue::text()))
        .unwrap();

    let invocation = dispatcher
        .parse(["--set", "a=1", "--list", "--set", "b=2"])
        .unwrap();

    assert_eq!(invocation.matched[0].id, "set");
    assert_eq!(invocation.matched[0].values, vec!["a=1", "b=2"]);
    assert_eq!(invocation.matched[1].id, "list");
    assert!(invocation.matched[1].values.is_empty());
}

#[test]
fn command_table_dispatches_by_name() {
    let mut table: CommandTable<Vec<&'static str>> = CommandTable::new();
    table.register("push", |state: &mut Vec<&'static str>| {
        state.push("pushed");
        0
    });
    table.register("fail", |_: &mut Vec<&'static str>| -1);

    let mut state = Vec::new();
    assert_eq!(table.perform("push", &mut state).unwrap(), 0);
    assert_eq!(table.perform("fail", &mut state).unwrap(), -1);
    assert_eq!(state, vec!["pushed"]);
    assert_eq!(table.names(), vec!["fail", "push"]);
    assert!(table.contains("push"));

    let err = table.perform("missing", &mut state).unwrap_err();
    assert!(matches!(err, CliError::CommandNotFound(name) if name == "missing"));
}
