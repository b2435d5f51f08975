//! Tests for command inference, instantiation and full resolution.

mod common;

use std::sync::Arc;

use rstest::rstest;

use worklog::application::registry::BuildParams;
use worklog::application::{
    Binding, Command, CommandResult, Context, Declare, ErrorKind, Registration, Registry, Resolver,
};
use worklog::config::Settings;
use worklog::domain::{DataValue, Declarations, OptionSpec};
use worklog::util::testing::{init_test_setup, isolate_global_state};

use common::{services, services_with, tokens, RecordingRunner, ScriptedPrompter};

#[derive(Debug, Default)]
struct ReportCommand;

impl Declare for ReportCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["date", "date_end"])
            .options(vec![
                OptionSpec::value("i", "Issue key"),
                OptionSpec::flag("t", "Today"),
            ])
    }
}

impl Command for ReportCommand {
    fn run(&mut self, ctx: &mut Context) -> CommandResult {
        Ok(Some(ctx.name().to_string()))
    }
}

#[derive(Debug)]
struct StartCommand {
    built_as: String,
}

impl Declare for StartCommand {}

impl Command for StartCommand {
    fn run(&mut self, _ctx: &mut Context) -> CommandResult {
        Ok(Some(self.built_as.clone()))
    }
}

fn build_start(params: &BuildParams) -> Box<dyn Command> {
    Box::new(StartCommand {
        built_as: params.name.clone(),
    })
}

fn registry() -> Arc<Registry> {
    let mut registry = Registry::new();
    registry
        .bind(&["report", "r"], Registration::new(Binding::of::<ReportCommand>()))
        .unwrap();
    registry
        .bind(
            &["start", "s", "begin"],
            Registration::new(Binding::with_params::<StartCommand>(build_start))
                .data("billable", true),
        )
        .unwrap();
    registry
        .bind(&["help"], Registration::new(Binding::of::<ReportCommand>()))
        .unwrap();
    Arc::new(registry)
}

fn resolver() -> Resolver {
    Resolver::new(Some(registry()), services())
}

// ============================================================
// infer() tests
// ============================================================

#[rstest]
#[case(&["report"], "report")]
#[case(&["-i", "ABC-1", "report"], "report")]
#[case(&["2024-01-01", "start"], "start")]
#[case(&["r"], "report")]
#[case(&["x", "begin", "y"], "start")]
#[case(&["r", "start"], "start")]
#[case(&[], "help")]
fn given_tokens_when_inferred_then_canonical_name(
    #[case] input: &[&str],
    #[case] expected: &str,
) {
    init_test_setup();
    let mut input = tokens(input);
    assert_eq!(resolver().infer(&mut input).unwrap(), expected);
}

#[test]
fn given_alias_token_when_inferred_then_token_canonicalized_in_place() {
    let mut input = tokens(&["-t", "s", "9am"]);
    let name = resolver().infer(&mut input).unwrap();

    assert_eq!(name, "start");
    assert_eq!(input, tokens(&["-t", "start", "9am"]));
}

#[test]
fn given_unknown_tokens_when_inferred_then_invalid_command_names_first_token() {
    let mut input = tokens(&["bogus", "other"]);
    let err = resolver().infer(&mut input).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "Invalid command \"bogus\"");
}

#[test]
fn given_no_registry_when_inferred_then_default_command() {
    let settings = Settings {
        default_command: "report".into(),
        ..Default::default()
    };
    let services = services_with(
        settings,
        RecordingRunner::new(),
        ScriptedPrompter::silent(),
        9,
    );
    let resolver = Resolver::new(None, services);

    let mut input = tokens(&["anything"]);
    assert_eq!(resolver.infer(&mut input).unwrap(), "report");
}

#[test]
fn given_empty_registry_when_inferred_then_invalid_command_not_default() {
    let resolver = Resolver::new(Some(Arc::new(Registry::new())), services());

    let mut input = tokens(&["x"]);
    let err = resolver.infer(&mut input).unwrap_err();

    assert_eq!(err.to_string(), "Invalid command \"x\"");
}

// ============================================================
// instance() tests
// ============================================================

#[test]
fn given_bound_report_when_instanced_then_report_type_tagged_report() {
    let resolver = resolver();
    let mut input = tokens(&["r"]);
    let name = resolver.infer(&mut input).unwrap();
    let instance = resolver.instance(&name).unwrap();

    assert_eq!(instance.name(), "report");
    assert!(instance.downcast_ref::<ReportCommand>().is_some());
    assert!(instance.downcast_ref::<StartCommand>().is_none());
}

#[test]
fn given_alias_when_instanced_then_tagged_with_canonical_name() {
    let mut instance = resolver().instance("begin").unwrap();
    assert_eq!(instance.name(), "start");
    assert_eq!(instance.run().unwrap().as_deref(), Some("start"));
}

#[test]
fn given_empty_name_when_instanced_then_no_command_specified() {
    let err = resolver().instance("").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "No command specified");
}

#[test]
fn given_unknown_name_when_instanced_then_invalid_command() {
    let err = resolver().instance("bogus").err().unwrap();
    assert_eq!(err.to_string(), "Invalid command \"bogus\"");
}

// ============================================================
// resolve() tests
// ============================================================

#[test]
fn given_tokens_when_resolved_then_options_and_arguments_mapped() {
    init_test_setup();
    let _guard = isolate_global_state();

    let instance = resolver()
        .resolve(&tokens(&["r", "-i", "ABC-1", "2024-01-02", "-t", "2024-01-05"]))
        .unwrap();
    let ctx = instance.context();

    assert_eq!(ctx.option("i"), Some(DataValue::from("ABC-1")));
    assert_eq!(ctx.option("t"), Some(DataValue::Bool(true)));
    assert_eq!(ctx.data().get("date"), Some(DataValue::from("2024-01-02")));
    assert_eq!(ctx.data().get("date_end"), Some(DataValue::from("2024-01-05")));
}

#[test]
fn given_surplus_arguments_when_resolved_then_last_name_accumulates() {
    let _guard = isolate_global_state();

    let instance = resolver()
        .resolve(&tokens(&["report", "a", "b", "c"]))
        .unwrap();

    assert_eq!(
        instance.context().data().get("date_end"),
        Some(DataValue::List(vec!["b".into(), "c".into()]))
    );
    assert_eq!(instance.context().arguments(), &tokens(&["a", "b", "c"])[..]);
}

#[test]
fn given_unnamed_arguments_when_resolved_then_index_keys() {
    let _guard = isolate_global_state();

    let instance = resolver().resolve(&tokens(&["start", "9am", "ABC-1"])).unwrap();
    let data = instance.context().data();

    assert_eq!(data.get("0"), Some(DataValue::from("9am")));
    assert_eq!(data.get("1"), Some(DataValue::from("ABC-1")));
    assert_eq!(data.get("billable"), Some(DataValue::Bool(true)));
}

#[test]
fn given_unknown_option_when_resolved_then_invalid_input() {
    let err = resolver().resolve(&tokens(&["report", "-z"])).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
