//! Tests for Registry binding, aliases and the process-wide install.

use worklog::application::registry::{self, BuildParams};
use worklog::application::{
    AsAny, Binding, Command, CommandResult, Context, Declare, ErrorKind, Registration, Registry,
};
use worklog::domain::{DataValue, Declarations, OptionSpec};
use worklog::util::testing::{init_test_setup, isolate_global_state};

#[derive(Debug, Default)]
struct ReportCommand;

impl Declare for ReportCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["date", "date_end"])
            .description("Show entries")
            .options(vec![OptionSpec::value("i", "Issue key")])
            .usage("%s [-i] [date [date_end]]")
    }
}

impl Command for ReportCommand {
    fn run(&mut self, _ctx: &mut Context) -> CommandResult {
        Ok(None)
    }
}

#[derive(Debug, Default)]
struct StopCommand;

impl Declare for StopCommand {}

impl Command for StopCommand {
    fn run(&mut self, _ctx: &mut Context) -> CommandResult {
        Ok(None)
    }
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .bind(
            &["report", "r", "rep"],
            Registration::new(Binding::of::<ReportCommand>()),
        )
        .unwrap();
    registry
        .bind(
            &["stop"],
            Registration::new(Binding::of::<StopCommand>())
                .description("Stop the running entry")
                .menu(true)
                .data("round", 15i64),
        )
        .unwrap();
    registry
}

#[test]
fn given_names_when_bound_then_first_is_canonical_and_rest_are_aliases() {
    init_test_setup();
    let registry = registry();

    assert!(registry.is_canonical("report"));
    assert!(!registry.is_canonical("r"));
    assert_eq!(registry.alias("report"), Some("report"));
    assert_eq!(registry.alias("r"), Some("report"));
    assert_eq!(registry.alias("rep"), Some("report"));
    assert_eq!(registry.alias("bogus"), None);
    assert_eq!(registry.aliases_for("report"), vec!["r", "rep"]);
}

#[test]
fn given_registry_when_validating_then_canonical_and_aliases_pass() {
    let registry = registry();
    assert!(registry.validate_command("stop"));
    assert!(registry.validate_command("r"));
    assert!(!registry.validate_command("start"));
}

#[test]
fn given_implementation_declarations_when_bound_then_descriptor_seeded() {
    let registry = registry();
    let report = registry.descriptor("report").unwrap();

    assert_eq!(report.name, "report");
    assert_eq!(report.arguments, vec!["date", "date_end"]);
    assert_eq!(report.description, "Show entries");
    assert_eq!(report.option("i").unwrap().required, Some(true));
    assert_eq!(report.usage_line().as_deref(), Some("report [-i] [date [date_end]]"));
}

#[test]
fn given_registration_fields_when_nothing_declared_then_registration_kept() {
    let registry = registry();
    let stop = registry.descriptor("stop").unwrap();

    assert_eq!(stop.description, "Stop the running entry");
    assert!(stop.menu);
    assert_eq!(stop.data.get("round"), Some(&DataValue::Int(15)));
}

#[test]
fn given_registration_without_binding_when_bound_then_configuration_error() {
    let mut registry = Registry::new();
    let err = registry
        .bind(&["broken"], Registration::unbound())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!registry.validate_command("broken"));
}

#[test]
fn given_no_names_when_bound_then_configuration_error() {
    let mut registry = Registry::new();
    let err = registry
        .bind(&[], Registration::new(Binding::of::<StopCommand>()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn given_alias_rebound_when_resolved_then_last_write_wins() {
    let mut registry = registry();
    registry.register_alias("stop", "r");

    assert_eq!(registry.alias("r"), Some("stop"));
    assert_eq!(registry.aliases_for("report"), vec!["rep"]);
}

#[test]
fn given_closure_binding_when_built_then_receives_parameters() {
    let binding = Binding::closure(|params: &BuildParams| {
        assert_eq!(params.name, "stop");
        Box::new(StopCommand) as Box<dyn Command>
    });
    let command = binding.build(&BuildParams::named("stop"));
    assert!((*command).as_any().downcast_ref::<StopCommand>().is_some());
}

#[test]
fn given_installed_registry_when_reset_then_gone() {
    init_test_setup();
    let _guard = isolate_global_state();

    assert!(registry::installed().is_none());
    registry::install(registry());
    assert_eq!(registry::installed().map(|r| r.len()), Some(2));

    registry::reset();
    assert!(registry::installed().is_none());
}

#[derive(Debug, Default)]
struct ClashingCommand;

impl Declare for ClashingCommand {
    fn declarations() -> Declarations {
        Declarations::new().options(vec![
            OptionSpec::flag("t", "Today only"),
            OptionSpec::value("t", "Ticket"),
        ])
    }
}

impl Command for ClashingCommand {
    fn run(&mut self, _ctx: &mut Context) -> CommandResult {
        Ok(None)
    }
}

#[derive(Debug, Default)]
struct ReservedCommand;

impl Declare for ReservedCommand {
    fn declarations() -> Declarations {
        Declarations::new().options(vec![OptionSpec::flag("__positional", "Clashes")])
    }
}

impl Command for ReservedCommand {
    fn run(&mut self, _ctx: &mut Context) -> CommandResult {
        Ok(None)
    }
}

#[test]
fn given_duplicate_option_when_bound_then_configuration_error_and_not_registered() {
    init_test_setup();
    let mut registry = registry();

    let err = registry
        .bind(&["clash", "c"], Registration::new(Binding::of::<ClashingCommand>()))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.to_string(), "clash: option \"t\" declared twice");
    assert!(!registry.validate_command("clash"));
    assert!(!registry.validate_command("c"));
}

#[test]
fn given_reserved_option_name_when_bound_then_configuration_error() {
    let mut registry = Registry::new();

    let err = registry
        .bind(&["reserved"], Registration::new(Binding::of::<ReservedCommand>()))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.to_string(), "reserved: invalid option name \"__positional\"");
    assert!(registry.is_empty());
}
