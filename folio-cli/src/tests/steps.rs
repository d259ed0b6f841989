//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::{CatalogFixture, READER, printed_ids, run_argv};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CliWorld {
    catalogue: CatalogFixture,
    cli_args: RefCell<Vec<String>>,
    output_path: RefCell<Option<Utf8PathBuf>>,
    stdout: RefCell<String>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            catalogue: CatalogFixture::new(),
            cli_args: RefCell::new(Vec::new()),
            output_path: RefCell::new(None),
            stdout: RefCell::new(String::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, command: &[&str]) {
        let mut argv: Vec<String> = ["folio"]
            .iter()
            .chain(command)
            .map(|arg| (*arg).to_owned())
            .collect();
        argv.extend(self.cli_args.borrow().iter().cloned());
        let borrowed: Vec<&str> = argv.iter().map(String::as_str).collect();
        let (result, stdout) = run_argv(&borrowed);
        self.stdout.replace(stdout);
        self.result.replace(Some(result));
    }

    fn expect_success(&self) {
        match self.result.borrow().as_ref() {
            Some(Ok(())) => {}
            Some(Err(err)) => panic!("expected success, got {err}"),
            None => panic!("command result not recorded"),
        }
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("a seeded catalogue in a data directory")]
fn seeded_catalogue(#[from(world)] world: &CliWorld) {
    assert!(
        world.catalogue.catalog_db().as_std_path().is_file(),
        "expected the seeded catalogue to exist on disk",
    );
}

#[given("I pass the data directory with the CLI flag")]
fn pass_data_dir(#[from(world)] world: &CliWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_DATA_DIR}"),
        world.catalogue.root().as_str().to_owned(),
    ]);
}

#[given("I request the output in a nested file")]
fn request_nested_output(#[from(world)] world: &CliWorld) {
    let path = world.catalogue.root().join("reports/suggestions.json");
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_OUTPUT}"), path.as_str().to_owned()]);
    world.output_path.replace(Some(path));
}

#[when("I run the rank command")]
fn run_rank_command(#[from(world)] world: &CliWorld) {
    world.run(&["rank"]);
}

#[when("I run the suggest command for the seeded reader")]
fn run_suggest_command(#[from(world)] world: &CliWorld) {
    let reader = READER.to_string();
    world.run(&["suggest", reader.as_str()]);
}

#[then("the command prints only the most voted book")]
fn prints_most_voted(#[from(world)] world: &CliWorld) {
    world.expect_success();
    assert_eq!(printed_ids(&world.stdout.borrow()), vec![1]);
}

#[then("the CLI reports that the \"catalog-db\" flag is missing")]
fn reports_missing_catalog(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref() {
        Some(Err(CliError::MissingArgument { field, .. })) => {
            assert_eq!(*field, ARG_CATALOG_DB);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[then("the output file lists the Dune sequel first")]
fn output_lists_sequel(#[from(world)] world: &CliWorld) {
    world.expect_success();
    assert!(world.stdout.borrow().is_empty(), "stdout should stay empty");
    let path = world
        .output_path
        .borrow()
        .clone()
        .unwrap_or_else(|| panic!("output path recorded"));
    let written = std::fs::read_to_string(path.as_std_path()).expect("read output file");
    assert_eq!(printed_ids(&written), vec![2, 3]);
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(rank_from_data_dir, "ranking the catalogue from a data directory");
register_cli_scenario!(
    reject_missing_catalogue,
    "rejecting a missing catalogue location"
);
register_cli_scenario!(
    suggestions_to_output_file,
    "writing suggestions to an output file"
);
