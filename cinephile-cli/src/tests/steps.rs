//! Behaviour-driven step definitions driving the CLI command scenarios.

use super::helpers::{CATALOGUE_JSON, Workspace};
use super::*;
use cinephile_recommender::Stats;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CommandWorld {
    workspace: Workspace,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    /// Parse and run `cinephile <args> --state-dir <dir>`, keeping only the
    /// latest command's output.
    fn run(&self, args: &[&str]) {
        let mut argv = vec!["cinephile".to_owned()];
        argv.extend(args.iter().map(|arg| (*arg).to_owned()));
        argv.extend([
            format!("--{ARG_STATE_DIR}"),
            self.workspace.state_dir().as_str().to_owned(),
        ]);

        let mut buffer = self.stdout.borrow_mut();
        buffer.clear();
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::from)
            .and_then(|cli| dispatch(cli.command, &mut *buffer));
        self.result.replace(Some(outcome));
    }

    fn catalog(&self) -> String {
        self.workspace.catalog().as_str().to_owned()
    }

    fn stats(&self) -> Stats {
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be JSON stats")
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a movie catalogue exists on disk")]
fn catalogue_exists(#[from(world)] world: &CommandWorld) {
    world.workspace.write_catalog(CATALOGUE_JSON);
}

#[when("I ask for a high rated recommendation")]
fn ask_for_high_rated(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog();
    world.run(&[
        "recommend",
        &catalog,
        "--strategy",
        "high_rated",
        "--seed",
        "3",
    ]);
}

#[when("I ask for a recommendation without a catalogue")]
fn ask_without_catalogue(#[from(world)] world: &CommandWorld) {
    world.run(&["recommend"]);
}

#[when("I like heat-1995")]
fn like_heat(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog();
    world.run(&["feedback", &catalog, "--movie-id", "heat-1995"]);
}

#[when("I like a movie that is not in the catalogue")]
fn like_unknown_movie(#[from(world)] world: &CommandWorld) {
    let catalog = world.catalog();
    world.run(&["feedback", &catalog, "--movie-id", "missing-2000"]);
}

#[when("I reset my preferences")]
fn reset_preferences(#[from(world)] world: &CommandWorld) {
    world.run(&["reset"]);
}

#[when("I ask for my stats")]
fn ask_for_stats(#[from(world)] world: &CommandWorld) {
    world.run(&["stats"]);
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the output recommends heat-1995")]
fn output_recommends_heat(#[from(world)] world: &CommandWorld) {
    let value: Value =
        serde_json::from_slice(&world.stdout.borrow()).expect("output should be JSON");
    assert_eq!(value["movie"]["id"], "heat-1995");
    assert_eq!(value["strategy"], "high_rated");
}

#[then("the command fails because the catalogue is missing")]
fn command_fails_missing_catalogue(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_CATALOG),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the movie is unknown")]
fn command_fails_unknown_movie(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::UnknownMovie { id, .. } => assert_eq!(id, "missing-2000"),
        other => panic!("expected UnknownMovie, found {other:?}"),
    }
}

#[then("the stats list Michael Mann as a favourite director")]
fn stats_list_director(#[from(world)] world: &CommandWorld) {
    let stats = world.stats();
    assert_eq!(stats.total_viewed, 1);
    assert_eq!(stats.favorite_directors, ["Michael Mann"]);
}

#[then("the stats are empty")]
fn stats_are_empty(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.stats(), Stats::default());
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(recommend_happy_path, "recommending from a catalogue");
register_command_scenario!(
    recommend_missing_catalogue,
    "rejecting a missing catalogue argument"
);
register_command_scenario!(feedback_learns, "learning from feedback");
register_command_scenario!(
    feedback_unknown_movie,
    "rejecting feedback for an unknown movie"
);
register_command_scenario!(reset_clears_profile, "resetting the profile");
