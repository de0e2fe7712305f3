//! Behaviour-driven step definitions driving the validate CLI scenarios.

use super::helpers::{UploadTree, clean_collection};
use super::*;
use crate::validate::run_validate_with;
use greenborder_core::test_support::{collection, degree_square, feature};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use std::cell::RefCell;

struct ValidateWorld {
    tree: UploadTree,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<Outcome, CliError>>>,
}

impl ValidateWorld {
    fn new() -> Self {
        Self {
            tree: UploadTree::new(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, file_id: Option<&str>) {
        let mut argv = vec!["greenborder".to_owned(), "validate".to_owned()];
        argv.extend(file_id.map(str::to_owned));
        argv.extend([
            format!("--{ARG_UPLOADS_ROOT}"),
            self.tree.root().as_str().to_owned(),
        ]);
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Validate(args) => {
                let mut buffer = self.stdout.borrow_mut();
                run_validate_with(args, &mut *buffer)
            }
        });
        self.result.replace(Some(outcome));
    }

    fn outcome(&self) -> Outcome {
        let borrowed = self.result.borrow();
        match borrowed.as_ref().expect("result recorded") {
            Ok(outcome) => *outcome,
            Err(err) => panic!("expected the command to succeed, found {err:?}"),
        }
    }

    fn report(&self) -> Value {
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be a JSON report")
    }

    fn error(&self) -> CliError {
        self.result
            .take()
            .expect("result recorded")
            .expect_err("expected the command to fail")
    }
}

#[fixture]
fn world() -> ValidateWorld {
    ValidateWorld::new()
}

#[given("an upload {file_id} holding a clean collection")]
fn clean_upload(#[from(world)] world: &ValidateWorld, file_id: String) {
    world
        .tree
        .upload_json(file_id.trim_matches('"'), &clean_collection());
}

#[given("an upload {file_id} whose third feature has no geometry")]
fn upload_missing_geometry(#[from(world)] world: &ValidateWorld, file_id: String) {
    let document = collection(vec![
        feature(degree_square(2.3522, 48.8566, 0.01)),
        feature(degree_square(2.3622, 48.8566, 0.01)),
        json!({ "type": "Feature", "properties": {} }),
    ]);
    world.tree.upload_json(file_id.trim_matches('"'), &document);
}

#[given("an empty uploads root")]
fn empty_uploads_root(#[from(world)] world: &ValidateWorld) {
    assert!(world.tree.root().is_dir());
}

#[when("I run the validate command for {file_id}")]
fn run_for(#[from(world)] world: &ValidateWorld, file_id: String) {
    world.run(Some(file_id.trim_matches('"')));
}

#[when("I run the validate command without an identifier")]
fn run_without_identifier(#[from(world)] world: &ValidateWorld) {
    world.run(None);
}

#[then("the command reports a valid document")]
fn reports_valid(#[from(world)] world: &ValidateWorld) {
    assert_eq!(world.outcome(), Outcome::Valid);
    assert_eq!(world.report(), json!({ "status": "valid", "warnings": [] }));
}

#[then("the command reports error {code}")]
fn reports_error(#[from(world)] world: &ValidateWorld, code: String) {
    assert_eq!(world.outcome(), Outcome::Invalid);
    let report = world.report();
    assert_eq!(report["status"], json!("invalid"));
    assert_eq!(report["error_code"], json!(code));
    assert_eq!(report["feature_id"], json!(2));
    assert!(report.get("warnings").is_none());
}

#[then("the exit status is {status}")]
fn exit_status(#[from(world)] world: &ValidateWorld, status: i32) {
    assert_eq!(world.outcome().exit_code(), status);
}

#[then("the command fails because the source is missing")]
fn fails_missing_source(#[from(world)] world: &ValidateWorld) {
    match world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_FILE_ID),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
    assert!(world.stdout.borrow().is_empty());
}

#[then("the command fails because the identifier is missing")]
fn fails_missing_identifier(#[from(world)] world: &ValidateWorld) {
    match world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_FILE_ID),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_validate_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/validate_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ValidateWorld) {
            let _ = world;
        }
    };
}

register_validate_scenario!(validate_clean_upload, "validating a clean upload");
register_validate_scenario!(validate_missing_geometry, "rejecting a collection with a missing geometry");
register_validate_scenario!(validate_unknown_upload, "reporting an unknown upload");
register_validate_scenario!(validate_missing_identifier, "rejecting a missing upload identifier");
