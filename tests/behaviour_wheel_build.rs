//! Behaviour-driven tests for the wheel build pipeline.
//!
//! Scenarios build real wheels into a temporary directory against a fixed
//! CPython 3.13 host description. Tests use the rstest-bdd v0.5.0 mutable
//! world pattern.

use camino::{Utf8Path, Utf8PathBuf};
use easywheel::error::BuildError;
use easywheel::pipeline::{BuildOutput, PipelineContext, build_wheel};
use easywheel::project::{DefinitionFormat, ProjectDefinition};
use easywheel::sha256_digest::Sha256Digest;
use easywheel::tags::HostInterpreter;
use easywheel::tags::host::InterpreterDescription;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct BuildWorld {
    temp_dir: Option<TempDir>,
    rules: Vec<String>,
    env: HashMap<String, String>,
    use_stable_abi: bool,
    outputs: Vec<BuildOutput>,
    first_wheel_bytes: Option<Vec<u8>>,
    error: Option<BuildError>,
}

#[fixture]
fn world() -> BuildWorld {
    BuildWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..BuildWorld::default()
    }
}

fn root(world: &BuildWorld) -> Utf8PathBuf {
    let dir = world.temp_dir.as_ref().expect("temp_dir set");
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
}

fn host() -> HostInterpreter {
    HostInterpreter::from_description(&InterpreterDescription {
        implementation: "cpython".to_owned(),
        major: 3,
        minor: 13,
        free_threaded: false,
        platform: "linux-x86_64".to_owned(),
    })
}

fn definition(world: &BuildWorld) -> ProjectDefinition {
    let document = serde_json::json!({
        "name": "demo",
        "version": "1.0",
        "python": ">=3.8",
        "packages": [{"name": "demo", "files": world.rules}],
        "build": {"use_stable_abi": world.use_stable_abi},
    });
    let root = root(world);
    ProjectDefinition::parse(
        &document.to_string(),
        DefinitionFormat::Json,
        &root.join("package.json"),
        root.clone(),
    )
    .expect("valid definition")
}

fn run_build(world: &mut BuildWorld) {
    let project = definition(world);
    let build_dir = root(world).join("build");
    let host = host();
    let result = build_wheel(&PipelineContext {
        project: &project,
        build_dir: &build_dir,
        host: &host,
        env: &world.env,
    });
    match result {
        Ok(output) => world.outputs.push(output),
        Err(e) => world.error = Some(e),
    }
}

fn first_wheel(world: &BuildWorld) -> &Utf8Path {
    &world.outputs.first().expect("a wheel was built").wheel_path
}

fn read_member(wheel: &Utf8Path, name: &str) -> Option<String> {
    let file = fs::File::open(wheel).expect("open wheel");
    let mut archive = zip::ZipArchive::new(file).expect("read wheel");
    let mut member = archive.by_name(name).ok()?;
    let mut body = String::new();
    member.read_to_string(&mut body).expect("utf-8 member");
    Some(body)
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a project file \"{path}\"")]
fn given_project_file(world: &mut BuildWorld, path: String) {
    let file = root(world).join(&path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&file, format!("# {path}\n")).expect("write project file");
}

#[given("a package rule \"{rule}\"")]
fn given_package_rule(world: &mut BuildWorld, rule: String) {
    world.rules.push(rule);
}

#[given("the environment variable \"{name}\" is \"{value}\"")]
fn given_environment_variable(world: &mut BuildWorld, name: String, value: String) {
    world.env.insert(name, value);
}

#[given("the stable ABI is requested")]
fn given_stable_abi(world: &mut BuildWorld) {
    world.use_stable_abi = true;
}

#[when("the wheel is built")]
fn when_wheel_built(world: &mut BuildWorld) {
    run_build(world);
    if let Some(output) = world.outputs.first() {
        world.first_wheel_bytes = Some(fs::read(&output.wheel_path).expect("read wheel"));
    }
}

#[when("the wheel is built again")]
fn when_wheel_built_again(world: &mut BuildWorld) {
    run_build(world);
}

#[then("the wheel is named \"{name}\"")]
fn then_wheel_named(world: &mut BuildWorld, name: String) {
    assert_eq!(first_wheel(world).file_name(), Some(name.as_str()));
}

#[then("the wheel contains \"{member}\"")]
fn then_wheel_contains(world: &mut BuildWorld, member: String) {
    assert!(
        read_member(first_wheel(world), &member).is_some(),
        "missing member {member}"
    );
}

#[then("the RECORD lists \"{member}\" with its SHA-256 digest")]
fn then_record_lists(world: &mut BuildWorld, member: String) {
    let wheel = first_wheel(world);
    let record = read_member(wheel, "demo-1.0.dist-info/RECORD").expect("RECORD present");
    let body = read_member(wheel, &member).expect("member present");
    let expected = format!(
        "{member},sha256={},{}",
        Sha256Digest::of_bytes(body.as_bytes()),
        body.len()
    );
    assert!(
        record.lines().any(|line| line == expected),
        "RECORD missing {expected}:\n{record}"
    );
}

#[then("the build fails with a configuration error")]
fn then_config_error(world: &mut BuildWorld) {
    assert!(
        matches!(world.error, Some(BuildError::Config(_))),
        "expected a configuration error, got {:?}",
        world.error
    );
}

#[then("no wheel is written")]
fn then_no_wheel(world: &mut BuildWorld) {
    assert!(world.outputs.is_empty());
    assert!(!root(world).join("build").exists());
}

#[then("the second build fails because the wheel already exists")]
fn then_already_exists(world: &mut BuildWorld) {
    assert_eq!(world.outputs.len(), 1, "only the first build succeeds");
    assert!(
        matches!(world.error, Some(BuildError::AlreadyExists { .. })),
        "expected AlreadyExists, got {:?}",
        world.error
    );
}

#[then("the first wheel is unchanged")]
fn then_first_unchanged(world: &mut BuildWorld) {
    let before = world.first_wheel_bytes.as_ref().expect("first wheel bytes");
    assert_eq!(&fs::read(first_wheel(world)).expect("read wheel"), before);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "Build a pure wheel from a glob rule"
)]
fn scenario_pure_wheel(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "A glob rule with a destination is rejected"
)]
fn scenario_glob_with_destination(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "Placeholders are substituted from the environment"
)]
fn scenario_placeholders(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "An undefined placeholder stops the build"
)]
fn scenario_undefined_placeholder(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "An existing wheel is never overwritten"
)]
fn scenario_no_overwrite(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wheel_build.feature",
    name = "A native library built for the stable ABI"
)]
fn scenario_stable_abi(world: BuildWorld) {
    let _ = world;
}
