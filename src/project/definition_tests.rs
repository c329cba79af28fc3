//! Unit tests for definition loading and validation.

use super::*;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

const DEMO_JSON: &str = r#"{
    "name": "demo",
    "version": "1.0",
    "python": ">=3.8",
    "packages": [{"name": "demo", "files": ["a.py"]}]
}"#;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

fn utf8(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
}

fn parse_json(contents: &str) -> Result<ProjectDefinition, ConfigError> {
    ProjectDefinition::parse(
        contents,
        DefinitionFormat::Json,
        Utf8Path::new("package.json"),
        Utf8PathBuf::from("."),
    )
}

#[test]
fn minimal_definition_uses_documented_defaults() {
    let project = parse_json(DEMO_JSON).expect("valid definition");
    assert_eq!(project.name, "demo");
    assert_eq!(project.version, "1.0");
    assert_eq!(project.python.to_string(), ">=3.8");
    assert_eq!(project.is_pure, None);
    assert!(!project.use_stable_abi);
    assert!(project.whl_name_override.is_none());
    assert!(project.metadata.is_none());
    assert_eq!(project.packages.len(), 1);
}

#[test]
fn build_table_is_honoured() {
    let project = parse_json(
        r#"{
            "name": "pygl", "version": "0.2", "python": "==3.12",
            "packages": [],
            "build": {"is_pure": false, "use_stable_abi": true, "whl_name_override": "custom"}
        }"#,
    )
    .expect("valid definition");
    assert_eq!(project.is_pure, Some(false));
    assert!(project.use_stable_abi);
    assert_eq!(project.whl_name_override.as_deref(), Some("custom"));
}

#[test]
fn legacy_stable_api_spelling_is_accepted() {
    let project = parse_json(
        r#"{"name": "x", "version": "1", "python": ">=3.8", "packages": [],
            "build": {"use_stable_api": true}}"#,
    )
    .expect("valid definition");
    assert!(project.use_stable_abi);
}

#[rstest]
#[case::name(r#"{"name": " ", "version": "1", "python": ">=3.8", "packages": []}"#, "name")]
#[case::version(r#"{"name": "x", "version": "", "python": ">=3.8", "packages": []}"#, "version")]
#[case::package(
    r#"{"name": "x", "version": "1", "python": ">=3.8", "packages": [{"name": ""}]}"#,
    "package name"
)]
fn blank_fields_are_rejected(#[case] contents: &str, #[case] field: &'static str) {
    let err = parse_json(contents).expect_err("blank field");
    assert_eq!(err, ConfigError::EmptyField { field });
}

#[test]
fn bad_constraint_is_a_config_error() {
    let err = parse_json(r#"{"name": "x", "version": "1", "python": "3.8", "packages": []}"#)
        .expect_err("bad constraint");
    assert!(matches!(err, ConfigError::InvalidConstraint { .. }));
}

#[test]
fn unknown_fields_are_rejected_eagerly() {
    let err = parse_json(
        r#"{"name": "x", "version": "1", "python": ">=3.8", "packages": [], "extra": 1}"#,
    )
    .expect_err("unknown field");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn toml_definitions_share_the_schema() {
    let contents = r#"
name = "demo"
version = "1.0"
python = "==3.11"

[[packages]]
name = "demo"
files = ["a.py", "!g demo/*.py"]

[metadata]
summary = "A demo"
keywords = ["demo", "wheel"]
"#;
    let project = ProjectDefinition::parse(
        contents,
        DefinitionFormat::Toml,
        Utf8Path::new("package.toml"),
        Utf8PathBuf::from("."),
    )
    .expect("valid toml");
    assert_eq!(project.packages[0].files.len(), 2);
    assert_eq!(
        project.metadata.expect("metadata present").summary,
        "A demo"
    );
}

#[rstest]
fn load_discovers_package_json_in_directory(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("package.json"), DEMO_JSON).expect("write definition");
    let dir = utf8(&temp_dir);

    let project = ProjectDefinition::load(&dir).expect("definition loads");
    assert_eq!(project.name, "demo");
    assert_eq!(project.base_dir, dir);
}

#[rstest]
fn load_accepts_explicit_file(temp_dir: TempDir) {
    let file = utf8(&temp_dir).join("custom.json");
    fs::write(&file, DEMO_JSON).expect("write definition");

    let project = ProjectDefinition::load(&file).expect("definition loads");
    assert_eq!(project.base_dir, utf8(&temp_dir));
}

#[rstest]
fn load_reports_missing_definition(temp_dir: TempDir) {
    let err = ProjectDefinition::load(&utf8(&temp_dir)).expect_err("nothing to load");
    assert!(matches!(
        err,
        BuildError::Config(ConfigError::DefinitionNotFound { .. })
    ));
}

#[rstest]
fn load_rejects_unknown_extension(temp_dir: TempDir) {
    let file = utf8(&temp_dir).join("package.yml");
    fs::write(&file, "name: demo").expect("write definition");

    let err = ProjectDefinition::load(&file).expect_err("unsupported format");
    assert!(matches!(
        err,
        BuildError::Config(ConfigError::DefinitionNotFound { .. })
    ));
}

#[rstest]
#[case::version(
    r#"{"name": "x", "version": "1\nName: other", "python": ">=3.8", "packages": []}"#,
    "version"
)]
#[case::summary(
    r#"{"name": "x", "version": "1", "python": ">=3.8", "packages": [],
        "metadata": {"summary": "one\ntwo"}}"#,
    "summary"
)]
fn multiline_header_values_are_rejected(#[case] contents: &str, #[case] field: &str) {
    let err = parse_json(contents).expect_err("line break rejected");
    assert_eq!(
        err,
        ConfigError::MultilineMetadata {
            field: field.to_owned()
        }
    );
}
