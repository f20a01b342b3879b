use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("astview-tree")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn prints_program_with_default_depth() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Program -\n  body -\n    VariableDeclaration +\n"));
}

#[test]
fn closed_root_with_negative_depth() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json")).arg("--depth").arg("-1");

    cmd.assert().success().stdout("Program +\n");
}

#[test]
fn marks_active_kind() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json"))
        .args(["--depth", "20", "--active", "Identifier"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("*Identifier -"))
        .stdout(predicate::str::contains("*FunctionDeclaration").not());
}

#[test]
fn all_variant_shows_offsets() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json"))
        .args(["--variant", "all", "--depth", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("  start: 0\n"))
        .stdout(predicate::str::contains("  sourceType: \"script\"\n"));
}

#[test]
fn whitelist_flag_replaces_configured_fields() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json"))
        .args(["--depth", "20", "--whitelist", "operator"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("operator: \"+\""))
        .stdout(predicate::str::contains("name:").not());
}

#[test]
fn reads_yaml_trees() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "type: Identifier\nname: x").expect("write tree");

    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout("Identifier -\n  name: \"x\"\n");
}

#[test]
fn config_file_sets_defaults() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[tree]\ninitial_open_depth = 0").expect("write config");

    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(fixture_path("sum.json")).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout("Program -\n  body +\n");
}

#[test]
fn invalid_tree_fails_with_message() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    writeln!(file, "{{\"type\": ").expect("write tree");

    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid JSON tree"));
}

#[test]
fn missing_tree_file_fails() {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.arg("/nonexistent/tree.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}
