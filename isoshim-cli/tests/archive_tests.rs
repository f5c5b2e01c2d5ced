use isoshim_cli::commands::archive;
use serde_json::{json, Value};

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| (*t).to_owned()).collect()
}

#[test]
fn parses_full_command_line_to_structured_json() {
    let value = archive::execute(
        "/work/tree",
        &args(&[
            "-i",
            "base.isolate",
            "-s",
            "base.isolated",
            "--subdir",
            "tests",
            "--blacklist",
            "*.pyc",
            "--config-variable",
            "OS=linux",
            "--config-variable",
            "internal",
            "1",
            "--path-variable",
            "DEPTH",
            "../..",
        ]),
    )
    .unwrap();

    assert_eq!(value["isolate"], json!("/work/tree/base.isolate"));
    assert_eq!(value["isolated"], json!("/work/tree/base.isolated"));
    assert_eq!(value["subdir"], json!("tests"));
    assert_eq!(value["blacklist"], json!(["*.pyc"]));
    assert_eq!(value["config_variables"]["OS"], json!("linux"));
    // Integer-looking config values serialize as JSON numbers
    assert_eq!(value["config_variables"]["internal"], json!(1));
    assert_eq!(value["path_variables"]["DEPTH"], json!("../.."));
    assert_eq!(value["ignore_broken_items"], json!(false));
}

#[test]
fn omitted_options_serialize_as_null_or_empty() {
    let value = archive::execute("/work/tree", &args(&["-s", "out.isolated"])).unwrap();

    assert_eq!(value["isolate"], Value::Null);
    assert_eq!(value["subdir"], Value::Null);
    assert_eq!(value["blacklist"], json!([]));
    assert_eq!(value["config_variables"], json!({}));
}

#[test]
fn parse_failure_names_the_root() {
    let err = archive::execute("/work/tree", &args(&["--frobnicate"])).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("/work/tree"));
    assert!(rendered.contains("Unknown option: --frobnicate"));
}

#[test]
fn missing_isolated_fails() {
    let err = archive::execute("/work/tree", &args(&[])).unwrap_err();
    assert!(format!("{err:#}").contains("--isolated is required"));
}
