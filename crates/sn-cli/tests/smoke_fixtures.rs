use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sn-cli"))
        .args(args)
        .output()
        .expect("cli should execute")
}

fn line_value<'a>(stdout: &'a str, prefix: &str) -> Option<&'a str> {
    stdout.lines().find_map(|line| line.strip_prefix(prefix))
}

#[test]
fn translate_matches_expected_scripts_for_all_fixtures() {
    let root = fixtures_root();
    let mut trees = fs::read_dir(root.join("sentences"))
        .expect("fixture sentences must exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();
    trees.sort();

    assert!(!trees.is_empty(), "expected fixture sentences");

    for tree in trees {
        let output = run(&["translate", "--tree", &tree.to_string_lossy()]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            panic!(
                "fixture {} failed\nstdout:\n{}\nstderr:\n{}",
                tree.display(),
                stdout,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        assert!(
            stdout.contains("RESULT:OK"),
            "stdout missing RESULT:OK for {}",
            tree.display()
        );

        let script = line_value(&stdout, "SCRIPT_JSON:").expect("stdout should carry the script");
        let actual: serde_json::Value = serde_json::from_str(script).expect("script json");

        let stem = tree
            .file_stem()
            .expect("fixture file stem")
            .to_string_lossy()
            .to_string();
        let expected_path = root.join("expected").join(format!("{}.json", stem));
        let expected: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&expected_path).expect("expected script should exist"),
        )
        .expect("expected json");
        assert_eq!(actual, expected, "script mismatch for {}", tree.display());
    }
}

#[test]
fn batch_translates_session_fixtures_in_order() {
    let trees_dir = fixtures_root().join("session");
    let state_out = std::env::temp_dir().join(format!(
        "sn-cli-smoke-session-{}.json",
        std::process::id()
    ));

    let output = run(&[
        "batch",
        "--trees-dir",
        &trees_dir.to_string_lossy(),
        "--state-out",
        &state_out.to_string_lossy(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "batch failed:\n{}", stdout);
    assert_eq!(line_value(&stdout, "SOURCES:"), Some("3"));

    let sources = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("SOURCE:"))
        .collect::<Vec<_>>();
    assert_eq!(
        sources,
        vec!["01-make-list.tree", "02-add-item.tree", "03-read-first.tree"]
    );

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_out).expect("state file")).expect("json");
    assert_eq!(state["schemaVersion"], "sn-session.v1");
    assert_eq!(
        state["session"]["environment"]["variables"]["total"],
        serde_json::json!(["getLine:ofList:", 1, "names"])
    );
}

#[test]
fn translate_reports_errors_with_codes() {
    let tree = std::env::temp_dir().join(format!("sn-cli-smoke-eighth-{}.tree", std::process::id()));
    fs::write(
        &tree,
        "(Start (S (AL (AP (DataCommand (Delete delete) (Det the) (OrderAdverb eighth) (Ele item) (Of of) (LIST_NAME names))))))",
    )
    .expect("tree should be written");

    let output = run(&["translate", "--tree", &tree.to_string_lossy()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("RESULT:ERROR"));
    assert_eq!(line_value(&stdout, "ERROR_CODE:"), Some("UNSUPPORTED_ORDINAL"));
    let message: String = serde_json::from_str(
        line_value(&stdout, "ERROR_MSG_JSON:").expect("error message line"),
    )
    .expect("message json");
    assert!(message.contains("eighth"));
}

#[test]
fn vocabulary_lists_categories_and_rules() {
    let output = run(&["vocabulary", "--sound", "bark"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    let vocabulary: serde_json::Value = serde_json::from_str(
        line_value(&stdout, "VOCABULARY_JSON:").expect("vocabulary line"),
    )
    .expect("vocabulary json");
    assert_eq!(
        vocabulary["categories"]["NAME_OF_SOUND"],
        serde_json::json!(["bark"])
    );
    assert!(vocabulary["rules"]
        .as_array()
        .expect("rule list")
        .contains(&serde_json::json!("Start -> S")));
}
