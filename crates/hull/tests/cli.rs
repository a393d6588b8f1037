use assert_cmd::Command; // Bring Command into scope
use predicates::prelude::*; // Bring predicate traits into scope

const GRAPH_OK: &str = r#"{
    "modules": {
        "m1": {"loading": "required", "has_descriptor": true},
        "d1": {"loading": "optional", "has_descriptor": true}
    },
    "targets": {
        "m1": [{"target": "d1", "scope": "compile"}],
        "d1": []
    },
    "products": {"DemoProduct": []}
}"#;

const GRAPH_OWNED: &str = r#"{
    "modules": {
        "m1": {"loading": "required", "has_descriptor": true},
        "d2": {
            "loading": "optional",
            "has_descriptor": true,
            "owners": [{"target": "p.plugin", "plugin_id": "com.example.p"}]
        }
    },
    "targets": {
        "m1": [{"target": "d2"}],
        "d2": []
    },
    "products": {"DemoProduct": []}
}"#;

const SPEC: &str = r#"{
    "product": "DemoProduct",
    "plugin_id": "com.example.tests",
    "modules": [{"name": "m1", "loading": "required"}]
}"#;

fn write_files(graph: &str, spec: &str) -> (tempfile::TempDir, String, String) {
    let dir = tempfile::tempdir().unwrap();
    let graph_path = dir.path().join("graph.json");
    let spec_path = dir.path().join("spec.json");
    std::fs::write(&graph_path, graph).unwrap();
    std::fs::write(&spec_path, spec).unwrap();
    let graph_path = graph_path.to_string_lossy().into_owned();
    let spec_path = spec_path.to_string_lossy().into_owned();
    (dir, graph_path, spec_path)
}

#[test]
fn test_resolve_prints_auto_added_modules() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, graph, spec) = write_files(GRAPH_OK, SPEC);

    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args(["resolve", "--graph", &graph, "--spec", &spec, "--chains"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 content modules (1 declared, 1 auto-added)"))
        .stdout(predicate::str::contains("+ d1 (optional)"))
        .stdout(predicate::str::contains("chain: m1 -> d1"));

    Ok(())
}

#[test]
fn test_resolve_fails_on_ownership_errors() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, graph, spec) = write_files(GRAPH_OWNED, SPEC);

    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args(["resolve", "--graph", &graph, "--spec", &spec]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("com.example.p"))
        .stdout(predicate::str::contains("1 content modules"));

    Ok(())
}

#[test]
fn test_resolve_update_mode_writes_suppressions() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, graph, spec) = write_files(GRAPH_OWNED, SPEC);
    let suppressions = dir.path().join("suppressions.json");
    std::fs::write(&suppressions, "{}").unwrap();
    let suppressions = suppressions.to_string_lossy().into_owned();

    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args([
        "resolve",
        "--graph",
        &graph,
        "--spec",
        &spec,
        "--suppressions",
        &suppressions,
        "--update-suppressions",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 suppression usages recorded"))
        .stdout(predicate::str::contains("suppression file updated"));

    let written = std::fs::read_to_string(&suppressions)?;
    assert!(written.contains("d2"), "suppression file not updated: {written}");

    Ok(())
}

#[test]
fn test_resolve_rejects_missing_graph_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, _graph, spec) = write_files(GRAPH_OK, SPEC);

    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args(["resolve", "--graph", "/nonexistent/graph.json", "--spec", &spec]);

    cmd.assert().failure().code(1);

    Ok(())
}

#[test]
fn test_extract_prints_content_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("plugin.json");
    std::fs::write(
        &descriptor,
        r#"{
            "content": [{"name": "app.core", "loading": "required"}],
            "includes": ["extras.json"]
        }"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("extras.json"),
        r#"{"content": [{"name": "app.extras"}], "aliases": ["com.example.alias"]}"#,
    )
    .unwrap();

    let descriptor_arg = descriptor.to_string_lossy().into_owned();
    let dir_arg = dir.path().to_string_lossy().into_owned();
    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args([
        "extract",
        "--descriptor",
        descriptor_arg.as_str(),
        "--include-dir",
        dir_arg.as_str(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 content modules across 2 files"))
        .stdout(predicate::str::contains("app.core (required)"))
        .stdout(predicate::str::contains("aliases: com.example.alias"));

    Ok(())
}

#[test]
fn test_extract_reports_missing_includes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("plugin.json");
    std::fs::write(
        &descriptor,
        r#"{"content": [{"name": "app.core"}], "includes": ["ghost.json"]}"#,
    )
    .unwrap();

    let descriptor_arg = descriptor.to_string_lossy().into_owned();
    let dir_arg = dir.path().to_string_lossy().into_owned();
    let mut cmd = Command::cargo_bin("hull")?;
    cmd.args([
        "extract",
        "--descriptor",
        descriptor_arg.as_str(),
        "--include-dir",
        dir_arg.as_str(),
    ]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("ghost.json"));

    Ok(())
}
