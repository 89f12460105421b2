use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "kumis-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_policies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_kumis-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-policies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available policies"));
    assert!(content.contains("perfect"));
    assert!(content.contains("worst"));
}

#[test]
fn cli_runs_all_policies_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_kumis-tester");
    let output_path = temp_path("run");
    let status = Command::new(exe)
        .args([
            "--policy",
            "all",
            "--report",
            "json",
            "--iterations",
            "1",
            "--seeds",
            "5",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = report["results"].as_array().expect("results");
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["passed"] == true));
    assert_eq!(results[0]["runs"][0]["tier"], "perfect");
    assert!(!report["practice"].as_array().expect("practice").is_empty());
}

#[test]
fn cli_rejects_bad_seed() {
    let exe = env!("CARGO_BIN_EXE_kumis-tester");
    let output = Command::new(exe)
        .args(["--policy", "perfect", "--seeds", "not-a-seed"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}

#[test]
fn cli_markdown_report_for_worst_policy() {
    let exe = env!("CARGO_BIN_EXE_kumis-tester");
    let output_path = temp_path("md");
    let status = Command::new(exe)
        .args([
            "--policy",
            "worst",
            "--report",
            "markdown",
            "--iterations",
            "1",
            "--skip-practice",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("# Warisan Mbah Kumis Playthrough Results"));
    assert!(content.contains("| worst | ✅ | 1/1 |"));
    assert!(!content.contains("Practice Set"));
}
