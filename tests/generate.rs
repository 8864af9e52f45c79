//! End-to-end draft generation against a scratch project.

mod common;

use common::{TestProject, BASE_HTML};
use std::collections::BTreeSet;

fn changelog_numbers(text: &str) -> Vec<u32> {
    text.lines()
        .filter_map(|line| line.strip_prefix("## Draft "))
        .filter_map(|rest| rest.split(':').next())
        .filter_map(|n| n.trim().parse().ok())
        .collect()
}

#[test]
fn generate_writes_seven_distinct_drafts_and_changelog() {
    let project = TestProject::new().expect("create project");
    let stdout = project.drafts_ok(&["generate"]);
    assert!(stdout.contains("wrote drafts/1/index.html"), "{stdout}");
    assert!(stdout.contains("wrote drafts/README.md"), "{stdout}");

    let mut seen = BTreeSet::new();
    for n in 1..=7 {
        let html = project.read(&format!("drafts/{n}/index.html"));
        assert_ne!(html, BASE_HTML, "draft {n} must differ from the base");
        assert!(html.contains(&format!("data-draft=\"{n}\"")));
        assert!(html.contains("--palette-primary: #1f3a5f;"));
        assert!(seen.insert(html), "draft {n} duplicates another draft");
    }
    assert!(!project.path("drafts/8").exists());

    let changelog = project.read("drafts/README.md");
    assert!(changelog.starts_with("# Drafts\n"));
    assert_eq!(changelog_numbers(&changelog), (1..=7).collect::<Vec<_>>());

    assert_eq!(project.read("index.html"), BASE_HTML);
    assert!(project.path(".drafts/lock.json").is_file());
    let leftover_txns = project
        .path(".drafts/txns")
        .read_dir()
        .is_ok_and(|mut entries| entries.next().is_some());
    assert!(!leftover_txns, "staging transactions must be cleaned up");
}

#[test]
fn status_reports_complete_after_generate() {
    let project = TestProject::new().expect("create project");

    let before = project.drafts(&["status", "--json"]);
    assert!(!before.status.success(), "status must fail before generate");

    project.drafts_ok(&["generate"]);
    let stdout = project.drafts_ok(&["status", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("status JSON");
    assert_eq!(report["decision"], "complete");
    let ids: Vec<&str> = report["checks"]
        .as_array()
        .expect("checks array")
        .iter()
        .filter_map(|check| check["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "drafts_present",
            "drafts_distinct",
            "changelog_entries",
            "base_unchanged",
            "staging_scoped"
        ]
    );
}

#[test]
fn status_detects_modified_base() {
    let project = TestProject::new().expect("create project");
    project.drafts_ok(&["generate"]);
    std::fs::write(project.path("index.html"), "<html>edited</html>").expect("edit base");

    let output = project.drafts(&["status"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[FAIL] base_unchanged"), "{stdout}");
    assert!(stdout.contains("decision: incomplete"), "{stdout}");
}

#[test]
fn second_generate_requires_force_and_keeps_one_entry_per_draft() {
    let project = TestProject::new().expect("create project");
    project.drafts_ok(&["generate"]);

    let again = project.drafts(&["generate"]);
    assert!(!again.status.success());
    let stderr = String::from_utf8_lossy(&again.stderr);
    assert!(stderr.contains("--force"), "{stderr}");

    project.drafts_ok(&["generate", "--force", "--accent", "#ff6600"]);
    let changelog = project.read("drafts/README.md");
    assert_eq!(changelog_numbers(&changelog), (1..=7).collect::<Vec<_>>());
    assert!(project
        .read("drafts/3/index.html")
        .contains("--palette-accent: #ff6600;"));
    project.drafts_ok(&["status"]);
}

#[test]
fn existing_changelog_notes_are_preserved() {
    let project = TestProject::new().expect("create project");
    std::fs::create_dir_all(project.path("drafts")).expect("create drafts dir");
    std::fs::write(
        project.path("drafts/README.md"),
        "# Drafts\n\nReview notes from the design sync.\n",
    )
    .expect("seed changelog");

    project.drafts_ok(&["generate"]);
    let changelog = project.read("drafts/README.md");
    assert!(changelog.starts_with("# Drafts\n\nReview notes from the design sync.\n"));
    assert_eq!(changelog_numbers(&changelog), (1..=7).collect::<Vec<_>>());

    project.drafts_ok(&["generate", "--force"]);
    let changelog = project.read("drafts/README.md");
    assert!(
        changelog.starts_with("# Drafts\n\nReview notes from the design sync.\n"),
        "{changelog}"
    );
    assert_eq!(changelog_numbers(&changelog), (1..=7).collect::<Vec<_>>());
    project.drafts_ok(&["status"]);
}

#[test]
fn init_rejects_drafts_dir_that_overlaps_project_state() {
    let project = TestProject::new().expect("create project");
    for drafts_dir in [".", "./", "./.drafts", ".drafts/out"] {
        let output = project.drafts(&["init", "--drafts-dir", drafts_dir]);
        assert!(!output.status.success(), "{drafts_dir:?} should be rejected");
    }
    let output = project.drafts(&[
        "init",
        "--base",
        "drafts/index.html",
        "--drafts-dir",
        "./drafts",
    ]);
    assert!(!output.status.success());
    assert!(!project.path(".drafts/config.json").exists());
    assert!(!project.path("1").exists());
}

#[test]
fn init_config_drives_generate() {
    let project = TestProject::new().expect("create project");
    std::fs::write(project.path("home.html"), BASE_HTML).expect("write alt base");
    project.drafts_ok(&[
        "init",
        "--base",
        "home.html",
        "--drafts-dir",
        "variants",
        "--primary",
        "#112233",
    ]);
    let config: serde_json::Value =
        serde_json::from_str(&project.read(".drafts/config.json")).expect("config JSON");
    assert_eq!(config["palette"]["primary"], "#112233");

    let again = project.drafts(&["init"]);
    assert!(!again.status.success(), "init must not overwrite without --force");

    project.drafts_ok(&["generate"]);
    assert!(project
        .read("variants/7/index.html")
        .contains("--palette-primary: #112233;"));
    assert!(project.path("variants/README.md").is_file());
    assert!(!project.path("drafts").exists());
}

#[test]
fn missing_base_is_an_error() {
    let project = TestProject::new().expect("create project");
    std::fs::remove_file(project.path("index.html")).expect("remove base");
    let output = project.drafts(&["generate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read base page"), "{stderr}");
    assert!(!project.path("drafts").exists());
}

#[cfg(unix)]
#[test]
fn lm_command_styles_each_draft() {
    let project = TestProject::new().expect("create project");
    let script = project.path("fake-lm.sh");
    std::fs::write(
        &script,
        "#!/bin/sh\nline=$(grep '^Draft: ')\nprintf '```html\\n<html><body>%s</body></html>\\n```\\n' \"$line\"\n",
    )
    .expect("write fake lm");
    let lm = format!("sh {}", script.display());

    project.drafts_ok(&["generate", "--lm", &lm]);
    assert_eq!(
        project.read("drafts/4/index.html"),
        "<html><body>Draft: 4 Soft Cards</body></html>\n"
    );

    let copy_lm = "sh -c 'cat >/dev/null; printf same'";
    let output = project.drafts(&["generate", "--force", "--lm", copy_lm]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("are identical"), "{stderr}");
    assert_eq!(
        project.read("drafts/4/index.html"),
        "<html><body>Draft: 4 Soft Cards</body></html>\n",
        "failed generate must not publish"
    );
}

#[cfg(unix)]
#[test]
fn lm_command_falls_back_to_environment() {
    let project = TestProject::new().expect("create project");
    let script = project.path("env-lm.sh");
    std::fs::write(
        &script,
        "#!/bin/sh\nline=$(grep '^Draft: ')\nprintf '<html><body>env %s</body></html>' \"$line\"\n",
    )
    .expect("write fake lm");
    let lm = format!("sh {}", script.display());

    let output = project.drafts_with_env(&["generate"], &[("DRAFTS_LM_COMMAND", lm.as_str())]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        project.read("drafts/2/index.html"),
        "<html><body>env Draft: 2 Editorial</body></html>\n"
    );
}
