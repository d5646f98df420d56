use runfix_core::{
    fix_individual_file, resolve_targets, run, FileStatus, RunOptions, TargetSet, Targets,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GROUP_FLOW: &str = r#"appId: com.rezivure.grid
---
# Large group renders every member

- launchApp
- runScript:
    script: |
      api_create_group LargeTestGroup
      for i in $(seq 1 11); do
        api_join_room testuser$i &
      done
      wait
    timeout: 60000
- runScript:
    file: scripts/sleep.js
    env:
      DURATION_MS: "2000"
- assertVisible: "LargeTestGroup"
"#;

const CLEAN_FLOW: &str = "appId: com.rezivure.grid\n---\n- runFlow: flows/login_testuser1.yaml\n- tapOn: \"Settings\"\n";

fn list(files: &[&str], exclude: &[&str]) -> TargetSet {
    TargetSet::List {
        files: files.iter().map(ToString::to_string).collect(),
        exclude: exclude.iter().map(ToString::to_string).collect(),
    }
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_changed_file_backup_matches_original() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("73_group.yaml"), GROUP_FLOW).unwrap();

    let targets = resolve_targets(temp.path(), &list(&["73_group.yaml"], &[])).unwrap();
    let report = run(temp.path(), &targets, &RunOptions::default());

    assert_eq!(report.outcomes[0].status, FileStatus::Fixed);
    assert_eq!(
        fs::read_to_string(temp.path().join("73_group.yaml.backup")).unwrap(),
        GROUP_FLOW
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("73_group.yaml")).unwrap(),
        fix_individual_file(GROUP_FLOW)
    );
}

#[test]
fn test_group_flow_rewrite() {
    let output = fix_individual_file(GROUP_FLOW);

    assert!(output.contains("- runFlow: flows/login_testuser1.yaml\n"));
    assert!(output.contains(
        "    script: cd .maestro/helpers && ./setup_large_group.sh LargeTestGroup 1 11 7200\n    timeout: 30000\n"
    ));
    assert!(output.contains("- delay: 2000\n"));
    assert!(!output.contains("api_create_group"));
    assert!(!output.contains("sleep.js"));
    assert!(output.ends_with("- assertVisible: \"LargeTestGroup\"\n"));
}

#[test]
fn test_unchanged_file_is_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("clean.yaml");
    fs::write(&path, CLEAN_FLOW).unwrap();

    let targets = resolve_targets(temp.path(), &list(&["clean.yaml"], &[])).unwrap();
    let report = run(temp.path(), &targets, &RunOptions::default());

    assert_eq!(report.outcomes[0].status, FileStatus::Unchanged);
    assert_eq!(fs::read(&path).unwrap(), CLEAN_FLOW.as_bytes());
    assert_eq!(names(temp.path()), vec!["clean.yaml"]);
}

#[test]
fn test_missing_file_creates_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("present.yaml"), GROUP_FLOW).unwrap();

    let targets =
        resolve_targets(temp.path(), &list(&["absent.yaml", "present.yaml"], &[])).unwrap();
    let report = run(temp.path(), &targets, &RunOptions::default());

    assert_eq!(report.outcomes[0].status, FileStatus::NotFound);
    assert_eq!(report.outcomes[1].status, FileStatus::Fixed);
    assert_eq!(
        names(temp.path()),
        vec!["present.yaml", "present.yaml.backup"]
    );
}

#[test]
fn test_excluded_files_are_never_touched() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("71_done.yaml"), GROUP_FLOW).unwrap();
    fs::write(temp.path().join("72_todo.yaml"), GROUP_FLOW).unwrap();

    let targets = resolve_targets(
        temp.path(),
        &list(&["71_done.yaml", "72_todo.yaml"], &["71_done.yaml"]),
    )
    .unwrap();
    assert_eq!(targets.excluded, vec!["71_done.yaml".to_string()]);

    let report = run(temp.path(), &targets, &RunOptions::default());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].file, "72_todo.yaml");
    assert_eq!(
        fs::read_to_string(temp.path().join("71_done.yaml")).unwrap(),
        GROUP_FLOW
    );
    assert!(!temp.path().join("71_done.yaml.backup").exists());
}

#[test]
fn test_second_run_finds_nothing_to_do() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.yaml"), GROUP_FLOW).unwrap();
    let targets = Targets {
        files: vec!["a.yaml".to_string()],
        excluded: vec![],
    };

    run(temp.path(), &targets, &RunOptions::default());
    let rewritten = fs::read_to_string(temp.path().join("a.yaml")).unwrap();
    fs::remove_file(temp.path().join("a.yaml.backup")).unwrap();

    let report = run(temp.path(), &targets, &RunOptions::default());
    assert_eq!(report.outcomes[0].status, FileStatus::Unchanged);
    assert_eq!(fs::read_to_string(temp.path().join("a.yaml")).unwrap(), rewritten);
    assert!(!temp.path().join("a.yaml.backup").exists());
}
