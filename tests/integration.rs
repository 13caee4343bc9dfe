use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("partr").unwrap()
}

fn create_test_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(root.join("file_a.txt"), "hello").unwrap();
    fs::create_dir(root.join("subdir")).unwrap();
    fs::write(root.join("subdir/file_b.txt"), "0123456789").unwrap();
    fs::create_dir(root.join("subdir/nested")).unwrap();
    fs::write(
        root.join("subdir/nested/file_c.txt"),
        "01234567890123456789",
    )
    .unwrap();

    tmp
}

#[test]
fn test_fixed_n_writes_requested_number_of_manifests() {
    let tmp = create_test_tree();
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .arg("-n")
        .arg("2")
        .arg("-o")
        .arg(template.to_str().unwrap())
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .success();

    assert!(out_dir.path().join("part.0").exists());
    assert!(out_dir.path().join("part.1").exists());
    assert!(!out_dir.path().join("part.2").exists());
}

#[test]
fn test_fixed_n_balance_scenario() {
    // Scenario 1: sizes [10,10,10,10,1], -n 2 -> {10,10,1}=21 and {10,10}=20.
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .args(["-n", "2", "-a", "-i", "-", "-o"])
        .arg(template.to_str().unwrap())
        .write_stdin("10 a\n10 b\n10 c\n10 d\n1 e\n")
        .assert()
        .success();

    let p0 = fs::read_to_string(out_dir.path().join("part.0")).unwrap();
    let p1 = fs::read_to_string(out_dir.path().join("part.1")).unwrap();
    let c0 = p0.lines().count();
    let c1 = p1.lines().count();
    let mut counts = [c0, c1];
    counts.sort();
    assert_eq!(counts, [2, 3]);
}

#[test]
fn test_variable_n_overflow_scenario() {
    // Scenario 2: sizes [5,5,100,5], -s 10 -> p0{5,5}, p1{5}, overflow{100}.
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .args(["-s", "10", "-a", "-i", "-", "-o"])
        .arg(template.to_str().unwrap())
        .write_stdin("5 a\n5 b\n100 c\n5 d\n")
        .assert()
        .success();

    assert!(out_dir.path().join("part.0").exists());
    assert!(out_dir.path().join("part.1").exists());
    assert!(out_dir.path().join("part.2").exists());
    assert!(!out_dir.path().join("part.3").exists());

    let overflow = fs::read_to_string(out_dir.path().join("part.2")).unwrap();
    assert!(overflow.contains('c'));
}

#[test]
fn test_rounding_scenario() {
    // Scenario 4: raw=1023, -q 1 -r 512 -> effective = 1024; fits -s 1024 exactly.
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .args(["-s", "1024", "-q", "1", "-r", "512", "-a", "-i", "-", "-o"])
        .arg(template.to_str().unwrap())
        .write_stdin("1023 only\n")
        .assert()
        .success();

    assert!(out_dir.path().join("part.0").exists());
    assert!(!out_dir.path().join("part.1").exists());
}

#[test]
fn test_leaf_dirs_aggregation_scenario() {
    // Scenario 5: /a/{f1=10,f2=20}, /a/b/{f3=30} with -D -> a/b aggregates to 30,
    // a itself is not a leaf (has a subdirectory).
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a");
    fs::create_dir(&a).unwrap();
    fs::write(a.join("f1"), vec![0u8; 10]).unwrap();
    fs::write(a.join("f2"), vec![0u8; 20]).unwrap();
    fs::create_dir(a.join("b")).unwrap();
    fs::write(a.join("b/f3"), vec![0u8; 30]).unwrap();

    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .args(["-n", "1", "-D", "-o"])
        .arg(template.to_str().unwrap())
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .success();

    let manifest = fs::read_to_string(out_dir.path().join("part.0")).unwrap();
    assert!(manifest.contains("f1"));
    assert!(manifest.contains("f2"));
    assert!(manifest.lines().any(|l| l.ends_with("b") || l.ends_with("b/")));
    assert!(!manifest.contains("f3"));
}

#[test]
#[cfg(unix)]
fn test_dnr_empty_flag_emits_single_placeholder_for_unreadable_dir() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("a.txt"), "readable").unwrap();
    let locked = root.join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret.txt"), "unreachable").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let actually_unreadable = fs::read_dir(&locked).is_err();

    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    let assertion = cmd()
        .args(["-n", "1", "-Z", "-o"])
        .arg(template.to_str().unwrap())
        .arg(root.to_str().unwrap())
        .assert();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !actually_unreadable {
        return;
    }

    assertion.success();
    let manifest = fs::read_to_string(out_dir.path().join("part.0")).unwrap();
    let locked_line_count = manifest
        .lines()
        .filter(|l| l.ends_with("locked") || l.ends_with("locked/"))
        .count();
    assert_eq!(
        locked_line_count, 1,
        "expected exactly one manifest line for the unreadable directory, got: {manifest}"
    );
}

#[test]
fn test_live_mode_hook_scenario() {
    // Scenario 6: -L -s 100 with pre/post hooks, stream [60,60,60].
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");
    let hook_log = out_dir.path().join("hooks.log");

    let pre_cmd = format!(
        "echo pre:$FPART_PARTNUMBER >> {}",
        hook_log.display()
    );
    let post_cmd = format!(
        "echo post:$FPART_PARTNUMBER:$FPART_PARTNUMFILES >> {}",
        hook_log.display()
    );

    cmd()
        .args(["-L", "-s", "100", "-a", "-i", "-"])
        .arg("-w")
        .arg(&pre_cmd)
        .arg("-W")
        .arg(&post_cmd)
        .arg("-o")
        .arg(template.to_str().unwrap())
        .write_stdin("60 a\n60 b\n60 c\n")
        .assert()
        .success();

    let log_contents = fs::read_to_string(&hook_log).unwrap();
    let pre_count = log_contents.lines().filter(|l| l.starts_with("pre:")).count();
    let post_count = log_contents.lines().filter(|l| l.starts_with("post:")).count();
    assert_eq!(pre_count, 3);
    assert_eq!(post_count, 3);

    assert!(out_dir.path().join("part.0").exists());
    assert!(out_dir.path().join("part.1").exists());
    assert!(out_dir.path().join("part.2").exists());
}

#[test]
fn test_arbitrary_values_rejects_negative_size_lines() {
    let out_dir = TempDir::new().unwrap();
    let template = out_dir.path().join("part");

    cmd()
        .args(["-n", "1", "-a", "-i", "-", "-o"])
        .arg(template.to_str().unwrap())
        .write_stdin("-5 bad\n10 good\n")
        .assert()
        .success();

    let manifest = fs::read_to_string(out_dir.path().join("part.0")).unwrap();
    assert!(manifest.contains("good"));
    assert!(!manifest.contains("bad"));
}

#[test]
fn test_empty_input_exits_successfully() {
    let empty_dir = TempDir::new().unwrap();
    cmd()
        .arg("-n")
        .arg("2")
        .arg(empty_dir.path().to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn test_nonexistent_path_fails() {
    cmd()
        .arg("-n")
        .arg("1")
        .arg("/nonexistent/path/that/does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn test_missing_primary_selector_fails() {
    let tmp = create_test_tree();
    cmd()
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one of"));
}

#[test]
fn test_incompatible_flags_rejected() {
    let tmp = create_test_tree();
    cmd()
        .args(["-n", "2", "-s", "100"])
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .failure();
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Partitions file trees"));
}

#[test]
fn test_version_flag() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_stdout_template_dash_writes_bare_paths() {
    let tmp = create_test_tree();
    let output = cmd()
        .args(["-n", "1", "-o", "-"])
        .arg(tmp.path().to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("file_a.txt"));
    // No partition-ordinal prefix when writing through "-".
    assert!(!stdout.lines().any(|l| l.starts_with("0 ")));
}

#[test]
fn test_absent_template_prefixes_with_ordinal() {
    let tmp = create_test_tree();
    let output = cmd()
        .args(["-n", "1"])
        .arg(tmp.path().to_str().unwrap())
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().any(|l| l.starts_with("0 ")));
}
