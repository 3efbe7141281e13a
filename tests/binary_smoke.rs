use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("file_organizer"));
    // Keep a user's real config file out of the run.
    cmd.env("FILE_ORGANIZER_CONFIG", "");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent-file-organizer-test");
    cmd
}

#[test]
fn binary_print_config_succeeds() {
    bin().arg("--print-config").assert().success();
}

#[test]
fn once_mode_sorts_and_reports_completion() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dest = td.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.png"), b"png").unwrap();
    fs::write(src.join("c.exe"), b"exe").unwrap();

    let out = bin()
        .args(["--source"])
        .arg(&src)
        .arg("--dest")
        .arg(&dest)
        .args(["--stability-interval-ms", "10", "--stability-attempts", "2"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Moved:"), "stdout={stdout}");
    assert!(stdout.contains("Organization completed."), "stdout={stdout}");
    assert!(dest.join("Images").join("a.png").exists());
    assert!(src.join("c.exe").exists());
}

#[test]
fn dry_flag_leaves_tree_untouched() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dest = td.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("b.txt"), b"txt").unwrap();

    let out = bin()
        .arg("--source")
        .arg(&src)
        .arg("--dest")
        .arg(&dest)
        .args(["--dry", "--stability-interval-ms", "10"])
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Would move:"));
    assert!(src.join("b.txt").exists());
    assert!(!dest.exists());
}

#[test]
fn missing_source_fails() {
    let td = tempdir().unwrap();
    bin()
        .arg("--source")
        .arg(td.path().join("absent"))
        .arg("--dest")
        .arg(td.path().join("out"))
        .assert()
        .failure();
}
