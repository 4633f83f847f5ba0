use assert_cmd::Command;

#[test]
fn help_lists_command_surface() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn version_is_reported() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
