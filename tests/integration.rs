//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

use assert_cmd::Command;

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String
{
	String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn analyze_quadruple_fidelity()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("tests/samples/valid/quadruple_fidelity.tc");
	let assert = cmd.assert().success();
	let stdout = stdout_of(&assert);
	assert!(stdout.contains("(*, b, 2, t0)"), "{}", stdout);
	assert!(stdout.contains("(=, t1, _, c)"), "{}", stdout);
}

#[test]
fn analyze_multiple_files()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("tests/samples/valid/functions.tc");
	cmd.arg("tests/samples/valid/control_flow.tc");
	cmd.assert().success();
}

#[test]
fn print_listing()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("--format=listing");
	cmd.arg("tests/samples/valid/quadruple_fidelity.tc");
	let assert = cmd.assert().success();
	let stdout = stdout_of(&assert);
	assert!(stdout.contains("    t1 = a + t0"), "{}", stdout);
}

#[test]
fn dump_symbols_when_verbose()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("--verbose");
	cmd.arg("tests/samples/valid/pointers.tc");
	let assert = cmd.assert().success();
	let stdout = stdout_of(&assert);
	assert!(stdout.contains("int**"), "{}", stdout);
	assert!(stdout.contains("Identifier(\"value\")"), "{}", stdout);
}

#[test]
fn write_to_out_dir()
{
	let outdir = tempfile::tempdir().unwrap();
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("--out-dir");
	cmd.arg(outdir.path());
	cmd.arg("tests/samples/valid/declaration_and_assignment.tc");
	cmd.assert().success();
	let written = std::fs::read_to_string(
		outdir.path().join("declaration_and_assignment.tac"),
	)
	.unwrap();
	assert_eq!(written, "(=, 5, _, a)\n");
}

#[test]
fn load_options_from_config()
{
	let dir = tempfile::tempdir().unwrap();
	let config = dir.path().join("tacit.toml");
	let outdir = dir.path().join("out");
	let raw = format!(
		"format = \"listing\"\ncolor = \"never\"\nout_dir = {:?}\n",
		outdir.to_string_lossy()
	);
	std::fs::write(&config, raw).unwrap();

	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--config");
	cmd.arg(&config);
	cmd.arg("tests/samples/valid/declaration_and_assignment.tc");
	cmd.assert().success();
	let written =
		std::fs::read_to_string(outdir.join("declaration_and_assignment.tac"))
			.unwrap();
	assert_eq!(written, "    a = 5\n");
}

#[test]
fn reject_unknown_config_keys()
{
	let dir = tempfile::tempdir().unwrap();
	let config = dir.path().join("tacit.toml");
	std::fs::write(&config, "backend = \"clang\"\n").unwrap();

	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--config");
	cmd.arg(&config);
	cmd.arg("tests/samples/valid/declaration_and_assignment.tc");
	cmd.assert().failure();
}

#[test]
fn fail_on_semantic_errors()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("--arrows=ascii");
	cmd.arg("tests/samples/invalid/narrowing_assignment.tc");
	let assert = cmd.assert().failure();
	// The code is still generated.
	let stdout = stdout_of(&assert);
	assert!(stdout.contains("(=, 3.14, _, n)"), "{}", stdout);
	let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
	assert!(stderr.contains("E500"), "{}", stderr);
}

#[test]
fn fail_on_syntax_error()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("--color=never");
	cmd.arg("tests/samples/invalid/unexpected_end_of_file.tc");
	let assert = cmd.assert().failure();
	let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
	assert!(stderr.contains("E301"), "{}", stderr);
}

#[test]
fn fail_on_missing_file()
{
	let mut cmd = Command::cargo_bin("tacit").unwrap();
	cmd.arg("tests/samples/valid/does_not_exist.tc");
	cmd.assert().failure();
}
