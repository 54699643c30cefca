//! End-to-end scenarios from `spec.md` §8: write a `.wtf` source to a temp
//! directory, run the `wtfc` binary over it, and assert on stdout.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn run_source(source: &str) -> assert_cmd::assert::Assert {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("main.wtf");
    fs::write(&entry, source).unwrap();
    Command::cargo_bin("wtfc")
        .unwrap()
        .current_dir(dir.path())
        .arg("main.wtf")
        .assert()
}

#[test]
fn arithmetic_precedence() {
    run_source("extern pdoub(n)\npdoub(1+2*3);\n")
        .success()
        .stdout(predicate::eq("7"));
}

#[test]
fn user_operator_is_left_associative() {
    run_source("extern pdoub(n)\nop : 15 (a b) a-b end\npdoub(10 : 4 : 3);\n")
        .success()
        .stdout(predicate::eq("3"));
}

#[test]
fn recursive_fibonacci() {
    let source = "extern pdoub(n) extern pline()\n\
                  func fib(n) if n<2 then n else fib(n-1)+fib(n-2) end end\n\
                  pdoub(fib(10)); pline();\n";
    run_source(source).success().stdout(predicate::eq("55\n"));
}

#[test]
fn for_loop_accumulates_into_a_var_binding() {
    let source = "extern pdoub(n)\n\
                  func sumto(n)\n\
                    var s = 0\n\
                    for i = 1, i<n+1, 1 in s = s + i end\n\
                    s\n\
                  end\n\
                  pdoub(sumto(5));\n";
    run_source(source).success().stdout(predicate::eq("15"));
}

#[test]
fn conditional_with_elsif_picks_middle_branch() {
    let source = "extern pdoub(n)\nif 0 then pdoub(1) elsif 1 then pdoub(2) else pdoub(3) end;\n";
    run_source(source).success().stdout(predicate::eq("2"));
}

#[test]
fn for_loop_prints_each_iteration() {
    let source = "extern pdoub(n)\nfor i = 1, i<3, 1 in pdoub(i) end;\n";
    run_source(source).success().stdout(predicate::eq("12"));
}

#[test]
fn import_shares_codegen_with_the_importing_driver() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.wtf"), "func g(x) x*x end\n").unwrap();
    fs::write(
        dir.path().join("main.wtf"),
        "extern pdoub(n)\nimport 'a'\npdoub(g(4));\n",
    )
    .unwrap();

    Command::cargo_bin("wtfc")
        .unwrap()
        .current_dir(dir.path())
        .arg("main.wtf")
        .assert()
        .success()
        .stdout(predicate::eq("16"));
}

#[test]
fn missing_source_file_exits_nonzero() {
    Command::cargo_bin("wtfc")
        .unwrap()
        .arg("/nonexistent/path/to/file.wtf")
        .assert()
        .failure();
}

#[test]
fn missing_cli_argument_exits_nonzero() {
    Command::cargo_bin("wtfc").unwrap().assert().failure();
}
