use crate::common;
use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("index")]
#[case("objects")]
fn checkout_branch_named_like_metadata(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();
    let head = common::head_commit(dir).unwrap();

    run_twig_command(dir, &["branch", name]).assert().success();
    run_twig_command(dir, &["checkout", name]).assert().success();

    assert_eq!(
        common::read_metadata(dir, "HEAD"),
        Some(format!("ref: refs/heads/{name}"))
    );
    run_twig_command(dir, &["log", name])
        .assert()
        .success()
        .stdout(predicate::str::contains(head));
}
