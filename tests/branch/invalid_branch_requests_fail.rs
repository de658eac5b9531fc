use crate::common::command::{init_repository_dir, repository_dir, run_twig_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("../escape")]
#[case("bad..name")]
#[case(".hidden")]
#[case("ends/")]
#[case("name.lock")]
#[case("with space")]
#[case("tilde~1")]
fn invalid_branch_name_is_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ref name"));
}

#[rstest]
fn duplicate_branch_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "topic"]).assert().success();

    run_twig_command(dir, &["branch", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a branch named 'topic' already exists"));
}

#[rstest]
fn branch_from_a_non_commit_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let tree = stdout_of(run_twig_command(dir, &["write-tree"]))?;

    run_twig_command(dir, &["branch", "topic", tree.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected commit, got tree"));
    assert!(!dir.join(".twig/refs/heads/topic").exists());

    Ok(())
}

#[rstest]
fn branch_without_commits_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    run_twig_command(dir, &["branch", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision or ref name: @"));
}
