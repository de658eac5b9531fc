use crate::common;
use crate::common::command::{
    init_repository_dir, repository_dir, run_twig_command, stdout_of, twig_add_and_commit,
    twig_merge,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn unrelated_histories_are_refused(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = common::head_commit(dir);

    let stranger = TempDir::new()?;
    run_twig_command(stranger.path(), &["init"]).assert().success();
    write_file(FileSpec::new(stranger.path().join("x.txt"), "x\n".to_string()));
    twig_add_and_commit(stranger.path(), "stranger root");
    run_twig_command(dir, &["fetch", stranger.path().to_str().unwrap()])
        .assert()
        .success();

    twig_merge(dir, "remote/master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to merge unrelated histories"));
    run_twig_command(dir, &["merge-base", "master", "remote/master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no merge base between"));

    assert_eq!(common::head_commit(dir), head);
    assert!(common::read_metadata(dir, "MERGE_HEAD").is_none());

    Ok(())
}

#[rstest]
fn merging_into_an_empty_head_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    twig_merge(dir, "master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits on HEAD to merge into"));
}

#[rstest]
fn merge_base_of_a_branch_and_its_descendant(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = common::head_commit(dir).ok_or("HEAD has no commit")?;
    run_twig_command(dir, &["tag", "start"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");

    let base = stdout_of(run_twig_command(dir, &["merge-base", "@", "start"]))?;
    assert_eq!(base.trim(), first);

    Ok(())
}
