use crate::common;
use crate::common::command::{
    init_repository_dir, run_twig_command, twig_add_and_commit, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merge_fast_forward(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature"]).assert().success();
    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("feature.txt"), "feature\n".to_string()));
    twig_add_and_commit(dir, "Feature commit");
    let feature = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    twig_merge(dir, "feature")
        .assert()
        .success()
        .stderr(predicate::str::contains("Fast-forward"));

    assert_eq!(common::read_metadata(dir, "refs/heads/master"), Some(feature));
    assert_eq!(read_file(&dir.join("feature.txt")), "feature\n");
    assert!(common::read_metadata(dir, "MERGE_HEAD").is_none());

    Ok(())
}

#[rstest]
fn merging_an_ancestor_is_a_no_op(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "old"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");
    let head = common::head_commit(dir);

    twig_merge(dir, "old")
        .assert()
        .success()
        .stdout("Already up to date.\n");
    twig_merge(dir, "master")
        .assert()
        .success()
        .stdout("Already up to date.\n");

    assert_eq!(common::head_commit(dir), head);
    assert!(common::read_metadata(dir, "MERGE_HEAD").is_none());

    Ok(())
}
