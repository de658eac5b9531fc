use crate::common;
use crate::common::command::{
    init_repository_dir, repository_dir, run_twig_command, twig_add_and_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::path::Path;

/// Local repository cloned from `remote` by fetching and checking out its master
fn clone_into(remote: &Path, local: &Path) {
    run_twig_command(local, &["init"]).assert().success();
    run_twig_command(local, &["fetch", remote.to_str().unwrap()])
        .assert()
        .success();
    run_twig_command(local, &["branch", "master", "remote/master"])
        .assert()
        .success();
    run_twig_command(local, &["checkout", "master"]).assert().success();
}

#[rstest]
fn push_fast_forwards_remote(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = init_repository_dir.path();
    let local = repository_dir.path();
    clone_into(remote, local);
    let old = common::head_commit(local).ok_or("HEAD has no commit")?;

    write_file(FileSpec::new(local.join("a/2.txt"), "two, pushed\n".to_string()));
    twig_add_and_commit(local, "Local work");
    let new = common::head_commit(local).ok_or("HEAD has no commit")?;

    run_twig_command(local, &["push", remote.to_str().unwrap(), "master"])
        .assert()
        .success()
        .stdout(format!(
            "To {}\n   {}..{}  master -> master\n",
            remote.display(),
            &old[..7],
            &new[..7]
        ));

    assert_eq!(common::read_metadata(remote, "refs/heads/master"), Some(new.clone()));
    // the remote can read the pushed commit, its trees and the new blob
    run_twig_command(remote, &["show", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+two, pushed\n"));

    Ok(())
}

#[rstest]
fn push_creates_a_missing_branch(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = init_repository_dir.path();
    let local = repository_dir.path();
    clone_into(remote, local);

    run_twig_command(local, &["branch", "feature"]).assert().success();
    run_twig_command(local, &["push", remote.to_str().unwrap(), "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(new).."));

    assert_eq!(
        common::read_metadata(remote, "refs/heads/feature"),
        common::head_commit(local)
    );

    Ok(())
}

#[rstest]
fn non_fast_forward_push_is_refused(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = init_repository_dir.path();
    let local = repository_dir.path();
    clone_into(remote, local);

    write_file(FileSpec::new(remote.join("1.txt"), "remote side\n".to_string()));
    twig_add_and_commit(remote, "Remote work");
    let remote_head = common::head_commit(remote);

    write_file(FileSpec::new(local.join("1.txt"), "local side\n".to_string()));
    twig_add_and_commit(local, "Local work");

    run_twig_command(local, &["push", remote.to_str().unwrap(), "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to push master"));

    assert_eq!(common::read_metadata(remote, "refs/heads/master"), remote_head);

    Ok(())
}

#[rstest]
fn pushing_an_unknown_branch_fails(init_repository_dir: TempDir, repository_dir: TempDir) {
    let remote = init_repository_dir.path();
    let local = repository_dir.path();
    clone_into(remote, local);

    run_twig_command(local, &["push", remote.to_str().unwrap(), "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refs/heads/nope"));
}
