use crate::common;
use crate::common::command::{
    init_repository_dir, repository_dir, run_twig_command, stdout_of, twig_add_and_commit,
};
use crate::common::file::{read_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn fetch_copies_branches(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = init_repository_dir.path();
    run_twig_command(remote, &["branch", "topic"]).assert().success();
    let remote_master = common::head_commit(remote).ok_or("HEAD has no commit")?;

    let local = repository_dir.path();
    run_twig_command(local, &["init"]).assert().success();
    run_twig_command(local, &["fetch", remote.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("From {}\n", remote.display())))
        .stdout(predicate::str::contains(" * master -> refs/remote/master\n"))
        .stdout(predicate::str::contains(" * topic -> refs/remote/topic\n"))
        // one commit, three trees and three blobs
        .stdout(predicate::str::ends_with("Fetched 7 objects\n"));

    assert_eq!(
        common::read_metadata(local, "refs/remote/master"),
        Some(remote_master.clone())
    );
    assert_eq!(
        common::read_metadata(local, "refs/remote/topic"),
        Some(remote_master.clone())
    );
    assert!(common::read_metadata(local, "refs/heads/master").is_none());

    // every fetched object is readable locally
    run_twig_command(local, &["checkout", "remote/master"]).assert().success();
    assert_eq!(read_file(&local.join("a/b/3.txt")), "three\n");

    run_twig_command(local, &["fetch", remote.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Fetched 0 objects\n"));

    Ok(())
}

#[rstest]
fn fetch_brings_only_new_objects(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = init_repository_dir.path();
    let local = repository_dir.path();
    run_twig_command(local, &["init"]).assert().success();
    run_twig_command(local, &["fetch", remote.to_str().unwrap()])
        .assert()
        .success();

    write_generated_files(remote, 1);
    twig_add_and_commit(remote, "Another commit");
    let remote_master = common::head_commit(remote).ok_or("HEAD has no commit")?;

    // one commit, the root tree and the new blob
    let output = stdout_of(run_twig_command(local, &["fetch", remote.to_str().unwrap()]))?;
    assert!(output.ends_with("Fetched 3 objects\n"));
    assert_eq!(
        common::read_metadata(local, "refs/remote/master"),
        Some(remote_master)
    );

    Ok(())
}

#[rstest]
fn fetch_from_a_non_repository_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let local = repository_dir.path();
    run_twig_command(local, &["init"]).assert().success();
    let elsewhere = TempDir::new()?;
    write_generated_files(elsewhere.path(), 1);

    run_twig_command(local, &["fetch", elsewhere.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a twig repository"));

    Ok(())
}
