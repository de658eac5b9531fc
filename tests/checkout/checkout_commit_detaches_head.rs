use crate::common;
use crate::common::command::{init_repository_dir, run_twig_command, twig_add_and_commit};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = common::head_commit(dir).ok_or("HEAD has no commit")?;

    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");
    let second = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "HEAD is now at {} Initial commit",
            &first[..7]
        )));

    assert_eq!(common::read_metadata(dir, "HEAD"), Some(first.clone()));
    assert_eq!(common::read_metadata(dir, "refs/heads/master"), Some(second));
    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("HEAD detached at {}\n", &first[..7])));

    Ok(())
}

#[rstest]
fn reset_moves_the_branch_only(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = common::head_commit(dir).ok_or("HEAD has no commit")?;
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");

    run_twig_command(dir, &["reset", &first])
        .assert()
        .success()
        .stdout(format!("HEAD is now at {}\n", &first[..7]));

    assert_eq!(
        common::read_metadata(dir, "HEAD").as_deref(),
        Some("ref: refs/heads/master")
    );
    assert_eq!(common::read_metadata(dir, "refs/heads/master"), Some(first));
    assert_eq!(read_file(&dir.join("1.txt")), "uno\n");

    Ok(())
}
