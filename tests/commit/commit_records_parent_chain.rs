use crate::common;
use crate::common::command::{repository_dir, run_twig_command, stdout_of, twig_commit};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_records_parent_chain(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    write_generated_files(dir, 3);
    run_twig_command(dir, &["add", "."]).assert().success();
    twig_commit(dir, "First commit\n\nwith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{7}\] First commit\n$",
        )?);
    let first = common::head_commit(dir).ok_or("HEAD has no commit")?;
    assert_eq!(common::read_metadata(dir, "refs/heads/master"), Some(first.clone()));

    write_generated_files(&dir.join("nested"), 2);
    run_twig_command(dir, &["add", "nested"]).assert().success();
    twig_commit(dir, "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] Second commit\n$")?);
    let second = common::head_commit(dir).ok_or("HEAD has no commit")?;

    let raw = stdout_of(run_twig_command(dir, &["cat-file", &second]))?;
    assert!(raw.contains(&format!("\nparent {first}\n")));
    assert!(raw.ends_with("\n\nSecond commit"));

    Ok(())
}

#[rstest]
fn committing_twice_without_changes_still_moves_head(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_generated_files(dir, 1);
    run_twig_command(dir, &["add", "."]).assert().success();

    twig_commit(dir, "one").assert().success();
    let first = common::head_commit(dir);
    twig_commit(dir, "two").assert().success();

    assert_ne!(common::head_commit(dir), first);
    Ok(())
}
