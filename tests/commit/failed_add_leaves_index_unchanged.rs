use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn failed_add_leaves_index_unchanged(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let index_before = std::fs::read(dir.join(".twig/index"))?;

    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    run_twig_command(dir, &["add", "new.txt", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "pathspec 'missing.txt' did not match any files",
        ));

    assert_eq!(std::fs::read(dir.join(".twig/index"))?, index_before);
    let tree = stdout_of(run_twig_command(dir, &["write-tree"]))?;
    let head_tree = stdout_of(run_twig_command(dir, &["cat-file", "@"]))?;
    assert!(head_tree.starts_with(&format!("tree {}", tree.trim())));

    Ok(())
}

#[rstest]
fn adding_a_deleted_tracked_file_unstages_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("a/b/3.txt"))?;

    run_twig_command(dir, &["add", "a/b/3.txt"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted: a/b/3.txt"))
        .stdout(predicate::str::contains("Changes not staged").not());

    Ok(())
}
