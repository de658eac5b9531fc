use crate::common;
use crate::common::command::{init_repository_dir, run_twig_command, twig_add_and_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_and_list_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = common::head_commit(dir).ok_or("HEAD has no commit")?;

    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");

    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Branch 'feature/login' created at "));
    run_twig_command(dir, &["branch", "old", &first])
        .assert()
        .success()
        .stdout(format!("Branch 'old' created at {}\n", &first[..7]));

    assert_eq!(common::read_metadata(dir, "refs/heads/old"), Some(first));
    assert_eq!(
        common::read_metadata(dir, "refs/heads/feature/login"),
        common::head_commit(dir)
    );

    run_twig_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  feature/login\n* master\n  old\n");

    Ok(())
}

#[rstest]
fn tags_resolve_like_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["tag", "v1.0"])
        .assert()
        .success()
        .stdout(format!("Tagged {} as 'v1.0'\n", &head[..7]));
    run_twig_command(dir, &["tag", "v1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag 'v1.0' already exists"));

    assert_eq!(common::read_metadata(dir, "refs/tags/v1.0"), Some(head.clone()));
    run_twig_command(dir, &["branch", "from-tag", "v1.0"])
        .assert()
        .success();
    assert_eq!(common::read_metadata(dir, "refs/heads/from-tag"), Some(head));

    Ok(())
}
