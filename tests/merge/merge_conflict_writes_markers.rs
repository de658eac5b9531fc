use crate::common;
use crate::common::command::{
    repository_dir, run_twig_command, twig_add_and_commit, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merge_conflict_writes_markers(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("greeting.txt"), "hello\n".to_string()));
    twig_add_and_commit(dir, "base");
    run_twig_command(dir, &["branch", "other"]).assert().success();

    write_file(FileSpec::new(dir.join("greeting.txt"), "hello from master\n".to_string()));
    twig_add_and_commit(dir, "master side");

    run_twig_command(dir, &["checkout", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("greeting.txt"), "hello from other\n".to_string()));
    twig_add_and_commit(dir, "other side");
    let other = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CONFLICT (content): Merge conflict in greeting.txt",
        ))
        .stdout(predicate::str::contains(
            "Automatic merge failed; fix conflicts and then commit the result.",
        ));

    assert_eq!(
        read_file(&dir.join("greeting.txt")),
        "<<<<<<< HEAD\nhello from master\n=======\nhello from other\n>>>>>>> MERGE_HEAD\n"
    );
    assert_eq!(common::read_metadata(dir, "MERGE_HEAD"), Some(other.clone()));
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Merging with {}", &other[..7])));

    Ok(())
}
