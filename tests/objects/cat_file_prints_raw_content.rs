use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn cat_file_prints_raw_content(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let blob_id = stdout_of(run_twig_command(dir, &["hash-object", "1.txt"]))?;

    run_twig_command(dir, &["cat-file", blob_id.trim()])
        .assert()
        .success()
        .stdout("one\n");

    let commit = stdout_of(run_twig_command(dir, &["cat-file", "master", "--type", "commit"]))?;
    assert!(commit.starts_with("tree "));
    assert!(commit.ends_with("\n\nInitial commit"));
    assert!(!commit.contains("parent "));

    Ok(())
}

#[rstest]
fn cat_file_rejects_a_type_mismatch(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["cat-file", "master", "--type", "blob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected blob, got commit"));
}

#[rstest]
fn cat_file_of_an_unknown_name_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["cat-file", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision or ref name: nowhere"));
}
