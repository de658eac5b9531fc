use crate::common;
use crate::common::command::{
    repository_dir, run_twig_command, stdout_of, twig_add_and_commit, twig_commit, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// Both sides touch different lines, so the merge is clean and the
/// merge commit has B and C as parents.
#[rstest]
fn merge_simple_divergence(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(
        dir.join("shared.txt"),
        "first\nsecond\nthird\nfourth\nfifth\n".to_string(),
    ));
    write_file(FileSpec::new(dir.join("doomed.txt"), "bye\n".to_string()));
    twig_add_and_commit(dir, "Commit A - base");

    run_twig_command(dir, &["branch", "feature"]).assert().success();

    write_file(FileSpec::new(
        dir.join("shared.txt"),
        "FIRST\nsecond\nthird\nfourth\nfifth\n".to_string(),
    ));
    write_file(FileSpec::new(dir.join("master.txt"), "master\n".to_string()));
    twig_add_and_commit(dir, "Commit B - master changes");
    let b = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(
        dir.join("shared.txt"),
        "first\nsecond\nthird\nfourth\nFIFTH\n".to_string(),
    ));
    std::fs::remove_file(dir.join("doomed.txt"))?;
    twig_add_and_commit(dir, "Commit C - feature changes");
    let c = common::head_commit(dir).ok_or("HEAD has no commit")?;

    run_twig_command(dir, &["checkout", "master"]).assert().success();
    twig_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Merged in working tree. Please commit\n");

    assert_eq!(common::read_metadata(dir, "MERGE_HEAD"), Some(c.clone()));
    assert_eq!(
        read_file(&dir.join("shared.txt")),
        "FIRST\nsecond\nthird\nfourth\nFIFTH\n"
    );
    assert_eq!(read_file(&dir.join("master.txt")), "master\n");
    assert!(!dir.join("doomed.txt").exists());

    twig_commit(dir, "Merge feature").assert().success();
    let merge = common::head_commit(dir).ok_or("HEAD has no commit")?;
    let raw = stdout_of(run_twig_command(dir, &["cat-file", &merge]))?;
    assert!(raw.contains(&format!("parent {b}\nparent {c}\n")));
    assert!(common::read_metadata(dir, "MERGE_HEAD").is_none());

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout("On branch master\n\nnothing to commit, working tree clean\n");

    Ok(())
}
