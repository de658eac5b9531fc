use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn print_nothing_when_no_files_are_changed(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("On branch master\n\nnothing to commit, working tree clean\n");
}

#[rstest]
fn report_staged_and_unstaged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    run_twig_command(dir, &["add", "new.txt", "1.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("a/2.txt"), "dos\n".to_string()));
    std::fs::remove_file(dir.join("a/b/3.txt"))?;
    write_file(FileSpec::new(dir.join("untracked.txt"), "??\n".to_string()));

    run_twig_command(dir, &["status"]).assert().success().stdout(concat!(
        "On branch master\n",
        "\n",
        "Changes to be committed:\n",
        "modified: 1.txt\n",
        "new file: new.txt\n",
        "\n",
        "Changes not staged for commit:\n",
        "modified: a/2.txt\n",
        "deleted: a/b/3.txt\n",
        "new file: untracked.txt\n",
    ));

    Ok(())
}

#[rstest]
fn touching_a_file_without_changes_is_clean(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one\n".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout("On branch master\n\nnothing to commit, working tree clean\n");
}
