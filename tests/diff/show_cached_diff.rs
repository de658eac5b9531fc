use crate::common::command::{init_repository_dir, run_twig_command, twig_add_and_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_cached_diff_for_file_added_to_index(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("4.txt"), "four\n".to_string()));

    run_twig_command(dir, &["diff", "--cached"])
        .assert()
        .success()
        .stdout("");

    run_twig_command(dir, &["add", "4.txt"]).assert().success();
    run_twig_command(dir, &["diff", "--cached"])
        .assert()
        .success()
        .stdout(concat!(
            "diff --twig a/4.txt b/4.txt\n",
            "new file\n",
            "--- a/4.txt\n",
            "+++ b/4.txt\n",
            "@@ -0,0 +1,1 @@\n",
            "+four\n",
        ));
}

#[rstest]
fn show_diff_between_commit_and_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["tag", "v1"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno\n".to_string()));
    twig_add_and_commit(dir, "Second commit");

    run_twig_command(dir, &["diff", "v1"])
        .assert()
        .success()
        .stdout(concat!(
            "diff --twig a/1.txt b/1.txt\n",
            "--- a/1.txt\n",
            "+++ b/1.txt\n",
            "@@ -1,1 +1,1 @@\n",
            "-one\n",
            "+uno\n",
        ));
}
