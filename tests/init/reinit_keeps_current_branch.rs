use crate::common;
use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn reinit_keeps_current_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head_before = common::head_commit(dir);

    run_twig_command(dir, &["branch", "topic"]).assert().success();
    run_twig_command(dir, &["checkout", "topic"]).assert().success();
    run_twig_command(dir, &["init"]).assert().success();

    assert_eq!(
        common::read_metadata(dir, "HEAD").as_deref(),
        Some("ref: refs/heads/topic")
    );
    assert_eq!(common::head_commit(dir), head_before);

    Ok(())
}
