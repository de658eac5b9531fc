use crate::common::command::{repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;
use sha1::{Digest, Sha1};

fn expected_blob_id(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob\0{content}").as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[rstest]
fn hash_object_uses_content_address(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    use fake::Fake;
    use fake::faker::lorem::en::Sentence;

    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    let content = Sentence(3..8).fake::<String>();
    write_file(FileSpec::new(dir.join("note.txt"), content.clone()));
    let expected = expected_blob_id(&content);
    let object_path = dir
        .join(".twig/objects")
        .join(&expected[..2])
        .join(&expected[2..]);

    let printed = stdout_of(run_twig_command(dir, &["hash-object", "note.txt"]))?;
    assert_eq!(printed.trim(), expected);
    assert!(!object_path.exists());

    let printed = stdout_of(run_twig_command(dir, &["hash-object", "-w", "note.txt"]))?;
    assert_eq!(printed.trim(), expected);
    assert_eq!(
        std::fs::read(&object_path)?,
        format!("blob\0{content}").into_bytes()
    );

    Ok(())
}
