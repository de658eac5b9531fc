use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::config::{Config, LOG_VAR};
use twig::artifacts::objects::object_type::ObjectType;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small content-addressed version control system",
    long_about = "twig keeps snapshots of a directory tree as content-addressed objects, \
    names them with branches and tags, and merges diverging histories with a three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create an empty repository",
        long_about = "Creates the metadata directory in the current directory or at the given path. \
        Running it again on an initialized repository keeps its state."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "hash-object", about = "Compute the id of a file as a blob")]
    HashObject {
        #[arg(short, long, help = "Write the blob to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the raw content of an object")]
    CatFile {
        #[arg(index = 1, help = "Revision or object id")]
        object: String,
        #[arg(short = 't', long = "type", help = "Fail unless the object has this type")]
        object_type: Option<String>,
    },
    #[command(name = "write-tree", about = "Store the index as a tree and print its id")]
    WriteTree,
    #[command(
        name = "read-tree",
        about = "Replace the index with the files of a tree",
        long_about = "Accepts a tree or a commit. The working directory is left untouched."
    )]
    ReadTree {
        #[arg(index = 1)]
        tree: String,
    },
    #[command(name = "commit", about = "Record the index as a new commit on HEAD")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history reachable from a revision")]
    Log {
        #[arg(index = 1, help = "Defaults to HEAD")]
        name: Option<String>,
    },
    #[command(name = "show", about = "Show a commit and the changes it introduced")]
    Show {
        #[arg(index = 1, help = "Defaults to HEAD")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch the working directory to a branch or commit",
        long_about = "Checking out a branch attaches HEAD to it; \
        any other revision detaches HEAD."
    )]
    Checkout {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "branch", about = "List branches, or create one")]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, help = "Start point, defaults to HEAD")]
        start: Option<String>,
    },
    #[command(name = "tag", about = "Name a commit with a tag")]
    Tag {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Target, defaults to HEAD")]
        target: Option<String>,
    },
    #[command(name = "status", about = "Show staged and unstaged changes")]
    Status,
    #[command(
        name = "diff",
        about = "Show changes as unified diffs",
        long_about = "Without arguments compares the index with the working directory. \
        With --cached compares a commit (HEAD by default) with the index. \
        With a revision and no --cached compares that commit with the working directory."
    )]
    Diff {
        #[arg(long, help = "Compare against the index instead of the working directory")]
        cached: bool,
        #[arg(index = 1)]
        name: Option<String>,
    },
    #[command(name = "merge", about = "Merge a revision into HEAD")]
    Merge {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "merge-base", about = "Print a common ancestor of two revisions")]
    MergeBase {
        #[arg(index = 1)]
        a: String,
        #[arg(index = 2)]
        b: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a revision",
        long_about = "Only the ref moves; the index and working directory are left as they are."
    )]
    Reset {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "add", about = "Stage files and directories")]
    Add {
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "fetch",
        about = "Copy the branches of a repository on disk",
        long_about = "Every branch of the remote lands under refs/remote/ together with the objects it reaches."
    )]
    Fetch {
        #[arg(index = 1)]
        remote: PathBuf,
    },
    #[command(name = "push", about = "Fast-forward a branch of a repository on disk")]
    Push {
        #[arg(index = 1)]
        remote: PathBuf,
        #[arg(index = 2)]
        branch: String,
    },
}

fn open_repository(path: &Path, config: Config) -> Result<Repository> {
    Repository::open(path, Box::new(std::io::stdout()), config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let config = Config::load_from_env()?;
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.clone().unwrap_or_else(|| pwd.clone());
            Repository::new(&path, Box::new(std::io::stdout()), config)?
                .init()
                .await?
        }
        Commands::HashObject { write, file } => {
            open_repository(&pwd, config)?
                .hash_object(file, *write)
                .await?
        }
        Commands::CatFile {
            object,
            object_type,
        } => {
            let expected = object_type
                .as_deref()
                .map(ObjectType::try_from)
                .transpose()?;
            open_repository(&pwd, config)?
                .cat_file(object, expected)
                .await?
        }
        Commands::WriteTree => {
            let tree_id = open_repository(&pwd, config)?.write_tree().await?;
            println!("{tree_id}");
        }
        Commands::ReadTree { tree } => open_repository(&pwd, config)?.read_tree(tree).await?,
        Commands::Commit { message } => open_repository(&pwd, config)?.commit(message).await?,
        Commands::Log { name } => {
            open_repository(&pwd, config)?
                .log(name.as_deref())
                .await?
        }
        Commands::Show { name } => {
            open_repository(&pwd, config)?
                .show(name.as_deref())
                .await?
        }
        Commands::Checkout { name } => open_repository(&pwd, config)?.checkout(name).await?,
        Commands::Branch { name, start } => {
            open_repository(&pwd, config)?
                .branch(name.as_deref(), start.as_deref())
                .await?
        }
        Commands::Tag { name, target } => {
            open_repository(&pwd, config)?
                .tag(name, target.as_deref())
                .await?
        }
        Commands::Status => open_repository(&pwd, config)?.status().await?,
        Commands::Diff { cached, name } => {
            open_repository(&pwd, config)?
                .diff(*cached, name.as_deref())
                .await?
        }
        Commands::Merge { name } => open_repository(&pwd, config)?.merge(name).await?,
        Commands::MergeBase { a, b } => open_repository(&pwd, config)?.merge_base(a, b).await?,
        Commands::Reset { name } => open_repository(&pwd, config)?.reset(name).await?,
        Commands::Add { paths } => open_repository(&pwd, config)?.add(paths).await?,
        Commands::Fetch { remote } => open_repository(&pwd, config)?.fetch(remote).await?,
        Commands::Push { remote, branch } => {
            open_repository(&pwd, config)?
                .push(remote, branch)
                .await?
        }
    }

    Ok(())
}
