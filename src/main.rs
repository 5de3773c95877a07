use anyhow::Result;
use clap::{Parser, Subcommand};
use nit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "nit",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "A local version-control engine: a content-addressed object store \
    with a commit graph, branches, a staging index and three-way merges. \
    No remotes, no rebase, no rename detection.",
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
        about = "Initialize a new repository",
        long_about = "Creates the .nit layout, the root commit and the master branch \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "rm", about = "Unstage a file or mark it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged snapshot as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged files and working tree changes"
    )]
    Status,
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file from a commit"
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: Option<String>,
        #[arg(long, help = "Restore this file instead of switching branches")]
        file: Option<String>,
        #[arg(
            long,
            requires = "file",
            help = "The commit to restore the file from (defaults to the current head)"
        )]
        commit: Option<String>,
    },
    #[command(name = "branch", about = "Manage branches")]
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit and check it out"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id, abbreviations accepted")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

#[derive(Subcommand)]
enum BranchCommands {
    #[command(name = "create", about = "Create a branch at the current commit")]
    Create {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "delete", about = "Delete a branch")]
    Delete {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
}

fn open_current_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::open(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Add { path } => open_current_repository()?.add(path)?,
        Commands::Rm { path } => open_current_repository()?.rm(path)?,
        Commands::Commit { message } => {
            open_current_repository()?.commit(message.as_str())?;
        }
        Commands::Status => {
            open_current_repository()?.status()?;
        }
        Commands::Log => open_current_repository()?.log()?,
        Commands::Checkout {
            branch,
            file,
            commit,
        } => {
            let repository = open_current_repository()?;
            match (branch, file) {
                (Some(branch), None) => repository.checkout_branch(branch)?,
                (None, Some(file)) => repository.checkout_file(file, commit.as_deref())?,
                _ => anyhow::bail!("specify either a branch or --file <path>"),
            }
        }
        Commands::Branch { command } => {
            let repository = open_current_repository()?;
            match command {
                BranchCommands::Create { name } => repository.create_branch(name)?,
                BranchCommands::Delete { name } => repository.delete_branch(name)?,
            }
        }
        Commands::Reset { commit } => open_current_repository()?.reset(commit)?,
        Commands::Merge { branch } => {
            open_current_repository()?.merge(branch)?;
        }
    }

    Ok(())
}
