//! CLI tool for ziplens archive operations.

mod commands;
mod exit_codes;
mod file_selector;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Inspect and edit ZIP archives
#[derive(Parser)]
#[command(name = "ziplens")]
#[command(author, version, about = "Inspect and edit ZIP archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Only log errors (overridden by RUST_LOG)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List archive contents (alias: l)
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Entry patterns to show (glob patterns supported)
        #[arg(short = 'i', long)]
        include: Vec<String>,

        /// Entry patterns to hide
        #[arg(short = 'e', long)]
        exclude: Vec<String>,

        /// Indent names by depth instead of printing full paths
        #[arg(long)]
        tree: bool,
    },

    /// Print one entry to stdout (alias: c)
    #[command(alias = "c")]
    Cat {
        /// Archive file to read
        archive: PathBuf,

        /// Path of the entry inside the archive
        entry: String,
    },

    /// Show archive information (alias: i)
    #[command(alias = "i")]
    Info {
        /// Archive file to inspect
        archive: PathBuf,
    },

    /// Replace a text entry and write the edited archive (alias: e)
    #[command(alias = "e")]
    Edit {
        /// Archive file to edit
        archive: PathBuf,

        /// Path of the text entry inside the archive
        entry: String,

        /// New content
        #[arg(long, conflicts_with = "from")]
        content: Option<String>,

        /// Read the new content from a file
        #[arg(long)]
        from: Option<PathBuf>,

        /// Output archive (default: <name>_edited.zip next to the input)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Compression level (0-9, 0 stores entries uncompressed)
        #[arg(short = 'l', long, default_value = "9")]
        level: u8,

        /// Store entries without compression
        #[arg(long)]
        stored: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();

    let default_level = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let exit_code = match cli.command {
        Commands::List {
            archive,
            include,
            exclude,
            tree,
        } => commands::list(&archive, &include, &exclude, tree, cli.format),

        Commands::Cat { archive, entry } => commands::cat(&archive, &entry),

        Commands::Info { archive } => commands::info(&archive, cli.format),

        Commands::Edit {
            archive,
            entry,
            content,
            from,
            output,
            level,
            stored,
        } => commands::edit(&commands::EditConfig {
            archive_path: &archive,
            entry: &entry,
            content,
            from_file: from.as_deref(),
            output: output.as_deref(),
            level,
            stored,
            format: cli.format,
        }),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
