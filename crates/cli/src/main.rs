// jsb - command-line client for the jsonbank document store

mod commands;
mod exit_codes;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use jsonbank_client::{
    codes, CreateDocumentBody, CreateFolderBody, JsonBank, RequestError, UploadDocumentBody,
};

use commands::*;
use exit_codes::{request_exit_code, EXIT_ERROR, EXIT_MISSING_KEY, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "jsb")]
#[command(about = "Store, fetch and organize JSON documents on jsonbank")]
#[command(version)]
struct Cli {
    /// Service origin (default: https://api.jsonbank.io)
    #[arg(long, global = true, env = "JSB_HOST")]
    host: Option<String>,

    /// Public API key (reads)
    #[arg(long, global = true, env = "JSB_PUBLIC_KEY", hide_env_values = true)]
    public_key: Option<String>,

    /// Private API key (writes)
    #[arg(long, global = true, env = "JSB_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the keys and save them for later commands
    Login,

    /// Remove saved keys
    Logout,

    /// Show the account and key the current keys belong to
    Whoami,

    /// Fetch document content
    #[command(after_help = "\
Examples:
  jsb get jsonbank/sdk-test/index.json
  jsb get sdk-test/index.json --own
  jsb get 01H2X4... --own --raw")]
    Get {
        /// Document id or path
        id_or_path: String,

        /// Read through your keys instead of the public endpoint
        #[arg(long)]
        own: bool,

        /// Print the stored text unchanged
        #[arg(long)]
        raw: bool,
    },

    /// Fetch document metadata
    Meta {
        /// Document id or path
        id_or_path: String,

        /// Read through your keys instead of the public endpoint
        #[arg(long)]
        own: bool,
    },

    /// Fetch a JSON file from a public GitHub repository
    #[command(after_help = "\
Examples:
  jsb gh jsonbankio/documentation/main/package.json")]
    Gh {
        /// owner/repo/branch/path
        path: String,

        /// Print the file text unchanged
        #[arg(long)]
        raw: bool,
    },

    /// Create a document
    Create {
        #[arg(long)]
        project: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        folder: Option<String>,

        /// JSON content
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read JSON content from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Return the existing document instead of failing on a taken name
        #[arg(long)]
        if_not_exists: bool,
    },

    /// Upload a JSON file as a new document
    Upload {
        file: PathBuf,

        #[arg(long)]
        project: String,

        /// Document name (default: the file name)
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        folder: Option<String>,
    },

    /// Replace the content of one of your documents
    Update {
        /// Document id or path
        id_or_path: String,

        /// JSON content
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read JSON content from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete one of your documents
    Delete {
        /// Document id or path
        id_or_path: String,
    },

    /// Exit 0 if the document exists, 1 otherwise
    Exists {
        /// Document id or path
        id_or_path: String,
    },

    /// Create a folder
    Mkdir {
        #[arg(long)]
        project: String,

        #[arg(long)]
        name: String,

        /// Parent folder path
        #[arg(long)]
        folder: Option<String>,

        /// Return the existing folder instead of failing on a taken name
        #[arg(long)]
        if_not_exists: bool,
    },

    /// Fetch a folder
    Folder {
        /// Folder id or path
        id_or_path: String,

        /// Include document and sub-folder counts
        #[arg(long)]
        stats: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// stderr logging. RUST_LOG wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let conn = Connection {
        host: cli.host,
        public_key: cli.public_key,
        private_key: cli.private_key,
    };

    // Logout must work even when the saved file is what's broken.
    if let Commands::Logout = cli.command {
        return cmd_logout();
    }

    let saved = jsonbank_client::load_keys();
    let mut jsb = JsonBank::new(resolve_config(&conn, saved)).map_err(CliError::request)?;
    log::debug!("using host {}", jsb.host());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Logout => Ok(()),
        Commands::Login => cmd_login(&mut jsb),
        Commands::Whoami => cmd_whoami(&mut jsb, &mut out),
        Commands::Get { id_or_path, own, raw } => cmd_get(&jsb, &id_or_path, own, raw, &mut out),
        Commands::Meta { id_or_path, own } => cmd_meta(&jsb, &id_or_path, own, &mut out),
        Commands::Gh { path, raw } => cmd_gh(&jsb, &path, raw, &mut out),
        Commands::Create { project, name, folder, content, file, if_not_exists } => {
            let body = CreateDocumentBody {
                name,
                project,
                folder: folder.unwrap_or_default(),
                content: read_content(content, file)?,
            };
            cmd_create(&jsb, &body, if_not_exists, &mut out)
        }
        Commands::Upload { file, project, name, folder } => {
            let body = UploadDocumentBody {
                file_path: file,
                project,
                name: name.unwrap_or_default(),
                folder: folder.unwrap_or_default(),
            };
            cmd_upload(&jsb, &body, &mut out)
        }
        Commands::Update { id_or_path, content, file } => {
            let content = read_content(content, file)?;
            cmd_update(&jsb, &id_or_path, &content, &mut out)
        }
        Commands::Delete { id_or_path } => cmd_delete(&jsb, &id_or_path, &mut out),
        Commands::Exists { id_or_path } => cmd_exists(&jsb, &id_or_path),
        Commands::Mkdir { project, name, folder, if_not_exists } => {
            let body = CreateFolderBody {
                name,
                project,
                folder: folder.unwrap_or_default(),
            };
            cmd_mkdir(&jsb, &body, if_not_exists, &mut out)
        }
        Commands::Folder { id_or_path, stats } => cmd_folder(&jsb, &id_or_path, stats, &mut out),
    };

    out.flush().map_err(|e| CliError::io(e.to_string()))?;
    result
}

// ============================================================================
// errors
// ============================================================================

/// A failed command: exit code, message for stderr, optional hint line.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a client error with the matching exit code.
    pub fn request(err: RequestError) -> Self {
        let code = request_exit_code(&err);
        let hint = if code == EXIT_MISSING_KEY {
            Some("run `jsb login` or set JSB_PUBLIC_KEY and JSB_PRIVATE_KEY".to_string())
        } else if err.is(codes::NAME_EXISTS) {
            Some("pass --if-not-exists to reuse the existing resource".to_string())
        } else {
            None
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
