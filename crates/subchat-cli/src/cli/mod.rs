//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use subchat_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "subchat")]
#[command(version = "0.1")]
#[command(about = "Terminal client for Subspace AI chats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the chat dashboard (default)
    Chat {
        /// Chat to select on startup (full id or unique prefix)
        #[arg(value_name = "CHAT_ID")]
        id: Option<String>,
    },

    /// Manage chats without the dashboard
    Chats {
        #[command(subcommand)]
        command: ChatCommands,
    },

    /// Sign in with email and password
    Login(Credentials),

    /// Create an account with email and password
    Signup(Credentials),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct Credentials {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "SUBCHAT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(clap::Subcommand)]
enum ChatCommands {
    /// Lists chats, newest first
    List,
    /// Creates a chat
    Create {
        /// Title for the new chat (defaults to a timestamped title)
        #[arg(long)]
        title: Option<String>,
    },
    /// Renames a chat
    Rename {
        /// The chat to rename (full id or unique prefix)
        #[arg(value_name = "CHAT_ID")]
        id: String,
        /// New title for the chat
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Deletes a chat and its messages
    Delete {
        /// The chat to delete (full id or unique prefix)
        #[arg(value_name = "CHAT_ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Prints a chat's messages
    Messages {
        /// The chat to show (full id or unique prefix)
        #[arg(value_name = "CHAT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // Held until exit so buffered log lines are flushed.
    let _log_guard = match logging::init(config.log_level.as_deref()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    // default to the dashboard
    let Some(command) = cli.command else {
        return commands::chat::run(&config, None).await;
    };

    match command {
        Commands::Chat { id } => commands::chat::run(&config, id).await,

        Commands::Chats { command } => match command {
            ChatCommands::List => commands::chats::list(&config).await,
            ChatCommands::Create { title } => {
                commands::chats::create(&config, title.as_deref()).await
            }
            ChatCommands::Rename { id, title } => {
                commands::chats::rename(&config, &id, &title).await
            }
            ChatCommands::Delete { id, yes } => commands::chats::delete(&config, &id, yes).await,
            ChatCommands::Messages { id } => commands::chats::messages(&config, &id).await,
        },

        Commands::Login(creds) => {
            commands::auth::login(&config, &creds.email, &creds.password).await
        }
        Commands::Signup(creds) => {
            commands::auth::signup(&config, &creds.email, &creds.password).await
        }
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Whoami => commands::auth::whoami(&config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
