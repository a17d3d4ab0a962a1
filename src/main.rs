use clap::{Parser, Subcommand};
use humansize::{DECIMAL, format_size};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tvdb_xml::config::{DEFAULT_HOST, DEFAULT_LANGUAGE, DEFAULT_PORT};
use tvdb_xml::{Client, ClientConfig, MirrorType, TvdbError, archive, select_mirror};

/// tvdb-xml - Query the TheTVDB XML interface from the command line
#[derive(Parser)]
#[command(name = "tvdb-xml")]
#[command(version, about, long_about = None)]
struct Cli {
    /// API key for the XML interface
    #[arg(long, env = "TVDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Content language abbreviation (e.g., en, de, fr)
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Host serving the XML interface
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port of the XML interface
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported content languages
    Languages,

    /// List the mirrors and the content they serve
    Mirrors,

    /// Print the current server time (Unix seconds)
    ServerTime,

    /// Search series by name in the configured language
    Search {
        /// Series name (e.g., "Dexter")
        name: String,
    },

    /// Search series by keywords
    Keywords {
        /// One or more keywords
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Download the full series archive
    Archive {
        /// Series identifier (e.g., 79349)
        series_id: String,

        /// Mirror to download from (default: first mirror serving zip files)
        #[arg(short, long)]
        mirror: Option<String>,

        /// Write the archive to this file
        #[arg(short, long, conflicts_with = "extract")]
        output: Option<PathBuf>,

        /// Print a single member of the archive (e.g., en.xml)
        #[arg(short, long)]
        extract: Option<String>,
    },

    /// Print series details and all episodes
    Info {
        /// Series identifier (e.g., 79349)
        series_id: String,

        /// Mirror to download from (default: first mirror serving zip files)
        #[arg(short, long)]
        mirror: Option<String>,
    },
}

/// Errors reported by the command line interface
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Tvdb(#[from] TvdbError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    // WARN by default, RUST_LOG takes precedence
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig {
        language: cli.language,
        host: cli.host,
        port: cli.port,
        ..ClientConfig::new(cli.api_key)
    };
    let client = Client::new(config)?;

    match cli.command {
        Commands::Languages => print_json(&client.get_languages().await?),
        Commands::Mirrors => print_json(&client.get_mirrors().await?),
        Commands::ServerTime => {
            println!("{}", client.get_server_time().await?);
            Ok(())
        }
        Commands::Search { name } => print_json(&client.find_tv_show(&name).await?),
        Commands::Keywords { words } => {
            print_json(&client.get_series_by_name(words.as_slice()).await?)
        }
        Commands::Archive {
            series_id,
            mirror,
            output,
            extract,
        } => {
            let mirror = resolve_mirror(&client, mirror).await?;
            let bytes = client
                .get_full_series_archive(&mirror, &series_id, None)
                .await?;

            if let Some(member) = extract {
                let content = archive::extract(&bytes, &member).map_err(TvdbError::from)?;
                io::Write::write_all(&mut io::stdout(), &content)?;
                return Ok(());
            }

            let path = output.unwrap_or_else(|| PathBuf::from(format!("{series_id}.zip")));
            std::fs::write(&path, &bytes)?;

            let members = archive::list_members(&bytes).map_err(TvdbError::from)?;
            println!(
                "Saved {} ({}) to {}",
                members.join(", "),
                format_size(bytes.len(), DECIMAL),
                path.display()
            );
            Ok(())
        }
        Commands::Info { series_id, mirror } => {
            let mirror = resolve_mirror(&client, mirror).await?;
            print_json(&client.get_series_info(&mirror, &series_id, None).await?)
        }
    }
}

/// Uses the given mirror or asks the service for one serving zip files
async fn resolve_mirror(client: &Client, mirror: Option<String>) -> Result<String, CliError> {
    if let Some(mirror) = mirror {
        return Ok(mirror);
    }

    let mirrors = client.get_mirrors().await?;
    let url = select_mirror(&mirrors, MirrorType::Zip)
        .map(|mirror| mirror.url.clone())
        .unwrap_or_else(|| {
            let config = client.config();
            format!("http://{}:{}", config.host, config.port)
        });

    tracing::info!(mirror = %url, "Selected mirror");
    Ok(url)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
