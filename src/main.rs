use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use exchange_credentials::resolver::file_source;
use exchange_credentials::{CredentialResolver, ResolutionMode, ResolverConfig};

/// Resolve the API credentials configured for an exchange
#[derive(Debug, Parser)]
#[command(name = "exchange-credentials", version)]
struct Cli {
    /// Exchange name, e.g. Kraken
    exchange: String,

    /// Read API_<EXCHANGE>_APIKEY / API_<EXCHANGE>_SECRETKEY regardless of USE_ENV
    #[arg(long)]
    use_env: bool,

    /// Directory containing config/secrets (defaults to the user's home)
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Exit with an error when the API key or secret key is empty
    #[arg(long)]
    check: bool,
}

const EXIT_INCOMPLETE: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();

    let result = run(Cli::parse(), &mut io::stdout().lock());
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_INCOMPLETE,
        Err(_) => 1,
    }
}

/// Returns `Ok(false)` when `--check` is set and a field is empty
fn run(cli: Cli, out: &mut impl Write) -> Result<bool> {
    let mut config = ResolverConfig::from_env();
    if cli.use_env {
        config = config.with_environment_credentials(true);
    }
    if let Some(home) = cli.home {
        config = config.with_home_dir(home);
    }

    let resolver = CredentialResolver::new(config);
    let context = || format!("Failed to resolve credentials for '{}'", cli.exchange);

    let (record, source) = match resolver.mode() {
        ResolutionMode::Environment => {
            let (api_var, secret_var) = resolver.env_var_names(&cli.exchange);
            let record = resolver.resolve_from_env(&cli.exchange).with_context(context)?;
            (record, format!("env {} / {}", api_var, secret_var))
        }
        ResolutionMode::File => {
            let path = resolver.secrets_path(&cli.exchange).with_context(context)?;
            let record = file_source::read_credentials(&path).with_context(context)?;
            (record, format!("file {}", path.display()))
        }
    };

    writeln!(out, "exchange:   {}", cli.exchange)?;
    writeln!(out, "source:     {}", source)?;
    writeln!(out, "api key:    {}", record.api_key_preview())?;
    writeln!(
        out,
        "secret key: {}",
        if record.secret_key.is_empty() { "(empty)" } else { "(set)" }
    )?;

    if cli.check && !record.is_complete() {
        eprintln!("Credentials for '{}' are incomplete", cli.exchange);
        return Ok(false);
    }

    Ok(true)
}
