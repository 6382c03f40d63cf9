use anyhow::Context;
use clap::Parser;
use wasabi_id::alphabet::Alphabet;
use wasabi_id::random::OsRandom;
use wasabi_id::sampler::Sampler;
use wasabi_id::{DEFAULT_SIZE, logging, url_safe};

/// Generates secure, URL-friendly unique identifiers.
#[derive(Parser, Debug)]
#[command(name = "wasabi-id", version)]
struct Args {
    /// Number of symbols per identifier.
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Symbols to draw from (at most 256). Defaults to A-Z, a-z, 0-9, '_' and '-'.
    #[arg(short, long, env = "ID_ALPHABET")]
    alphabet: Option<String>,

    /// Number of identifiers to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::setup_tracing_with_default("warn");

    let args = Args::parse();
    let alphabet = args
        .alphabet
        .as_deref()
        .map(Alphabet::try_from)
        .transpose()
        .context("Invalid alphabet")?;

    let sampler = Sampler::new();
    for _ in 0..args.count {
        let id = match &alphabet {
            Some(alphabet) => sampler.generate(&OsRandom, alphabet, args.size).await,
            None => url_safe::generate_url_safe(&OsRandom, args.size).await,
        }
        .context("Failed to generate an identifier")?;

        println!("{id}");
    }

    tracing::debug!("Generated {} identifiers", args.count);

    Ok(())
}
