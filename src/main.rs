mod cli;
mod error;
mod factors;
mod fetch;
mod footprint;
mod responder;
mod server;
mod session;
mod util;
mod website;

use clap::Parser;
use cli::CliArgs;
use error::Result;

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn run_ask(args: &CliArgs, question: &str) -> Result<()> {
    let responder = args.responder()?;
    let reply = responder.respond(question).await?;
    println!("[{}] {}", reply.tier, reply.text);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = CliArgs::parse();

    let result = match args.ask.clone() {
        Some(question) => run_ask(&args, &question).await,
        None => server::run_server(&args).await,
    };

    if let Err(error) = result {
        tracing::error!("{error:?}");
        std::process::exit(1);
    }
}
