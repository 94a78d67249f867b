mod cli;
mod commands;

use clap::Parser;
use cli::Args;

#[tokio::main]
async fn main() {
  // .env values become defaults for the --endpoint/--key flags
  dotenv::dotenv().ok();
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let args = Args::parse();

  if let Err(e) = commands::run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}
