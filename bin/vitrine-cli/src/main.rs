use clap::Parser;

use vitrine_common::log;
use vitrine_i18n::t;

mod command;
mod config;

use crate::config::Commands;

vitrine_i18n::init!();

#[tokio::main]
async fn main() {
    let args = config::Args::parse();

    if !args.quiet {
        if let Err(e) = log::init(args.log_level.as_deref()) {
            eprintln!("{:#}", e);
        }
    }

    let global = match config::init(args) {
        Ok(global) => global,
        Err(e) => {
            eprintln!("{}: {:#}", t!("config.initialize.failed"), e);
            std::process::exit(1);
        }
    };

    let result = match &global.args.command {
        Commands::Locale(args) => command::locale::run(&global, args),
        Commands::Resolve(args) => command::resolve::run(&global, args),
        Commands::Switch(args) => command::switch::run(&global, args),
        Commands::Fetch(args) => command::fetch::run(&global, args).await,
        Commands::Chrome(args) => command::chrome::run(&global, args).await,
    };

    if let Err(e) = result {
        if command::is_reported(&e) {
            std::process::exit(1);
        }
        if global.args.quiet {
            eprintln!("{:#}", e);
        } else {
            tracing::error!("{:#}", e);
        }
        std::process::exit(1);
    }
}
