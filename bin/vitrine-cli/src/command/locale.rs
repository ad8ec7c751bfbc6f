use clap::{Args as ClapArgs, Subcommand};
use crate::config::Global;
use anyhow::{Result, anyhow};
use vitrine_i18n::t;

#[derive(Debug, ClapArgs)]
pub struct ArgsLocale {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = t!("vitrine.cli.command.locale.set").to_string())]
    Set {
        #[clap(value_name = "TAG", help = t!("vitrine.cli.command.locale.tag").to_string())]
        tag: String,
    },
}

pub fn run(ctx: &Global, args: &ArgsLocale) -> Result<()> {
    match &args.command {
        None => {
            println!("{}", t!("locale.current", locale = ctx.store.current().as_str()));
        }
        Some(Commands::Set { tag }) => {
            let locale = ctx
                .store
                .set_locale(tag)
                .ok_or_else(|| anyhow!(t!("locale.unsupported", tag = tag).to_string()))?;
            println!("{}", t!("locale.changed", locale = locale.as_str()));
        }
    }
    Ok(())
}
