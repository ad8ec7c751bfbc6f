use clap::Args as ClapArgs;
use crate::config::Global;
use anyhow::{Context, Result};
use std::path::PathBuf;
use vitrine_i18n::{Locale, TranslationResolver, resolve_record, t};

#[derive(Debug, ClapArgs)]
pub struct ArgsResolve {
    #[clap(value_name = "FILE", help = t!("vitrine.cli.command.resolve.file").to_string())]
    pub file: PathBuf,
    #[clap(value_name = "FIELD", help = t!("vitrine.cli.command.resolve.field").to_string())]
    pub field: String,
    #[clap(long = "locale", value_name = "TAG", help = t!("vitrine.cli.command.resolve.locale").to_string())]
    pub locale: Option<Locale>,
}

pub fn run(ctx: &Global, args: &ArgsResolve) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let record: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let text = match args.locale {
        Some(locale) => resolve_record(Some(&record), &args.field, locale),
        None => TranslationResolver::new(&ctx.store).resolve(Some(&record), &args.field),
    };
    println!("{}", text);
    Ok(())
}
