use clap::Args as ClapArgs;
use crate::config::Global;
use anyhow::{Context, Result};
use std::path::PathBuf;
use vitrine_api::inject;
use vitrine_i18n::t;

#[derive(Debug, ClapArgs)]
pub struct ArgsChrome {
    #[clap(value_name = "PAGE_FILE", help = t!("vitrine.cli.command.chrome.page").to_string())]
    pub page: PathBuf,
    #[clap(short('o'), long = "output", value_name = "OUTPUT", help = t!("vitrine.cli.command.chrome.output").to_string())]
    pub output: Option<PathBuf>,
}

pub async fn run(ctx: &Global, args: &ArgsChrome) -> Result<()> {
    let page = std::fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read {}", args.page.display()))?;
    let chrome = ctx.api_client.chrome().load(ctx.store.current()).await;
    let rendered = inject(&page, &chrome);
    match &args.output {
        Some(output) => {
            std::fs::write(output, rendered)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("{}", t!("chrome.saved", path = output.display().to_string()));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
