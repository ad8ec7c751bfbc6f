use clap::Args as ClapArgs;
use super::AlreadyReported;
use crate::config::Global;
use anyhow::Result;
use vitrine_i18n::t;

#[derive(Debug, ClapArgs)]
pub struct ArgsFetch {
    #[clap(value_name = "PATH", help = t!("vitrine.cli.command.fetch.path").to_string())]
    pub path: String,
    #[clap(short('s'), long = "save-json", value_name = "SAVE_JSON", help = t!("vitrine.cli.command.fetch.save_json").to_string())]
    pub save_json: Option<String>,
}

pub async fn run(ctx: &Global, args: &ArgsFetch) -> Result<()> {
    // the api client has already told the user what went wrong
    let Some(data) = ctx.api_client.content().fetch_json(&args.path).await else {
        return Err(AlreadyReported.into());
    };
    let pretty = serde_json::to_string_pretty(&data)?;
    match &args.save_json {
        Some(save_json) => {
            std::fs::write(save_json, pretty)?;
            tracing::info!("{}", t!("fetch.saved", path = save_json));
        }
        None => println!("{}", pretty),
    }
    Ok(())
}
