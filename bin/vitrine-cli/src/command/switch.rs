use clap::Args as ClapArgs;
use crate::config::Global;
use anyhow::{Result, anyhow};
use vitrine_i18n::{Locale, LocaleRouter, Navigator, t};

#[derive(Debug, ClapArgs)]
pub struct ArgsSwitch {
    #[clap(value_name = "TAG", help = t!("vitrine.cli.command.locale.tag").to_string())]
    pub tag: String,
    #[clap(short('u'), long = "url", value_name = "URL", help = t!("vitrine.cli.command.switch.url").to_string())]
    pub url: String,
}

/// Stands in for the browser: "navigating" prints the destination.
struct PrintNavigator {
    current: String,
}

impl Navigator for PrintNavigator {
    fn current_url(&self) -> String {
        self.current.clone()
    }

    fn navigate(&self, url: &str) {
        tracing::info!("{}", t!("switch.navigate", url = url));
        println!("{}", url);
    }
}

pub fn run(ctx: &Global, args: &ArgsSwitch) -> Result<()> {
    if Locale::from_tag(&args.tag).is_none() {
        return Err(anyhow!(t!("locale.unsupported", tag = &args.tag).to_string()));
    }
    let navigator = PrintNavigator {
        current: args.url.clone(),
    };
    LocaleRouter::new(&ctx.store, navigator).switch_locale_and_reload(&args.tag);
    Ok(())
}
