use clap::Parser;
use gardenic::prelude::*;

mod commands;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch the Gardenic site API and render it into the page templates"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Site API base URL
    #[clap(long, env = "GARDENIC_API_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "GARDENIC_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Fetch and print normalized site records
    Fetch(crate::commands::fetch::FetchOptions),

    /// Render a page template against the site API
    Render(crate::commands::render::RenderOptions),

    /// Submit the contact or subscription form
    Send(crate::commands::send::SendOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Fetch(options) => crate::commands::fetch::run(options, app.global).await,
        SubCommands::Render(options) => crate::commands::render::run(options, app.global).await,
        SubCommands::Send(options) => crate::commands::send::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
