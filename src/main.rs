mod api;
mod app;
mod application;
mod cli;
mod domain;
mod logging;
mod ui;
mod utils;

use clap::Parser;

fn main() -> iced::Result {
    let args = cli::Args::parse();
    logging::init_logging(args.verbose);

    let config = args.api_config();
    tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "starting");

    iced::application(
        move || app::FileApp::new(config.clone()),
        app::update,
        app::view,
    )
    .title("Simple File Downloader")
    .run()
}
