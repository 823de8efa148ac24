use anyhow::Result;
use clap::Parser;
use std::env;
use viz_inventory::InventoryTable;
use viz_stocks::Yahoo;

mod cli;

const STOCKS_PORT: u16 = 8050;
const INVENTORY_PORT: u16 = 8051;

// Yahoo turns away requests without a browser-like agent
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) viz/0.1";

fn preprocess(debug: bool) {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger; RUST_LOG still wins over --debug
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn build_client() -> Result<reqwest::Client> {
    let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
    let client = reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    preprocess(cli.server().debug);
    log::info!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> viz <COMMAND>"
    match &cli.command {
        // "> viz stocks [--host] [--port] [--debug]"
        cli::Commands::Stocks { server } => {
            let client = build_client()?;
            let yahoo = match env::var("YAHOO_BASE_URL") {
                Ok(url) => Yahoo::with_base_url(client, url),
                Err(_) => Yahoo::new(client),
            };
            let port = server.port.unwrap_or(STOCKS_PORT);
            viz_stocks::web::serve(&server.host, port, yahoo).await?;
        }

        // "> viz inventory [--csv] [--host] [--port] [--debug]"
        cli::Commands::Inventory { csv, server } => {
            let table = InventoryTable::load(csv)?;
            let port = server.port.unwrap_or(INVENTORY_PORT);
            viz_inventory::web::serve(&server.host, port, table).await?;
        }
    }

    Ok(())
}
