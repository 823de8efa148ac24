use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the stock price dashboard (prices from Yahoo Finance).
    Stocks {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Serve the inventory dashboard over a CSV file.
    Inventory {
        /// Inventory file with columns companyName, productName, createdAt, stock, priceWithGST.
        #[arg(long, default_value = "./data/inventory.csv")]
        csv: PathBuf,

        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on [default: 8050 for stocks, 8051 for inventory].
    #[arg(long)]
    pub port: Option<u16>,

    /// Log at debug level.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn server(&self) -> &ServerArgs {
        match &self.command {
            Commands::Stocks { server } | Commands::Inventory { server, .. } => server,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stocks_defaults() {
        let cli = Cli::try_parse_from(["viz", "stocks"]).unwrap();
        let server = cli.server();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, None);
        assert!(!server.debug);
    }

    #[test]
    fn inventory_takes_a_csv_path() {
        let cli = Cli::try_parse_from([
            "viz", "inventory", "--csv", "/tmp/stock.csv", "--port", "9000", "--debug",
        ])
        .unwrap();
        match &cli.command {
            Commands::Inventory { csv, server } => {
                assert_eq!(csv, &PathBuf::from("/tmp/stock.csv"));
                assert_eq!(server.port, Some(9000));
                assert!(server.debug);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn a_command_is_required() {
        assert!(Cli::try_parse_from(["viz"]).is_err());
    }
}
