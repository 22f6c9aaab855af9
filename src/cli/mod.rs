//! CLI module for the integration gateway
//!
//! - `serve`: run the HTTP server
//! - `mappings`: load and verify the mapping documents

pub mod mappings;
pub mod serve;

use clap::{Parser, Subcommand};

/// API Integration Gateway - CRUD backend with chained endpoint execution
#[derive(Parser)]
#[command(name = "api-integration-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Load the mapping documents and report entries without a contract
    Mappings(mappings::MappingsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["api-integration-gateway", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_mappings_overrides() {
        let cli = Cli::try_parse_from([
            "api-integration-gateway",
            "mappings",
            "--endpoint-mapping",
            "names.json",
        ])
        .unwrap();

        match cli.command {
            Command::Mappings(args) => {
                assert_eq!(args.endpoint_mapping.as_deref(), Some("names.json"));
                assert!(args.chain_mapping.is_none());
            }
            Command::Serve => panic!("expected mappings command"),
        }
    }
}
