//! Mappings command - strict load of the mapping documents

use clap::Args;

use crate::config::AppConfig;
use crate::domain::MappingStore;
use crate::infrastructure::mapping::{read_chain_mappings, read_endpoint_names};

#[derive(Debug, Args)]
pub struct MappingsArgs {
    /// Endpoint-name document; defaults to the configured path
    #[arg(long)]
    pub endpoint_mapping: Option<String>,

    /// Chain-mapping document; defaults to the configured path
    #[arg(long)]
    pub chain_mapping: Option<String>,
}

/// Load both documents, print counts and fail on any gap
pub async fn run(args: MappingsArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    let names_path = args
        .endpoint_mapping
        .unwrap_or(config.mappings.endpoint_mapping_path);
    let chains_path = args
        .chain_mapping
        .unwrap_or(config.mappings.chain_mapping_path);

    let store = MappingStore::from_documents(
        read_endpoint_names(&names_path)?,
        read_chain_mappings(&chains_path)?,
    );

    println!("Endpoint names: {} ({})", store.endpoint_name_count(), names_path);
    println!("Contracts:      {} ({})", store.contract_count(), chains_path);

    let unresolved = unresolved_report(&store);
    if unresolved.is_empty() {
        println!("All endpoint names resolve to a contract");
        return Ok(());
    }

    for line in &unresolved {
        println!("  unresolved: {}", line);
    }
    anyhow::bail!("{} endpoint name(s) have no contract", unresolved.len())
}

fn unresolved_report(store: &MappingStore) -> Vec<String> {
    store
        .unresolved_entries()
        .into_iter()
        .map(|entry| format!("[{}] {} -> {}", entry.category, entry.key, entry.short_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::{ChainMappingDocument, EndpointNameDocument};

    #[test]
    fn test_unresolved_report_lists_missing_contracts() {
        let names = EndpointNameDocument::from_json(
            r#"{"api_endpoints": {"persons": {"GET /api/person": "getAllPersons"}}}"#,
        )
        .unwrap();
        let store = MappingStore::from_documents(names, ChainMappingDocument::default());

        assert_eq!(
            unresolved_report(&store),
            vec!["[persons] GET /api/person -> getAllPersons".to_string()]
        );
    }
}
