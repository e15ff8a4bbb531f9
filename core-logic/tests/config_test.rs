use core_logic::config::{NetworkDescriptor, NetworkList};
use core_logic::ConfigError;
use std::io::Write;

const CHAIN_JSON: &str = r#"{
  "networks": [
    { "name": "Sepolia", "rpc": "https://rpc.sepolia.org", "scan": "https://sepolia.etherscan.io/tx", "token": "SepoliaETH" },
    { "name": "Holesky", "rpc": "https://holesky.drpc.org", "scan": "https://holesky.etherscan.io/tx" }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_network_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CHAIN_JSON.as_bytes()).unwrap();

        let list = NetworkList::load(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.names(), vec!["Sepolia", "Holesky"]);
    }

    #[test]
    fn test_token_defaults_to_eth() {
        let list = NetworkList::from_json(CHAIN_JSON, "chain.json").unwrap();
        assert_eq!(list.networks[0].token_symbol, "SepoliaETH");
        assert_eq!(list.networks[1].token_symbol, "ETH");
    }

    #[test]
    fn test_select_is_one_based() {
        let list = NetworkList::from_json(CHAIN_JSON, "chain.json").unwrap();
        assert_eq!(list.select(1).unwrap().name, "Sepolia");
        assert_eq!(list.select(2).unwrap().name, "Holesky");
    }

    #[test]
    fn test_invalid_selection() {
        let list = NetworkList::from_json(CHAIN_JSON, "chain.json").unwrap();
        assert!(matches!(
            list.select(0),
            Err(ConfigError::InvalidSelection { selected: 0, total: 2 })
        ));
        assert!(matches!(
            list.select(3),
            Err(ConfigError::InvalidSelection { selected: 3, total: 2 })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            NetworkList::load("no-such-chain.json"),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_and_malformed_lists() {
        assert!(matches!(
            NetworkList::from_json(r#"{"networks":[]}"#, "chain.json"),
            Err(ConfigError::NoNetworks { .. })
        ));
        assert!(matches!(
            NetworkList::from_json("{", "chain.json"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_rpc() {
        let json = r#"{"networks":[{"name":"Local","rpc":"ws://localhost:8546","scan":""}]}"#;
        assert!(matches!(
            NetworkList::from_json(json, "chain.json"),
            Err(ConfigError::InvalidRpcUrl { .. })
        ));
    }

    #[test]
    fn test_explorer_link() {
        let network = NetworkDescriptor {
            name: "Sepolia".to_string(),
            rpc_endpoint: "https://rpc.sepolia.org".to_string(),
            explorer_url_prefix: "https://sepolia.etherscan.io/tx".to_string(),
            token_symbol: "ETH".to_string(),
        };
        assert_eq!(
            network.explorer_link("0xabc"),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
    }
}
