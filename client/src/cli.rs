//! CLI interface for `vhc`
//!
//! Global flags and subcommands, declared with clap's derive API.

use alloy_primitives::{Address, FixedBytes, U256};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::methods::{NumbersSortBy, SortDirection};

/// ValidHashCondition plugin toolkit
///
/// Encodes DAO actions, prints permission plans and queries the indexer.
#[derive(Parser, Debug)]
#[command(name = "vhc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode storeNumber(uint256) calldata
    Encode {
        /// Decimal or 0x-prefixed value
        value: U256,
    },

    /// Decode storeNumber(uint256) calldata
    Decode {
        /// 0x-prefixed calldata
        data: String,
    },

    /// Print the permissions granted on installation
    InstallPlan {
        /// DAO address
        dao: Address,

        /// Plugin address (defaults to the configured one)
        #[arg(long)]
        plugin: Option<Address>,
    },

    /// Print the permissions revoked on uninstallation
    UninstallPlan {
        /// DAO address
        dao: Address,

        /// Installed plugin address
        plugin: Address,
    },

    /// Show the number stored by a DAO
    Number {
        /// DAO address
        dao: Address,
    },

    /// List DAOs and their numbers
    Numbers {
        #[arg(short, long, default_value = "10")]
        limit: u32,

        #[arg(short, long, default_value = "0")]
        skip: u32,

        /// number or createdAt
        #[arg(long, default_value = "createdAt")]
        sort_by: NumbersSortBy,

        /// asc or desc
        #[arg(long, default_value = "asc")]
        direction: SortDirection,
    },

    /// Estimate the fee of a storeNumber call
    EstimateStore {
        value: U256,
    },

    /// Check a contract for ERC-165 interface support
    SupportsInterface {
        contract: Address,

        /// 4-byte interface id, 0x-prefixed
        interface_id: FixedBytes<4>,
    },

    /// Print the bundled build and release metadata
    Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["vhc", "metadata"]);
        assert!(matches!(cli.command, Command::Metadata));
        assert!(!cli.json);
        assert!(cli.log.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "vhc", "--json", "--log", "debug", "--config", "/tmp/vhc.toml", "metadata",
        ]);
        assert!(cli.json);
        assert_eq!(cli.log, Some("debug".to_string()));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vhc.toml")));
    }

    #[test]
    fn test_encode_accepts_decimal_and_hex() {
        let cli = Cli::parse_from(["vhc", "encode", "42"]);
        if let Command::Encode { value } = cli.command {
            assert_eq!(value, U256::from(42));
        } else {
            panic!("Expected Encode command");
        }

        let cli = Cli::parse_from(["vhc", "encode", "0x10"]);
        if let Command::Encode { value } = cli.command {
            assert_eq!(value, U256::from(16));
        } else {
            panic!("Expected Encode command");
        }
    }

    #[test]
    fn test_decode_command() {
        let cli = Cli::parse_from(["vhc", "decode", "0xb6339418"]);
        if let Command::Decode { data } = cli.command {
            assert_eq!(data, "0xb6339418");
        } else {
            panic!("Expected Decode command");
        }
    }

    #[test]
    fn test_install_plan_with_plugin() {
        let dao = format!("0x{}", "da".repeat(20));
        let plugin = format!("0x{}", "11".repeat(20));
        let cli = Cli::parse_from(["vhc", "install-plan", dao.as_str(), "--plugin", plugin.as_str()]);
        if let Command::InstallPlan { dao, plugin } = cli.command {
            assert_eq!(dao, Address::repeat_byte(0xda));
            assert_eq!(plugin, Some(Address::repeat_byte(0x11)));
        } else {
            panic!("Expected InstallPlan command");
        }
    }

    #[test]
    fn test_uninstall_plan_command() {
        let dao = format!("0x{}", "da".repeat(20));
        let plugin = format!("0x{}", "11".repeat(20));
        let cli = Cli::parse_from(["vhc", "uninstall-plan", dao.as_str(), plugin.as_str()]);
        if let Command::UninstallPlan { dao, plugin } = cli.command {
            assert_eq!(dao, Address::repeat_byte(0xda));
            assert_eq!(plugin, Address::repeat_byte(0x11));
        } else {
            panic!("Expected UninstallPlan command");
        }
    }

    #[test]
    fn test_numbers_defaults() {
        let cli = Cli::parse_from(["vhc", "numbers"]);
        if let Command::Numbers {
            limit,
            skip,
            sort_by,
            direction,
        } = cli.command
        {
            assert_eq!(limit, 10);
            assert_eq!(skip, 0);
            assert_eq!(sort_by, NumbersSortBy::CreatedAt);
            assert_eq!(direction, SortDirection::Asc);
        } else {
            panic!("Expected Numbers command");
        }
    }

    #[test]
    fn test_numbers_ordering_flags() {
        let cli = Cli::parse_from([
            "vhc", "numbers", "--limit", "5", "--skip", "20", "--sort-by", "number",
            "--direction", "desc",
        ]);
        if let Command::Numbers {
            limit,
            skip,
            sort_by,
            direction,
        } = cli.command
        {
            assert_eq!(limit, 5);
            assert_eq!(skip, 20);
            assert_eq!(sort_by, NumbersSortBy::Number);
            assert_eq!(direction, SortDirection::Desc);
        } else {
            panic!("Expected Numbers command");
        }
    }

    #[test]
    fn test_numbers_rejects_unknown_direction() {
        let result = Cli::try_parse_from(["vhc", "numbers", "--direction", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_supports_interface_command() {
        let contract = format!("0x{}", "c0".repeat(20));
        let cli = Cli::parse_from(["vhc", "supports-interface", contract.as_str(), "0x01ffc9a7"]);
        if let Command::SupportsInterface {
            contract,
            interface_id,
        } = cli.command
        {
            assert_eq!(contract, Address::repeat_byte(0xc0));
            assert_eq!(interface_id, FixedBytes([0x01, 0xff, 0xc9, 0xa7]));
        } else {
            panic!("Expected SupportsInterface command");
        }
    }

    #[test]
    fn test_rejects_malformed_address() {
        let result = Cli::try_parse_from(["vhc", "number", "0x1234"]);
        assert!(result.is_err());
    }
}
