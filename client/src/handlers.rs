//! Command handlers for CLI operations

use alloy_primitives::{Address, FixedBytes, U256};
use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::json;

use sdk::{BuildMetadata, MultiTargetPermission, PermissionPlan, ReleaseMetadata};

use crate::client::Client;
use crate::decoding::decode_store_number;
use crate::encoding::encode_store_number;
use crate::methods::NumbersQueryParams;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn handle_encode(value: U256, format: OutputFormat) -> Result<()> {
    let data = encode_store_number(value);
    match format {
        OutputFormat::Json => print_json(&json!({ "value": value, "data": data })),
        OutputFormat::Text => {
            println!("{}", data);
            Ok(())
        }
    }
}

pub fn handle_decode(data: &str, format: OutputFormat) -> Result<()> {
    let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))
        .context("Calldata is not valid hex")?;
    let value = decode_store_number(&bytes)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "value": value })),
        OutputFormat::Text => {
            println!("{}", value);
            Ok(())
        }
    }
}

fn print_permissions(permissions: &[MultiTargetPermission], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&permissions),
        OutputFormat::Text => {
            for p in permissions {
                println!(
                    "{:<8} where={} who={} condition={} id={}",
                    p.operation, p.where_, p.who, p.condition, p.permission_id
                );
            }
            Ok(())
        }
    }
}

pub fn handle_install_plan(dao: Address, plugin: Address, format: OutputFormat) -> Result<()> {
    let grants = PermissionPlan::valid_hash_condition().grants(dao, plugin);
    print_permissions(&grants, format)
}

pub fn handle_uninstall_plan(dao: Address, plugin: Address, format: OutputFormat) -> Result<()> {
    let revokes = PermissionPlan::valid_hash_condition().revokes(dao, plugin);
    print_permissions(&revokes, format)
}

pub async fn handle_number(client: &Client, dao: Address, format: OutputFormat) -> Result<()> {
    let value = client
        .methods
        .get_number(dao)
        .await
        .with_context(|| format!("Failed to query number of DAO {}", dao))?;
    match format {
        OutputFormat::Json => print_json(&json!({ "dao": dao, "value": value })),
        OutputFormat::Text => {
            println!("{}", value);
            Ok(())
        }
    }
}

pub async fn handle_numbers(
    client: &Client,
    params: &NumbersQueryParams,
    format: OutputFormat,
) -> Result<()> {
    let items = client.methods.get_numbers(params).await?;
    match format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No DAOs found.");
            }
            for item in &items {
                println!("{}  {:<24} {}", item.id, item.subdomain, item.value);
            }
            Ok(())
        }
    }
}

pub async fn handle_estimate_store(client: &Client, value: U256, format: OutputFormat) -> Result<()> {
    let fee = client.estimation.store_number(value).await?;
    match format {
        OutputFormat::Json => print_json(&fee),
        OutputFormat::Text => {
            println!("average: {} wei", fee.average);
            println!("max:     {} wei", fee.max);
            Ok(())
        }
    }
}

pub async fn handle_supports_interface(
    client: &Client,
    contract: Address,
    interface_id: FixedBytes<4>,
    format: OutputFormat,
) -> Result<()> {
    let supported = client
        .methods
        .supports_interface(contract, interface_id)
        .await?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "contract": contract,
            "interfaceId": interface_id,
            "supported": supported,
        })),
        OutputFormat::Text => {
            println!("{}", if supported { "supported" } else { "not supported" });
            Ok(())
        }
    }
}

pub fn handle_metadata(format: OutputFormat) -> Result<()> {
    let build = BuildMetadata::bundled().context("Bundled build metadata is invalid")?;
    let release = ReleaseMetadata::bundled().context("Bundled release metadata is invalid")?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "ensSubdomain": sdk::metadata::PLUGIN_REPO_ENS_NAME,
            "version": sdk::VERSION.to_string(),
            "build": build,
            "release": release,
        })),
        OutputFormat::Text => {
            println!("{} v{}", release.name, sdk::VERSION);
            println!("{}", release.description);
            println!("ENS subdomain: {}", sdk::metadata::PLUGIN_REPO_ENS_NAME);
            println!("Change: {}", build.change);
            Ok(())
        }
    }
}
