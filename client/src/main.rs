// ValidHashCondition toolkit
// Main entry point for the vhc binary

use clap::Parser;
use condition_client::cli::{Cli, Command};
use condition_client::config::Config;
use condition_client::handlers::{
    handle_decode, handle_encode, handle_estimate_store, handle_install_plan, handle_metadata,
    handle_number, handle_numbers, handle_supports_interface, handle_uninstall_plan, OutputFormat,
};
use condition_client::telemetry::init_telemetry_with_level;
use condition_client::{Client, Context, NumbersQueryParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // --log beats the config file; RUST_LOG beats both
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    tracing::debug!("vhc v{}", env!("CARGO_PKG_VERSION"));

    let context = Context::from_params(&config.to_context_params());

    match cli.command {
        Command::Encode { value } => handle_encode(value, format),

        Command::Decode { data } => handle_decode(&data, format),

        Command::InstallPlan { dao, plugin } => {
            handle_install_plan(dao, plugin.unwrap_or(context.plugin_address), format)
        }

        Command::UninstallPlan { dao, plugin } => handle_uninstall_plan(dao, plugin, format),

        Command::Number { dao } => {
            let client = Client::new(context)?;
            handle_number(&client, dao, format).await
        }

        Command::Numbers {
            limit,
            skip,
            sort_by,
            direction,
        } => {
            let client = Client::new(context)?;
            let params = NumbersQueryParams {
                limit,
                skip,
                direction,
                sort_by,
                daos: None,
            };
            handle_numbers(&client, &params, format).await
        }

        Command::EstimateStore { value } => {
            let client = Client::new(context)?;
            handle_estimate_store(&client, value, format).await
        }

        Command::SupportsInterface {
            contract,
            interface_id,
        } => {
            let client = Client::new(context)?;
            handle_supports_interface(&client, contract, interface_id, format).await
        }

        Command::Metadata => handle_metadata(format),
    }
}
