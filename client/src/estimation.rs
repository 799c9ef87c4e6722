//! Gas fee estimation for plugin transactions

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use serde::Serialize;

use sdk::{PluginError, Result, VersionTag};

use crate::abi::{self, IPluginRepo, IPluginSetupProcessor};
use crate::client::ClientCore;
use crate::encoding::encode_store_number;

/// Fee range in wei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasFeeEstimation {
    pub average: U256,
    pub max: U256,
}

/// Install request to price
#[derive(Debug, Clone, Default)]
pub struct InstallationEstimateParams {
    pub dao: Address,
    /// Latest published version when `None`
    pub version: Option<VersionTag>,
    pub data: Bytes,
}

/// `max = gas × max_fee_per_gas`, `average = max × factor` at cent precision
///
/// Both saturate at `U256::MAX` instead of wrapping.
pub fn gas_fee(gas: U256, max_fee_per_gas: U256, factor: f64) -> GasFeeEstimation {
    let max = gas.saturating_mul(max_fee_per_gas);
    let percent = U256::from((factor * 100.0).trunc().max(0.0) as u64);
    let hundred = U256::from(100);

    // floor(max × percent / 100) without forming max × percent
    let average = (max / hundred)
        .saturating_mul(percent)
        .saturating_add((max % hundred) * percent / hundred);

    GasFeeEstimation { average, max }
}

/// Estimation capability of a [`crate::Client`]
#[derive(Debug, Clone)]
pub struct Estimation {
    core: ClientCore,
}

impl Estimation {
    pub fn new(core: ClientCore) -> Self {
        Self { core }
    }

    /// Fee for a `storeNumber(value)` call on the plugin
    pub async fn store_number(&self, value: U256) -> Result<GasFeeEstimation> {
        let context = self.core.context();
        let gas = self
            .core
            .rpc()
            .estimate_gas(
                context.signer_address,
                context.plugin_address,
                encode_store_number(value),
            )
            .await?;
        self.approximate_gas_fee(gas).await
    }

    /// Fee for preparing an installation through the setup processor
    pub async fn prepare_installation(
        &self,
        params: &InstallationEstimateParams,
    ) -> Result<GasFeeEstimation> {
        let context = self.core.context();
        let processor = context.plugin_setup_processor_address.ok_or_else(|| {
            PluginError::Config("plugin_setup_processor_address is not set".to_string())
        })?;

        let version = match params.version {
            Some(version) => version,
            None => self.latest_version().await?,
        };
        tracing::debug!("Estimating installation of version {}", version);

        let call = IPluginSetupProcessor::prepareInstallationCall {
            _dao: params.dao,
            _params: abi::PrepareInstallationParams {
                pluginSetupRef: abi::PluginSetupRef {
                    versionTag: version.into(),
                    pluginSetupRepo: context.repo_address,
                },
                data: params.data.clone(),
            },
        };

        let gas = self
            .core
            .rpc()
            .estimate_gas(context.signer_address, processor, call.abi_encode().into())
            .await?;
        self.approximate_gas_fee(gas).await
    }

    /// Newest build of the newest release in the plugin repo
    pub async fn latest_version(&self) -> Result<VersionTag> {
        let repo = self.core.context().repo_address;
        let rpc = self.core.rpc();

        let output = rpc
            .call(repo, IPluginRepo::latestReleaseCall {}.abi_encode().into())
            .await?;
        let release = IPluginRepo::latestReleaseCall::abi_decode_returns(&output, true)
            .map_err(|e| PluginError::MalformedInput(e.to_string()))?
            ._0;

        let output = rpc
            .call(
                repo,
                IPluginRepo::getLatestVersionCall { _release: release }
                    .abi_encode()
                    .into(),
            )
            .await?;
        let version = IPluginRepo::getLatestVersionCall::abi_decode_returns(&output, true)
            .map_err(|e| PluginError::MalformedInput(e.to_string()))?
            ._0;

        Ok(version.tag.into())
    }

    /// Price `gas` units at the current max fee
    pub async fn approximate_gas_fee(&self, gas: U256) -> Result<GasFeeEstimation> {
        let max_fee_per_gas = self.core.rpc().max_fee_per_gas().await?;
        Ok(gas_fee(
            gas,
            max_fee_per_gas,
            self.core.context().gas_fee_estimation_factor,
        ))
    }
}
