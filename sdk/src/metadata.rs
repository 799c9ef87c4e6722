//! Plugin settings and build/release metadata documents
//!
//! The metadata documents are published next to every build in the plugin
//! repo. They describe the ABI inputs each setup step expects so that
//! front-ends can encode installation data without the contract sources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::VersionTag;

/// ENS subdomain of the plugin repo
pub const PLUGIN_REPO_ENS_NAME: &str = "condition-1";

/// Name of the condition contract
pub const PLUGIN_CONTRACT_NAME: &str = "ValidHashCondition";

/// Name of the setup contract
pub const PLUGIN_SETUP_CONTRACT_NAME: &str = "ValidHashConditionSetup";

/// Version of this build
pub const VERSION: VersionTag = VersionTag::new(1, 1);

const BUILD_METADATA_JSON: &str = include_str!("build-metadata.json");
const RELEASE_METADATA_JSON: &str = include_str!("release-metadata.json");

/// One ABI parameter of a setup step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub internal_type: String,
    #[serde(default)]
    pub description: String,
}

/// A setup step and the inputs it decodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStep {
    pub description: String,
    pub inputs: Vec<AbiInput>,
}

impl SetupStep {
    /// Solidity type list, e.g. `(uint256,address)`
    pub fn type_signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|i| i.kind.as_str()).collect();
        format!("({})", types.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSetupMetadata {
    pub prepare_installation: SetupStep,
    /// Keyed by the build number being updated from
    #[serde(default)]
    pub prepare_update: BTreeMap<String, SetupStep>,
    pub prepare_uninstallation: SetupStep,
}

/// Per-build metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    #[serde(default)]
    pub ui: serde_json::Value,
    pub change: String,
    pub plugin_setup: PluginSetupMetadata,
}

impl BuildMetadata {
    /// Metadata shipped with this build
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILD_METADATA_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Update step available when coming from `from_build`
    pub fn update_from(&self, from_build: u16) -> Option<&SetupStep> {
        self.plugin_setup.prepare_update.get(&from_build.to_string())
    }
}

/// Per-release metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub images: serde_json::Value,
}

impl ReleaseMetadata {
    /// Metadata shipped with this release
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(RELEASE_METADATA_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_build_metadata_parses() {
        let build = BuildMetadata::bundled().unwrap();

        assert!(build.plugin_setup.prepare_installation.inputs.is_empty());
        assert!(build.plugin_setup.prepare_uninstallation.inputs.is_empty());
        assert_eq!(build.plugin_setup.prepare_installation.type_signature(), "()");
        assert!(build.update_from(1).is_some());
        assert!(build.update_from(7).is_none());
    }

    #[test]
    fn test_bundled_release_metadata_names_contract() {
        let release = ReleaseMetadata::bundled().unwrap();
        assert_eq!(release.name, PLUGIN_CONTRACT_NAME);
    }

    #[test]
    fn test_type_signature_with_inputs() {
        let step = SetupStep {
            description: "Install with a number".to_string(),
            inputs: vec![
                AbiInput {
                    name: "number".to_string(),
                    kind: "uint256".to_string(),
                    internal_type: "uint256".to_string(),
                    description: String::new(),
                },
                AbiInput {
                    name: "admin".to_string(),
                    kind: "address".to_string(),
                    internal_type: "address".to_string(),
                    description: String::new(),
                },
            ],
        };

        assert_eq!(step.type_signature(), "(uint256,address)");
    }

    #[test]
    fn test_build_metadata_serialization() {
        let build = BuildMetadata::bundled().unwrap();
        let json = build.to_json().unwrap();
        let parsed = BuildMetadata::from_json(&json).unwrap();

        assert_eq!(build, parsed);
        assert!(json.contains("pluginSetup"));
        assert!(json.contains("prepareInstallation"));
    }

    #[test]
    fn test_version_constant() {
        assert_eq!(VERSION.release, 1);
        assert_eq!(VERSION.build, 1);
        assert_eq!(PLUGIN_REPO_ENS_NAME, "condition-1");
    }
}
