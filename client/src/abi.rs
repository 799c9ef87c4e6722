//! ABI of the external contracts the client calls

use alloy_sol_types::sol;

sol! {
    interface IStorage {
        function storeNumber(uint256 _number) external;
    }

    struct Tag {
        uint8 release;
        uint16 build;
    }

    struct Version {
        Tag tag;
        address pluginSetup;
        bytes buildMetadata;
    }

    interface IPluginRepo {
        function latestRelease() external view returns (uint8);
        function getLatestVersion(uint8 _release) external view returns (Version memory);
    }

    struct PluginSetupRef {
        Tag versionTag;
        address pluginSetupRepo;
    }

    struct PrepareInstallationParams {
        PluginSetupRef pluginSetupRef;
        bytes data;
    }

    interface IPluginSetupProcessor {
        function prepareInstallation(address _dao, PrepareInstallationParams calldata _params)
            external
            returns (address plugin);
    }
}

impl From<Tag> for sdk::VersionTag {
    fn from(tag: Tag) -> Self {
        sdk::VersionTag::new(tag.release, tag.build)
    }
}

impl From<sdk::VersionTag> for Tag {
    fn from(tag: sdk::VersionTag) -> Self {
        Tag {
            release: tag.release,
            build: tag.build,
        }
    }
}
