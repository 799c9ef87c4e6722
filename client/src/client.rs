//! Client assembled from a resolved [`Context`]

use std::sync::Arc;
use std::time::Duration;

use sdk::{PluginError, Result};

use crate::context::Context;
use crate::decoding::Decoding;
use crate::encoding::Encoding;
use crate::estimation::Estimation;
use crate::graphql::GraphqlClient;
use crate::methods::Methods;
use crate::rpc::RpcClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared transport state behind each capability
#[derive(Debug, Clone)]
pub struct ClientCore {
    context: Arc<Context>,
    graphql: GraphqlClient,
    rpc: RpcClient,
}

impl ClientCore {
    pub fn new(context: Context) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PluginError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            graphql: GraphqlClient::new(http.clone(), context.graphql_nodes.clone()),
            rpc: RpcClient::new(http, context.web3_providers.clone()),
            context: Arc::new(context),
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

/// Entry point for off-chain interaction with the plugin
///
/// Capabilities are plain fields; they share one [`ClientCore`].
#[derive(Debug, Clone)]
pub struct Client {
    pub methods: Methods,
    pub estimation: Estimation,
    pub encoding: Encoding,
    pub decoding: Decoding,
}

impl Client {
    pub fn new(context: Context) -> Result<Self> {
        let plugin_address = context.plugin_address;
        let core = ClientCore::new(context)?;

        tracing::debug!(
            "Client ready: network={}, plugin={}",
            core.context().network,
            plugin_address
        );

        Ok(Self {
            methods: Methods::new(core.clone()),
            estimation: Estimation::new(core),
            encoding: Encoding::new(plugin_address),
            decoding: Decoding,
        })
    }
}
