//! GraphQL transport for the subgraph indexer
//!
//! Requests go to the configured nodes in order. A node that cannot be
//! reached is skipped; an answer from a reachable node, including a GraphQL
//! error, is final.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sdk::{PluginError, Result};

/// Single DAO lookup by id
pub const QUERY_NUMBER: &str = r#"query Number($id: ID!) {
  dao(id: $id) {
    number {
      value
    }
  }
}"#;

/// Paginated DAO list with stored numbers
pub const QUERY_NUMBERS: &str = r#"query Numbers($limit: Int!, $skip: Int!, $direction: OrderDirection!, $sortBy: Dao_orderBy!, $where: Dao_filter = {}) {
  daos(where: $where, first: $limit, skip: $skip, orderDirection: $direction, orderBy: $sortBy) {
    id
    subdomain
    number {
      value
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// Client for one or more equivalent GraphQL nodes
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    nodes: Vec<String>,
}

impl GraphqlClient {
    pub fn new(http: Client, nodes: Vec<String>) -> Self {
        Self { http, nodes }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Run `query` with `variables` and deserialize the `data` member
    pub async fn request<T: DeserializeOwned>(&self, query: &str, variables: &Value) -> Result<T> {
        if self.nodes.is_empty() {
            return Err(PluginError::Config(
                "No GraphQL nodes configured".to_string(),
            ));
        }

        let mut last_error = None;
        for node in &self.nodes {
            match self.request_node(node, query, variables).await {
                Err(PluginError::Network(msg)) => {
                    tracing::warn!("GraphQL node {} unavailable: {}", node, msg);
                    last_error = Some(PluginError::Network(msg));
                }
                other => return other,
            }
        }

        Err(last_error
            .unwrap_or_else(|| PluginError::Network("All GraphQL nodes failed".to_string())))
    }

    async fn request_node<T: DeserializeOwned>(
        &self,
        node: &str,
        query: &str,
        variables: &Value,
    ) -> Result<T> {
        tracing::debug!("GraphQL request to {}: variables={}", node, variables);

        let response = self
            .http
            .post(node)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(|e| PluginError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PluginError::Network(format!(
                "GraphQL node {} returned {}",
                node, status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PluginError::Graphql(format!("HTTP {}: {}", status, body)));
        }

        let body: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| PluginError::Graphql(format!("Invalid response: {}", e)))?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(PluginError::Graphql(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| PluginError::Graphql("Response has no data".to_string()))
    }
}
