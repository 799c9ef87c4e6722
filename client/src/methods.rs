//! Read-only queries against the indexer and the chain

use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use contracts::interfaces::IERC165;
use sdk::{PluginError, Result};

use crate::client::ClientCore;
use crate::graphql::{QUERY_NUMBER, QUERY_NUMBERS};

/// Ordering applied by the indexer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(PluginError::MalformedInput(format!(
                "Unknown sort direction: {}",
                other
            ))),
        }
    }
}

/// Field the number list is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumbersSortBy {
    Number,
    #[default]
    CreatedAt,
}

impl fmt::Display for NumbersSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::CreatedAt => write!(f, "createdAt"),
        }
    }
}

impl FromStr for NumbersSortBy {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "number" => Ok(Self::Number),
            "createdAt" | "created-at" => Ok(Self::CreatedAt),
            other => Err(PluginError::MalformedInput(format!(
                "Unknown sort field: {}",
                other
            ))),
        }
    }
}

/// Pagination and ordering for [`Methods::get_numbers`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumbersQueryParams {
    pub limit: u32,
    pub skip: u32,
    pub direction: SortDirection,
    pub sort_by: NumbersSortBy,
    /// Restrict the list to these DAOs
    pub daos: Option<Vec<Address>>,
}

impl Default for NumbersQueryParams {
    fn default() -> Self {
        Self {
            limit: 10,
            skip: 0,
            direction: SortDirection::Asc,
            sort_by: NumbersSortBy::CreatedAt,
            daos: None,
        }
    }
}

/// One DAO and the number it stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberListItem {
    pub id: Address,
    pub subdomain: String,
    pub value: U256,
}

#[derive(Debug, Deserialize)]
struct NumberValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct NumberDao {
    number: Option<NumberValue>,
}

#[derive(Debug, Deserialize)]
struct NumberResponse {
    dao: Option<NumberDao>,
}

#[derive(Debug, Deserialize)]
struct NumbersDao {
    id: String,
    #[serde(default)]
    subdomain: Option<String>,
    number: Option<NumberValue>,
}

#[derive(Debug, Deserialize)]
struct NumbersResponse {
    daos: Vec<NumbersDao>,
}

/// Subgraph entity ids are lowercase hex addresses
fn dao_id(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

fn parse_value(raw: &str) -> Result<U256> {
    U256::from_str(raw)
        .map_err(|e| PluginError::Graphql(format!("Invalid number value '{}': {}", raw, e)))
}

/// Query capability of a [`crate::Client`]
#[derive(Debug, Clone)]
pub struct Methods {
    core: ClientCore,
}

impl Methods {
    pub fn new(core: ClientCore) -> Self {
        Self { core }
    }

    /// Number stored by `dao`
    ///
    /// Fails with `NotFound` when the indexer has no DAO or no number for it.
    pub async fn get_number(&self, dao: Address) -> Result<U256> {
        let variables = json!({ "id": dao_id(&dao) });
        let response: NumberResponse = self
            .core
            .graphql()
            .request(QUERY_NUMBER, &variables)
            .await?;

        let number = response
            .dao
            .and_then(|dao| dao.number)
            .ok_or_else(|| PluginError::NotFound(format!("No number stored for DAO {}", dao)))?;

        parse_value(&number.value)
    }

    /// Page of DAOs with their numbers, in indexer order
    pub async fn get_numbers(&self, params: &NumbersQueryParams) -> Result<Vec<NumberListItem>> {
        let mut variables = json!({
            "limit": params.limit,
            "skip": params.skip,
            "direction": params.direction,
            "sortBy": params.sort_by,
        });
        if let Some(daos) = &params.daos {
            let ids: Vec<String> = daos.iter().map(dao_id).collect();
            variables["where"] = json!({ "id_in": ids });
        }

        let response: NumbersResponse = self
            .core
            .graphql()
            .request(QUERY_NUMBERS, &variables)
            .await?;

        tracing::debug!("Indexer returned {} DAOs", response.daos.len());

        response
            .daos
            .into_iter()
            .map(|dao| {
                let id = Address::from_str(&dao.id).map_err(|e| {
                    PluginError::Graphql(format!("Invalid DAO id '{}': {}", dao.id, e))
                })?;
                let value = match dao.number {
                    Some(number) => parse_value(&number.value)?,
                    None => U256::ZERO,
                };
                Ok(NumberListItem {
                    id,
                    subdomain: dao.subdomain.unwrap_or_default(),
                    value,
                })
            })
            .collect()
    }

    /// ERC-165 check of `contract` for `interface_id`
    ///
    /// A call that reverts or returns garbage counts as unsupported.
    pub async fn supports_interface(
        &self,
        contract: Address,
        interface_id: FixedBytes<4>,
    ) -> Result<bool> {
        let data = IERC165::supportsInterfaceCall {
            interfaceId: interface_id,
        }
        .abi_encode();

        let output = match self.core.rpc().call(contract, data.into()).await {
            Ok(output) => output,
            Err(PluginError::Rpc { code, message }) => {
                tracing::debug!("supportsInterface reverted ({}): {}", code, message);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        Ok(IERC165::supportsInterfaceCall::abi_decode_returns(&output, true)
            .map(|ret| ret._0)
            .unwrap_or(false))
    }
}
