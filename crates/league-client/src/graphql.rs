//! Data store backed by a hosted GraphQL API.
//!
//! Each record kind maps onto the model operations the hosted API generates
//! for it: `list<Plural>(filter, nextToken)` and `create<Model>(input)`.
//! Requests authenticate with the API key.

use std::rc::Rc;

use async_trait::async_trait;
use league_types::{Draft, ListFilter, Record};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    config::ApiConfig, error::{ClientError, ClientResult}, traits::DataStore, transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport}
};

/// Body of a GraphQL POST.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlError {
    message: String,
    error_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<Option<T>>,
    next_token: Option<String>,
}

fn list_field<T: Record>() -> String {
    format!("list{}", T::PLURAL)
}

fn create_field<T: Record>() -> String {
    format!("create{}", T::COLLECTION)
}

/// One page of `T`'s collection, optionally filtered.
pub fn list_request<T: Record>(filter: Option<&ListFilter>, next_token: Option<&str>) -> GraphQlRequest {
    let field = list_field::<T>();
    let query = format!(
        "query List{plural}($filter: Model{model}FilterInput, $nextToken: String) {{ {field}(filter: $filter, nextToken: $nextToken) {{ items {{ {selection} }} nextToken }} }}",
        plural = T::PLURAL,
        model = T::COLLECTION,
        selection = T::selection(),
    );
    GraphQlRequest {
        query,
        variables: json!({
            "filter": filter.map(ListFilter::to_graphql),
            "nextToken": next_token,
        }),
    }
}

/// Create mutation for `draft`, selecting the stored record back.
pub fn create_request<D: Draft>(draft: &D) -> ClientResult<GraphQlRequest> {
    let model = <D::Record as Record>::COLLECTION;
    let input = serde_json::to_value(draft).map_err(|e| ClientError::decode(model, e))?;
    let query = format!(
        "mutation Create{model}($input: Create{model}Input!) {{ {field}(input: $input) {{ {selection} }} }}",
        field = create_field::<D::Record>(),
        selection = <D::Record as Record>::selection(),
    );
    Ok(GraphQlRequest {
        query,
        variables: json!({ "input": input }),
    })
}

/// Pull `field` out of a response body, surfacing GraphQL errors first.
fn take_field(status: StatusCode, body: &[u8], field: &str) -> ClientResult<Value> {
    let response: GraphQlResponse = match serde_json::from_slice(body) {
        Ok(response) => response,
        Err(_) if !status.is_success() => {
            return Err(ClientError::remote(format!("data API returned {status}")));
        }
        Err(e) => return Err(ClientError::decode(field, e)),
    };

    if let Some(first) = response.errors.first() {
        debug!(error_type = ?first.error_type, count = response.errors.len(), "graphql errors");
        return Err(ClientError::remote(first.message.clone()));
    }
    if !status.is_success() {
        return Err(ClientError::remote(format!("data API returned {status}")));
    }

    response
        .data
        .and_then(|mut data| data.get_mut(field).map(Value::take))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ClientError::remote(format!("response carried no {field}")))
}

fn decode_page<T: Record>(status: StatusCode, body: &[u8]) -> ClientResult<(Vec<T>, Option<String>)> {
    let field = list_field::<T>();
    let value = take_field(status, body, &field)?;
    let page: Page<T> = serde_json::from_value(value).map_err(|e| ClientError::decode(field, e))?;
    // Deleted or unreadable entries come back as nulls.
    Ok((page.items.into_iter().flatten().collect(), page.next_token))
}

fn decode_created<R: Record>(status: StatusCode, body: &[u8]) -> ClientResult<R> {
    let field = create_field::<R>();
    let value = take_field(status, body, &field)?;
    serde_json::from_value(value).map_err(|e| ClientError::decode(field, e))
}

pub struct GraphQlStore {
    transport: Rc<dyn HttpTransport>,
    config: ApiConfig,
}

impl GraphQlStore {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, Rc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: ApiConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self { transport, config }
    }

    async fn post(&self, request: &GraphQlRequest) -> ClientResult<HttpResponse> {
        let body = serde_json::to_vec(request).map_err(|e| ClientError::decode("request", e))?;
        let request = HttpRequest::new(self.config.endpoint.as_str(), body)
            .header("Content-Type", "application/json")
            .header("x-api-key", self.config.api_key.clone());
        self.transport.post(request).await
    }
}

#[async_trait(?Send)]
impl DataStore for GraphQlStore {
    async fn list<T: Record>(&self, filter: Option<&ListFilter>) -> ClientResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let request = list_request::<T>(filter, next_token.as_deref());
            let response = self.post(&request).await?;
            let (page, token) = decode_page::<T>(response.status, &response.body)?;
            items.extend(page);

            match token {
                Some(token) if next_token.as_deref() != Some(token.as_str()) => next_token = Some(token),
                _ => break,
            }
        }
        debug!(collection = T::COLLECTION, count = items.len(), "listed");
        Ok(items)
    }

    async fn create<D: Draft>(&self, draft: &D) -> ClientResult<D::Record> {
        let request = create_request(draft)?;
        let response = self.post(&request).await?;
        decode_created::<D::Record>(response.status, &response.body)
    }
}
