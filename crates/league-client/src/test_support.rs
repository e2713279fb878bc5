//! In-memory collaborators for unit tests.

use std::{
    cell::{Cell, RefCell}, collections::{HashMap, VecDeque}
};

use async_trait::async_trait;
use league_types::{Draft, ListFilter, Record, SessionClaims, SignUpOutcome, UserAttribute};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::{
    error::{ClientError, ClientResult}, traits::{DataStore, IdentityProvider}, transport::{HttpRequest, HttpResponse, HttpTransport}
};

#[derive(Clone, Debug)]
pub enum SessionBehavior {
    Anonymous,
    Member(SessionClaims),
    Fail,
}

impl SessionBehavior {
    pub fn member(groups: &[&str]) -> Self {
        SessionBehavior::Member(SessionClaims {
            username: "tester".to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            expires_at: None,
        })
    }

    /// Member whose token expires at `exp` (seconds since the epoch).
    pub fn member_until(groups: &[&str], exp: i64) -> Self {
        match Self::member(groups) {
            SessionBehavior::Member(claims) => SessionBehavior::Member(SessionClaims {
                expires_at: Some(exp),
                ..claims
            }),
            other => other,
        }
    }
}

pub struct MockIdentity {
    behavior: RefCell<SessionBehavior>,
    session_calls: Cell<usize>,
    /// Suspend once inside `current_session`, so concurrent callers overlap.
    slow_lookup: Cell<bool>,
    sign_in_error: RefCell<Option<String>>,
    sign_up_error: RefCell<Option<String>>,
    sign_out_error: RefCell<Option<String>>,
    /// (identifier, secret) pairs seen by sign_in
    pub sign_ins: RefCell<Vec<(String, String)>>,
    pub sign_ups: RefCell<Vec<(String, Vec<UserAttribute>)>>,
}

impl MockIdentity {
    pub fn new(behavior: SessionBehavior) -> Self {
        Self {
            behavior: RefCell::new(behavior),
            session_calls: Cell::new(0),
            slow_lookup: Cell::new(false),
            sign_in_error: RefCell::new(None),
            sign_up_error: RefCell::new(None),
            sign_out_error: RefCell::new(None),
            sign_ins: RefCell::new(Vec::new()),
            sign_ups: RefCell::new(Vec::new()),
        }
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.get()
    }

    pub fn slow_lookups(&self) {
        self.slow_lookup.set(true);
    }

    pub fn set_behavior(&self, behavior: SessionBehavior) {
        self.behavior.replace(behavior);
    }

    pub fn fail_sign_in(&self, message: &str) {
        self.sign_in_error.replace(Some(message.to_string()));
    }

    pub fn fail_sign_up(&self, message: &str) {
        self.sign_up_error.replace(Some(message.to_string()));
    }

    pub fn fail_sign_out(&self, message: &str) {
        self.sign_out_error.replace(Some(message.to_string()));
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MockIdentity {
    async fn current_session(&self) -> ClientResult<Option<SessionClaims>> {
        self.session_calls.set(self.session_calls.get() + 1);
        if self.slow_lookup.get() {
            tokio::task::yield_now().await;
        }
        match &*self.behavior.borrow() {
            SessionBehavior::Anonymous => Ok(None),
            SessionBehavior::Member(claims) => Ok(Some(claims.clone())),
            SessionBehavior::Fail => Err(ClientError::Transport("identity service unreachable".to_string())),
        }
    }

    async fn sign_in(&self, identifier: &str, secret: &SecretString) -> ClientResult<()> {
        self.sign_ins
            .borrow_mut()
            .push((identifier.to_string(), secret.expose_secret().to_string()));
        if let Some(message) = self.sign_in_error.borrow().clone() {
            return Err(ClientError::remote(message));
        }
        self.behavior.replace(SessionBehavior::Member(SessionClaims {
            username: identifier.to_string(),
            groups: Vec::new(),
            expires_at: None,
        }));
        Ok(())
    }

    async fn sign_up(
        &self,
        identifier: &str,
        _secret: &SecretString,
        attributes: &[UserAttribute],
    ) -> ClientResult<SignUpOutcome> {
        self.sign_ups
            .borrow_mut()
            .push((identifier.to_string(), attributes.to_vec()));
        if let Some(message) = self.sign_up_error.borrow().clone() {
            return Err(ClientError::remote(message));
        }
        Ok(SignUpOutcome {
            confirmed: false,
            delivery_destination: Some("t***@example.com".to_string()),
        })
    }

    async fn sign_out(&self) -> ClientResult<()> {
        if let Some(message) = self.sign_out_error.borrow().clone() {
            return Err(ClientError::Transport(message));
        }
        self.behavior.replace(SessionBehavior::Anonymous);
        Ok(())
    }
}

/// Equality match the way the hosted API applies it. Numbers compare by
/// their JSON text; a missing field never matches.
fn filter_matches(filter: &ListFilter, record: &Value) -> bool {
    match record.get(&filter.field) {
        Some(Value::String(s)) => *s == filter.value,
        Some(Value::Number(n)) => n.to_string() == filter.value,
        Some(Value::Bool(b)) => b.to_string() == filter.value,
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    List {
        collection: &'static str,
        filter: Option<ListFilter>,
    },
    Create {
        collection: &'static str,
    },
}

/// Collections of JSON records keyed by model name.
#[derive(Default)]
pub struct MockStore {
    collections: RefCell<HashMap<&'static str, Vec<Value>>>,
    pub calls: RefCell<Vec<StoreCall>>,
    fail_list: Cell<bool>,
    create_error: RefCell<Option<String>>,
    next_id: Cell<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed<T: Record>(&self, records: &[T]) {
        let values = records
            .iter()
            .map(|r| serde_json::to_value(r).expect("serialize fixture"))
            .collect::<Vec<_>>();
        self.collections
            .borrow_mut()
            .entry(T::COLLECTION)
            .or_default()
            .extend(values);
    }

    pub fn fail_lists(&self) {
        self.fail_list.set(true);
    }

    pub fn fail_creates(&self, message: &str) {
        self.create_error.replace(Some(message.to_string()));
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::List { .. }))
            .count()
    }

    pub fn create_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::Create { .. }))
            .count()
    }
}

#[async_trait(?Send)]
impl DataStore for MockStore {
    async fn list<T: Record>(&self, filter: Option<&ListFilter>) -> ClientResult<Vec<T>> {
        self.calls.borrow_mut().push(StoreCall::List {
            collection: T::COLLECTION,
            filter: filter.cloned(),
        });
        if self.fail_list.get() {
            return Err(ClientError::Transport("store unreachable".to_string()));
        }
        let collections = self.collections.borrow();
        let values = collections.get(T::COLLECTION).cloned().unwrap_or_default();
        values
            .into_iter()
            .filter(|v| filter.is_none_or(|f| filter_matches(f, v)))
            .map(|v| serde_json::from_value(v).map_err(|e| ClientError::decode(T::COLLECTION, e)))
            .collect()
    }

    async fn create<D: Draft>(&self, draft: &D) -> ClientResult<D::Record> {
        let collection = <D::Record as Record>::COLLECTION;
        self.calls.borrow_mut().push(StoreCall::Create { collection });
        if let Some(message) = self.create_error.borrow().clone() {
            return Err(ClientError::remote(message));
        }
        let mut value = serde_json::to_value(draft).map_err(|e| ClientError::decode(collection, e))?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        if let Value::Object(fields) = &mut value {
            fields.insert("id".to_string(), Value::String(format!("new-{id}")));
        }
        self.collections
            .borrow_mut()
            .entry(collection)
            .or_default()
            .push(value.clone());
        serde_json::from_value(value).map_err(|e| ClientError::decode(collection, e))
    }
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<ClientResult<HttpResponse>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: StatusCode, body: Value) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string().into_bytes(),
        }));
    }

    /// Queue a request that never gets a response.
    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ClientError::Transport(message.to_string())));
    }

    pub fn request_bodies(&self) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("json request body"))
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response left".to_string())))
    }
}
