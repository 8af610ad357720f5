use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use tracing::debug;
use url::form_urlencoded;

use super::response::ApiError;

/// Request parameters that may arrive in the query string or a JSON body.
///
/// Lookups check the query string first and fall back to the body, field by
/// field. Empty strings count as absent; JSON numbers and `true` are read as
/// their text. A body that is empty or not a JSON object is ignored rather
/// than rejected, but one that cannot be read at all fails the request.
#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    query: HashMap<String, String>,
    body: Map<String, Value>,
}

impl RequestParams {
    pub fn new(query: Option<&str>, body: &[u8]) -> Self {
        let query = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let body = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                if !body.is_empty() {
                    debug!("Ignoring non-JSON request body: {}", e);
                }
                Map::new()
            }
        };

        Self { query, body }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.query
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
            .or_else(|| self.body.get(name).and_then(scalar_text))
    }

    /// Every named parameter, in order, or `message` if any is absent.
    pub fn require<const N: usize>(
        &self,
        names: [&str; N],
        message: &'static str,
    ) -> Result<[String; N], ApiError> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, name) in values.iter_mut().zip(names) {
            *slot = self.get(name).ok_or(ApiError::MissingParameters(message))?;
        }
        Ok(values)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().map(str::to_string);
        let body = Bytes::from_request(req, state).await?;
        Ok(Self::new(query.as_deref(), &body))
    }
}
