//! REST implementation of the statement client
//!
//! Talks to the workspace statement-execution API: `POST
//! /api/2.0/sql/statements` to submit, `GET
//! /api/2.0/sql/statements/{id}` to poll. Authentication is a bearer
//! token; there is no session state between calls.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{DbError, DbResult};
use crate::protocol::StatementResponse;
use crate::traits::StatementClient;

/// HTTP-level timeout; deliberately longer than the server-side wait so
/// held-open submits are not cut short by the client.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Statement client backed by the warehouse REST API.
pub struct RestStatementClient {
    http: reqwest::Client,
    host: String,
    token: String,
}

impl RestStatementClient {
    /// Create a client for the given workspace host and bearer token.
    pub fn new(host: &str, token: &str) -> DbResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| DbError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/2.0/sql/statements{}", self.host, path)
    }
}

#[async_trait]
impl StatementClient for RestStatementClient {
    async fn submit(
        &self,
        warehouse_id: &str,
        sql: &str,
        wait_timeout_secs: u64,
    ) -> DbResult<StatementResponse> {
        let body = json!({
            "warehouse_id": warehouse_id,
            "statement": sql,
            "wait_timeout": format!("{wait_timeout_secs}s"),
        });

        let response = self
            .http
            .post(self.endpoint(""))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        decode_response(response).await
    }

    async fn poll(&self, statement_id: &str) -> DbResult<StatementResponse> {
        let response = self
            .http
            .get(self.endpoint(&format!("/{statement_id}")))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        decode_response(response).await
    }
}

async fn decode_response(response: reqwest::Response) -> DbResult<StatementResponse> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DbError::Connection(format!(
            "warehouse returned {status}: {body}"
        )));
    }

    response
        .json::<StatementResponse>()
        .await
        .map_err(|e| DbError::Decode(e.to_string()))
}
