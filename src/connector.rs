// Copyright (c) 2025 the snowflake-client authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The connector facade.

use crate::arrow::to_record_batch;
use crate::client::{HttpClient, SnowflakeClient, SqlApiClient, StatementOutcome};
use crate::config::ConnectorConfig;
use crate::elements::{Database, Role, Schema, Warehouse};
use crate::error::{Error, Result};
use crate::logging;
use crate::result::ResultSet;
use crate::session::{ContextKind, Environment};
use crate::sql::quote_ident;
use crate::types::api::{StatementRequest, StatementResponse};
use arrow_array::RecordBatch;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, info};

/// An authenticated connection to a Snowflake account.
///
/// The connector is a synchronous facade: it owns a tokio runtime and a
/// [`SnowflakeClient`], and every operation is one statement sent through
/// [`execute`](Self::execute). Session-state helpers
/// ([`warehouse`](Self::warehouse), [`database`](Self::database),
/// [`schema`](Self::schema), [`role`](Self::role)) translate semantic
/// operations into SQL text and delegate to the same path.
///
/// The SQL API is stateless, so the connector keeps the current
/// warehouse/database/schema/role selections client-side and sends them
/// with every statement. A successful `USE` issued through a helper or
/// [`set_environment`](Self::set_environment) updates them.
#[derive(Debug)]
pub struct SnowflakeConnector {
    config: ConnectorConfig,
    client: Arc<dyn SnowflakeClient>,
    runtime: tokio::runtime::Runtime,
    context: RwLock<Environment>,
    connected: bool,
}

impl SnowflakeConnector {
    /// Open a connector and verify the credentials with one round trip.
    pub fn connect(config: ConnectorConfig) -> Result<Self> {
        config.validate()?;
        logging::init_logging(&config.log);

        let http = Arc::new(HttpClient::new(config.http.clone(), config.auth.clone())?);
        let client: Arc<dyn SnowflakeClient> = Arc::new(SqlApiClient::new(http, config.base_url()));
        Self::with_client(config, client)
    }

    /// Open a connector over a caller-supplied client.
    ///
    /// Intended for alternative transports and for tests; performs the
    /// same credential-verifying handshake as [`connect`](Self::connect).
    pub fn with_client(config: ConnectorConfig, client: Arc<dyn SnowflakeClient>) -> Result<Self> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to start tokio runtime: {e}")))?;

        let context = Environment {
            warehouse: config.warehouse.clone(),
            database: config.database.clone(),
            schema: config.schema.clone(),
            role: config.role.clone(),
        };

        let mut connector = Self {
            config,
            client,
            runtime,
            context: RwLock::new(context),
            connected: false,
        };

        connector.execute("SELECT CURRENT_VERSION()", 1, true)?;
        connector.connected = true;
        info!(
            account = %connector.config.account,
            user = %connector.config.user,
            "connected to snowflake"
        );

        Ok(connector)
    }

    /// Whether the opening handshake succeeded.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// The configured account identifier.
    pub fn account(&self) -> &str {
        &self.config.account
    }

    /// The configured user.
    pub fn user(&self) -> &str {
        &self.config.user
    }

    /// Execute a statement and materialize its result.
    ///
    /// `n` caps the number of rows materialized; negative means all rows.
    /// Result partitions beyond the first are fetched only while the cap
    /// has not been reached. With `silent`, the statement still executes
    /// but the result is discarded and `Ok(None)` is returned.
    ///
    /// The result set's `statement` field is the submitted SQL, verbatim;
    /// its `description` holds one entry per result column.
    pub fn execute(&self, statement: &str, n: i64, silent: bool) -> Result<Option<ResultSet>> {
        self.runtime
            .block_on(self.execute_async(statement, n, silent))
    }

    /// Execute a statement and return all of its rows.
    pub fn query(&self, statement: &str) -> Result<ResultSet> {
        self.execute(statement, -1, false)?
            .ok_or_else(|| Error::ResultShape("statement produced no result set".to_string()))
    }

    /// Execute a statement and materialize the result as an Arrow
    /// [`RecordBatch`].
    pub fn query_arrow(&self, statement: &str) -> Result<RecordBatch> {
        to_record_batch(&self.query(statement)?)
    }

    /// The current warehouse/database/schema/role selections, as reported
    /// by the session itself.
    ///
    /// Selections never made come back `None` — a session has no default
    /// warehouse until one is used.
    pub fn get_environment(&self) -> Result<Environment> {
        let result = self.query(
            "SELECT CURRENT_WAREHOUSE(), CURRENT_DATABASE(), CURRENT_SCHEMA(), CURRENT_ROLE()",
        )?;
        Ok(Environment {
            warehouse: result.scalar(0, 0)?.map(str::to_string),
            database: result.scalar(0, 1)?.map(str::to_string),
            schema: result.scalar(0, 2)?.map(str::to_string),
            role: result.scalar(0, 3)?.map(str::to_string),
        })
    }

    /// Change any of the four session selections in one call.
    ///
    /// Issues a `USE` statement for every `Some` field. The role is
    /// switched first since it can gate access to the others.
    pub fn set_environment(&self, update: Environment) -> Result<()> {
        for (kind, name) in [
            (ContextKind::Role, &update.role),
            (ContextKind::Warehouse, &update.warehouse),
            (ContextKind::Database, &update.database),
            (ContextKind::Schema, &update.schema),
        ] {
            if let Some(name) = name {
                self.use_context(kind, name, true)?;
            }
        }
        Ok(())
    }

    /// Warehouse helper bound to this connector.
    pub fn warehouse(&self) -> Warehouse<'_> {
        Warehouse::new(self)
    }

    /// Database helper bound to this connector.
    pub fn database(&self) -> Database<'_> {
        Database::new(self)
    }

    /// Schema helper bound to this connector.
    pub fn schema(&self) -> Schema<'_> {
        Schema::new(self)
    }

    /// Role helper bound to this connector.
    pub fn role(&self) -> Role<'_> {
        Role::new(self)
    }

    /// Close the connector, releasing the HTTP pool and runtime.
    ///
    /// There is no server-side session to tear down; dropping the
    /// connector is equivalent.
    pub fn close(self) {
        info!(account = %self.config.account, "closing connector");
    }

    /// Shared path for the `USE <kind> <name>` helpers. Updates the
    /// client-side context only after the statement succeeds.
    pub(crate) fn use_context(
        &self,
        kind: ContextKind,
        name: &str,
        silent: bool,
    ) -> Result<Option<ResultSet>> {
        let statement = format!("USE {} {}", kind.keyword(), quote_ident(name));
        let result = self.execute(&statement, 1, silent)?;

        let mut context = self.context.write().unwrap_or_else(PoisonError::into_inner);
        *kind.slot(&mut context) = Some(name.to_string());
        Ok(result)
    }

    /// Shared path for the `CURRENT_<kind>()` helpers. A result without
    /// the expected single row is an error, never a default.
    pub(crate) fn current_of(&self, kind: ContextKind) -> Result<Option<String>> {
        let statement = format!("SELECT {}", kind.current_function());
        let result = self
            .execute(&statement, 1, false)?
            .ok_or_else(|| Error::ResultShape("statement produced no result set".to_string()))?;
        Ok(result.scalar(0, 0)?.map(str::to_string))
    }

    async fn execute_async(
        &self,
        statement: &str,
        n: i64,
        silent: bool,
    ) -> Result<Option<ResultSet>> {
        debug!("executing statement: {statement}");

        let request = self.build_request(statement);
        let outcome = self.client.submit_statement(&request).await?;
        let response = self.wait_for_completion(outcome).await?;

        if silent {
            return Ok(None);
        }

        let mut result = ResultSet::from_response(statement, &response)?;
        let cap = if n < 0 { usize::MAX } else { n as usize };
        let partition_count = partition_count(&response);
        let handle = result.statement_handle().to_string();

        let mut partition = 1;
        while partition < partition_count && result.num_rows() < cap {
            if handle.is_empty() {
                return Err(Error::ResultShape(
                    "partitioned result carried no statement handle".to_string(),
                ));
            }
            let part = self.client.fetch_partition(&handle, partition).await?;
            result.extend_rows(part.data.unwrap_or_default());
            partition += 1;
        }
        result.truncate_rows(cap);

        Ok(Some(result))
    }

    async fn wait_for_completion(&self, outcome: StatementOutcome) -> Result<StatementResponse> {
        let deadline = Instant::now() + self.config.poll_timeout;
        let mut outcome = outcome;

        loop {
            match outcome {
                StatementOutcome::Complete(response) => return Ok(*response),
                StatementOutcome::Running { statement_handle } => {
                    if Instant::now() > deadline {
                        let _ = self.client.cancel_statement(&statement_handle).await;
                        return Err(Error::Timeout(self.config.poll_timeout));
                    }

                    tokio::time::sleep(self.config.poll_interval).await;

                    debug!(%statement_handle, "statement still running");
                    outcome = self.client.statement_status(&statement_handle).await?;
                }
            }
        }
    }

    fn build_request(&self, statement: &str) -> StatementRequest {
        let context = self.context.read().unwrap_or_else(PoisonError::into_inner);
        StatementRequest {
            statement: statement.to_string(),
            timeout: self.config.statement_timeout_secs,
            database: context.database.clone(),
            schema: context.schema.clone(),
            warehouse: context.warehouse.clone(),
            role: context.role.clone(),
            parameters: None,
        }
    }
}

fn partition_count(response: &StatementResponse) -> usize {
    response
        .result_set_meta_data
        .as_ref()
        .and_then(|meta| meta.partition_info.as_ref())
        .map(|partitions| partitions.len())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessToken;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock client driven by queued responses.
    #[derive(Debug, Default)]
    struct MockClient {
        requests: Mutex<Vec<StatementRequest>>,
        submit_queue: Mutex<VecDeque<StatementOutcome>>,
        status_queue: Mutex<VecDeque<StatementOutcome>>,
        partitions: Mutex<HashMap<usize, StatementResponse>>,
        canceled: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn queue_submit(&self, outcome: StatementOutcome) {
            self.submit_queue.lock().unwrap().push_back(outcome);
        }

        fn queue_status(&self, outcome: StatementOutcome) {
            self.status_queue.lock().unwrap().push_back(outcome);
        }

        fn queue_partition(&self, partition: usize, response: StatementResponse) {
            self.partitions.lock().unwrap().insert(partition, response);
        }

        fn recorded_requests(&self) -> Vec<StatementRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SnowflakeClient for MockClient {
        async fn submit_statement(&self, request: &StatementRequest) -> Result<StatementOutcome> {
            self.requests.lock().unwrap().push(request.clone());
            self.submit_queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Http("mock: no queued submit outcome".to_string()))
        }

        async fn statement_status(&self, _statement_handle: &str) -> Result<StatementOutcome> {
            self.status_queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Http("mock: no queued status outcome".to_string()))
        }

        async fn fetch_partition(
            &self,
            _statement_handle: &str,
            partition: usize,
        ) -> Result<StatementResponse> {
            self.partitions
                .lock()
                .unwrap()
                .remove(&partition)
                .ok_or_else(|| Error::Http(format!("mock: no queued partition {partition}")))
        }

        async fn cancel_statement(&self, statement_handle: &str) -> Result<()> {
            self.canceled
                .lock()
                .unwrap()
                .push(statement_handle.to_string());
            Ok(())
        }
    }

    fn response(
        row_type: serde_json::Value,
        data: serde_json::Value,
        partition_info: Option<serde_json::Value>,
    ) -> StatementResponse {
        let rows = data.as_array().map(|rows| rows.len()).unwrap_or(0);
        let mut meta = json!({
            "numRows": rows,
            "format": "jsonv2",
            "rowType": row_type,
        });
        if let Some(partition_info) = partition_info {
            meta["partitionInfo"] = partition_info;
        }
        serde_json::from_value(json!({
            "resultSetMetaData": meta,
            "data": data,
            "statementHandle": "01b0-0000",
            "message": "Statement executed successfully."
        }))
        .unwrap()
    }

    fn complete(
        row_type: serde_json::Value,
        data: serde_json::Value,
    ) -> StatementOutcome {
        StatementOutcome::Complete(Box::new(response(row_type, data, None)))
    }

    fn single_text_row(value: Option<&str>) -> StatementOutcome {
        complete(
            json!([{"name": "RESULT", "type": "text"}]),
            json!([[value]]),
        )
    }

    fn status_row() -> StatementOutcome {
        single_text_row(Some("Statement executed successfully."))
    }

    fn test_config() -> ConnectorConfig {
        ConnectorConfig::new(
            "xy12345",
            "alice",
            Arc::new(AccessToken::programmatic("token")),
        )
        .with_poll_interval(Duration::from_millis(1))
    }

    /// Build a connector around a mock without running the handshake.
    fn test_connector(client: Arc<MockClient>, config: ConnectorConfig) -> SnowflakeConnector {
        let context = Environment {
            warehouse: config.warehouse.clone(),
            database: config.database.clone(),
            schema: config.schema.clone(),
            role: config.role.clone(),
        };
        SnowflakeConnector {
            config,
            client,
            runtime: tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap(),
            context: RwLock::new(context),
            connected: true,
        }
    }

    #[test]
    fn test_with_client_handshake_sets_connected() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(single_text_row(Some("9.2.1")));

        let connector = SnowflakeConnector::with_client(test_config(), client.clone()).unwrap();
        assert!(connector.connected());

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].statement, "SELECT CURRENT_VERSION()");
    }

    #[test]
    fn test_with_client_failed_handshake_propagates() {
        // Nothing queued: the handshake submit fails.
        let client = Arc::new(MockClient::default());
        let result = SnowflakeConnector::with_client(test_config(), client);
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[test]
    fn test_execute_returns_statement_and_rows() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([
                {"name": "NAME", "type": "text"},
                {"name": "N", "type": "fixed", "precision": 38, "scale": 0}
            ]),
            json!([["alpha", "1"], ["beta", "2"], ["gamma", "3"]]),
        ));
        let connector = test_connector(client, test_config());

        let result = connector
            .execute("SHOW SCHEMAS;", -1, false)
            .unwrap()
            .unwrap();
        assert_eq!(result.statement, "SHOW SCHEMAS;");
        assert_eq!(result.num_rows(), 3);
        assert_eq!(result.description.len(), 2);
        assert_eq!(result.description[0].name, "NAME");
    }

    #[test]
    fn test_execute_caps_rows_at_n() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([{"name": "N", "type": "fixed", "scale": 0}]),
            json!([["1"], ["2"], ["3"]]),
        ));
        let connector = test_connector(client, test_config());

        let result = connector.execute("SELECT N", 1, false).unwrap().unwrap();
        assert_eq!(result.num_rows(), 1);
        assert_eq!(result.scalar(0, 0).unwrap(), Some("1"));
    }

    #[test]
    fn test_execute_silent_discards_result() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        let connector = test_connector(client, test_config());

        let result = connector.execute("SELECT 1", 1, true).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_execute_sends_session_context() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        let config = test_config().with_database("SNOWFLAKE_SAMPLE_DATA");
        let connector = test_connector(client.clone(), config);

        connector.execute("SELECT 1", 1, false).unwrap();

        let requests = client.recorded_requests();
        assert_eq!(
            requests[0].database.as_deref(),
            Some("SNOWFLAKE_SAMPLE_DATA")
        );
        assert_eq!(requests[0].warehouse, None);
        assert_eq!(requests[0].role, None);
    }

    #[test]
    fn test_execute_polls_until_complete() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(StatementOutcome::Running {
            statement_handle: "01b0-0009".to_string(),
        });
        client.queue_status(StatementOutcome::Running {
            statement_handle: "01b0-0009".to_string(),
        });
        client.queue_status(single_text_row(Some("done")));
        let connector = test_connector(client, test_config());

        let result = connector
            .execute("CALL SLOW_PROC()", -1, false)
            .unwrap()
            .unwrap();
        assert_eq!(result.scalar(0, 0).unwrap(), Some("done"));
    }

    #[test]
    fn test_execute_poll_timeout_cancels_statement() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(StatementOutcome::Running {
            statement_handle: "01b0-0010".to_string(),
        });
        let mut config = test_config();
        config.poll_timeout = Duration::ZERO;
        let connector = test_connector(client.clone(), config);

        let result = connector.execute("CALL SLOW_PROC()", -1, false);
        assert!(matches!(result, Err(Error::Timeout(_))));
        assert_eq!(client.canceled.lock().unwrap().as_slice(), ["01b0-0010"]);
    }

    #[test]
    fn test_execute_assembles_partitions() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(StatementOutcome::Complete(Box::new(response(
            json!([{"name": "N", "type": "fixed", "scale": 0}]),
            json!([["1"], ["2"]]),
            Some(json!([
                {"rowCount": 2, "uncompressedSize": 10},
                {"rowCount": 2, "uncompressedSize": 10}
            ])),
        ))));
        client.queue_partition(
            1,
            response(json!([]), json!([["3"], ["4"]]), None),
        );
        let connector = test_connector(client, test_config());

        let result = connector.execute("SELECT N", -1, false).unwrap().unwrap();
        assert_eq!(result.num_rows(), 4);
        assert_eq!(result.scalar(3, 0).unwrap(), Some("4"));
    }

    #[test]
    fn test_execute_skips_partitions_beyond_cap() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(StatementOutcome::Complete(Box::new(response(
            json!([{"name": "N", "type": "fixed", "scale": 0}]),
            json!([["1"], ["2"]]),
            Some(json!([
                {"rowCount": 2, "uncompressedSize": 10},
                {"rowCount": 2, "uncompressedSize": 10}
            ])),
        ))));
        // No partition queued: fetching one would fail the test.
        let connector = test_connector(client, test_config());

        let result = connector.execute("SELECT N", 2, false).unwrap().unwrap();
        assert_eq!(result.num_rows(), 2);
    }

    #[test]
    fn test_use_warehouse_builds_statement_and_updates_context() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        client.queue_submit(status_row());
        let connector = test_connector(client.clone(), test_config());

        connector.warehouse().use_("COMPUTE_WH", false).unwrap();
        connector.execute("SELECT 1", 1, false).unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].statement, "USE WAREHOUSE COMPUTE_WH");
        // The USE itself is sent before the context update...
        assert_eq!(requests[0].warehouse, None);
        // ...and every statement after it carries the new selection.
        assert_eq!(requests[1].warehouse.as_deref(), Some("COMPUTE_WH"));
    }

    #[test]
    fn test_use_warehouse_quotes_unsafe_names() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        let connector = test_connector(client.clone(), test_config());

        connector.warehouse().use_("my warehouse", true).unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].statement, "USE WAREHOUSE \"my warehouse\"");
    }

    #[test]
    fn test_current_warehouse_returns_name() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([{"name": "CURRENT_WAREHOUSE()", "type": "text"}]),
            json!([["COMPUTE_WH"]]),
        ));
        let connector = test_connector(client.clone(), test_config());

        let current = connector.warehouse().current().unwrap();
        assert_eq!(current.as_deref(), Some("COMPUTE_WH"));
        assert_eq!(
            client.recorded_requests()[0].statement,
            "SELECT CURRENT_WAREHOUSE()"
        );
    }

    #[test]
    fn test_current_warehouse_none_before_use() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(single_text_row(None));
        let connector = test_connector(client, test_config());

        assert_eq!(connector.warehouse().current().unwrap(), None);
    }

    #[test]
    fn test_current_warehouse_empty_result_is_an_error() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([{"name": "CURRENT_WAREHOUSE()", "type": "text"}]),
            json!([]),
        ));
        let connector = test_connector(client, test_config());

        assert!(matches!(
            connector.warehouse().current(),
            Err(Error::ResultShape(_))
        ));
    }

    #[test]
    fn test_get_environment() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([
                {"name": "CURRENT_WAREHOUSE()", "type": "text"},
                {"name": "CURRENT_DATABASE()", "type": "text"},
                {"name": "CURRENT_SCHEMA()", "type": "text"},
                {"name": "CURRENT_ROLE()", "type": "text"}
            ]),
            json!([[null, "SNOWFLAKE", null, "SYSADMIN"]]),
        ));
        let connector = test_connector(client, test_config());

        let env = connector.get_environment().unwrap();
        assert_eq!(env.warehouse, None);
        assert_eq!(env.database.as_deref(), Some("SNOWFLAKE"));
        assert_eq!(env.schema, None);
        assert_eq!(env.role.as_deref(), Some("SYSADMIN"));
    }

    #[test]
    fn test_set_environment_issues_use_statements() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        client.queue_submit(status_row());
        client.queue_submit(status_row());
        let connector = test_connector(client.clone(), test_config());

        connector
            .set_environment(
                Environment::default()
                    .database("SNOWFLAKE")
                    .warehouse("COMPUTE_WH"),
            )
            .unwrap();
        connector.execute("SELECT 1", 1, false).unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].statement, "USE WAREHOUSE COMPUTE_WH");
        assert_eq!(requests[1].statement, "USE DATABASE SNOWFLAKE");
        assert_eq!(requests[2].warehouse.as_deref(), Some("COMPUTE_WH"));
        assert_eq!(requests[2].database.as_deref(), Some("SNOWFLAKE"));
    }

    #[test]
    fn test_database_schema_role_helpers() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(status_row());
        client.queue_submit(status_row());
        client.queue_submit(status_row());
        let connector = test_connector(client.clone(), test_config());

        connector.database().use_("SNOWFLAKE", true).unwrap();
        connector.schema().use_("INFORMATION_SCHEMA", true).unwrap();
        connector.role().use_("SYSADMIN", true).unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].statement, "USE DATABASE SNOWFLAKE");
        assert_eq!(requests[1].statement, "USE SCHEMA INFORMATION_SCHEMA");
        assert_eq!(requests[2].statement, "USE ROLE SYSADMIN");
    }

    #[test]
    fn test_query_arrow_materializes_batch() {
        let client = Arc::new(MockClient::default());
        client.queue_submit(complete(
            json!([
                {"name": "ID", "type": "fixed", "scale": 0, "nullable": false},
                {"name": "NAME", "type": "text"}
            ]),
            json!([["1", "alpha"], ["2", null]]),
        ));
        let connector = test_connector(client, test_config());

        let batch = connector.query_arrow("SELECT ID, NAME FROM T").unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "NAME");
    }
}
