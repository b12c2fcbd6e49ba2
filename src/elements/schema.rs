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

//! Schema session-state helper.

use crate::connector::SnowflakeConnector;
use crate::error::Result;
use crate::result::ResultSet;
use crate::session::ContextKind;

/// Operations on the session's current schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    connector: &'a SnowflakeConnector,
}

impl<'a> Schema<'a> {
    pub(crate) fn new(connector: &'a SnowflakeConnector) -> Self {
        Self { connector }
    }

    /// Set a particular schema for the session.
    pub fn use_(&self, schema_name: &str, silent: bool) -> Result<Option<ResultSet>> {
        self.connector
            .use_context(ContextKind::Schema, schema_name, silent)
    }

    /// Name of the schema in use by the current session.
    pub fn current(&self) -> Result<Option<String>> {
        self.connector.current_of(ContextKind::Schema)
    }
}
