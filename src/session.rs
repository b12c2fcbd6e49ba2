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

//! Session environment: the four current selections of a session.

/// The current warehouse/database/schema/role selections.
///
/// Returned by [`SnowflakeConnector::get_environment`] and accepted by
/// [`SnowflakeConnector::set_environment`], where `None` fields mean
/// "leave unchanged".
///
/// [`SnowflakeConnector::get_environment`]: crate::SnowflakeConnector::get_environment
/// [`SnowflakeConnector::set_environment`]: crate::SnowflakeConnector::set_environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub role: Option<String>,
}

impl Environment {
    pub fn warehouse(mut self, name: impl Into<String>) -> Self {
        self.warehouse = Some(name.into());
        self
    }

    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    pub fn schema(mut self, name: impl Into<String>) -> Self {
        self.schema = Some(name.into());
        self
    }

    pub fn role(mut self, name: impl Into<String>) -> Self {
        self.role = Some(name.into());
        self
    }
}

/// The session slot a `USE` statement or `CURRENT_*()` function addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextKind {
    Warehouse,
    Database,
    Schema,
    Role,
}

impl ContextKind {
    /// The object keyword in `USE <keyword> <name>`.
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            ContextKind::Warehouse => "WAREHOUSE",
            ContextKind::Database => "DATABASE",
            ContextKind::Schema => "SCHEMA",
            ContextKind::Role => "ROLE",
        }
    }

    /// The context function reporting the current selection.
    pub(crate) fn current_function(self) -> &'static str {
        match self {
            ContextKind::Warehouse => "CURRENT_WAREHOUSE()",
            ContextKind::Database => "CURRENT_DATABASE()",
            ContextKind::Schema => "CURRENT_SCHEMA()",
            ContextKind::Role => "CURRENT_ROLE()",
        }
    }

    /// The slot this kind occupies in an [`Environment`].
    pub(crate) fn slot(self, env: &mut Environment) -> &mut Option<String> {
        match self {
            ContextKind::Warehouse => &mut env.warehouse,
            ContextKind::Database => &mut env.database,
            ContextKind::Schema => &mut env.schema,
            ContextKind::Role => &mut env.role,
        }
    }
}
