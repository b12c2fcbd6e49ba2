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

//! Session-state helpers.
//!
//! Each helper translates one semantic operation ("use warehouse X",
//! "get the current warehouse") into a single SQL statement and delegates
//! to the connector's shared [`execute`] path. They hold no state of their
//! own — borrow one from the connector whenever needed.
//!
//! [`execute`]: crate::SnowflakeConnector::execute

mod database;
mod role;
mod schema;
mod warehouse;

pub use database::Database;
pub use role::Role;
pub use schema::Schema;
pub use warehouse::Warehouse;
