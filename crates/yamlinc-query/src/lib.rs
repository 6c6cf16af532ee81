//! JMESPath queries over YAML value trees
//!
//! The include resolver uses this crate to narrow an included document down
//! to a sub-value. Expressions are full JMESPath, compiled and evaluated by
//! the `jmespath` crate: field and index access, slices, projections,
//! filters (`items[?enabled]`), pipes (`a | b`), functions (`length(items)`)
//! and multiselect lists and hashes all work.
//!
//! A `serde_yaml::Value` goes into the engine through its `Serialize` impl
//! and the result comes back the same way, so integers stay integers.
//! Mapping keys must be strings for the engine to see them.
//!
//! # Example
//!
//! ```
//! use yamlinc_query::search;
//!
//! let doc: serde_yaml::Value = serde_yaml::from_str("items: [{id: 1}, {id: 2}]").unwrap();
//! let first = search("items[0].id", &doc).unwrap();
//! assert_eq!(first, serde_yaml::Value::from(1));
//! ```

mod error;

pub use error::{QueryError, QueryResult};

use serde_yaml::Value;
use std::fmt;
use tracing::trace;

/// A compiled query expression
pub struct Query {
    expression: jmespath::Expression<'static>,
}

impl Query {
    /// Compile an expression
    pub fn parse(expression: &str) -> QueryResult<Self> {
        trace!("Compiling query '{}'", expression);
        let expression = jmespath::compile(expression)?;
        Ok(Self { expression })
    }

    /// Evaluate against `value`; a path that selects nothing yields `null`
    pub fn evaluate(&self, value: &Value) -> QueryResult<Value> {
        let result = self.expression.search(value)?;
        Ok(serde_yaml::to_value(&*result)?)
    }

    /// The expression text this query was compiled from
    pub fn as_str(&self) -> &str {
        self.expression.as_str()
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Query").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compile `expression` and evaluate it against `value` in one step
pub fn search(expression: &str, value: &Value) -> QueryResult<Value> {
    Query::parse(expression)?.evaluate(value)
}
