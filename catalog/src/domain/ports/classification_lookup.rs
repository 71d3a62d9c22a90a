//! Lookup capability for the governed classification value set.
//!
//! Valid classification values are defined by an external authority, not by
//! this system. The validation pipeline fetches the current set at write
//! time; a transport failure here is a distinct failure mode from "value
//! not in set" and must surface as such to callers.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by classification lookup adapters.
    pub enum ClassificationLookupError {
        /// The lookup service could not be reached or did not respond.
        Transport(transport) => "classification lookup request failed: {message}",
        /// The lookup service responded with an unreadable payload.
        Decode(decode) => "classification lookup response malformed: {message}",
    }
}

/// Port providing the current valid-classification set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassificationLookup: Send + Sync {
    /// Return the classification values currently considered valid.
    async fn classifications(&self) -> Result<Vec<String>, ClassificationLookupError>;
}

/// Fixture implementation serving a configured value set.
///
/// # Examples
///
/// ```
/// # use catalog::domain::ports::{ClassificationLookup, FixtureClassificationLookup};
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let lookup = FixtureClassificationLookup::new(vec!["4".into(), "5".into()]);
/// assert_eq!(lookup.classifications().await.unwrap(), vec!["4", "5"]);
/// # });
/// ```
#[derive(Debug, Default, Clone)]
pub struct FixtureClassificationLookup {
    values: Vec<String>,
}

impl FixtureClassificationLookup {
    /// Create a fixture serving the given classification values.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl ClassificationLookup for FixtureClassificationLookup {
    async fn classifications(&self) -> Result<Vec<String>, ClassificationLookupError> {
        Ok(self.values.clone())
    }
}
