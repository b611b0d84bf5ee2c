//! Domain and batch orchestration.
//!
//! An [`Aggregator`] owns the three provider adapters. For one domain it runs
//! them concurrently and projects the results ([`Aggregator::aggregate_domain`]);
//! for many domains it runs that per domain under a concurrency bound
//! ([`Aggregator::aggregate_domains`]). Failures stay inside the record they
//! belong to and never abort siblings.

mod batch;
mod domain;

use std::sync::Arc;

use crate::config::{AggregatorConfig, DEFAULT_USER_AGENT};
use crate::error_handling::InitializationError;
use crate::initialization::init_client;
use crate::providers::{BuiltWithAdapter, MxToolboxAdapter, ProviderAdapter, VirusTotalAdapter};
use crate::transport::{HttpTransport, ReqwestTransport};

pub use batch::normalize_domains;

/// Entry point for aggregation.
///
/// Cheap to clone; clones share the same adapters.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use security_aggregator::{Aggregator, AggregatorConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AggregatorConfig::from_env()?;
/// let aggregator = Aggregator::from_config(&config)?;
/// let records = aggregator
///     .aggregate_domains(&["example.com", "example.org"], Duration::from_secs(30))
///     .await;
/// println!("{}", serde_json::to_string_pretty(&records)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Aggregator {
    builtwith: Arc<dyn ProviderAdapter>,
    mxtoolbox: Arc<dyn ProviderAdapter>,
    virustotal: Arc<dyn ProviderAdapter>,
}

impl Aggregator {
    /// Builds the three standard adapters over a shared transport.
    pub fn new(config: &AggregatorConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            builtwith: Arc::new(BuiltWithAdapter::new(
                config.builtwith.clone(),
                Arc::clone(&transport),
            )),
            mxtoolbox: Arc::new(MxToolboxAdapter::new(
                config.mxtoolbox.clone(),
                Arc::clone(&transport),
            )),
            virustotal: Arc::new(VirusTotalAdapter::new(config.virustotal.clone(), transport)),
        }
    }

    /// Builds the standard adapters over a fresh `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &AggregatorConfig) -> Result<Self, InitializationError> {
        let client = init_client(DEFAULT_USER_AGENT)?;
        Ok(Self::new(config, Arc::new(ReqwestTransport::new(client))))
    }

    /// Uses caller-supplied adapters, one per provider slot.
    pub fn with_adapters(
        builtwith: Arc<dyn ProviderAdapter>,
        mxtoolbox: Arc<dyn ProviderAdapter>,
        virustotal: Arc<dyn ProviderAdapter>,
    ) -> Self {
        Self {
            builtwith,
            mxtoolbox,
            virustotal,
        }
    }
}
