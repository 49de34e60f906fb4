//! Settings of the bundled hyper transport.

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings of [`crate::HyperTransport`].
///
/// Override single values with struct update syntax, or tune them through
/// [`crate::HyperTransportBuilder`].
///
/// ```ignore
/// use std::time::Duration;
/// use courier::{HyperTransport, TransportConfig};
///
/// let transport = HyperTransport::with_config(TransportConfig {
///     timeout: Duration::from_secs(5),
///     ..TransportConfig::default()
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Bound on the whole exchange, body read included.
    pub timeout: Duration,
    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Idle pooled connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long a pooled connection may stay idle.
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}
