//! Telemetry for the performance substrate.
//!
//! Structured logging via tracing plus metrics-facade instrumentation.
//! Nothing here touches the network; output goes to the host's log sink
//! and whatever metrics recorder the host installs.

mod logging;
mod metrics;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use metrics::{init_metrics, record_pool_size, record_queue_depth};
