// Metric collectors, one per Koyeb resource kind plus the exporter itself
pub mod collector;

// Registry type classification for secrets
pub mod registry_type;

// Liveness channel and probe
pub mod probe;

// Collector registry and exposition encoding
pub mod registry;

// HTTP surface
pub mod api;

// Configuration and build metadata
pub mod config;

// Process-wide shutdown signal
pub mod shutdown;
