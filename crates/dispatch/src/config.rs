use std::{env, time::Duration};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding availability entries (default: "NextAvailableCache")
    pub cache_table_name: String,
    /// Suffix appended to a company name to form its directory table (default: "LocksmithJobs")
    pub jobs_table_suffix: String,
    /// AWS region (default: "us-east-2")
    pub aws_region: String,
    /// Custom AWS endpoint, e.g. a local DynamoDB
    pub aws_endpoint_url: Option<String>,
    /// Lambda function invoked on a cache miss
    pub resolver_function_name: Option<String>,
    /// HTTP endpoint invoked on a cache miss
    pub resolver_url: Option<String>,
    /// Resolver timeout in seconds (default: 25)
    pub resolver_timeout_seconds: u64,
    /// Serialize dispatches per company within this process (default: true)
    pub serialize_dispatch: bool,
    /// Maximum wait for a company lease in seconds (default: 30)
    pub lease_timeout_seconds: u64,
    /// HTTP request timeout in seconds (default: 35)
    pub request_timeout_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TABLE_NAME` (default: "NextAvailableCache")
    /// - `JOBS_TABLE_SUFFIX` (default: "LocksmithJobs")
    /// - `AWS_REGION` (default: "us-east-2")
    /// - `AWS_ENDPOINT_URL`
    /// - `RESOLVER_FUNCTION_NAME`
    /// - `RESOLVER_URL`
    /// - `RESOLVER_TIMEOUT_SECONDS` (default: 25)
    /// - `SERIALIZE_DISPATCH` (default: true)
    /// - `LEASE_TIMEOUT_SECONDS` (default: 30)
    /// - `REQUEST_TIMEOUT_SECONDS` (default: 35)
    /// - `CACHE_MAX_ENTRIES` (default: 10,000)
    /// - `LOG_FORMAT` - `pretty` or `json` (default: pretty)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            cache_table_name: non_empty("CACHE_TABLE_NAME")
                .unwrap_or_else(|| "NextAvailableCache".to_string()),
            jobs_table_suffix: non_empty("JOBS_TABLE_SUFFIX")
                .unwrap_or_else(|| "LocksmithJobs".to_string()),
            aws_region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-2".to_string()),
            aws_endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            resolver_function_name: non_empty("RESOLVER_FUNCTION_NAME"),
            resolver_url: non_empty("RESOLVER_URL"),
            resolver_timeout_seconds: lookup("RESOLVER_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(25),
            serialize_dispatch: lookup("SERIALIZE_DISPATCH")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            lease_timeout_seconds: lookup("LEASE_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(35),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10_000),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver_timeout_seconds)
    }

    pub fn lease_timeout(&self) -> Duration {
        Duration::from_secs(self.lease_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
