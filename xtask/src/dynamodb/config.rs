//! Table configuration types (Functional Core - pure data).

pub const DEFAULT_CACHE_TABLE: &str = "NextAvailableCache";
pub const DEFAULT_JOBS_TABLE_SUFFIX: &str = "LocksmithJobs";

pub const COMPANY_NAME: &str = "companyName";
pub const LOCKSMITH_ID: &str = "locksmithId";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    fn keyed_on(table_name: String, partition_key: &str) -> Self {
        Self {
            table_name,
            partition_key: KeyAttribute {
                name: partition_key.to_string(),
                attribute_type: AttributeType::String,
            },
            billing_mode: BillingMode::PayPerRequest,
        }
    }
}

/// The availability cache table, one item per company.
pub fn cache_table_config(table_name: &str) -> TableConfig {
    TableConfig::keyed_on(table_name.to_string(), COMPANY_NAME)
}

/// A company's technician directory table, one item per technician.
pub fn jobs_table_config(company: &str, suffix: &str) -> TableConfig {
    TableConfig::keyed_on(jobs_table_name(company, suffix), LOCKSMITH_ID)
}

pub fn jobs_table_name(company: &str, suffix: &str) -> String {
    format!("{company}{suffix}")
}

/// Every table the service needs: the cache first, then one per company.
pub fn desired_tables(cache_table: &str, companies: &[String], suffix: &str) -> Vec<TableConfig> {
    std::iter::once(cache_table_config(cache_table))
        .chain(companies.iter().map(|c| jobs_table_config(c, suffix)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_table_is_keyed_on_company() {
        let config = cache_table_config(DEFAULT_CACHE_TABLE);
        assert_eq!(config.table_name, "NextAvailableCache");
        assert_eq!(config.partition_key.name, "companyName");
        assert_eq!(config.billing_mode, BillingMode::PayPerRequest);
    }

    #[test]
    fn test_jobs_table_is_keyed_on_locksmith() {
        let config = jobs_table_config("AcmeLocks", DEFAULT_JOBS_TABLE_SUFFIX);
        assert_eq!(config.table_name, "AcmeLocksLocksmithJobs");
        assert_eq!(config.partition_key.name, "locksmithId");
    }

    #[test]
    fn test_desired_tables_puts_cache_first() {
        let companies = vec!["AcmeLocks".to_string(), "KeyMasters".to_string()];
        let names: Vec<_> = desired_tables("Cache", &companies, "Jobs")
            .into_iter()
            .map(|t| t.table_name)
            .collect();
        assert_eq!(names, vec!["Cache", "AcmeLocksJobs", "KeyMastersJobs"]);
    }

    #[test]
    fn test_desired_tables_without_companies() {
        let tables = desired_tables("Cache", &[], "Jobs");
        assert_eq!(tables.len(), 1);
    }
}
