//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use dialoguer::Confirm;
use locksmith_core::dispatch::{CacheEntry, TechnicianRecord};

use crate::aws::AwsConfig;
use crate::output::*;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the cache and directory tables.
    Deploy(DeployCommand),

    /// Seed a company directory and, optionally, its cache entry.
    Seed(SeedCommand),
}

/// Deploy or destroy DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

Creates the availability cache table (keyed on companyName) and one
directory table per --company (keyed on locksmithId). Existing tables
are left untouched.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-2)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Company whose directory table should exist. Repeatable.
    #[arg(long = "company", value_name = "NAME")]
    pub companies: Vec<String>,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating them.
    #[arg(long)]
    pub destroy: bool,

    #[arg(long, env = "CACHE_TABLE_NAME", default_value = config::DEFAULT_CACHE_TABLE)]
    pub cache_table: String,

    #[arg(long, env = "JOBS_TABLE_SUFFIX", default_value = config::DEFAULT_JOBS_TABLE_SUFFIX)]
    pub jobs_table_suffix: String,
}

/// Seed technicians into a company directory.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Insert technician records with empty job queues.

With --available, also writes the company's cache entry naming that
technician as next available, as the availability resolver would.")]
pub struct SeedCommand {
    #[arg(long, value_name = "NAME")]
    pub company: String,

    /// Technician ID to insert. Repeatable.
    #[arg(long = "technician", value_name = "ID", required = true)]
    pub technicians: Vec<String>,

    /// Technician to record as next available in the cache.
    #[arg(long, value_name = "ID")]
    pub available: Option<String>,

    /// Job address recorded in the cache entry.
    #[arg(long, requires = "available")]
    pub address: Option<String>,

    /// Travel time in minutes for the cache entry.
    #[arg(long, requires = "available")]
    pub travel_time: Option<u32>,

    #[arg(long, requires_all = ["available", "longitude"], allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, requires_all = ["available", "latitude"], allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    #[arg(long, env = "CACHE_TABLE_NAME", default_value = config::DEFAULT_CACHE_TABLE)]
    pub cache_table: String,

    #[arg(long, env = "JOBS_TABLE_SUFFIX", default_value = config::DEFAULT_JOBS_TABLE_SUFFIX)]
    pub jobs_table_suffix: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

impl SeedCommand {
    fn cache_entry(&self) -> Option<CacheEntry> {
        let technician = self.available.as_ref()?;
        let entry = CacheEntry::new(&self.company, technician)
            .with_travel_time(self.travel_time.unwrap_or(0))
            .with_address(self.address.clone().unwrap_or_default());
        Some(match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => entry.with_coordinates(latitude, longitude),
            _ => entry,
        })
    }
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display("DynamoDB"));
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let tables = config::desired_tables(&cmd.cache_table, &cmd.companies, &cmd.jobs_table_suffix);

    if cmd.destroy {
        let mut plans = Vec::with_capacity(tables.len());
        for table in &tables {
            let current = client::get_table_state(&dynamo_client, &table.table_name).await?;
            plans.push(planning::calculate_destroy_plan(
                current.as_ref(),
                &table.table_name,
            ));
        }

        if !global.is_silent() {
            let lines: Vec<String> = plans.iter().flat_map(planning::format_destroy_plan).collect();
            print_plan("Destroy Plan:", &lines);
        }

        if plans.iter().all(planning::DestroyPlan::is_noop) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            confirm(
                "Are you sure you want to delete these tables? ALL DATA WILL BE LOST",
                false,
            )?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting tables..."));
        }

        for plan in &plans {
            deploy::execute_destroy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Tables destroyed successfully."));
        }
        return Ok(());
    }

    let mut plans = Vec::with_capacity(tables.len());
    for table in &tables {
        let current = client::get_table_state(&dynamo_client, &table.table_name).await?;
        plans.push(planning::calculate_deploy_plan(current.as_ref(), table));
    }

    if !global.is_silent() {
        let lines: Vec<String> = plans.iter().flat_map(planning::format_deploy_plan).collect();
        print_plan("Deploy Plan:", &lines);
    }

    // A mismatched key is never fixed in place; refuse before touching anything.
    if let Some(mismatch) = plans
        .iter()
        .find(|plan| matches!(plan, planning::DeployPlan::KeyMismatch { .. }))
    {
        return deploy::execute_deploy_plan(&dynamo_client, mismatch).await;
    }

    if plans.iter().all(planning::DeployPlan::is_noop) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?", true)?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    for plan in &plans {
        deploy::execute_deploy_plan(&dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = AwsConfig::default();
    let jobs_table = config::jobs_table_name(&cmd.company, &cmd.jobs_table_suffix);
    let technicians: Vec<TechnicianRecord> =
        cmd.technicians.iter().map(TechnicianRecord::new).collect();
    let cache_entry = cmd.cache_entry();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display("DynamoDB"));
        aprintln!("{} {}", p_b("Company:"), cmd.company);
        aprintln!("{} {}", p_b("Directory table:"), jobs_table);
        aprintln!("{} {}", p_b("Technicians:"), cmd.technicians.join(", "));
        if let Some(entry) = &cache_entry {
            aprintln!(
                "{} {} ({} min) in {}",
                p_b("Next available:"),
                entry.technician_id,
                entry.travel_time_minutes,
                cmd.cache_table
            );
        }
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    let mut required = vec![jobs_table.as_str()];
    if cache_entry.is_some() {
        required.push(cmd.cache_table.as_str());
    }
    for table_name in required {
        if client::get_table_state(&dynamo_client, table_name)
            .await?
            .is_none()
        {
            return Err(DynamodbError::TableNotFound {
                table_name: table_name.to_string(),
            });
        }
    }

    if !cmd.force {
        confirm(
            &format!(
                "Write {} technician(s) to {}? Existing queues are reset.",
                technicians.len(),
                jobs_table
            ),
            true,
        )?;
    }

    let inserted = seed::seed_technicians(&dynamo_client, &jobs_table, &technicians).await?;

    if let Some(entry) = &cache_entry {
        seed::seed_cache_entry(&dynamo_client, &cmd.cache_table, entry).await?;
    }

    if !global.is_silent() {
        aprintln!("{} {} technicians inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
