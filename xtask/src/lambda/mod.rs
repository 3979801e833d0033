//! Lambda deployment commands for the dispatch function.

mod client;
mod error;
mod planning;
mod retry;

pub use error::{LambdaError, Result};

use std::path::PathBuf;

use aws_sdk_lambda::Client;
use dialoguer::Confirm;

use crate::aws::AwsConfig;
use crate::output::*;
use planning::DeployPlan;
use retry::{RetryError, RetryPolicy};

const DEFAULT_FUNCTION_NAME: &str = "schedule-locksmith";

#[derive(Debug, clap::Parser)]
pub struct LambdaCommand {
    #[command(subcommand)]
    pub action: LambdaAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum LambdaAction {
    /// Create the function, or upload new code to an existing one.
    Deploy(DeployCommand),

    /// Switch the function's execution role, retrying while it is mid-update.
    UpdateRole(UpdateRoleCommand),
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy the dispatch function.

If the function exists, its code is replaced and a new version is
published; when a role is given it is applied afterwards, retrying up to
5 times while the function is still updating. If the function does not
exist it is created with the given role.

Environment variables:
  LAMBDA_ROLE_ARN     - Execution role when --role-arn is not given
  AWS_ENDPOINT_URL    - Use a local Lambda emulator
  AWS_REGION          - AWS region (defaults to us-east-2)")]
pub struct DeployCommand {
    /// Zip archive containing the `bootstrap` executable.
    #[arg(long, value_name = "PATH")]
    pub zip: PathBuf,

    #[arg(long, default_value = DEFAULT_FUNCTION_NAME)]
    pub function_name: String,

    #[arg(long, env = "LAMBDA_ROLE_ARN", value_name = "ARN")]
    pub role_arn: Option<String>,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Parser)]
pub struct UpdateRoleCommand {
    #[arg(long, env = "LAMBDA_ROLE_ARN", value_name = "ARN")]
    pub role_arn: String,

    #[arg(long, default_value = DEFAULT_FUNCTION_NAME)]
    pub function_name: String,
}

pub async fn run(command: LambdaCommand, global: crate::Global) -> Result<()> {
    match command.action {
        LambdaAction::Deploy(cmd) => run_deploy(cmd, &global).await,
        LambdaAction::UpdateRole(cmd) => run_update_role(cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display("Lambda"));
        aprintln!("{} {}", p_b("Package:"), cmd.zip.display());
        aprintln!();
    }

    let package = tokio::fs::read(&cmd.zip)
        .await
        .map_err(|source| LambdaError::Package {
            path: cmd.zip.clone(),
            source,
        })?;

    let lambda_client = client::create_client(&aws_config).await;
    let current = client::get_function_state(&lambda_client, &cmd.function_name).await?;

    if let Some(state) = &current {
        if global.is_verbose() {
            aprintln!("{} {}", p_b("Current:"), state.arn);
        }
    }

    let plan = planning::calculate_deploy_plan(
        current.as_ref(),
        &cmd.function_name,
        cmd.role_arn.as_deref(),
    )?;

    if !global.is_silent() {
        print_plan("Deploy Plan:", &planning::format_deploy_plan(&plan));
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(true)
            .interact()
            .map_err(|e| LambdaError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(LambdaError::UserCancelled);
        }
    }

    let arn = match &plan {
        DeployPlan::Create {
            function_name,
            role_arn,
        } => client::create_function(&lambda_client, function_name, role_arn, package).await?,
        DeployPlan::Update {
            function_name,
            role_arn,
        } => {
            let arn =
                client::update_function_code(&lambda_client, function_name, package).await?;
            if let Some(role_arn) = role_arn {
                update_role_with_retry(&lambda_client, function_name, role_arn, global).await?;
            }
            arn
        }
    };

    if !global.is_silent() {
        aprintln!("{} {}", p_g("Deployed:"), arn);
    }

    Ok(())
}

async fn run_update_role(cmd: UpdateRoleCommand, global: &crate::Global) -> Result<()> {
    let aws_config = AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display("Lambda"));
        aprintln!("{} {}", p_b("Function:"), cmd.function_name);
        aprintln!();
    }

    let lambda_client = client::create_client(&aws_config).await;
    update_role_with_retry(&lambda_client, &cmd.function_name, &cmd.role_arn, global).await?;

    if !global.is_silent() {
        aprintln!("{} role set to {}", p_g("Success:"), cmd.role_arn);
    }

    Ok(())
}

/// Applies the role, retrying only while the function reports a conflict.
/// Nothing is rolled back when the bound is exhausted.
async fn update_role_with_retry(
    lambda_client: &Client,
    function_name: &str,
    role_arn: &str,
    global: &crate::Global,
) -> Result<()> {
    let policy = RetryPolicy::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Updating role:"), role_arn);
    }

    retry::retry(
        policy,
        || client::update_role(lambda_client, function_name, role_arn),
        LambdaError::is_conflict,
        |attempt, delay| {
            if !global.is_silent() {
                aprintln!(
                    "{} retrying in {}s (attempt {}/{})",
                    p_y("Update in progress,"),
                    delay.as_secs(),
                    attempt,
                    policy.max_attempts
                );
            }
        },
    )
    .await
    .map_err(|err| match err {
        RetryError::Fatal(err) => err,
        RetryError::Exhausted { attempts, .. } => LambdaError::RetriesExhausted {
            function_name: function_name.to_string(),
            attempts,
        },
    })
}
