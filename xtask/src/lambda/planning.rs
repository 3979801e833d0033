//! Pure functions for planning a function deployment (Functional Core).

use super::error::{LambdaError, Result};

/// What the platform reports about an existing function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionState {
    pub arn: String,
    pub role: Option<String>,
}

/// Planned changes for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Function doesn't exist; create it with the given role.
    Create {
        function_name: String,
        role_arn: String,
    },
    /// Function exists; upload new code and optionally switch its role.
    Update {
        function_name: String,
        role_arn: Option<String>,
    },
}

/// Pure function: decide between creating and updating.
///
/// A role that already matches the function's current role is not re-applied.
pub fn calculate_deploy_plan(
    current: Option<&FunctionState>,
    function_name: &str,
    role_arn: Option<&str>,
) -> Result<DeployPlan> {
    match current {
        None => {
            let role_arn = role_arn.ok_or_else(|| LambdaError::MissingRole {
                function_name: function_name.to_string(),
            })?;
            Ok(DeployPlan::Create {
                function_name: function_name.to_string(),
                role_arn: role_arn.to_string(),
            })
        }
        Some(state) => Ok(DeployPlan::Update {
            function_name: function_name.to_string(),
            role_arn: role_arn
                .filter(|requested| state.role.as_deref() != Some(*requested))
                .map(str::to_string),
        }),
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::Create {
            function_name,
            role_arn,
        } => vec![
            format!("+ Create function: {function_name}"),
            "  Runtime: provided.al2023 (bootstrap)".to_string(),
            "  Timeout: 30s, Memory: 128 MB".to_string(),
            format!("  Role: {role_arn}"),
        ],
        DeployPlan::Update {
            function_name,
            role_arn,
        } => {
            let mut lines = vec![
                format!("~ Update function: {function_name}"),
                "  + Publish new code version".to_string(),
            ];
            if let Some(role_arn) = role_arn {
                lines.push(format!("  ~ Role: {role_arn}"));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE: &str = "arn:aws:iam::123456789012:role/dispatch";

    fn existing(role: Option<&str>) -> FunctionState {
        FunctionState {
            arn: "arn:aws:lambda:us-east-2:123456789012:function:schedule-locksmith".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_function_is_created() {
        let plan = calculate_deploy_plan(None, "schedule-locksmith", Some(ROLE)).unwrap();
        assert_eq!(
            plan,
            DeployPlan::Create {
                function_name: "schedule-locksmith".to_string(),
                role_arn: ROLE.to_string(),
            }
        );
    }

    #[test]
    fn test_create_requires_role() {
        let err = calculate_deploy_plan(None, "schedule-locksmith", None).unwrap_err();
        assert!(matches!(err, LambdaError::MissingRole { .. }));
    }

    #[test]
    fn test_existing_function_gets_role_update() {
        let plan = calculate_deploy_plan(
            Some(&existing(Some("arn:aws:iam::123456789012:role/old"))),
            "schedule-locksmith",
            Some(ROLE),
        )
        .unwrap();
        assert_eq!(
            plan,
            DeployPlan::Update {
                function_name: "schedule-locksmith".to_string(),
                role_arn: Some(ROLE.to_string()),
            }
        );
    }

    #[test]
    fn test_unchanged_role_is_skipped() {
        let plan =
            calculate_deploy_plan(Some(&existing(Some(ROLE))), "schedule-locksmith", Some(ROLE))
                .unwrap();
        assert_eq!(
            plan,
            DeployPlan::Update {
                function_name: "schedule-locksmith".to_string(),
                role_arn: None,
            }
        );
    }

    #[test]
    fn test_format_update_plan() {
        let plan = DeployPlan::Update {
            function_name: "schedule-locksmith".to_string(),
            role_arn: Some(ROLE.to_string()),
        };
        assert_eq!(
            format_deploy_plan(&plan),
            vec![
                "~ Update function: schedule-locksmith".to_string(),
                "  + Publish new code version".to_string(),
                format!("  ~ Role: {ROLE}"),
            ]
        );
    }
}
