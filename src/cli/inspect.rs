//! Inspect command implementation

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{load_paths, EnvOverrides, ENV_DB_ADDRESS, ENV_LB_ADDRESS};
use crate::input::credentials::{
    DELETE_PASSWORD_KEY, EVENT_COLLECTOR_TOKEN_KEY, SEARCH_PASSWORD_KEY,
};
use crate::merge::{self, MergePlan, EXTERNAL_DB_LOCATION_KEY, HAPROXY_SERVER_KEY};

#[derive(Args)]
pub struct InspectArgs {
    /// Directory holding the handoff files
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Path to config file (confmerge.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let paths = load_paths(&args.dir, args.config.as_deref())?;

    let plan = MergePlan::gather(&paths)?;
    let response = merge::read_response(&paths.response_file)?;
    let env = EnvOverrides::capture();

    println!("Response document: {}", paths.response_file.display());
    println!("  existing keys: {}", response.len());

    println!("Values a merge would write:");
    println!("  {}: {}", EXTERNAL_DB_LOCATION_KEY, plan.db_address);
    println!("  {}: {}", HAPROXY_SERVER_KEY, plan.lb_address);
    // Credential values stay out of the terminal; only report presence.
    println!("  {}: {}", SEARCH_PASSWORD_KEY, describe(&plan.credentials.search_password));
    println!("  {}: {}", DELETE_PASSWORD_KEY, describe(&plan.credentials.delete_password));
    println!(
        "  {}: {}",
        EVENT_COLLECTOR_TOKEN_KEY,
        describe(&plan.credentials.event_collector_token)
    );

    if !env.is_empty() {
        let mut names = Vec::new();
        if env.db_address.is_some() {
            names.push(ENV_DB_ADDRESS);
        }
        if env.lb_address.is_some() {
            names.push(ENV_LB_ADDRESS);
        }
        println!("Environment values present but not applied: {}", names.join(", "));
    }

    Ok(())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null (missing from source)",
        _ => "set",
    }
}

#[cfg(test)]
mod tests {
    use super::describe;
    use serde_json::{json, Value};

    #[test]
    fn describe_never_echoes_the_value() {
        assert_eq!(describe(&json!("hunter2")), "set");
        assert_eq!(describe(&json!(12345)), "set");
        assert_eq!(describe(&Value::Null), "null (missing from source)");
    }
}
