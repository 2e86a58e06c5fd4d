//! The merge step
//!
//! Every input is read before the response document is rewritten, so a bad
//! handoff file leaves the response untouched.

use crate::config::{EnvOverrides, Paths};
use crate::input::credentials::{
    DELETE_PASSWORD_KEY, EVENT_COLLECTOR_TOKEN_KEY, SEARCH_PASSWORD_KEY,
};
use crate::input::{read_address, InputError, SplunkCredentials};
use crate::output::write_pretty;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const EXTERNAL_DB_LOCATION_KEY: &str = "external_db_location";
pub const HAPROXY_SERVER_KEY: &str = "haproxy_server";

/// Everything a merge writes, gathered before any write happens.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub db_address: String,
    pub lb_address: String,
    pub credentials: SplunkCredentials,
}

impl MergePlan {
    /// Read the address and credential handoff files.
    pub fn gather(paths: &Paths) -> Result<Self> {
        let db_address = read_address(&paths.db_address_file)
            .with_context(|| format!("database address: {}", paths.db_address_file.display()))?;
        let lb_address = read_address(&paths.lb_address_file).with_context(|| {
            format!("load balancer address: {}", paths.lb_address_file.display())
        })?;
        let credentials = SplunkCredentials::load(&paths.credentials_file)
            .with_context(|| format!("credentials: {}", paths.credentials_file.display()))?;

        Ok(Self { db_address, lb_address, credentials })
    }

    /// Set the five managed keys on a response object. Keys outside that set
    /// are left untouched; a managed key that already exists is overwritten in
    /// place.
    pub fn apply(&self, response: &mut Map<String, Value>) {
        let creds = &self.credentials;
        response.insert(SEARCH_PASSWORD_KEY.to_string(), creds.search_password.clone());
        response.insert(DELETE_PASSWORD_KEY.to_string(), creds.delete_password.clone());
        response
            .insert(EVENT_COLLECTOR_TOKEN_KEY.to_string(), creds.event_collector_token.clone());
        response.insert(
            EXTERNAL_DB_LOCATION_KEY.to_string(),
            Value::String(self.db_address.clone()),
        );
        response.insert(HAPROXY_SERVER_KEY.to_string(), Value::String(self.lb_address.clone()));
    }
}

/// Parse the response document as a JSON object. The file must already exist;
/// a missing response is an error, never created fresh.
pub fn read_response(path: &Path) -> Result<Map<String, Value>, InputError> {
    let content = fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
    let parsed: Value = serde_json::from_str(&content)
        .map_err(|source| InputError::Parse { path: path.to_path_buf(), source })?;
    match parsed {
        Value::Object(object) => Ok(object),
        _ => Err(InputError::NotAnObject { path: path.to_path_buf() }),
    }
}

/// Gather inputs and produce the merged document without writing anything.
pub fn preview(paths: &Paths) -> Result<Value> {
    let plan = MergePlan::gather(paths)?;
    let mut response = read_response(&paths.response_file)
        .with_context(|| format!("response document: {}", paths.response_file.display()))?;
    plan.apply(&mut response);
    Ok(Value::Object(response))
}

/// Run the full step: gather inputs, fold them into the response document,
/// rewrite it in place.
pub fn run(paths: &Paths, env: &EnvOverrides) -> Result<()> {
    // The wrapper exports MY_VAR/MY_LBDNS alongside the handoff files. They
    // are not merged into the response; both addresses come from the files.
    if !env.is_empty() {
        tracing::debug!(?env, "address values present in environment; not applied");
    }

    let merged = preview(paths)?;
    write_pretty(&paths.response_file, &merged)?;
    tracing::info!("rewrote {}", paths.response_file.display());
    Ok(())
}
