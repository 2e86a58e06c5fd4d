//! Single-line address file reading
//!
//! The provisioning pipeline writes one hostname per file. Only the first
//! line counts; it is trimmed and otherwise not validated. An existing but
//! empty file yields an empty string.

use crate::input::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn read_address(path: &Path) -> Result<String, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).map_err(|e| InputError::io(path, e))?;
    Ok(line.trim().to_string())
}
