//! confmerge: Merge provisioning handoff files into a deployment response config
//!
//! The provisioning pipeline drops address and credential handoff files next to
//! a deployment response document. This tool folds their values into that
//! document and rewrites it in place.

use anyhow::Result;

fn main() -> Result<()> {
    confmerge::cli::run()
}
