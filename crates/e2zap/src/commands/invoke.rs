//! `e2zap invoke` -- the hosting-framework entry point.
//!
//! Reads one parameter document, runs one invocation, and writes exactly
//! one compact `{"status": ...}` record to stdout. Global flags and
//! profiles are ignored: the document is the whole configuration.

use std::io::Read;
use std::path::Path;

use crate::cli::InvokeArgs;
use crate::error::CliError;

pub async fn handle(args: InvokeArgs) -> Result<(), CliError> {
    let document = read_document(&args.params)?;
    let params = e2zap_core::ZapParams::from_document(&document)?;

    let report = e2zap_core::run(params).await?;

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn read_document(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
