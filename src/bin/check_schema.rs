//! Validate exported CMS documents against the content schema.
//!
//! Usage: cargo run --bin check_schema -- <export.json|export.ndjson>
//!
//! Accepts a JSON array of documents or a dataset export with one document
//! per line. Exits non-zero when any error-level issue is found.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use ucc_content::schema::{validate_export, Severity};

#[derive(Debug, Parser)]
#[command(name = "check_schema", about = "Validate exported documents against the content schema")]
struct Args {
    /// Export file to check
    file: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

fn parse_documents(raw: &str) -> Result<Vec<Value>> {
    if let Ok(Value::Array(docs)) = serde_json::from_str::<Value>(raw) {
        return Ok(docs);
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str(line).with_context(|| format!("line {}: invalid JSON", i + 1)))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    ucc_content::logging::init_logging(false)?;

    let raw = fs_err::read_to_string(&args.file)?;
    let documents = parse_documents(&raw)?;
    let report = validate_export(&documents);

    let threshold = if args.strict { Severity::Warning } else { Severity::Error };
    let failures = report.iter().filter(|(_, issue)| issue.severity >= threshold).count();

    for (id, issue) in &report {
        println!("{id}: {issue}");
    }
    println!("{} documents checked, {} issues, {failures} failing", documents.len(), report.len());

    if failures > 0 {
        bail!("{failures} document issue(s) at or above {threshold}");
    }
    Ok(())
}
