//! # Check Subcommand
//!
//! Loads a document and reports how many names it defines.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gpd_types::Schema;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document (YAML, or JSON with a `.json` extension).
    pub schema: PathBuf,
}

/// # Errors
///
/// Load failures and write errors.
pub fn run(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<bool> {
    let schema = crate::load_schema(&args.schema)?;
    report(&schema, &args.schema.display().to_string(), out)?;
    Ok(true)
}

fn report(schema: &Schema, label: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let count = schema.symbols().len();
    writeln!(out, "OK: {label}: {count} type(s) defined")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_names() {
        let mut out = Vec::new();
        report(&crate::sample_schema(), "sample.yaml", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "OK: sample.yaml: 3 type(s) defined\n");
    }

    #[test]
    fn test_missing_document_is_error() {
        let args = CheckArgs {
            schema: PathBuf::from("/nonexistent/schema.yaml"),
        };
        let err = run(&args, &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("loading schema"));
    }
}
