//! # Validate Subcommand
//!
//! Converts each raw value through a named datatype and prints the
//! canonical value as JSON, or the classified error.
//!
//! Arguments are parsed as JSON; one that is not valid JSON is taken as a
//! plain string, so `gpd validate s.yaml --type Code DE` works unquoted.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gpd_core::Value;
use gpd_types::Schema;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema document.
    pub schema: PathBuf,

    /// Name of the datatype to validate against.
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub type_name: String,

    /// Raw values, one per argument.
    #[arg(required = true, value_name = "VALUE")]
    pub values: Vec<String>,
}

/// # Errors
///
/// Load failures, an unknown type name, and write errors. Rejected values
/// are reported on `out` and make the result `Ok(false)`.
pub fn run(args: &ValidateArgs, out: &mut impl Write) -> anyhow::Result<bool> {
    let schema = crate::load_schema(&args.schema)?;
    validate_all(&schema, &args.type_name, &args.values, out)
}

fn parse_raw(arg: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(json) => Value::from_json(&json),
        Err(_) => Value::text(arg),
    }
}

fn validate_all(
    schema: &Schema,
    type_name: &str,
    values: &[String],
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let target = schema.lookup(type_name)?;
    let mut all_ok = true;
    for arg in values {
        match schema.to_value(&target, &parse_raw(arg)) {
            Ok(canonical) => writeln!(out, "{arg}\t=> {}", canonical.to_json())?,
            Err(e) => {
                all_ok = false;
                writeln!(out, "{arg}\t=> ERROR {e}")?;
            }
        }
    }
    tracing::debug!(type_name, count = values.len(), all_ok, "validated values");
    Ok(all_ok)
}
