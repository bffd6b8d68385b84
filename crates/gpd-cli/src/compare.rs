//! # Compare Subcommand
//!
//! Prints structural equality and restriction in both directions for two
//! named datatypes.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gpd_types::Schema;

/// Arguments for the compare subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Schema document.
    pub schema: PathBuf,
    /// First datatype name.
    pub a: String,
    /// Second datatype name.
    pub b: String,
}

/// # Errors
///
/// Load failures, unknown names, and write errors.
pub fn run(args: &CompareArgs, out: &mut impl Write) -> anyhow::Result<bool> {
    let schema = crate::load_schema(&args.schema)?;
    compare(&schema, &args.a, &args.b, out)?;
    Ok(true)
}

fn compare(schema: &Schema, a: &str, b: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let x = schema.lookup(a)?;
    let y = schema.lookup(b)?;
    writeln!(out, "equals({a}, {b}) = {}", schema.equals(&x, &y))?;
    writeln!(out, "is_restriction_of({a}, {b}) = {}", schema.is_restriction_of(&x, &y))?;
    writeln!(out, "is_restriction_of({b}, {a}) = {}", schema.is_restriction_of(&y, &x))?;
    Ok(())
}
