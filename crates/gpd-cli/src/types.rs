//! # Types Subcommand
//!
//! Lists every declared name with its category and comment.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gpd_types::Schema;

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Schema document.
    pub schema: PathBuf,
}

/// # Errors
///
/// Load failures and write errors.
pub fn run(args: &TypesArgs, out: &mut impl Write) -> anyhow::Result<bool> {
    let schema = crate::load_schema(&args.schema)?;
    list(&schema, out)?;
    Ok(true)
}

fn list(schema: &Schema, out: &mut impl Write) -> anyhow::Result<()> {
    for (name, id) in schema.symbols().iter() {
        let Some(datatype) = schema.get(id) else {
            continue;
        };
        match datatype.comment() {
            Some(comment) => writeln!(out, "{name}\t{}\t# {comment}", datatype.category())?,
            None => writeln!(out, "{name}\t{}", datatype.category())?,
        }
    }
    Ok(())
}
