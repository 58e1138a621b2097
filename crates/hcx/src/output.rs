//! Output formatting: JSON or YAML through serde.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?.trim_end().to_owned(),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render `data` in the global format and print it.
pub fn emit<T: Serialize + ?Sized>(global: &GlobalOpts, data: &T) -> Result<(), CliError> {
    let out = render(global.output, data)?;
    print_output(&out, global.quiet);
    Ok(())
}

/// One-line status message on stderr.
pub fn status(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
