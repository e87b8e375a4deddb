//! CLI command implementations
//!
//! All commands return `CliResult<ExitCode>` for proper error handling.

use std::fs;
use std::path::Path;

use opgen_schema::RecordSet;

use super::{CliError, CliResult, ExitCode};
use crate::backend::{EmitConfig, GenRegistry};

/// Load and validate a schema file.
pub fn load_records(file: &Path) -> CliResult<RecordSet> {
    RecordSet::from_path(file).map_err(CliError::diagnostic)
}

/// Run generator `action` over `file` and return the generated text.
pub fn render(registry: &GenRegistry, action: &str, file: &Path, config: &EmitConfig) -> CliResult<String> {
    let Some(generator) = registry.get(action) else {
        return Err(CliError::failure(format!(
            "Unknown generator '{}'. Known generators: {}",
            action,
            registry.names().join(", ")
        )));
    };

    let records = load_records(file)?;
    let mut out = String::new();
    (generator.run)(&records.ops, config, &mut out).map_err(CliError::diagnostic)?;
    Ok(out)
}

/// `opgen gen`: write generated text to `output`, or stdout.
pub fn generate(
    registry: &GenRegistry,
    action: &str,
    file: &Path,
    output: Option<&Path>,
    config: &EmitConfig,
) -> CliResult<ExitCode> {
    let text = render(registry, action, file, config)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    CliError::failure(format!("Error creating directory '{}': {}", parent.display(), e))
                })?;
            }
            fs::write(path, text)
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
            tracing::info!(generator = action, output = %path.display(), "wrote generated output");
        }
        None => print!("{text}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// `opgen generators`
pub fn list_generators(registry: &GenRegistry) -> CliResult<ExitCode> {
    for generator in registry.iter() {
        println!("{:<16} {}", generator.name, generator.description);
    }
    Ok(ExitCode::SUCCESS)
}

/// `opgen check`: run every generator into memory and report the first failure.
pub fn check(registry: &GenRegistry, file: &Path) -> CliResult<ExitCode> {
    let records = load_records(file)?;
    let config = EmitConfig::default();
    for generator in registry.iter() {
        let mut sink = String::new();
        (generator.run)(&records.ops, &config, &mut sink).map_err(CliError::diagnostic)?;
    }
    println!("{}: {} op(s) OK", file.display(), records.len());
    Ok(ExitCode::SUCCESS)
}
