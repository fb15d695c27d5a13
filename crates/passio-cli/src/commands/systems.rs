//! `systems` subcommand: list or export the transportation system catalog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use passio_lib::{load_catalog, PassioClient, SystemCatalog};

use crate::output::{emit, OutputFormat};
use crate::terminal::ColorPalette;
use crate::GlobalOptions;

/// Load the catalog the other subcommands would resolve against.
pub async fn load(global: &GlobalOptions) -> Result<SystemCatalog> {
    let config = global.config()?;
    let client = PassioClient::new(&config).context("failed to build HTTP client")?;
    load_catalog(&client, &config)
        .await
        .context("failed to load the transportation system catalog")
}

/// Handle the systems subcommand.
///
/// With `output`, the active catalog is written as JSON that `--catalog`
/// accepts. A `--catalog` file is re-exported in array form.
pub async fn handle_systems(global: &GlobalOptions, output: Option<&Path>) -> Result<()> {
    let catalog = load(global).await?;

    if let Some(path) = output {
        let json = catalog.to_json_string()?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {} systems to {}", catalog.len(), path.display());
        return Ok(());
    }

    emit(&render(&catalog, global.format, &ColorPalette::detect())?)
}

fn render(catalog: &SystemCatalog, format: OutputFormat, p: &ColorPalette) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(catalog.to_json_string()?),
        OutputFormat::Text => Ok(catalog
            .iter()
            .map(|entry| {
                format!(
                    "{}{}{} {}[{}]{}",
                    p.white_bold, entry.name, p.reset, p.gray, entry.id, p.reset
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
