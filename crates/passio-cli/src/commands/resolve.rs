//! `resolve` subcommand: show which catalog entry a name resolves to.
//!
//! Runs entirely against the catalog, so with `--catalog` it needs no
//! network access. Useful for checking how approximate names behave under a
//! given `--min-score`.

use anyhow::{bail, Result};
use passio_lib::{Resolution, Resolver, SystemCatalog};
use serde_json::json;

use crate::commands::systems;
use crate::output::{emit, OutputFormat};
use crate::terminal::ColorPalette;
use crate::GlobalOptions;

const SUGGESTION_LIMIT: usize = 3;

/// Handle the resolve subcommand.
pub async fn handle_resolve(global: &GlobalOptions, query: &str) -> Result<()> {
    let config = global.config()?;
    let catalog = systems::load(global).await?;
    let resolver = Resolver::new(config.min_score);
    let rendered = render(&catalog, &resolver, query, global.format, &ColorPalette::detect())?;
    emit(&rendered)
}

fn render(
    catalog: &SystemCatalog,
    resolver: &Resolver,
    query: &str,
    format: OutputFormat,
    p: &ColorPalette,
) -> Result<String> {
    match catalog.resolve(resolver, query) {
        Resolution::Matched { item, score, .. } => Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&json!({
                "query": query,
                "name": item.name,
                "id": item.id,
                "score": score,
            }))?,
            OutputFormat::Text => format!(
                "{}{}{} {}[{}]{} score {}{:.3}{}",
                p.white_bold, item.name, p.reset, p.gray, item.id, p.reset, p.green, score, p.reset
            ),
        }),
        Resolution::NoMatch => {
            let suggestions = resolver.suggest(query, catalog.names(), SUGGESTION_LIMIT);
            if suggestions.is_empty() {
                bail!("no transportation system matches '{}'", query);
            }
            bail!(
                "no transportation system matches '{}'. Did you mean: {}?",
                query,
                suggestions.join(", ")
            );
        }
    }
}
