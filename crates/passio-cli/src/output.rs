//! Output formatting for transit records.
//!
//! Records are printed either as the same pretty JSON the MCP tools return,
//! or as one styled line per record for humans.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use passio_lib::{Alert, Route, Stop, Vehicle};

use crate::terminal::{format_position, ColorPalette};

/// Output format for lookup subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per record.
    #[default]
    Text,
    /// Pretty JSON, as returned by the MCP tools.
    Json,
}

/// A record that can be printed as a single line of text.
pub trait TextLine {
    fn text_line(&self, palette: &ColorPalette) -> String;
}

impl TextLine for Route {
    fn text_line(&self, p: &ColorPalette) -> String {
        let mut line = format!(
            "{}{}{} {}[{}]{}",
            p.white_bold, self.name, p.reset, p.gray, self.id, p.reset
        );
        if let Some(short_name) = self.short_name.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" ({})", short_name));
        }
        if self.archived {
            line.push_str(&format!(" {}archived{}", p.red, p.reset));
        }
        line
    }
}

impl TextLine for Stop {
    fn text_line(&self, p: &ColorPalette) -> String {
        let mut line = format!(
            "{}{}{} {}[{}]{}",
            p.white_bold, self.name, p.reset, p.gray, self.id, p.reset
        );
        if let Some(position) = format_position(self.latitude, self.longitude) {
            line.push_str(&format!(" @ {}", position));
        }
        if !self.routes_and_positions.is_empty() {
            let routes: Vec<_> = self
                .routes_and_positions
                .keys()
                .map(|id| id.as_str())
                .collect();
            line.push_str(&format!(" {}routes {}{}", p.cyan, routes.join(", "), p.reset));
        }
        line
    }
}

impl TextLine for Alert {
    fn text_line(&self, p: &ColorPalette) -> String {
        let color = if self.important { p.red } else { p.yellow };
        let mut line = format!("{}{}{}", color, self.name, p.reset);
        if let Some(route) = &self.route_id {
            line.push_str(&format!(" {}route {}{}", p.cyan, route, p.reset));
        }
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            line.push_str(&format!(" {}{} .. {}{}", p.gray, from, to, p.reset));
        }
        line
    }
}

impl TextLine for Vehicle {
    fn text_line(&self, p: &ColorPalette) -> String {
        let mut line = format!(
            "{}{}{} {}[{}]{}",
            p.white_bold, self.name, p.reset, p.gray, self.id, p.reset
        );
        if let Some(route) = &self.route_name {
            line.push_str(&format!(" {}on {}{}", p.cyan, route, p.reset));
        }
        if let Some(position) = format_position(self.latitude, self.longitude) {
            line.push_str(&format!(" @ {}", position));
        }
        if self.out_of_service {
            line.push_str(&format!(" {}out of service{}", p.red, p.reset));
        }
        line
    }
}

/// Render a list of records in the requested format.
pub fn render_list<T>(records: &[T], format: OutputFormat, palette: &ColorPalette) -> Result<String>
where
    T: Serialize + TextLine,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("failed to serialize records")
        }
        OutputFormat::Text => Ok(records
            .iter()
            .map(|record| record.text_line(palette))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render one record in the requested format.
pub fn render_one<T>(record: &T, format: OutputFormat, palette: &ColorPalette) -> Result<String>
where
    T: Serialize + TextLine,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(record).context("failed to serialize record")
        }
        OutputFormat::Text => Ok(record.text_line(palette)),
    }
}

/// Write rendered output to stdout followed by a newline.
pub fn emit(rendered: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered).context("failed to write to stdout")?;
    Ok(())
}
