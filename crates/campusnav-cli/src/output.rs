//! Output formatting for routes and walkway listings.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;

use campusnav_lib::{PathResult, RouteEngine, SegmentInfo};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render a single route.
pub fn render_route(engine: &RouteEngine, route: &PathResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(route)?),
        OutputFormat::Text => Ok(route_text(engine, route)),
    }
}

/// Render a list of candidate routes.
pub fn render_routes(
    engine: &RouteEngine,
    routes: &[PathResult],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &serde_json::json!({ "routes": routes }),
        )?),
        OutputFormat::Text if routes.is_empty() => Ok("No routes found.\n".to_string()),
        OutputFormat::Text => {
            let mut out = String::new();
            for (idx, route) in routes.iter().enumerate() {
                let _ = writeln!(out, "Option {}:", idx + 1);
                out.push_str(&route_text(engine, route));
            }
            Ok(out)
        }
    }
}

/// Render walkways with their current status.
pub fn render_paths(segments: &[SegmentInfo], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(
            &serde_json::json!({ "paths": segments }),
        )?);
    }

    let id_width = segments.iter().map(|s| s.id.len()).max().unwrap_or(2).max(2);
    let mut out = String::new();
    for segment in segments {
        let endpoints = format!("{} <-> {}", segment.from_id, segment.to_id);
        let _ = write!(
            out,
            "{:<id_width$}  {:<32}  {:>7.0} m  {:<12}",
            segment.id,
            endpoints,
            segment.distance,
            segment.status.as_str(),
        );
        if let Some(name) = &segment.name {
            let _ = write!(out, "  {}", name);
        }
        if !segment.is_accessible {
            out.push_str("  [not step-free]");
        }
        out.push('\n');
    }
    Ok(out)
}

fn route_text(engine: &RouteEngine, route: &PathResult) -> String {
    let mut out = String::new();
    for (idx, id) in route.path.iter().enumerate() {
        let name = engine.node(id).map(|node| node.name.as_str()).unwrap_or(id);
        let marker = if idx == 0 {
            "+"
        } else if idx + 1 == route.path.len() {
            "-"
        } else {
            "|"
        };
        if name == id.as_str() {
            let _ = writeln!(out, "  {} {}", marker, id);
        } else {
            let _ = writeln!(out, "  {} {} ({})", marker, name, id);
        }
    }
    let _ = writeln!(
        out,
        "Distance: {:.0} m, about {} min walk ({} {})",
        route.distance,
        route.estimated_time,
        route.hop_count(),
        if route.hop_count() == 1 { "walkway" } else { "walkways" },
    );
    out
}
