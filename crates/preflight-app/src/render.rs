//! Render use cases: turn an in-memory report into text, markdown, or JSON and write it out.

use anyhow::Context;
use camino::Utf8Path;
use preflight_types::PreflightReport;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown output format: {other} (expected text, markdown, or json)"),
        }
    }
}

pub fn render_report(report: &PreflightReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(preflight_render::render_text(report)),
        OutputFormat::Markdown => Ok(preflight_render::render_markdown(report)),
        OutputFormat::Json => {
            let bytes = serialize_report(report)?;
            String::from_utf8(bytes).context("report json is not utf-8")
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &PreflightReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn write_report(path: &Utf8Path, report: &PreflightReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {}", parent))?;
        }
    }
    Ok(())
}
