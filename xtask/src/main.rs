//! Developer tasks (schema generation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use preflight_types::explain;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// The workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(preflight_types::PreflightReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(preflight_settings::PreflightConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "preflight.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "preflight.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Fails if any file under schemas/ is missing or differs from the generated output.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for (label, names) in [("Missing schemas:", &missing), ("Schemas out of date:", &mismatched)] {
        if !names.is_empty() {
            eprintln!("{label}");
            for name in names.iter() {
                eprintln!("  - {}", name);
            }
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every check id and code needs a complete explanation, and only probe
/// failures may be marked as not ignorable.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Check ID", *id))
        .chain(codes.iter().map(|code| ("Code", *code)))
    {
        let Some(exp) = explain::lookup_explanation(id) else {
            errors.push(format!("{kind} '{id}' has no explanation"));
            continue;
        };
        for (field, value) in [
            ("title", exp.title),
            ("description", exp.description),
            ("remediation", exp.remediation),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{kind} '{id}' has empty {field}"));
            }
        }
        if !exp.ignorable && !id.ends_with("_probe_failed") {
            errors.push(format!("{kind} '{id}' is marked not ignorable"));
        }
        if exp.ignorable && id.ends_with("_probe_failed") {
            errors.push(format!("{kind} '{id}' is a probe failure but marked ignorable"));
        }
    }

    if errors.is_empty() {
        println!("{} check IDs have explanations", check_ids.len());
        println!("{} codes have explanations", codes.len());
        println!("\nAll explain coverage checks passed.");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
