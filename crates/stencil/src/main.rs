/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render an action template against a data file.
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use stencil_template::FieldAccessor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod data;

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Render {{ action }} templates against JSON or YAML data")]
struct Args {
    /// Template file ('-' reads the template from stdin)
    #[arg(value_name = "TEMPLATE", required_unless_present = "expr")]
    template: Option<PathBuf>,

    /// Inline template text, used instead of a template file
    #[arg(short = 'e', long, conflicts_with = "template")]
    expr: Option<String>,

    /// Data file (.json, .yaml or .yml)
    #[arg(short = 'd', long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "stencil=warn,stencil_template=warn",
        1 => "stencil=info,stencil_template=info",
        2 => "stencil=debug,stencil_template=debug",
        _ => "stencil=trace,stencil_template=trace",
    }
}

fn read_template(args: &Args) -> Result<String> {
    if let Some(expr) = &args.expr {
        return Ok(expr.clone());
    }

    match &args.template {
        Some(path) if path.as_os_str() == "-" => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read template from stdin")?;
            Ok(source)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {:?}", path)),
        None => anyhow::bail!("No template given"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(args.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let template = read_template(&args)?;
    let data = args.data.as_deref().map(data::load).transpose()?;
    tracing::info!(
        template_bytes = template.len(),
        has_data = data.is_some(),
        "Rendering template"
    );

    let output = stencil_template::render(
        &template,
        data.as_ref().map(|d| d as &dyn FieldAccessor),
    )
    .context("Failed to render template")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => println!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_inline_expr() {
        let args = Args::try_parse_from(["stencil", "-e", "{{1 + 1}}"]).unwrap();
        assert_eq!(read_template(&args).unwrap(), "{{1 + 1}}");
    }

    #[test]
    fn test_args_require_template() {
        assert!(Args::try_parse_from(["stencil"]).is_err());
    }

    #[test]
    fn test_args_template_and_expr_conflict() {
        assert!(Args::try_parse_from(["stencil", "t.txt", "-e", "x"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = Args::try_parse_from(["stencil", "-vv", "t.txt"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(default_filter(args.verbose), "stencil=debug,stencil_template=debug");
        assert_eq!(default_filter(9), "stencil=trace,stencil_template=trace");
    }

    #[test]
    fn test_read_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.tmpl");
        fs::write(&path, "Hello {{.Name}}").unwrap();

        let args =
            Args::try_parse_from([std::ffi::OsStr::new("stencil"), path.as_os_str()]).unwrap();
        assert_eq!(read_template(&args).unwrap(), "Hello {{.Name}}");
    }

    #[test]
    fn test_read_missing_template() {
        let args = Args::try_parse_from(["stencil", "/nonexistent/template.tmpl"]).unwrap();
        let err = read_template(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read template"));
    }
}
