use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use qucsweb::submit::build_request;
use qucsweb::{Catalog, Editor, EditorConfig, EditorEvent};

/// replay recorded editor events against a catalog and print the resulting simulation request
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// component catalog, a JSON array of definitions. the built-in catalog if absent
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// editor configuration, JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// recorded editor events, a JSON array
    #[arg(long)]
    events: PathBuf,
    /// pretty print the request
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(p) => Catalog::from_path(p)
            .with_context(|| format!("loading catalog {}", p.display()))?,
        None => Catalog::builtin(),
    };
    let config = match &cli.config {
        Some(p) => EditorConfig::from_path(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => EditorConfig::default(),
    };
    let script = std::fs::read_to_string(&cli.events)
        .with_context(|| format!("reading events {}", cli.events.display()))?;
    let events: Vec<EditorEvent> = serde_json::from_str(&script).context("parsing events")?;

    let mut editor = Editor::new(catalog, config);
    for ev in events {
        editor.dispatch(ev);
    }
    if !editor.state().is_idle() {
        eprintln!("{}", format!("script ends while {}", editor.state()).yellow());
    }
    if let Some(status) = editor.status() {
        eprintln!("{}", status.yellow());
    }

    let mut nets = editor.nets();
    let request = build_request(editor.schematic(), editor.catalog(), &mut nets)?;
    eprintln!(
        "{}",
        format!(
            "{} instances, {} wires",
            request.instances.len(),
            editor.schematic().wires().count()
        )
        .green()
    );
    let out = if cli.pretty {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string(&request)?
    };
    println!("{}", out);
    Ok(())
}
