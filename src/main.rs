// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orgchart CLI entrypoint.
//!
//! `render` loads entity records from a directory of JSON files, builds and lays out the chart
//! and prints the render model as JSON. `move`, `annotate`, `toggle` and `annotations` work on
//! the persisted overrides and annotations of one diagram.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use orgchart::adapter::AdapterMode;
use orgchart::config::ChartConfig;
use orgchart::model::{DiagramKey, NodeId, Point};
use orgchart::query::{DiagramScope, ViewMode};
use orgchart::render::RenderModel;
use orgchart::session::{ChartLoader, ChartWarning};
use orgchart::source::JsonDirSource;
use orgchart::store::{
    AnnotationStore, JsonDirKv, KvStore, MemoryKv, OverrideStore, WriteDurability,
};

#[derive(Debug, Parser)]
#[command(name = "orgchart", version, about = "Organizational chart engine")]
struct Cli {
    /// Config file (defaults to ./orgchart.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for overrides and annotations; overrides `persistence.state_dir`.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ScopeArgs {
    #[arg(long, default_value_t = ViewMode::Business)]
    view: ViewMode,

    #[arg(long)]
    organization: Option<String>,

    /// Restrict the chart to the subtree below this position id.
    #[arg(long)]
    root_position: Option<String>,

    /// Levels below `--root-position` to include.
    #[arg(long, requires = "root_position")]
    depth: Option<usize>,

    /// Show staff as nodes instead of positions.
    #[arg(long)]
    staff: bool,
}

impl ScopeArgs {
    fn scope(&self) -> DiagramScope {
        let mut scope = DiagramScope::new(self.view);
        if let Some(organization) = &self.organization {
            scope = scope.with_organization(organization.clone());
        }
        if let Some(root) = &self.root_position {
            scope = scope.with_root_position(root.clone(), self.depth);
        }
        if self.staff {
            scope = scope.with_mode(AdapterMode::StaffCentric);
        }
        scope
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the render model of a chart as JSON.
    Render {
        /// Directory holding divisions.json, positions.json, staff.json and relations.json.
        data_dir: PathBuf,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Store a dragged position for a node.
    Move {
        node_id: NodeId,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Append an annotation to a node.
    Annotate {
        node_id: NodeId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Toggle completion of a node's annotation by index.
    Toggle {
        node_id: NodeId,
        index: usize,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// List a node's annotations as JSON.
    Annotations {
        node_id: NodeId,
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    diagram_key: &'a DiagramKey,
    warnings: &'a [ChartWarning],
    #[serde(flatten)]
    model: RenderModel,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "orgchart=debug" } else { "orgchart=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn open_kv(config: &ChartConfig, state_dir: Option<PathBuf>) -> Arc<dyn KvStore> {
    match state_dir.or_else(|| config.persistence.state_dir.clone()) {
        Some(dir) => {
            let durability = if config.persistence.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            Arc::new(JsonDirKv::new(dir).with_durability(durability))
        }
        None => {
            tracing::warn!("no state directory configured, overrides and annotations are not kept");
            Arc::new(MemoryKv::new())
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = ChartConfig::load(cli.config.as_deref())?;
    let kv = open_kv(&config, cli.state_dir);
    let overrides =
        Arc::new(OverrideStore::with_debounce(kv.clone(), config.persistence.debounce()));
    let annotations = Arc::new(AnnotationStore::new(kv));

    match cli.command {
        Command::Render { data_dir, scope } => {
            let loader = ChartLoader::new(
                Arc::new(JsonDirSource::new(data_dir)),
                overrides,
                annotations,
                config.layout.clone(),
            )
            .with_editing(config.editing.clone());
            let chart = loader.load(&scope.scope()).await?;
            for warning in &chart.warnings {
                tracing::info!(?warning, "chart warning");
            }
            print_json(&RenderOutput {
                diagram_key: &chart.diagram_key,
                warnings: &chart.warnings,
                model: chart.render(),
            })
        }
        Command::Move { node_id, x, y, scope } => {
            let point = Point::new(x, y);
            if !point.is_finite() {
                return Err(format!("position ({x}, {y}) is not finite").into());
            }
            let key = scope.scope().diagram_key()?;
            overrides.save(&key, &node_id, point);
            let written = overrides.flush_all()?;
            tracing::debug!(diagram_key = %key, node_id = %node_id, written, "stored override");
            Ok(())
        }
        Command::Annotate { node_id, text, scope } => {
            let key = scope.scope().diagram_key()?;
            match annotations.append(&key, &node_id, &text.join(" "))? {
                Some(annotation) => print_json(&annotation),
                None => Err("annotation text is blank".into()),
            }
        }
        Command::Toggle { node_id, index, scope } => {
            let key = scope.scope().diagram_key()?;
            print_json(&annotations.toggle_complete(&key, &node_id, index)?)
        }
        Command::Annotations { node_id, scope } => {
            let key = scope.scope().diagram_key()?;
            print_json(&annotations.list(&key, &node_id)?)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| -> Box<dyn Error> { Box::new(err) })
        .and_then(|runtime| runtime.block_on(run(cli)));

    if let Err(err) = result {
        eprintln!("orgchart: {err}");
        std::process::exit(1);
    }
}
