mod cli;
mod prompt;
mod report;
mod terminal;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use citypath_compute::{sequential_dijkstra, ParallelDijkstra, ShortestPaths};
use citypath_core::config::load_dotenv;
use citypath_core::NodeIndex;
use citypath_ingest::{DataSet, Region};

use crate::cli::CliArgs;
use crate::prompt::Prompter;
use crate::report::RouteReport;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = args.resolve_config();
    config.log_summary();

    // Prompts stay off stdout when it carries JSON.
    let console: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut prompter = Prompter::new(io::stdin().lock(), console);

    let data = DataSet::from_config(&config.data);
    let state = match &args.region {
        Some(query) => data
            .resolve_state(query)
            .with_context(|| format!("failed to resolve state '{}'", query))?,
        None => {
            let states = data.states().context("failed to read states list")?;
            prompter.choose_state(&states)?
        }
    };
    let region = data
        .load_region(&state)
        .with_context(|| format!("failed to load region '{}'", state))?;

    let start = match &args.from {
        Some(query) => region
            .city_index(query)
            .with_context(|| format!("unknown start city '{}'", query))?,
        None => prompter.choose_start(&region)?,
    };

    if args.show_matrix || !args.is_scripted() {
        terminal::print_matrix(prompter.output(), &region)?;
    }

    let destinations = match &args.to {
        Some(list) => region
            .city_indices(list)
            .with_context(|| format!("unknown destination in '{}'", list))?,
        None => prompter.choose_destinations(&region)?,
    };
    let destinations = every_other_city_if_empty(&region, start, destinations);

    let graph = region.graph_from(start)?;
    let engine = ParallelDijkstra::new(config.engine.clone());
    let (paths, stats) = engine
        .run_with_stats(&graph)
        .context("shortest path run failed")?;

    if args.verify {
        let reference = sequential_dijkstra(&graph);
        verify_against(&paths, &reference)?;
        info!(nodes = graph.node_count(), "Distances match sequential reference");
    }

    let report = RouteReport::build(&region, &paths, &destinations, stats)?;
    if report.unreachable_count() > 0 {
        warn!(
            unreachable = report.unreachable_count(),
            start = %report.start,
            "Some destinations cannot be reached"
        );
    }

    let mut stdout = io::stdout();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        terminal::print_report(&mut stdout, &report)?;
    }
    Ok(())
}

/// No destinations picked means "show me everything".
fn every_other_city_if_empty(
    region: &Region,
    start: NodeIndex,
    destinations: Vec<NodeIndex>,
) -> Vec<NodeIndex> {
    if destinations.is_empty() {
        (0..region.city_count()).filter(|&c| c != start).collect()
    } else {
        destinations
    }
}

fn verify_against(parallel: &ShortestPaths, reference: &ShortestPaths) -> Result<()> {
    for (node, (&p, &r)) in parallel
        .distances
        .iter()
        .zip(&reference.distances)
        .enumerate()
    {
        let agree = p == r || (p - r).abs() <= 1e-9 * r.abs().max(1.0);
        if !agree {
            bail!(
                "parallel distance {} for node {} differs from sequential {}",
                p,
                node,
                r
            );
        }
    }
    Ok(())
}
