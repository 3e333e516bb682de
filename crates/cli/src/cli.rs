use std::path::PathBuf;

use clap::Parser;
use citypath_core::Config;

/// Shortest road distances between cities.
///
/// Loads a state's city distance matrix and runs a partitioned parallel
/// Dijkstra from the chosen start city. Any of `--region`, `--from` or `--to`
/// left out is asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "citypath", version, about = "Shortest road distances between cities")]
pub struct CliArgs {
    /// Config profile; keys are read as {PROFILE}_{KEY} before {KEY}
    #[arg(long, env = "CITYPATH_PROFILE")]
    pub profile: Option<String>,

    /// Data directory holding the states list and one folder per state
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// States list file name inside the data directory
    #[arg(long)]
    pub states_file: Option<String>,

    /// State to load, by name or 1-based number
    #[arg(long)]
    pub region: Option<String>,

    /// Start city, by name or 1-based number
    #[arg(long)]
    pub from: Option<String>,

    /// Destination cities, comma separated names or 1-based numbers
    #[arg(long)]
    pub to: Option<String>,

    /// Worker threads (0 = available parallelism)
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Stop as soon as no reachable city is left instead of running all rounds
    #[arg(long)]
    pub early_exit: bool,

    /// Print the distance matrix before the results
    #[arg(long)]
    pub show_matrix: bool,

    /// Emit the results as JSON
    #[arg(long)]
    pub json: bool,

    /// Cross-check distances against the sequential reference
    #[arg(long)]
    pub verify: bool,
}

impl CliArgs {
    /// Resolve the environment config and layer the flags on top.
    pub fn resolve_config(&self) -> Config {
        let mut config = match &self.profile {
            Some(profile) => Config::for_profile(profile),
            None => Config::from_env(),
        };
        if let Some(dir) = &self.data_dir {
            config.data.data_dir = dir.clone();
        }
        if let Some(file) = &self.states_file {
            config.data.states_file = file.clone();
        }
        if let Some(workers) = self.workers {
            config.engine.worker_threads = workers;
        }
        if self.early_exit {
            config.engine.early_exit = true;
        }
        config
    }

    /// All selections given on the command line, no prompts needed.
    pub fn is_scripted(&self) -> bool {
        self.region.is_some() && self.from.is_some() && self.to.is_some()
    }
}
