//! Shared command-line arguments and their mapping onto library options.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use freightpath_lib::{ConsolidationOptions, InputPaths, SearchMode, SearchOptions};

/// Locations of the input files.
///
/// Every file defaults to its canonical name inside `--data-dir` (or the
/// current directory) and can be overridden individually.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Directory holding nodes.csv, connections.csv, truck.csv,
    /// package_types.csv and packages.csv.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the nodes file.
    #[arg(long, global = true)]
    pub nodes: Option<PathBuf>,
    /// Override the connections file.
    #[arg(long, global = true)]
    pub connections: Option<PathBuf>,
    /// Override the truck capacity file.
    #[arg(long, global = true)]
    pub truck: Option<PathBuf>,
    /// Override the package types file.
    #[arg(long = "package-types", global = true)]
    pub package_types: Option<PathBuf>,
    /// Override the packages file.
    #[arg(long, global = true)]
    pub packages: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve the five input paths.
    pub fn resolve(&self) -> InputPaths {
        let dir = self.data_dir.as_deref().unwrap_or_else(|| Path::new("."));
        let defaults = InputPaths::from_dir(dir);
        InputPaths {
            nodes: self.nodes.clone().unwrap_or(defaults.nodes),
            connections: self.connections.clone().unwrap_or(defaults.connections),
            truck: self.truck.clone().unwrap_or(defaults.truck),
            package_types: self.package_types.clone().unwrap_or(defaults.package_types),
            packages: self.packages.clone().unwrap_or(defaults.packages),
        }
    }
}

/// Search mode as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchModeArg {
    /// Expand a node once per distinct parent chain (no closed set).
    #[default]
    Exhaustive,
    /// Expand each node at most once.
    Deduplicated,
}

impl From<SearchModeArg> for SearchMode {
    fn from(value: SearchModeArg) -> Self {
        match value {
            SearchModeArg::Exhaustive => SearchMode::Exhaustive,
            SearchModeArg::Deduplicated => SearchMode::Deduplicated,
        }
    }
}

/// Options shared by the route and consolidate commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Frontier handling strategy.
    #[arg(long = "search-mode", value_enum, default_value_t = SearchModeArg::Exhaustive, global = true)]
    pub search_mode: SearchModeArg,
    /// Abort a search after this many expansions.
    #[arg(long = "max-expansions", global = true)]
    pub max_expansions: Option<usize>,
    /// Compute package routes on all CPU cores.
    #[arg(long, global = true)]
    pub parallel: bool,
}

impl SearchArgs {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.search_mode.into(),
            max_expansions: self.max_expansions,
        }
    }

    pub fn consolidation_options(&self) -> ConsolidationOptions {
        ConsolidationOptions {
            search: self.search_options(),
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_data_dir_defaults() {
        let args = InputArgs {
            data_dir: Some(PathBuf::from("/data")),
            ..InputArgs::default()
        };
        let paths = args.resolve();
        assert_eq!(paths.nodes, PathBuf::from("/data/nodes.csv"));
        assert_eq!(paths.packages, PathBuf::from("/data/packages.csv"));
    }

    #[test]
    fn resolve_prefers_explicit_files() {
        let args = InputArgs {
            data_dir: Some(PathBuf::from("/data")),
            truck: Some(PathBuf::from("/elsewhere/fleet.csv")),
            ..InputArgs::default()
        };
        let paths = args.resolve();
        assert_eq!(paths.truck, PathBuf::from("/elsewhere/fleet.csv"));
        assert_eq!(paths.connections, PathBuf::from("/data/connections.csv"));
    }

    #[test]
    fn search_args_map_onto_options() {
        let args = SearchArgs {
            search_mode: SearchModeArg::Deduplicated,
            max_expansions: Some(50),
            parallel: true,
        };
        let options = args.consolidation_options();
        assert_eq!(options.search.mode, SearchMode::Deduplicated);
        assert_eq!(options.search.max_expansions, Some(50));
        assert!(options.parallel);
    }
}
