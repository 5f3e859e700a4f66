// src/storage.rs - Directory layout derived from a site's canonical name

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the external simulator and the presentation layer expect a site's
/// files to live, all rooted at `data/<name>/`.
///
/// Pure string interpolation: nothing here touches the filesystem, and the
/// paths are not required to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    /// Unprocessed field measurements.
    pub raw: PathBuf,
    /// Gap-filled model input.
    pub input: PathBuf,
    /// Simulator output tables and result summaries.
    pub output: PathBuf,
    /// Output of the automated-spray runs.
    pub output_auto: PathBuf,
    /// Output of the manual-spray runs.
    pub output_man: PathBuf,
    /// Parameter-sweep simulations.
    pub sim: PathBuf,
    /// Rendered figures.
    pub fig: PathBuf,
}

impl StorageLayout {
    pub fn for_name(name: &str) -> StorageLayout {
        let root = format!("data/{}", name);
        StorageLayout {
            raw: PathBuf::from(format!("{root}/raw/")),
            input: PathBuf::from(format!("{root}/interim/")),
            output: PathBuf::from(format!("{root}/processed/")),
            output_auto: PathBuf::from(format!("{root}/processed/auto/")),
            output_man: PathBuf::from(format!("{root}/processed/man/")),
            sim: PathBuf::from(format!("{root}/processed/simulations/")),
            fig: PathBuf::from(format!("{root}/figs/")),
        }
    }

    /// Path of the simulator's main output table for this site.
    pub fn output_table_path(&self, basename: &str) -> PathBuf {
        self.output.join(basename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_interpolates_site_name() {
        let layout = StorageLayout::for_name("guttannen21");
        assert_eq!(layout.raw, PathBuf::from("data/guttannen21/raw/"));
        assert_eq!(layout.input, PathBuf::from("data/guttannen21/interim/"));
        assert_eq!(layout.output, PathBuf::from("data/guttannen21/processed/"));
        assert_eq!(
            layout.output_auto,
            PathBuf::from("data/guttannen21/processed/auto/")
        );
        assert_eq!(
            layout.output_man,
            PathBuf::from("data/guttannen21/processed/man/")
        );
        assert_eq!(
            layout.sim,
            PathBuf::from("data/guttannen21/processed/simulations/")
        );
        assert_eq!(layout.fig, PathBuf::from("data/guttannen21/figs/"));
    }

    #[test]
    fn test_output_table_path() {
        let layout = StorageLayout::for_name("gangles21");
        assert_eq!(
            layout.output_table_path("output.csv"),
            PathBuf::from("data/gangles21/processed/output.csv")
        );
    }
}
