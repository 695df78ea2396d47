use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use chromcompare_concordance::ComparisonParameters;
use chromcompare_concordance::consts::{DEFAULT_SIGNIFICANCE, DEFAULT_WINDOW_SIZE};
use chromcompare_core::models::RegionOfInterest;
use chromcompare_io::read_cutoff_table;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RegionConfig {
    pub chromosome: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ReferenceConfig {
    pub merged_peaks: PathBuf,
    pub unmerged_peaks: PathBuf,
    pub bias_track: PathBuf,
    pub coverage_track: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub bias_track: PathBuf,
    pub coverage_track: PathBuf,
    pub pvalue_track: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub cutoff: Option<f64>,
    pub cutoff_table: Option<PathBuf>,
    pub average_peak_length: Option<u32>,
    pub significance: f64,
    pub window_size: usize,
    /// Leave merged-only peaks out of the metric
    pub unmerged: bool,
    pub read_scaled: bool,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        ParametersConfig {
            cutoff: None,
            cutoff_table: None,
            average_peak_length: None,
            significance: DEFAULT_SIGNIFICANCE,
            window_size: DEFAULT_WINDOW_SIZE,
            unmerged: false,
            read_scaled: false,
        }
    }
}

///
/// Everything one `compare` run needs, as laid out in a TOML file.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub region: RegionConfig,
    pub reference: ReferenceConfig,
    pub comparison: ComparisonConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
}

fn resolve(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&path);
    }
}

impl CompareConfig {
    ///
    /// Parse a config file. Relative input paths are taken relative to the
    /// directory holding the config file.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: CompareConfig =
            toml::from_str(&toml_str).with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.reference.merged_peaks,
            &mut self.reference.unmerged_peaks,
            &mut self.reference.bias_track,
            &mut self.reference.coverage_track,
            &mut self.comparison.bias_track,
            &mut self.comparison.coverage_track,
            &mut self.comparison.pvalue_track,
        ] {
            resolve(base, path);
        }
        if let Some(table) = self.parameters.cutoff_table.as_mut() {
            resolve(base, table);
        }
    }

    /// Every input file, with the config key naming it.
    pub fn input_files(&self) -> Vec<(&'static str, &Path)> {
        let mut files = vec![
            ("reference.merged_peaks", self.reference.merged_peaks.as_path()),
            ("reference.unmerged_peaks", self.reference.unmerged_peaks.as_path()),
            ("reference.bias_track", self.reference.bias_track.as_path()),
            ("reference.coverage_track", self.reference.coverage_track.as_path()),
            ("comparison.bias_track", self.comparison.bias_track.as_path()),
            ("comparison.coverage_track", self.comparison.coverage_track.as_path()),
            ("comparison.pvalue_track", self.comparison.pvalue_track.as_path()),
        ];
        if let Some(table) = &self.parameters.cutoff_table {
            files.push(("parameters.cutoff_table", table.as_path()));
        }
        files
    }

    ///
    /// All problems with this config, in a stable order. Empty when the
    /// config can be run.
    ///
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let parameters = &self.parameters;

        if self.region.start >= self.region.end {
            problems.push(format!(
                "region.end ({}) must be larger than region.start ({})",
                self.region.end, self.region.start
            ));
        }

        match (parameters.cutoff, &parameters.cutoff_table, parameters.average_peak_length) {
            (Some(cutoff), _, _) if !(cutoff > 0.0) => {
                problems.push(format!("parameters.cutoff must be a positive number, found {}", cutoff))
            }
            (Some(_), Some(_), _) => {
                problems.push("give either parameters.cutoff or parameters.cutoff_table, not both".to_string())
            }
            (Some(_), None, _) => {}
            (None, Some(_), Some(_)) => {}
            (None, Some(_), None) => {
                problems.push("parameters.cutoff_table needs parameters.average_peak_length".to_string())
            }
            (None, None, _) => problems.push("missing parameters.cutoff".to_string()),
        }

        if !(parameters.significance > 0.0 && parameters.significance < 1.0) {
            problems.push(format!(
                "parameters.significance must lie strictly between 0 and 1, found {}",
                parameters.significance
            ));
        }
        if parameters.window_size == 0 {
            problems.push("parameters.window_size must be a positive integer".to_string());
        }

        for (key, path) in self.input_files() {
            if !path.exists() {
                problems.push(format!("{}: {} does not exist", key, path.display()));
            }
        }

        problems
    }

    pub fn region(&self) -> Result<RegionOfInterest> {
        Ok(RegionOfInterest::new(
            self.region.chromosome.clone(),
            self.region.start,
            self.region.end,
        )?)
    }

    ///
    /// The cutoff to classify merged-only peaks with: given directly, or
    /// looked up in the cutoff table by average peak length.
    ///
    pub fn cutoff(&self) -> Result<f64> {
        let parameters = &self.parameters;
        if let Some(cutoff) = parameters.cutoff {
            return Ok(cutoff);
        }

        match (&parameters.cutoff_table, parameters.average_peak_length) {
            (Some(table), Some(length)) => {
                let cutoff = read_cutoff_table(table)
                    .with_context(|| format!("Failed to read cutoff table {}", table.display()))?
                    .select_cutoff(length)?;
                info!("Using cutoff {} for average peak length {}", cutoff, length);
                Ok(cutoff)
            }
            _ => anyhow::bail!("No cutoff given: set a cutoff or a cutoff table with an average peak length"),
        }
    }

    pub fn parameters(&self) -> Result<ComparisonParameters> {
        Ok(ComparisonParameters {
            significance: self.parameters.significance,
            window_size: self.parameters.window_size,
            include_merged_peaks: !self.parameters.unmerged,
            read_scaled_bounds: self.parameters.read_scaled,
            ..ComparisonParameters::new(self.cutoff()?)
        })
    }
}

///
/// Validate the config file at `path`, collecting every problem found.
/// Only problems that stop the file from being parsed at all cut the
/// check short.
///
pub fn check_config_file(path: &Path) -> Result<Vec<String>> {
    let content = read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;

    let mut problems = Vec::new();
    if content.contains('\r') {
        problems.push("file has Windows (CRLF) line endings; use Linux (LF) line endings".to_string());
    }

    match toml::from_str::<CompareConfig>(&content) {
        Ok(mut config) => {
            if let Some(base) = path.parent() {
                config.resolve_paths(base);
            }
            problems.extend(config.problems());
        }
        Err(e) => problems.push(format!("invalid config: {}", e.message())),
    }

    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn tracks_dir() -> PathBuf {
        std::env::current_dir().unwrap().join("../tests/data/tracks")
    }

    fn config_text(start: u32, end: u32, parameters: &str) -> String {
        let dir = tracks_dir();
        let dir = dir.display();
        format!(
            r#"
[region]
chromosome = "chr1"
start = {start}
end = {end}

[reference]
merged_peaks = "{dir}/reference_merged.narrowPeak"
unmerged_peaks = "{dir}/reference_unmerged.narrowPeak"
bias_track = "{dir}/reference_bias.bedgraph"
coverage_track = "{dir}/reference_coverage.bedgraph"

[comparison]
bias_track = "{dir}/comparison_bias.bedgraph"
coverage_track = "{dir}/comparison_coverage.bedgraph.gz"
pvalue_track = "{dir}/comparison_pvalues.bedgraph"

[parameters]
{parameters}
"#
        )
    }

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("compare.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (tempdir, path)
    }

    #[rstest]
    fn test_from_file() {
        let (_dir, path) = write_config(&config_text(0, 9, "cutoff = 0.5"));
        let config = CompareConfig::from_file(&path).unwrap();

        assert_eq!(config.region().unwrap().to_string(), "chr1:0-9");
        assert_eq!(config.parameters.significance, 0.95);
        assert_eq!(config.parameters.window_size, 50);
        assert!(config.problems().is_empty());

        let parameters = config.parameters().unwrap();
        assert_eq!(parameters.cutoff, 0.5);
        assert!(parameters.include_merged_peaks);
    }

    #[rstest]
    fn test_cutoff_from_table() {
        let parameters = format!(
            "cutoff_table = \"{}/cutoffs.tsv\"\naverage_peak_length = 160\nunmerged = true",
            tracks_dir().display()
        );
        let (_dir, path) = write_config(&config_text(0, 9, &parameters));
        let config = CompareConfig::from_file(&path).unwrap();

        let parameters = config.parameters().unwrap();
        assert_eq!(parameters.cutoff, 2.0);
        assert!(!parameters.include_merged_peaks);
    }

    #[rstest]
    fn test_relative_paths_follow_config() {
        let mut config: CompareConfig = toml::from_str(&config_text(0, 9, "cutoff = 1.0")).unwrap();
        config.reference.merged_peaks = PathBuf::from("peaks.narrowPeak");
        config.resolve_paths(Path::new("/data/run1"));

        assert_eq!(
            config.reference.merged_peaks,
            PathBuf::from("/data/run1/peaks.narrowPeak")
        );
    }

    #[rstest]
    fn test_all_problems_are_collected() {
        let parameters = "cutoff = -1.0\nsignificance = 1.5\nwindow_size = 0";
        let (_dir, path) = write_config(&config_text(10, 5, parameters).replace("\n", "\r\n"));

        let problems = check_config_file(&path).unwrap();
        assert_eq!(problems.len(), 5);
        assert!(problems[0].contains("line endings"));
        assert!(problems[1].contains("region.end"));
        assert!(problems[2].contains("parameters.cutoff"));
        assert!(problems[3].contains("significance"));
        assert!(problems[4].contains("window_size"));
    }

    #[rstest]
    fn test_missing_files_are_reported() {
        let text = config_text(0, 9, "cutoff = 0.5").replace("reference_bias.bedgraph", "missing.bedgraph");
        let (_dir, path) = write_config(&text);

        let problems = check_config_file(&path).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("reference.bias_track"));
    }

    #[rstest]
    #[case("", "missing parameters.cutoff")]
    #[case("cutoff_table = \"cutoffs.tsv\"", "needs parameters.average_peak_length")]
    fn test_cutoff_problems(#[case] parameters: &str, #[case] expected: &str) {
        let config: CompareConfig = toml::from_str(&config_text(0, 9, parameters)).unwrap();
        let problems = config.problems();
        assert!(problems.iter().any(|p| p.contains(expected)));
    }

    #[rstest]
    fn test_unparsable_config() {
        let (_dir, path) = write_config("[region]\nchromosome = \"chr1\"\n");
        let problems = check_config_file(&path).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("invalid config"));
    }
}
