//! Pipeline argument model
//!
//! Maps the `pipeline` command line (and an optional config file) to a
//! resolved [`PipelineSettings`] record. Nothing here touches the input data.

use crate::derivatives::{parse_derivatives, DerivativesMap};
use crate::error::DerivativesError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const PIPELINE_VERSION: &str = "0.1.0";

/// Analysis level; only participant-level analysis exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLevel {
    #[default]
    Participant,
}

impl AnalysisLevel {
    pub fn name(self) -> &'static str {
        match self {
            AnalysisLevel::Participant => "participant",
        }
    }
}

impl fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predefined analysis strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Minimal,
    Standard,
    Advanced,
    Custom,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Minimal,
        Strategy::Standard,
        Strategy::Advanced,
        Strategy::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Minimal => "minimal",
            Strategy::Standard => "standard",
            Strategy::Advanced => "advanced",
            Strategy::Custom => "custom",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::Minimal => "Minimal analysis - basic preprocessing",
            Strategy::Standard => "Standard analysis - recommended for most studies",
            Strategy::Advanced => "Advanced analysis - includes all processing options",
            Strategy::Custom => "Custom analysis - requires --config file",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One layer of pipeline options (config file or command line)
///
/// Derivatives from the command line arrive as raw `name=path` tokens in
/// [`PipelineSettings::resolve`]; the config file gives them as a mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineOptions {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub derivatives: Option<DerivativesMap>,

    /// Participant labels without the `sub-` prefix
    #[serde(default)]
    pub participant_label: Option<Vec<String>>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub run: Option<u32>,
    #[serde(default)]
    pub space: Option<String>,
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub low_freq: Option<f64>,
    #[serde(default)]
    pub high_freq: Option<f64>,
    #[serde(default)]
    pub overwrite: Option<bool>,

    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub extend: Option<u32>,
    #[serde(default)]
    pub min_segment_length: Option<u32>,
    #[serde(default)]
    pub drop_initial: Option<u32>,
}

impl PipelineOptions {
    /// Validate the options for logical errors
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("low_freq", self.low_freq), ("high_freq", self.high_freq)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    anyhow::bail!("{} must be a positive frequency in Hz (got {})", name, v);
                }
            }
        }
        if let (Some(low), Some(high)) = (self.low_freq, self.high_freq) {
            if low >= high {
                anyhow::bail!(
                    "low_freq ({}) must be less than high_freq ({})",
                    low,
                    high
                );
            }
        }
        if let Some(t) = self.threshold {
            if !t.is_finite() {
                anyhow::bail!("threshold must be a finite number (got {})", t);
            }
        }
        Ok(())
    }

    /// Overlay `self` on `lower`: every field set here wins. Derivative maps
    /// merge by name.
    pub fn overlay(self, lower: PipelineOptions) -> PipelineOptions {
        let derivatives = match (lower.derivatives, self.derivatives) {
            (Some(mut base), Some(top)) => {
                base.extend(top);
                Some(base)
            }
            (base, None) => base,
            (None, top) => top,
        };
        PipelineOptions {
            verbose: self.verbose.or(lower.verbose),
            derivatives,
            participant_label: self.participant_label.or(lower.participant_label),
            task: self.task.or(lower.task),
            session: self.session.or(lower.session),
            run: self.run.or(lower.run),
            space: self.space.or(lower.space),
            label: self.label.or(lower.label),
            strategy: self.strategy.or(lower.strategy),
            low_freq: self.low_freq.or(lower.low_freq),
            high_freq: self.high_freq.or(lower.high_freq),
            overwrite: self.overwrite.or(lower.overwrite),
            threshold: self.threshold.or(lower.threshold),
            extend: self.extend.or(lower.extend),
            min_segment_length: self.min_segment_length.or(lower.min_segment_length),
            drop_initial: self.drop_initial.or(lower.drop_initial),
        }
    }
}

/// BIDS entity filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilters {
    pub participant_label: Vec<String>,
    pub task: Option<String>,
    pub session: Option<String>,
    pub run: Option<u32>,
    pub space: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingOptions {
    pub strategy: Option<Strategy>,
    pub low_freq: Option<f64>,
    pub high_freq: Option<f64>,
    pub overwrite: bool,
}

/// Temporal volume selection and segmentation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalOptions {
    pub threshold: Option<f64>,
    pub extend: u32,
    pub min_segment_length: u32,
    pub drop_initial: u32,
}

/// Fully resolved pipeline invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub analysis_level: AnalysisLevel,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
    pub derivatives: DerivativesMap,
    pub filters: EntityFilters,
    pub processing: ProcessingOptions,
    pub temporal: TemporalOptions,
}

impl PipelineSettings {
    /// Resolve settings from merged options and the raw `-d` tokens.
    ///
    /// Command-line tokens are parsed here so a malformed token surfaces as a
    /// [`DerivativesError`] naming it; they win over config-file entries with
    /// the same name.
    pub fn resolve(
        input_dir: PathBuf,
        output_dir: PathBuf,
        analysis_level: AnalysisLevel,
        options: PipelineOptions,
        derivative_tokens: &[String],
        config_path: Option<PathBuf>,
    ) -> Result<PipelineSettings, DerivativesError> {
        let mut derivatives = options.derivatives.unwrap_or_default();
        derivatives.extend(parse_derivatives(derivative_tokens)?);

        Ok(PipelineSettings {
            input_dir,
            output_dir,
            analysis_level,
            verbose: options.verbose.unwrap_or(false),
            config_path,
            derivatives,
            filters: EntityFilters {
                participant_label: options.participant_label.unwrap_or_default(),
                task: options.task,
                session: options.session,
                run: options.run,
                space: options.space,
                label: options.label,
            },
            processing: ProcessingOptions {
                strategy: options.strategy,
                low_freq: options.low_freq,
                high_freq: options.high_freq,
                overwrite: options.overwrite.unwrap_or(false),
            },
            temporal: TemporalOptions {
                threshold: options.threshold,
                extend: options.extend.unwrap_or(0),
                min_segment_length: options.min_segment_length.unwrap_or(0),
                drop_initial: options.drop_initial.unwrap_or(0),
            },
        })
    }

    /// Placeholder output printed instead of running an analysis
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            "Analysis pipeline would run here".to_string(),
            format!("  Input: {}", self.input_dir.display()),
            format!("  Output: {}", self.output_dir.display()),
            format!("  Level: {}", self.analysis_level),
        ]
    }

    /// Every resolved value, one `key: value` line each; logged in verbose mode
    pub fn detail_lines(&self) -> Vec<String> {
        fn opt<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string())
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "config: {}",
            self.config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        ));
        if self.derivatives.is_empty() {
            lines.push("derivatives: none".to_string());
        }
        for (name, path) in &self.derivatives {
            lines.push(format!("derivatives.{}: {}", name, path.display()));
        }
        let f = &self.filters;
        lines.push(format!(
            "participant_label: {}",
            if f.participant_label.is_empty() {
                "all".to_string()
            } else {
                f.participant_label.join(", ")
            }
        ));
        lines.push(format!("task: {}", opt(&f.task)));
        lines.push(format!("session: {}", opt(&f.session)));
        lines.push(format!("run: {}", opt(&f.run)));
        lines.push(format!("space: {}", opt(&f.space)));
        lines.push(format!("label: {}", opt(&f.label)));
        let p = &self.processing;
        lines.push(format!("strategy: {}", opt(&p.strategy)));
        lines.push(format!("low_freq: {}", opt(&p.low_freq)));
        lines.push(format!("high_freq: {}", opt(&p.high_freq)));
        lines.push(format!("overwrite: {}", p.overwrite));
        let t = &self.temporal;
        lines.push(format!("threshold: {}", opt(&t.threshold)));
        lines.push(format!("extend: {}", t.extend));
        lines.push(format!("min_segment_length: {}", t.min_segment_length));
        lines.push(format!("drop_initial: {}", t.drop_initial));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn resolve(options: PipelineOptions, tokens: &[&str]) -> Result<PipelineSettings, DerivativesError> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        PipelineSettings::resolve(
            PathBuf::from("/data/bids"),
            PathBuf::from("/data/out"),
            AnalysisLevel::Participant,
            options,
            &tokens,
            None,
        )
    }

    #[test]
    fn test_defaults() {
        let settings = resolve(PipelineOptions::default(), &[]).unwrap();
        assert!(settings.derivatives.is_empty());
        assert!(settings.filters.participant_label.is_empty());
        assert_eq!(settings.temporal, TemporalOptions::default());
        assert!(!settings.processing.overwrite);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_derivative_tokens_are_parsed() {
        let settings = resolve(PipelineOptions::default(), &["a=/x", "b=/y"]).unwrap();
        assert_eq!(settings.derivatives["a"], Path::new("/x"));
        assert_eq!(settings.derivatives["b"], Path::new("/y"));
    }

    #[test]
    fn test_malformed_token_fails_resolution() {
        let err = resolve(PipelineOptions::default(), &["bad"]).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_cli_tokens_override_config_derivatives() {
        let mut from_file = DerivativesMap::new();
        from_file.insert("preprocessed".to_string(), PathBuf::from("/file/preproc"));
        from_file.insert("masks".to_string(), PathBuf::from("/file/masks"));
        let options = PipelineOptions {
            derivatives: Some(from_file),
            ..Default::default()
        };
        let settings = resolve(options, &["preprocessed=/cli/preproc"]).unwrap();
        assert_eq!(settings.derivatives["preprocessed"], Path::new("/cli/preproc"));
        assert_eq!(settings.derivatives["masks"], Path::new("/file/masks"));
    }

    #[test]
    fn test_overlay_cli_wins() {
        let file = PipelineOptions {
            task: Some("rest".to_string()),
            strategy: Some(Strategy::Minimal),
            extend: Some(2),
            ..Default::default()
        };
        let cli = PipelineOptions {
            strategy: Some(Strategy::Advanced),
            ..Default::default()
        };
        let merged = cli.overlay(file);
        assert_eq!(merged.task.as_deref(), Some("rest"));
        assert_eq!(merged.strategy, Some(Strategy::Advanced));
        assert_eq!(merged.extend, Some(2));
    }

    #[test]
    fn test_participant_labels_keep_order() {
        let options = PipelineOptions {
            participant_label: Some(vec!["03".into(), "01".into(), "02".into()]),
            ..Default::default()
        };
        let settings = resolve(options, &[]).unwrap();
        assert_eq!(settings.filters.participant_label, vec!["03", "01", "02"]);
    }

    #[test]
    fn test_validate_frequencies() {
        let ok = PipelineOptions {
            low_freq: Some(0.01),
            high_freq: Some(0.1),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let inverted = PipelineOptions {
            low_freq: Some(0.1),
            high_freq: Some(0.01),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let negative = PipelineOptions {
            high_freq: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_summary_lines() {
        let settings = resolve(PipelineOptions::default(), &[]).unwrap();
        assert_eq!(
            settings.summary_lines(),
            vec![
                "Analysis pipeline would run here",
                "  Input: /data/bids",
                "  Output: /data/out",
                "  Level: participant",
            ]
        );
    }

    #[test]
    fn test_detail_lines_cover_every_group() {
        let options = PipelineOptions {
            strategy: Some(Strategy::Standard),
            low_freq: Some(0.01),
            run: Some(2),
            ..Default::default()
        };
        let settings = resolve(options, &["preproc=/d/preproc"]).unwrap();
        let lines = settings.detail_lines();
        assert!(lines.contains(&"derivatives.preproc: /d/preproc".to_string()));
        assert!(lines.contains(&"strategy: standard".to_string()));
        assert!(lines.contains(&"low_freq: 0.01".to_string()));
        assert!(lines.contains(&"run: 2".to_string()));
        assert!(lines.contains(&"participant_label: all".to_string()));
        assert!(lines.contains(&"drop_initial: 0".to_string()));
    }

    #[test]
    fn test_strategy_descriptions() {
        for strategy in Strategy::ALL {
            assert!(!strategy.description().is_empty());
        }
        assert_eq!(Strategy::Custom.description(), "Custom analysis - requires --config file");
    }
}
