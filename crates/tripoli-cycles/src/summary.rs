//! Legend summaries
//!
//! The numbers a plot legend shows for the current analysis, already
//! rounded and rendered. Ratios reported in ratio space get a geometric
//! mean with percent uncertainties; everything else (functions, log
//! ratios) gets an additive mean with absolute uncertainties.

use std::fmt;

use tripoli_sigfig::{count_of_trailing_digits_for_sig_fig, format_fixed, format_stats};

use crate::geometric::generate_geometric_mean_stats;
use crate::settings::{ReductionMode, ReductionSettings};
use crate::sigma_percent::{block_mode_sigma_percents, cycle_mode_sigma_percents};
use crate::stats::AnalysisStatsRecord;

/// A rendered uncertainty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uncertainty {
    /// In the units of the mean
    Absolute(String),
    /// Percent of the geometric mean, upper and lower side
    Percent { plus: String, minus: String },
}

impl fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uncertainty::Absolute(value) => write!(f, "{value}"),
            Uncertainty::Percent { plus, minus } if plus == minus => write!(f, "±{plus}%"),
            Uncertainty::Percent { plus, minus } => write!(f, "+{plus}% / -{minus}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockModeSummary {
    pub mean: String,
    /// One sigma of the weighted mean
    pub one_sigma: Uncertainty,
    /// `NaN` or `Infinite` when undefined
    pub reduced_chi_squared: String,
    pub included_blocks: usize,
    pub total_blocks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleModeSummary {
    pub mean: String,
    pub std_err: Uncertainty,
    pub std_dev: Uncertainty,
    pub included_cycles: usize,
    pub total_cycles: usize,
}

/// Legend content for one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    BlockMode(BlockModeSummary),
    CycleMode(CycleModeSummary),
    /// The mean is undefined
    BadData,
}

impl Summary {
    pub fn is_bad_data(&self) -> bool {
        matches!(self, Summary::BadData)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::BlockMode(s) => {
                writeln!(f, "Block Mode:")?;
                writeln!(f, "  x̄     = {}", s.mean)?;
                writeln!(f, "  σx̄    = {}", s.one_sigma)?;
                writeln!(f, "  χ²red = {}", s.reduced_chi_squared)?;
                write!(f, "  n     = {}/{}", s.included_blocks, s.total_blocks)
            }
            Summary::CycleMode(s) => {
                writeln!(f, "Cycle Mode:")?;
                writeln!(f, "  x̄     = {}", s.mean)?;
                writeln!(f, "  σx̄    = {}", s.std_err)?;
                writeln!(f, "  σ     = {}", s.std_dev)?;
                write!(f, "  n     = {}/{}", s.included_cycles, s.total_cycles)
            }
            Summary::BadData => write!(f, "Bad Data"),
        }
    }
}

// Summary fields are single values; alignment padding belongs to the renderer
fn unpadded(s: &str) -> String {
    s.trim_start().to_string()
}

fn percent(plus: f64, minus: f64, digits: usize) -> Uncertainty {
    Uncertainty::Percent {
        plus: format_fixed(plus, digits),
        minus: format_fixed(minus, digits),
    }
}

fn chi_squared_string(chi_squared: f64, digits: usize) -> String {
    if chi_squared.is_nan() {
        "NaN".to_string()
    } else if chi_squared.is_infinite() {
        "Infinite".to_string()
    } else {
        format_fixed(chi_squared, digits)
    }
}

/// Build the legend summary for `stats` under `settings`
pub fn summarize(stats: &AnalysisStatsRecord, settings: &ReductionSettings) -> Summary {
    let sig_figs = settings.sig_figs;
    match (settings.mode, settings.reports_geometric()) {
        (ReductionMode::Block, false) => {
            let mean = stats.block_mode_weighted_mean;
            let one_sigma = stats.block_mode_weighted_mean_one_sigma;
            if mean.is_nan() {
                return Summary::BadData;
            }
            let formatted = format_stats(mean, one_sigma, 0.0, sig_figs);
            let digits = count_of_trailing_digits_for_sig_fig(one_sigma, sig_figs);
            Summary::BlockMode(BlockModeSummary {
                mean: unpadded(&formatted.mean),
                one_sigma: Uncertainty::Absolute(unpadded(&formatted.unct)),
                reduced_chi_squared: chi_squared_string(stats.block_mode_chi_squared, digits),
                included_blocks: stats.count_of_included_blocks,
                total_blocks: stats.count_of_blocks(),
            })
        }
        (ReductionMode::Block, true) => {
            let log_mean = stats.block_mode_weighted_mean;
            let geo_mean = log_mean.exp();
            if geo_mean.is_nan() {
                return Summary::BadData;
            }
            let pct = block_mode_sigma_percents(log_mean, stats.block_mode_weighted_mean_one_sigma);
            let absolute = geo_mean * pct.lesser_pct / 100.0;
            Summary::BlockMode(BlockModeSummary {
                mean: unpadded(&format_stats(geo_mean, absolute, 0.0, sig_figs).mean),
                one_sigma: percent(pct.plus_pct, pct.minus_pct, pct.trailing_digits),
                reduced_chi_squared: chi_squared_string(
                    stats.block_mode_chi_squared,
                    pct.trailing_digits,
                ),
                included_blocks: stats.count_of_included_blocks,
                total_blocks: stats.count_of_blocks(),
            })
        }
        (ReductionMode::Cycle, false) => {
            let mean = stats.cycle_mode_mean;
            if mean.is_nan() {
                return Summary::BadData;
            }
            let formatted = format_stats(
                mean,
                stats.cycle_mode_standard_error,
                stats.cycle_mode_standard_deviation,
                sig_figs,
            );
            Summary::CycleMode(CycleModeSummary {
                mean: unpadded(&formatted.mean),
                std_err: Uncertainty::Absolute(unpadded(&formatted.unct)),
                std_dev: Uncertainty::Absolute(unpadded(&formatted.stdv)),
                included_cycles: stats.count_of_included_cycles,
                total_cycles: stats.count_of_total_cycles,
            })
        }
        (ReductionMode::Cycle, true) => {
            let geo = generate_geometric_mean_stats(
                stats.cycle_mode_mean,
                stats.cycle_mode_standard_deviation,
                stats.cycle_mode_standard_error,
            );
            if geo.geo_mean.is_nan() {
                return Summary::BadData;
            }
            let pct = cycle_mode_sigma_percents(&geo);
            let absolute = pct.geo_mean_plus_one_std_dev - geo.geo_mean;
            Summary::CycleMode(CycleModeSummary {
                mean: unpadded(&format_stats(geo.geo_mean, absolute, 0.0, sig_figs).mean),
                std_err: percent(pct.plus_err_pct, pct.minus_err_pct, pct.err_trailing_digits),
                std_dev: percent(
                    pct.plus_sigma_pct,
                    pct.minus_sigma_pct,
                    pct.sigma_trailing_digits,
                ),
                included_cycles: stats.count_of_included_cycles,
                total_cycles: stats.count_of_total_cycles,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockCyclesRecord;
    use crate::stats::{compute_analysis_stats, compute_block_stats};

    fn stats_of(blocks: &[(u32, &[f64])]) -> AnalysisStatsRecord {
        let records: Vec<_> = blocks
            .iter()
            .map(|&(id, values)| {
                let sigma = vec![0.0; values.len()];
                let b = BlockCyclesRecord::from_values(id, values.to_vec(), sigma).unwrap();
                compute_block_stats(&b, false)
            })
            .collect();
        compute_analysis_stats(&records)
    }

    #[test]
    fn test_additive_block_mode() {
        // means 1, 2, 3 with standard errors 0.5, 0.5, 1.0
        let stats = stats_of(&[(1, &[0.5, 1.5]), (2, &[1.5, 2.5]), (3, &[2.0, 4.0])]);
        let summary = summarize(&stats, &ReductionSettings::default());
        let Summary::BlockMode(s) = summary else {
            panic!("expected block mode summary");
        };
        // one sigma 1/3 -> 0.33 at two figures
        assert_eq!(s.mean, "1.67");
        assert_eq!(s.one_sigma, Uncertainty::Absolute("0.33".to_string()));
        assert_eq!(s.included_blocks, 3);
        assert_eq!(s.total_blocks, 3);
        // (16/9 + 4/9 + 16/9) / 2
        assert_eq!(s.reduced_chi_squared, "2.00");
    }

    #[test]
    fn test_additive_cycle_mode() {
        let stats = stats_of(&[(1, &[10.0, 10.5]), (2, &[9.5, 10.25])]);
        let settings = ReductionSettings {
            mode: ReductionMode::Cycle,
            ..Default::default()
        };
        let Summary::CycleMode(s) = summarize(&stats, &settings) else {
            panic!("expected cycle mode summary");
        };
        assert_eq!(s.included_cycles, 4);
        assert_eq!(s.total_cycles, 4);
        assert_eq!(s.mean, "10.06");
        assert!(matches!(s.std_err, Uncertainty::Absolute(_)));
    }

    #[test]
    fn test_fields_carry_no_alignment_padding() {
        // the mean has more integer digits than either uncertainty
        let stats = stats_of(&[(1, &[-123.45, -123.47, -123.44]), (2, &[-123.46, -123.43])]);
        for is_ratio in [false, true] {
            let settings = ReductionSettings {
                mode: ReductionMode::Cycle,
                is_ratio,
                log_scale: true,
                ..Default::default()
            };
            let Summary::CycleMode(s) = summarize(&stats, &settings) else {
                panic!("expected cycle mode summary");
            };
            assert!(s.mean.starts_with("-123.4"));
            for u in [&s.std_err, &s.std_dev] {
                let Uncertainty::Absolute(value) = u else {
                    panic!("expected absolute uncertainty");
                };
                assert_eq!(value.as_str(), value.trim_start());
                assert!(value.starts_with("0."));
            }
        }

        let Summary::BlockMode(s) = summarize(&stats, &ReductionSettings::default()) else {
            panic!("expected block mode summary");
        };
        assert!(s.mean.starts_with("-123.4"));
        assert!(matches!(&s.one_sigma, Uncertainty::Absolute(v) if v.starts_with("0.")));
    }

    #[test]
    fn test_bad_data() {
        let stats = stats_of(&[]);
        for mode in [ReductionMode::Block, ReductionMode::Cycle] {
            for is_ratio in [false, true] {
                let settings = ReductionSettings {
                    mode,
                    is_ratio,
                    ..Default::default()
                };
                let summary = summarize(&stats, &settings);
                assert!(summary.is_bad_data());
                assert_eq!(summary.to_string(), "Bad Data");
            }
        }
    }

    #[test]
    fn test_ratio_cycle_mode_percentages() {
        // log ratios around ln(0.5)
        let base = 0.5f64.ln();
        let values: Vec<f64> = [-0.02, 0.01, 0.0, 0.015, -0.005].iter().map(|d| base + d).collect();
        let stats = stats_of(&[(1, &values)]);
        let settings = ReductionSettings {
            mode: ReductionMode::Cycle,
            is_ratio: true,
            ..Default::default()
        };
        let Summary::CycleMode(s) = summarize(&stats, &settings) else {
            panic!("expected cycle mode summary");
        };
        assert!(matches!(s.std_err, Uncertainty::Percent { .. }));
        assert!(s.mean.starts_with("0.50"));

        let log_settings = ReductionSettings {
            log_scale: true,
            ..settings
        };
        let Summary::CycleMode(s) = summarize(&stats, &log_settings) else {
            panic!("expected cycle mode summary");
        };
        assert!(matches!(s.std_err, Uncertainty::Absolute(_)));
        assert!(s.mean.starts_with("-0.69"));
    }

    #[test]
    fn test_uncertainty_display() {
        let symmetric = percent(0.85, 0.85, 2);
        assert_eq!(symmetric.to_string(), "±0.85%");
        let skewed = percent(10.5, 9.5, 1);
        assert_eq!(skewed.to_string(), "+10.5% / -9.5%");
        assert_eq!(chi_squared_string(f64::INFINITY, 2), "Infinite");
        assert_eq!(chi_squared_string(0.5, 2), "0.50");
    }
}
