//! Output formatting for CLI results

use crate::core::{AnalysisReport, DamageLevel};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Format an analysis report for terminal output
pub fn format_report(name: &str, report: &AnalysisReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{} {}{}{}\n",
        report.damage_level.color_code(),
        report.damage_level.symbol(),
        BOLD,
        name,
        RESET,
    ));
    output.push_str(&format!(
        "  {}{}{} (fault score: {:.0}%{})\n",
        report.damage_level.color_code(),
        report.damage_level.label(),
        RESET,
        report.fault_score * 100.0,
        if report.is_faulty { ", faulty" } else { "" },
    ));
    output.push_str(&format!(
        "  {:.2}s at {} Hz ({} samples)\n",
        report.duration_secs, report.sample_rate_hz, report.sample_count
    ));

    if !report.fault_types.is_empty() {
        output.push_str("\n  Detected faults:\n");
        for fault in &report.fault_types {
            output.push_str(&format!(
                "    • {} {}({:.0}%){}\n",
                fault.description,
                DIM,
                fault.confidence * 100.0,
                RESET
            ));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\n  Recommendations:\n");
        for recommendation in &report.recommendations {
            output.push_str(&format!("    → {recommendation}\n"));
        }
    }

    if verbose {
        let time = &report.time_features;
        let freq = &report.freq_features;
        output.push_str("\n  Features:\n");
        output.push_str(&format!(
            "    RMS: {:.4} | Peak: {:.4} | Peak-to-peak: {:.4}\n",
            time.rms, time.peak, time.peak_to_peak
        ));
        let crest = time
            .crest_factor
            .map_or("undefined".to_string(), |c| format!("{c:.3}"));
        output.push_str(&format!(
            "    Crest factor: {} | Kurtosis: {:.3} | Skewness: {:.3}\n",
            crest, time.kurtosis, time.skewness
        ));
        output.push_str(&format!(
            "    Peak frequency: {:.1} Hz | Spectral power: {:.3e}\n",
            freq.peak_frequency, freq.spectral_power
        ));
        output.push_str(&format!(
            "    Band power low/mid/high: {:.3e} / {:.3e} / {:.3e}\n",
            freq.frequency_bands.low, freq.frequency_bands.mid, freq.frequency_bands.high
        ));
    }

    output
}

/// Format an analysis report as pretty-printed JSON
pub fn format_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Format a summary footer for a batch run
pub fn format_summary(reports: &[AnalysisReport]) -> String {
    let mut output = String::new();

    let count_of = |level: DamageLevel| reports.iter().filter(|r| r.damage_level == level).count();
    let faulty = reports.iter().filter(|r| r.is_faulty).count();

    output.push_str(&format!("\n{}Summary:{}\n", BOLD, RESET));
    output.push_str(&format!(
        "  {} signal(s) analyzed, {} flagged faulty\n",
        reports.len(),
        faulty
    ));

    for level in [
        DamageLevel::Healthy,
        DamageLevel::Slight,
        DamageLevel::Moderate,
        DamageLevel::Severe,
        DamageLevel::Critical,
    ] {
        let count = count_of(level);
        if count > 0 {
            output.push_str(&format!(
                "  {}{} {} {}{}\n",
                level.color_code(),
                level.symbol(),
                count,
                level.label(),
                RESET
            ));
        }
    }

    output
}
