// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use vibrocheck::cli::output;
use vibrocheck::config::AnalysisConfig;
use vibrocheck::core::{load_waveform, AnalysisReport, SignalFormat, VibrationAnalyzer};

#[derive(Parser, Debug)]
#[command(name = "vibrocheck")]
#[command(about = "Analyze machine vibration recordings for faults and damage severity")]
struct Args {
    /// Input file or directory
    #[arg(short, long)]
    input: PathBuf,

    /// Sampling rate in Hz for containers that do not carry one
    #[arg(short, long, default_value = "12000")]
    sample_rate: f64,

    /// Fault score at or above which a signal is flagged faulty
    #[arg(long, default_value = "0.5")]
    fault_threshold: f64,

    /// Bandpass low cutoff in Hz
    #[arg(long, default_value = "10")]
    low_cutoff: f64,

    /// Bandpass high cutoff in Hz
    #[arg(long, default_value = "5000")]
    high_cutoff: f64,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output with full feature values
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = AnalysisConfig::builder()
        .sample_rate_hz(args.sample_rate)
        .bandpass(args.low_cutoff, args.high_cutoff)
        .fault_threshold(args.fault_threshold)
        .build()
        .context("invalid analysis configuration")?;
    let analyzer = VibrationAnalyzer::new(config)?;

    let data_files = collect_signal_files(&args.input)?;

    if data_files.is_empty() {
        println!("{}", "No vibration data files found!".red());
        return Ok(());
    }

    println!("Found {} data file(s)\n", data_files.len());

    if data_files.len() == 1 {
        let report = analyze_file(&data_files[0], &analyzer, args.sample_rate)?;
        print_report(&data_files[0], &report, &args)?;
        return Ok(());
    }

    // Batch mode: analyze in parallel, then print in input order
    let results: Vec<(PathBuf, Result<AnalysisReport>)> = data_files
        .par_iter()
        .progress_count(data_files.len() as u64)
        .map(|path| {
            let result = analyze_file(path, &analyzer, args.sample_rate);
            (path.clone(), result)
        })
        .collect();

    let mut reports = Vec::new();
    for (path, result) in results {
        match result {
            Ok(report) => {
                print_report(&path, &report, &args)?;
                reports.push(report);
            }
            Err(e) => {
                eprintln!("{} {}: {e:#}", "✗".red(), path.display());
            }
        }
    }

    if !args.json {
        println!("{}", output::format_summary(&reports));
    }

    Ok(())
}

fn collect_signal_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if SignalFormat::from_path(path).is_some() {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && SignalFormat::from_path(entry_path).is_some() {
                files.push(entry_path.to_path_buf());
            }
        }
        files.sort();
    }

    Ok(files)
}

fn analyze_file(
    path: &Path,
    analyzer: &VibrationAnalyzer,
    default_rate: f64,
) -> Result<AnalysisReport> {
    let waveform = load_waveform(path, default_rate)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let report = analyzer
        .analyze_waveform(&waveform)
        .with_context(|| format!("failed to analyze {}", path.display()))?;
    Ok(report)
}

fn print_report(path: &Path, report: &AnalysisReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", output::format_json(report)?);
    } else {
        println!(
            "{}",
            output::format_report(&path.display().to_string(), report, args.verbose)
        );
    }
    Ok(())
}
