use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use brc_stats::evaluate::{self, DEFAULT_TOLERANCE};
use brc_stats::sample::{self, SampleSpec};
use brc_stats::{config, AggregateConfig, InputMode};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("generate") => generate(&args[1..]),
        Some("evaluate") => evaluate(&args[1..]),
        Some("aggregate") => aggregate(&args[1..]),
        _ => aggregate(&args),
    }
}

fn aggregate(args: &[String]) -> anyhow::Result<ExitCode> {
    let mut input_mode = InputMode::Buffered;
    let mut paths = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--mmap" => input_mode = InputMode::Mapped,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => paths.push(path),
        }
    }
    let config = AggregateConfig::new(
        paths.first().copied().unwrap_or(config::DEFAULT_INPUT),
        paths.get(1).copied().unwrap_or(config::DEFAULT_OUTPUT),
    )
    .with_input_mode(input_mode);

    log::info!(
        "aggregating {} into {} ({:?})",
        config.input.display(),
        config.output.display(),
        config.input_mode
    );
    let (keys, elapsed) = timeit(|| brc_stats::run(&config));
    let keys = keys.context("aggregation failed")?;
    log::info!("wrote {keys} keys in {elapsed:?}");
    Ok(ExitCode::SUCCESS)
}

fn generate(args: &[String]) -> anyhow::Result<ExitCode> {
    let sample_path = path_arg(args, 0, sample::DEFAULT_SAMPLE);
    let truth_path = path_arg(args, 1, sample::DEFAULT_TRUTH);
    let mut spec = SampleSpec::default();
    if let Some(per_city) = args.get(2) {
        let per_city = per_city
            .parse()
            .with_context(|| format!("invalid per-city count {per_city}"))?;
        spec = spec.with_per_city(per_city);
    }

    log::info!(
        "generating {} cities x {} values into {}",
        spec.cities.len(),
        spec.per_city,
        sample_path.display()
    );
    let (result, elapsed) = timeit(|| sample::generate_files(&spec, &sample_path, &truth_path));
    result.context("sample generation failed")?;
    log::info!("wrote {} and {} in {elapsed:?}", sample_path.display(), truth_path.display());
    Ok(ExitCode::SUCCESS)
}

fn evaluate(args: &[String]) -> anyhow::Result<ExitCode> {
    let truth_path = path_arg(args, 0, sample::DEFAULT_TRUTH);
    let calculated_path = path_arg(args, 1, config::DEFAULT_OUTPUT);
    let truth = evaluate::read_results_file(&truth_path)?;
    let calculated = evaluate::read_results_file(&calculated_path)?;

    let mismatches = evaluate::compare(&truth, &calculated, DEFAULT_TOLERANCE);
    for m in &mismatches {
        if m.missing {
            println!("Failed:: city: {}; missing", m.key);
        } else {
            println!(
                "Failed:: city: {}; mean: {}; min: {}; max: {}",
                m.key, m.mean_ok, m.min_ok, m.max_ok
            );
        }
    }
    if mismatches.is_empty() {
        println!("Success");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Fail");
        Ok(ExitCode::FAILURE)
    }
}

fn path_arg(args: &[String], idx: usize, default: &str) -> PathBuf {
    Path::new(args.get(idx).map(String::as_str).unwrap_or(default)).to_path_buf()
}

fn timeit<T, F: FnOnce() -> T>(f: F) -> (T, std::time::Duration) {
    let start = std::time::Instant::now();
    let result = f();
    (result, start.elapsed())
}
