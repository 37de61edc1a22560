//! 派发仿真命令行
//!
//! 以软件/硬件派发档位运行行为模型，写出 JSON 结果（默认两种档位成对输出）。

use clap::{Parser, ValueEnum};
use dispatch_sim::{
    ArrivalModel, ConfigOverlay, DispatchMode, SimConfig, SimError, run_pair, run_sim,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Sw,
    Hw,
    Both,
}

#[derive(Debug, Parser)]
#[command(
    name = "dispatch-sim",
    about = "Leader/follower dispatch model: software vs hardware dispatch cost"
)]
struct Args {
    /// JSON overlay with any subset of the tunables (unknown keys are ignored)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which dispatch profile to run
    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,

    /// Output JSON file
    #[arg(long, default_value = "model/sim_results.json")]
    out: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of tasks to generate
    #[arg(long)]
    tasks: Option<u64>,

    #[arg(long)]
    leaders: Option<usize>,

    #[arg(long)]
    followers: Option<usize>,

    /// Max tasks a leader moves per dispatch
    #[arg(long)]
    batch: Option<usize>,

    /// Bound the execution queue (unbounded by default)
    #[arg(long)]
    exec_queue_capacity: Option<usize>,

    /// poisson or deterministic
    #[arg(long)]
    arrival_model: Option<ArrivalModel>,

    /// Arrival rate in tasks/ns
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Disable logging
    #[arg(long)]
    quiet: bool,
}

fn load_overlay(path: &Path) -> Result<ConfigOverlay, SimError> {
    let raw = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(ConfigOverlay::from_json(&value)?)
}

fn build_config(args: &Args) -> Result<SimConfig, SimError> {
    let mut cfg = SimConfig::default();
    if let Some(path) = &args.config {
        cfg = cfg.apply(&load_overlay(path)?);
    }
    let cli = ConfigOverlay {
        task_count: args.tasks,
        follower_count: args.followers,
        leader_count: args.leaders,
        arrival_rate: args.arrival_rate,
        arrival_model: args.arrival_model,
        exec_queue_capacity: args.exec_queue_capacity.map(Some),
        batch_size: args.batch,
        seed: args.seed,
        ..ConfigOverlay::default()
    };
    let cfg = cfg.apply(&cli);
    cfg.validate()?;
    Ok(cfg)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), SimError> {
    let io_err = |source: std::io::Error| SimError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(io_err)
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("off")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let cfg = build_config(args)?;

    match args.mode {
        ModeArg::Both => {
            let pair = run_pair(&cfg)?;
            println!("{}", pair.software.summary_line());
            println!("{}", pair.hardware.summary_line());
            write_json(&args.out, &pair)?;
        }
        ModeArg::Sw | ModeArg::Hw => {
            let mode = if args.mode == ModeArg::Sw {
                DispatchMode::Software
            } else {
                DispatchMode::Hardware
            };
            let result = run_sim(mode, &cfg)?;
            println!("{}", result.summary_line());
            write_json(&args.out, &result)?;
        }
    }
    println!("saved results to {}", args.out.display());
    Ok(())
}
