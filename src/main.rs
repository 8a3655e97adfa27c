use pairgrav::{bench_kernels, Parameters, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Drive a pairwise gravity kernel over a scenario snapshot")]
struct Args {
    /// Scenario YAML file
    #[arg(short, long, default_value = "scenarios/two_body.yaml")]
    file: PathBuf,

    /// Number of kernel evaluations to time
    #[arg(short, long, default_value_t = 10)]
    steps: usize,

    /// Run the size sweep instead of a scenario
    #[arg(long)]
    sweep: bool,

    /// Worker count for the sweep's parallel kernel
    #[arg(short, long, default_value_t = 4)]
    threads: usize,
}

// load here to keep main clean
fn load_scenario_from_yaml(path: &PathBuf) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(scenario_cfg)
}

fn run_scenario(args: &Args) -> Result<()> {
    let cfg = load_scenario_from_yaml(&args.file)?;
    let mut scenario = Scenario::build_scenario(cfg)?;
    info!(
        bodies = scenario.masses.len(),
        dims = scenario.parameters.dims,
        kernel = ?scenario.engine.kernel,
        "scenario loaded"
    );

    let t0 = Instant::now();
    for _ in 0..args.steps {
        scenario.evaluate()?;
    }
    let per_step = t0.elapsed().as_secs_f64() / args.steps.max(1) as f64;

    let accels = scenario.evaluate()?;
    if accels.iter().any(|a| a.iter().any(|c| !c.is_finite())) {
        warn!("non-finite accelerations, bodies may coincide");
    }
    for (i, a) in accels.iter().enumerate() {
        info!(body = i, accel = ?a.as_slice(), "acceleration");
    }
    info!(steps = args.steps, secs_per_step = per_step, "done");

    Ok(())
}

fn run_sweep(args: &Args) -> Result<()> {
    let params = Parameters {
        G: 0.1,
        scaled: true,
        threads: args.threads,
        ..Parameters::default()
    };
    let ns = [200, 400, 800, 1600, 3200];

    println!("N,kernel,secs_per_step");
    for r in bench_kernels(&ns, args.steps, &params)? {
        println!("{},{},{:.6}", r.n, r.kernel, r.secs_per_step);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if args.sweep {
        run_sweep(&args)
    } else {
        run_scenario(&args)
    }
}
