use clap::Parser;
use log::info;
use math_particle_swarm::{
    FnObserver, PSOConfig, ParticleSwarm, SwarmPlotter, SwarmSnapshot, TrajectoryRecorder,
    run_recorded::get_records_dir,
};
use math_test_functions::{
    FunctionMetadata, available_functions, function_by_name, get_function_metadata,
};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_pso",
    about = "Minimize a bounded 2-D benchmark function with a particle swarm"
)]
struct Cli {
    /// Benchmark function to minimize (use --list-functions to see available options)
    #[arg(long, default_value = "rastrigin")]
    function: String,

    /// Number of particles (overrides the config file)
    #[arg(long)]
    particles: Option<usize>,

    /// Number of sweeps over the swarm
    #[arg(long, default_value_t = 20)]
    iterations: usize,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Inertia weight (overrides the config file)
    #[arg(long)]
    inertia: Option<f64>,

    /// Cognitive coefficient (overrides the config file)
    #[arg(long)]
    cognitive: Option<f64>,

    /// Social coefficient (overrides the config file)
    #[arg(long)]
    social: Option<f64>,

    /// JSON swarm configuration to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render every iteration and write an animated contour plot
    #[arg(long)]
    plot: bool,

    /// Write every particle state to CSV
    #[arg(long)]
    record: bool,

    /// Where plots and records go (defaults to the user cache directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Plot grid resolution per axis
    #[arg(long, default_value_t = 100)]
    resolution: usize,

    /// Print progress every N iterations (0 = never)
    #[arg(long, default_value_t = 5)]
    progress_every: usize,

    /// Disable the parallel sweep
    #[arg(long)]
    no_parallel: bool,

    /// Number of threads for the parallel sweep (0 = use all available cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    if args.list_functions {
        list_available_functions();
        return;
    }

    let function = match function_by_name(&args.function) {
        Some(f) => f,
        None => {
            eprintln!(
                "Error: function '{}' not found. Use --list-functions to inspect available names.",
                args.function
            );
            process::exit(2);
        }
    };
    let function_name = function.name().to_string();
    let metadata_map = get_function_metadata();
    let metadata = metadata_map.get(&function_name);

    let config = build_config(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => get_records_dir().unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            process::exit(2);
        }),
    };

    let mut swarm = ParticleSwarm::over_domain(function, config);
    if let Err(e) = swarm.initialize() {
        eprintln!("Error: failed to initialize the swarm: {e}");
        process::exit(if e.is_config_error() { 2 } else { 1 });
    }

    let plotter = if args.plot {
        let plot_dir = output_dir.join(format!("{}_plots", function_name));
        match SwarmPlotter::new(
            swarm.cost_function(),
            swarm.bounds(),
            plot_dir,
            args.resolution,
            args.resolution,
        ) {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("Error: cannot plot {}: {}", function_name, e);
                process::exit(1);
            }
        }
    } else {
        None
    };
    let recorder = args
        .record
        .then(|| TrajectoryRecorder::new(format!("pso_{}", function_name), &output_dir));

    let progress_every = args.progress_every;
    let progress = FnObserver(move |s: &SwarmSnapshot<'_>| {
        if progress_every > 0 && s.iteration % progress_every == 0 {
            println!(
                "iter {:>5} | best = {:>12.6e} | x = [{:.6}, {:.6}]",
                s.iteration, s.global_best_value, s.global_best_position[0], s.global_best_position[1]
            );
        }
    });

    println!(
        "Running PSO on '{}' with {} particles for {} iterations...",
        function_name,
        swarm.config().n_particles,
        args.iterations
    );

    let start = Instant::now();
    let mut observer = (plotter, (recorder, progress));
    let result = match swarm.search_observed(args.iterations, &mut observer) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: optimization failed: {}", e);
            process::exit(1);
        }
    };
    info!("search finished in {:.2?}", start.elapsed());

    println!("\nOptimization completed in {:.2?}", start.elapsed());
    println!(
        "Iterations: {} | Evaluations: {}",
        result.iterations, result.evaluations
    );
    match metadata.and_then(|m| m.global_minima.first()) {
        Some(&(position, value)) => {
            println!(
                "True optimum:       {:.6e} at [{:.6}, {:.6}]",
                value, position[0], position[1]
            );
            println!(
                "Discovered optimum: {:.6e} at [{:.6}, {:.6}]",
                result.value, result.position[0], result.position[1]
            );
            println!("Difference:         {:.6e}", result.value - value);
        }
        None => println!(
            "Discovered optimum: {:.6e} at [{:.6}, {:.6}]",
            result.value, result.position[0], result.position[1]
        ),
    }

    let (plotter, (recorder, _)) = &mut observer;
    let mut failed = false;
    if let Some(plotter) = plotter {
        match plotter.finalize() {
            Ok(_) => println!("Plots written to {}", plotter.output_dir().display()),
            Err(e) => {
                eprintln!("Error: failed to write plots: {}", e);
                failed = true;
            }
        }
    }
    if let Some(recorder) = recorder {
        match recorder.finalize() {
            Ok(files) => {
                for file in files {
                    println!("Trajectory written to {}", file.display());
                }
            }
            Err(e) => {
                eprintln!("Error: failed to write trajectory: {}", e);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

/// Defaults, then the config file, then command-line overrides
fn build_config(args: &Cli) -> Result<PSOConfig, String> {
    let mut config = match &args.config {
        Some(path) => PSOConfig::from_file(path)?,
        None => PSOConfig::default(),
    };

    if let Some(n) = args.particles {
        config.n_particles = n;
    }
    if let Some(w) = args.inertia {
        config.inertia = w;
    }
    if let Some(c) = args.cognitive {
        config.cognitive = c;
    }
    if let Some(c) = args.social {
        config.social = c;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_parallel {
        config.parallel.enabled = false;
    }
    if args.threads > 0 {
        config.parallel.num_threads = Some(args.threads);
    }
    if args.plot && args.resolution < 2 {
        return Err(format!(
            "--resolution must be at least 2; got {}",
            args.resolution
        ));
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn list_available_functions() {
    let metadata = get_function_metadata();
    let names = available_functions();
    println!("Available test functions ({}):", names.len());
    for name in names {
        match metadata.get(&name) {
            Some(meta) => print_metadata_line(meta),
            None => println!("- {name}"),
        }
    }
}

fn print_metadata_line(meta: &FunctionMetadata) {
    println!(
        "- {:<12} {}  ({}{})",
        meta.name,
        meta.domain,
        meta.description,
        if meta.multimodal { ", multimodal" } else { "" }
    );
}
