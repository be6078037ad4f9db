use clap::{Parser, ValueEnum};
use deopt_de::{
    BoundedProblem, BoundsRepair, DEConfigBuilder, MultiRunConfig, Mutation, optimize,
    run_independent,
};
use deopt_testfunctions::{find_function, get_function_metadata};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "run_de", about = "Run differential evolution on a benchmark function")]
struct Cli {
    /// Name of the benchmark function (use --list-functions to see them)
    #[arg(long, default_value = "rastrigin")]
    function: String,

    /// Dimensionality of the problem
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// Variant as <best|rand>/<1|2>/<bin|exp>
    #[arg(long, default_value = "best/1/bin")]
    variant: String,

    /// Fixed differential weight in (0, 2)
    #[arg(long, default_value_t = 0.8, conflicts_with = "dither")]
    weight: f64,

    /// Dithering range for the differential weight, e.g. --dither 0.5 1.0
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    dither: Option<Vec<f64>>,

    /// Crossover rate in [0, 1]
    #[arg(long, default_value_t = 0.9)]
    cr: f64,

    /// Population size
    #[arg(long, default_value_t = 20)]
    popsize: usize,

    /// Maximum number of generations
    #[arg(long, default_value_t = 1000)]
    maxiter: usize,

    /// Maximum number of objective evaluations
    #[arg(long)]
    max_nfev: Option<usize>,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Bounds repair policy
    #[arg(long, value_enum, default_value_t = RepairChoice::Clip)]
    repair: RepairChoice,

    /// Log statistics of every generation
    #[arg(long)]
    verbose: bool,

    /// Print the logbook of every run as CSV on stdout
    #[arg(long)]
    csv: bool,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RepairChoice {
    Clip,
    Reflect,
}

impl From<RepairChoice> for BoundsRepair {
    fn from(choice: RepairChoice) -> Self {
        match choice {
            RepairChoice::Clip => BoundsRepair::Clip,
            RepairChoice::Reflect => BoundsRepair::Reflect,
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.list_functions {
        for meta in get_function_metadata() {
            let kind = if meta.multimodal { "multimodal" } else { "unimodal" };
            println!("{:<12} [{}, {}] {}", meta.name, meta.bounds.0, meta.bounds.1, kind);
        }
        return Ok(());
    }

    let meta = find_function(&cli.function)
        .ok_or_else(|| format!("unknown function '{}', see --list-functions", cli.function))?;
    let bounds = vec![meta.bounds; cli.dim];
    let problem = BoundedProblem::new(meta.function, &bounds)?.with_repair(cli.repair.into());

    let mutation = match cli.dither.as_deref() {
        Some([a, b]) => Mutation::range(*a, *b),
        _ => Mutation::Factor(cli.weight),
    };
    let mut builder = DEConfigBuilder::new()
        .variant_str(&cli.variant)?
        .mutation(mutation)
        .recombination(cli.cr)
        .popsize(cli.popsize)
        .maxiter(cli.maxiter)
        .disp(cli.verbose);
    if let Some(n) = cli.max_nfev {
        builder = builder.max_nfev(n);
    }
    if let Some(s) = cli.seed {
        builder = builder.seed(s);
    }
    let config = builder.build();

    let reports = if cli.runs > 1 {
        run_independent(&problem, &config, &MultiRunConfig { runs: cli.runs, num_threads: None })?
    } else {
        vec![optimize(&problem, config)?]
    };

    for report in &reports {
        println!(
            "run {:>3}: f = {:.6e}, nfev = {}, gen = {}, x = {}",
            report.n_run, report.fun, report.nfev, report.nit, report.x
        );
        if cli.csv {
            report.logbook.write_csv(std::io::stdout())?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
