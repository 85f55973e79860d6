use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use projectile_engine::config::resolve_samples;
use projectile_engine::report::{write_point, write_trajectory};
use projectile_engine::{
    position_at, render_trajectory, sample_trajectory, OutputFormat, Prompter, RenderOptions,
    RunInputs, ScenarioConfig, DEFAULT_IMAGE_PATH,
};

#[derive(Parser)]
#[command(name = "projectile-cli")]
#[command(version)]
#[command(about = "3D projectile trajectory calculator (closed-form, constant gravity)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of time samples used to draw the curve
    #[arg(short = 'n', long, global = true, value_parser = clap::value_parser!(u64).range(2..))]
    samples: Option<u64>,

    /// Image written when no interactive display is available
    #[arg(long, global = true, default_value = DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// Write the image directly, without trying an interactive display
    #[arg(long, global = true)]
    no_display: bool,

    /// Skip plotting entirely
    #[arg(long, global = true)]
    no_plot: bool,

    /// Also print the sampled trajectory
    #[arg(short = 'o', long, global = true, default_value = "none")]
    output: ExportFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for the initial conditions on the console (default)
    Interactive,

    /// Read the initial conditions from a YAML scenario file
    Scenario {
        /// Path to the scenario file
        file: PathBuf,
    },

    /// Display program information
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum ExportFormat {
    None,
    Table,
    Json,
    Csv,
}

impl ExportFormat {
    fn as_output(self) -> Option<OutputFormat> {
        match self {
            ExportFormat::None => None,
            ExportFormat::Table => Some(OutputFormat::Table),
            ExportFormat::Json => Some(OutputFormat::Json),
            ExportFormat::Csv => Some(OutputFormat::Csv),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for the user-facing dialogue
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_info() {
    println!("╔════════════════════════════════════════╗");
    println!("║      PROJECTILE ENGINE v{:<14} ║", env!("CARGO_PKG_VERSION"));
    println!("╠════════════════════════════════════════╣");
    println!("║ Closed-form 3D projectile motion       ║");
    println!("║ under constant gravity (g = 9.8 m/s²). ║");
    println!("╠════════════════════════════════════════╣");
    println!("║ Features:                              ║");
    println!("║ • Position at any instant              ║");
    println!("║ • Evenly sampled trajectory curve      ║");
    println!("║ • 3D plot with PNG fallback            ║");
    println!("║ • Table, JSON and CSV exports          ║");
    println!("╚════════════════════════════════════════╝");
}

fn collect_inputs(command: &Commands) -> anyhow::Result<(RunInputs, Option<usize>)> {
    match command {
        Commands::Scenario { file } => {
            let scenario = ScenarioConfig::from_path(file)?;
            let samples = scenario.samples;
            Ok((scenario.into_inputs()?, samples))
        }
        _ => {
            println!("Bienvenido/a al programa para calcular la trayectoria de un tiro parabólico en 3D\n");
            println!("Por favor ingrese los datos iniciales:\n");

            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            Ok((prompter.collect()?, None))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Interactive);
    if let Commands::Info = command {
        print_info();
        return Ok(());
    }

    let (inputs, scenario_samples) = collect_inputs(&command)?;
    let RunInputs { t_final, state } = inputs;
    let samples = resolve_samples(cli.samples.map(|n| n as usize), scenario_samples);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "\nCalculando la posición en el instante t (s)...\n")?;
    let point = position_at(&state, t_final);
    write_point(&mut out, t_final, &point).context("failed to write result")?;

    writeln!(out, "\nGenerando la trayectoria completa desde t = 0 hasta t = {}", t_final)?;
    let trajectory = sample_trajectory(&state, t_final, samples)?;

    if let Some(format) = cli.output.as_output() {
        write_trajectory(&mut out, &trajectory, &state, format)
            .context("failed to write trajectory")?;
    }

    if !cli.no_plot {
        writeln!(out, "\nMostrando la trayectoria...")?;
        out.flush()?;

        let options = RenderOptions {
            image_path: cli.image,
            force_image: cli.no_display,
            ..Default::default()
        };
        let outcome = render_trajectory(&trajectory, &options)?;
        if let Some(notice) = outcome.notice() {
            writeln!(out, "{}", notice)?;
        }
    }

    writeln!(out, "\nPrograma finalizado correctamente.")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // One diagnostic line, nothing else
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
