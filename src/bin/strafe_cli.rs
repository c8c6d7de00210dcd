use clap::{Args, Parser, Subcommand, ValueEnum};
use nalgebra::Vector2;
use serde::Serialize;
use std::error::Error;
use strafe_engine::constants::{ACCELERATE, FRAME_DURATION, MAX_SPEED};
use strafe_engine::{
    distance_after, solve_initial_horizontal_speed, solve_minimal_boost, speed_after, time_for,
    times_to_height, DomainError, Sign, Solution, StrafeParameters,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "strafe-cli")]
#[command(version)]
#[command(about = "Strafing kinematics and jump planning calculator", long_about = None)]
struct Cli {
    /// Log solver internals to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the acceleration constant K
    K {
        #[command(flatten)]
        params: ParamArgs,

        /// Ground strafing (turn cap equals max speed)
        #[arg(long)]
        ground: bool,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Speed after strafing for some time
    Speed {
        /// Strafing time (s)
        #[arg(short = 't', long, allow_negative_numbers = true)]
        time: f64,

        /// Initial speed (u/s)
        #[arg(short = 's', long, default_value = "0.0")]
        speed: f64,

        #[command(flatten)]
        strafe: StrafeArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Distance covered after strafing for some time
    Distance {
        /// Strafing time (s)
        #[arg(short = 't', long, allow_negative_numbers = true)]
        time: f64,

        /// Initial speed (u/s)
        #[arg(short = 's', long, default_value = "0.0")]
        speed: f64,

        #[command(flatten)]
        strafe: StrafeArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Time needed to strafe a distance
    Time {
        /// Horizontal distance (u)
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        distance: f64,

        /// Initial speed (u/s)
        #[arg(short = 's', long, default_value = "0.0")]
        speed: f64,

        #[command(flatten)]
        strafe: StrafeArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Times at which a jump passes a given height
    Heights {
        /// Initial vertical speed (u/s)
        #[arg(long, allow_negative_numbers = true)]
        speed_z: f64,

        /// Target height relative to the start (u)
        #[arg(short = 'z', long, allow_negative_numbers = true)]
        height: f64,

        /// Gravity (u/s^2)
        #[arg(short = 'g', long, default_value = "800.0")]
        gravity: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Initial horizontal speed that lands on a target
    SolveSpeed {
        /// Initial vertical speed (u/s)
        #[arg(long, default_value = "268.3281572999748", allow_negative_numbers = true)]
        speed_z: f64,

        /// Horizontal distance to the target (u)
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        distance: f64,

        /// Target height relative to the start (u)
        #[arg(short = 'z', long, allow_negative_numbers = true)]
        height: f64,

        /// Gravity (u/s^2)
        #[arg(short = 'g', long, default_value = "800.0")]
        gravity: f64,

        #[command(flatten)]
        strafe: StrafeArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Smallest velocity boost that lands on a target
    Boost {
        /// Initial horizontal speed (u/s)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        vx: f64,

        /// Initial vertical speed (u/s)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        vz: f64,

        /// Horizontal distance to the target (u)
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        distance: f64,

        /// Target height relative to the start (u)
        #[arg(short = 'z', long, allow_negative_numbers = true)]
        height: f64,

        /// Gravity (u/s^2)
        #[arg(short = 'g', long, default_value = "800.0")]
        gravity: f64,

        #[command(flatten)]
        strafe: StrafeArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model information
    Info,
}

#[derive(Args, Debug, Clone, Copy)]
struct ParamArgs {
    /// Wish speed cap L (u/s)
    #[arg(long, default_value = "30.0")]
    turn_cap: f64,

    /// Frame duration tau (s)
    #[arg(long, default_value = "0.001")]
    frame_duration: f64,

    /// Maximum speed M (u/s)
    #[arg(long, default_value = "320.0")]
    max_speed: f64,

    /// Acceleration A
    #[arg(long, default_value = "10.0")]
    accel: f64,
}

impl ParamArgs {
    fn parameters(&self, ground: bool) -> StrafeParameters {
        if ground {
            StrafeParameters::ground(self.frame_duration, self.max_speed, self.accel)
        } else {
            StrafeParameters::new(self.turn_cap, self.frame_duration, self.max_speed, self.accel)
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct StrafeArgs {
    /// Acceleration constant K; computed from the strafing parameters if omitted
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    k: Option<f64>,

    #[command(flatten)]
    params: ParamArgs,
}

impl StrafeArgs {
    fn resolve_k(&self) -> Result<f64, DomainError> {
        match self.k {
            Some(k) => Ok(k),
            None => self.params.parameters(false).k(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum FieldValue {
    Number(f64),
    Text(String),
}

#[derive(Debug)]
struct Field {
    name: &'static str,
    label: &'static str,
    value: FieldValue,
    unit: &'static str,
}

impl Field {
    fn number(name: &'static str, label: &'static str, value: f64, unit: &'static str) -> Self {
        Self { name, label, value: FieldValue::Number(value), unit }
    }

    fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self { name, label, value: FieldValue::Text(value.into()), unit: "" }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::K { params, ground, output } => {
            let params = params.parameters(ground);
            let k = params.k()?;
            debug!(?params, k, "computed K");
            display(
                "ACCELERATION CONSTANT",
                &[
                    Field::number("turn_cap", "Turn Cap L:", params.turn_cap, "u/s"),
                    Field::number("frame_duration", "Frame Time:", params.frame_duration, "s"),
                    Field::number("max_speed", "Max Speed M:", params.max_speed, "u/s"),
                    Field::number("accel", "Accelerate A:", params.accel, ""),
                    Field::number("k", "K:", k, "u2/s3"),
                ],
                output,
            )?;
        }

        Commands::Speed { time, speed, strafe, output } => {
            let k = strafe.resolve_k()?;
            let final_speed = speed_after(time, speed, k)?;
            display(
                "STRAFE SPEED",
                &[
                    Field::number("k", "K:", k, "u2/s3"),
                    Field::number("time", "Time:", time, "s"),
                    Field::number("initial_speed", "Initial Speed:", speed, "u/s"),
                    Field::number("speed", "Final Speed:", final_speed, "u/s"),
                ],
                output,
            )?;
        }

        Commands::Distance { time, speed, strafe, output } => {
            let k = strafe.resolve_k()?;
            let distance = distance_after(time, speed, k)?;
            display(
                "STRAFE DISTANCE",
                &[
                    Field::number("k", "K:", k, "u2/s3"),
                    Field::number("time", "Time:", time, "s"),
                    Field::number("initial_speed", "Initial Speed:", speed, "u/s"),
                    Field::number("distance", "Distance:", distance, "u"),
                ],
                output,
            )?;
        }

        Commands::Time { distance, speed, strafe, output } => {
            let k = strafe.resolve_k()?;
            let time = time_for(distance, speed, k)?;
            display(
                "STRAFE TIME",
                &[
                    Field::number("k", "K:", k, "u2/s3"),
                    Field::number("distance", "Distance:", distance, "u"),
                    Field::number("initial_speed", "Initial Speed:", speed, "u/s"),
                    Field::number("time", "Time:", time, "s"),
                ],
                output,
            )?;
        }

        Commands::Heights { speed_z, height, gravity, output } => {
            let (t1, t2) = times_to_height(speed_z, height, gravity)?;
            display(
                "TIMES TO HEIGHT",
                &[
                    Field::number("speed_z", "Vertical Speed:", speed_z, "u/s"),
                    Field::number("height", "Height:", height, "u"),
                    Field::number("t1", "First Pass:", t1, "s"),
                    Field::number("t2", "Second Pass:", t2, "s"),
                ],
                output,
            )?;
        }

        Commands::SolveSpeed { speed_z, distance, height, gravity, strafe, output } => {
            let k = strafe.resolve_k()?;
            let solution = solve_initial_horizontal_speed(speed_z, k, distance, height, gravity)?;
            display(
                "INITIAL HORIZONTAL SPEED",
                &[
                    Field::number("k", "K:", k, "u2/s3"),
                    Field::number("distance", "Distance:", distance, "u"),
                    Field::number("height", "Height:", height, "u"),
                    Field::text("solution", "Solution:", describe(solution)),
                    Field::number("speed", "Speed:", solution.to_f64(), "u/s"),
                ],
                output,
            )?;
        }

        Commands::Boost { vx, vz, distance, height, gravity, strafe, output } => {
            let k = strafe.resolve_k()?;
            let boost = solve_minimal_boost(Vector2::new(vx, vz), k, distance, height, gravity)?;
            display(
                "MINIMAL BOOST",
                &[
                    Field::number("k", "K:", k, "u2/s3"),
                    Field::number("distance", "Distance:", distance, "u"),
                    Field::number("height", "Height:", height, "u"),
                    Field::number("dx", "Horizontal Boost:", boost.horizontal, "u/s"),
                    Field::number("dy", "Vertical Boost:", boost.vertical, "u/s"),
                    Field::number("magnitude", "Magnitude:", boost.magnitude(), "u/s"),
                ],
                output,
            )?;
        }

        Commands::Info => {
            let k = StrafeParameters::default().k()?;
            let ground_k = StrafeParameters::ground(FRAME_DURATION, MAX_SPEED, ACCELERATE).k()?;
            println!("╔════════════════════════════════════════╗");
            println!("║ {:^38} ║", format!("STRAFE ENGINE v{}", env!("CARGO_PKG_VERSION")));
            println!("╠════════════════════════════════════════╣");
            println!("║ Optimal strafing kinematics:           ║");
            println!("║   v(t)^2 = v0^2 + K t                  ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Default air K:     {:>12.1}        ║", k);
            println!("║ Default ground K:  {:>12.1}        ║", ground_k);
            println!("║ Features:                              ║");
            println!("║ • Speed, distance and time relations   ║");
            println!("║ • Jump target speed solver             ║");
            println!("║ • Minimal boost solver                 ║");
            println!("║ • Multiple output formats              ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(solution: Solution) -> &'static str {
    match solution {
        Solution::Exact(_) => "exact",
        Solution::Unbounded(Sign::Positive) => "unbounded (+)",
        Solution::Unbounded(Sign::Negative) => "unbounded (-)",
        Solution::NoSolution => "none",
    }
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(v) => format!("{:.4}", v),
        FieldValue::Text(s) => s.clone(),
    }
}

fn display(title: &str, fields: &[Field], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|f| serde_json::to_value(&f.value).map(|v| (f.name.to_string(), v)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }

        OutputFormat::Csv => {
            let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
            println!("{}", names.join(","));
            let values: Vec<String> = fields
                .iter()
                .map(|f| match &f.value {
                    FieldValue::Number(v) => v.to_string(),
                    FieldValue::Text(s) => s.clone(),
                })
                .collect();
            println!("{}", values.join(","));
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║ {:^38} ║", title);
            println!("╠════════════════════════════════════════╣");
            for f in fields {
                println!("║ {:<18}{:>14} {:<5} ║", f.label, format_value(&f.value), f.unit);
            }
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
