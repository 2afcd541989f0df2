use clap::{Parser, Subcommand};
use futures::executor::block_on;
use lift_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Workout logging for the current training week", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the week plan file
    #[arg(long, global = true)]
    plan: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day's workout in display order
    Show {
        /// Day of the week plan (1-based)
        #[arg(long)]
        day: u32,
    },

    /// Log one exercise of a day
    Log {
        /// Day of the week plan (1-based)
        #[arg(long)]
        day: u32,

        /// Exercise name as it appears in the plan
        #[arg(long)]
        exercise: String,

        /// Reps per set, comma separated (e.g. 5,5,4). Not needed for cycle lifts.
        #[arg(long, value_delimiter = ',')]
        reps: Vec<String>,
    },

    /// List logged exercises
    History {
        /// Only show entries for this day
        #[arg(long)]
        day: Option<u32>,
    },
}

/// Prints engine notifications: successes to stdout, errors to stderr
struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn on_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn on_logged(&self, message: &str) {
        println!("✓ {}", message);
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("✗ {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Errors the engine already reported through `ConsoleFeedback` come back as
/// `ExitCode::FAILURE`; only the remaining ones reach `main` as `Err`.
fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    lift_core::logging::init_with_level(&config.logging.level);

    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(plan) = cli.plan {
        config.plan.path = Some(plan);
    }

    match cli.command {
        Commands::Show { day } => cmd_show(&config, day),
        Commands::Log {
            day,
            exercise,
            reps,
        } => cmd_log(&config, day, &exercise, &reps),
        Commands::History { day } => cmd_history(&config, day),
    }
}

fn cmd_show(config: &Config, day: u32) -> Result<ExitCode> {
    let source = PlanFile::new(config.plan_path());
    let session = block_on(DaySession::load(&source, day, &ConsoleFeedback));

    let Some(week) = session.week() else {
        return Ok(ExitCode::SUCCESS);
    };

    println!("\nWeek {} · Day {}", week, day);
    println!("─────────────────────────────────────────");

    if session.is_empty() {
        println!("No exercises for this day.");
        return Ok(ExitCode::SUCCESS);
    }

    for card in session.cards() {
        display_card(card);
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_log(config: &Config, day: u32, exercise: &str, reps: &[String]) -> Result<ExitCode> {
    let source = PlanFile::new(config.plan_path());
    let logger = JsonlLogger::new(config.journal_path());
    let feedback = ConsoleFeedback;

    let mut session = block_on(DaySession::load(&source, day, &feedback));
    if session.week().is_none() {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(card) = session.find_manual_mut(exercise) {
        let sets = card.record().input_sets();
        if reps.len() > sets {
            tracing::warn!(
                "{} has {} sets; ignoring {} extra --reps values",
                exercise,
                sets,
                reps.len() - sets
            );
        }
        for (set, text) in reps.iter().enumerate() {
            card.set_reps(set, text.as_str());
        }
    }

    let Some(target) = session.find(exercise) else {
        return Err(Error::Other(format!(
            "No loggable exercise named {:?} on day {}",
            exercise, day
        )));
    };

    if matches!(target, Loggable::Auto(_)) && !reps.is_empty() {
        tracing::warn!("Reps for {} are fixed by the programme; ignoring --reps", exercise);
    }

    match block_on(target.submit(&logger, &feedback)) {
        SubmitOutcome::Committed(_) => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Rejected(err) => {
            for set in err.invalid_sets() {
                eprintln!("  S{} needs reps", set + 1);
            }
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Failed(_) => Ok(ExitCode::FAILURE),
        SubmitOutcome::Ignored | SubmitOutcome::Discarded => Err(Error::Other(format!(
            "{} was not logged",
            exercise
        ))),
    }
}

fn cmd_history(config: &Config, day: Option<u32>) -> Result<ExitCode> {
    let entries = read_entries(&config.journal_path())?;
    let entries: Vec<_> = entries
        .iter()
        .filter(|e| day.map_or(true, |d| e.payload.day == d))
        .collect();

    if entries.is_empty() {
        println!("No logged exercises.");
        return Ok(ExitCode::SUCCESS);
    }

    for entry in entries {
        let sets: Vec<String> = entry
            .payload
            .actual_reps
            .iter()
            .zip(&entry.payload.actual_weights)
            .map(|(reps, weight)| format!("{}×{}", reps, weight))
            .collect();
        println!(
            "{}  W{} D{}  {}: {}",
            entry.logged_at.format("%Y-%m-%d %H:%M"),
            entry.payload.week_id,
            entry.payload.day,
            entry.payload.exercise_name,
            sets.join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn display_card(card: &Card) {
    println!();
    match card {
        Card::Standalone(exercise) => display_exercise(exercise, None),
        Card::Periodized(bench) => {
            let record = bench.record();
            let reps = record
                .target_reps
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "?".into());
            println!("  {}  [cycle]", record.name);
            match bench.weight() {
                Some(weight) => println!("    {}×{} @ {} kg", record.sets, reps, weight),
                None => println!("    {}×{}", record.sets, reps),
            }
            println!("    Reps are fixed by the programme; log to confirm.");
        }
        Card::Superset(superset) => {
            println!("  Superset {}", superset.tag());
            for (index, member) in superset.members().iter().enumerate() {
                display_exercise(member, Some(superset.label(index)));
            }
            for row in superset.rows() {
                let entries: Vec<String> = row
                    .entries
                    .iter()
                    .map(|e| format!("{} {} kg", e.label, e.weight))
                    .collect();
                println!("    Set {}: {}", row.set + 1, entries.join(" · "));
            }
        }
        Card::StaticBlock(block) => {
            println!(
                "  Abs Routine  {} exercises · ~{} total",
                block.records().len(),
                block.duration_label()
            );
            for record in block.records() {
                let duration = record
                    .target_reps
                    .as_ref()
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                println!("    {}  {}", record.name, duration);
            }
        }
    }
}

fn display_exercise(card: &ExerciseCard, label: Option<String>) {
    let record = card.record();
    let reps = record
        .target_reps
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".into());

    match &label {
        Some(label) => println!("  {}: {}", label, record.name),
        None => println!("  {}", record.name),
    }
    println!(
        "    {} sets · {} reps · {}",
        record.input_sets(),
        reps,
        record.strategy
    );

    // Superset weights are shown interleaved by set instead
    if label.is_none() {
        for (set, weight) in record.target_weights.iter().enumerate() {
            println!("    S{}  {} kg", set + 1, weight);
        }
    }
}
