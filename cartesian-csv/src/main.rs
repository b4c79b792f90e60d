//! Cartesian CSV CLI - Drive the node the way a host would
//!
//! Every command reads the node's multiline input (one CSV group per line,
//! comma-separated paths within a line) from a file.
//!
//! ```bash
//! cartesian-csv run groups.txt --ticks 4      # Execute 4 ticks, print outputs
//! cartesian-csv combine groups.txt            # Print the combined rows
//! cartesian-csv fingerprint groups.txt        # Print the re-execution hint
//! cartesian-csv stamps groups.txt             # Print file modification times
//! cartesian-csv schema                        # Print the node schema
//! ```

use cartesian_csv::{
    combine_input, parse_groups, schema, CartesianCsvNode, ChangeHint, FileStamps, LogEntry,
    NodeConfig, NodeInputs, NodeOutputs, OutputValue,
};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cartesian-csv")]
#[command(about = "Iterate the cartesian product of CSV groups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the node for a number of ticks
    Run {
        /// File holding the node input
        input: PathBuf,

        /// Number of ticks to execute
        #[arg(short, long, default_value = "1")]
        ticks: usize,

        /// Assert reset on every tick
        #[arg(long)]
        reset: bool,

        /// Row to emit instead of the cursor position (-1 for none)
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        row_index: i64,

        /// Include the combined rows text
        #[arg(long)]
        show_combined: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the combined rows as JSON
    Combine {
        /// File holding the node input
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the re-execution hint for the given inputs
    Fingerprint {
        /// File holding the node input
        input: PathBuf,

        /// Reset input
        #[arg(long)]
        reset: bool,

        /// Row index input
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        row_index: i64,

        /// Show combined text input
        #[arg(long)]
        show_combined: bool,
    },

    /// Print the modification time of every referenced file
    Stamps {
        /// File holding the node input
        input: PathBuf,
    },

    /// Print the node schema
    Schema,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            ticks,
            reset,
            row_index,
            show_combined,
            output,
        } => cmd_run(&input, ticks, reset, row_index, show_combined, output.as_deref()),

        Commands::Combine { input, output } => cmd_combine(&input, output.as_deref()),

        Commands::Fingerprint {
            input,
            reset,
            row_index,
            show_combined,
        } => cmd_fingerprint(&input, reset, row_index, show_combined),

        Commands::Stamps { input } => cmd_stamps(&input),

        Commands::Schema => cmd_schema(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// JSON view of one tick; images are summarised by shape.
#[derive(Serialize)]
struct TickReport {
    tick: usize,
    outputs: Vec<Value>,
    row_count: usize,
    no_more_rows: bool,
    last_row: usize,
    next_row: usize,
    combined_rows_text: String,
    diagnostics: Vec<LogEntry>,
}

impl TickReport {
    fn new(tick: usize, outputs: NodeOutputs, diagnostics: &[LogEntry]) -> Self {
        let row_count = outputs.row_count;
        let no_more_rows = outputs.no_more_rows;
        let last_row = outputs.last_row;
        let next_row = outputs.next_row;
        let combined_rows_text = outputs.combined_rows_text.clone();

        let names = schema().outputs;
        let values = outputs
            .into_values()
            .into_iter()
            .zip(names)
            .map(|(value, port)| json!({ "name": port.name, "value": value_json(value) }))
            .collect();

        Self {
            tick,
            outputs: values,
            row_count,
            no_more_rows,
            last_row,
            next_row,
            combined_rows_text,
            diagnostics: diagnostics.to_vec(),
        }
    }
}

fn value_json(value: OutputValue) -> Value {
    match value {
        OutputValue::Image(image) => json!({ "shape": image.shape() }),
        OutputValue::String(s) => json!(s),
        OutputValue::Int(i) => json!(i),
        OutputValue::Float(f) => json!(f),
        OutputValue::Boolean(b) => json!(b),
    }
}

fn cmd_run(
    input: &Path,
    ticks: usize,
    reset: bool,
    row_index: i64,
    show_combined: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let csv_files = fs::read_to_string(input)?;
    let mut node = CartesianCsvNode::from_env()?;
    let inputs = NodeInputs::new(csv_files)
        .with_reset(reset)
        .with_row_index(row_index)
        .with_combined_text(show_combined);

    eprintln!("Running {} tick(s) from {}", ticks, input.display());

    let mut reports = Vec::with_capacity(ticks);
    for tick in 0..ticks {
        let outputs = node.execute(&inputs)?;
        reports.push(TickReport::new(tick, outputs, node.diagnostics()));
    }

    let json = serde_json::to_string_pretty(&reports)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_combine(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let csv_files = fs::read_to_string(input)?;
    let config = NodeConfig::from_env()?;

    let rows = combine_input(&csv_files, &config.combine_options())?;
    eprintln!("Combined {} row(s)", rows.len());

    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_fingerprint(
    input: &Path,
    reset: bool,
    row_index: i64,
    show_combined: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let csv_files = fs::read_to_string(input)?;
    let inputs = NodeInputs::new(csv_files)
        .with_reset(reset)
        .with_row_index(row_index)
        .with_combined_text(show_combined);

    match CartesianCsvNode::is_changed(&inputs) {
        ChangeHint::Always => println!("always"),
        ChangeHint::Fingerprint(hash) => println!("{}", hash),
    }

    Ok(())
}

fn cmd_stamps(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let csv_files = fs::read_to_string(input)?;
    let stamps = FileStamps::capture(&parse_groups(&csv_files));

    for (path, stamp) in stamps.iter() {
        match stamp {
            Some(time) => {
                let local: DateTime<Local> = time.into();
                println!("{}  {}", local.to_rfc3339(), path.display());
            }
            None => println!("{:<25}  {}", "missing", path.display()),
        }
    }

    Ok(())
}

fn cmd_schema() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&schema())?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
