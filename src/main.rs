use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use paged_report::{
    Column, Orientation, PaperSize, ReportConfig, ReportEngine, TableReport, parse_delimited,
};

/// Render a delimited text file as a paginated PDF report.
#[derive(Parser)]
#[command(name = "paged-report", version, about)]
struct Cli {
    /// Input file; the first line holds the column titles
    input: PathBuf,

    /// Output PDF (defaults to the input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Text printed once below the header of the first page
    #[arg(long)]
    description: Option<String>,

    /// Column whose consecutive equal values form a group
    #[arg(long)]
    group_by: Option<String>,

    /// Amount column to total per group and overall (repeatable)
    #[arg(long = "sum")]
    sum: Vec<String>,

    /// a4, a5, letter or legal
    #[arg(long, default_value = "a4")]
    paper: String,

    #[arg(long)]
    landscape: bool,

    #[arg(long, default_value_t = 10.0)]
    font_size: f32,

    /// Start every group on a new page
    #[arg(long)]
    group_on_new_page: bool,

    /// Field delimiter (defaults to tab for .tsv files, comma otherwise)
    #[arg(long)]
    delimiter: Option<char>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(paper) = PaperSize::from_name(&cli.paper) else {
        eprintln!("Error: unknown paper size '{}'", cli.paper);
        return ExitCode::FAILURE;
    };

    let text = match std::fs::read_to_string(&cli.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let delimiter = cli.delimiter.unwrap_or_else(|| {
        match cli.input.extension().and_then(|e| e.to_str()) {
            Some("tsv") | Some("tab") => '\t',
            _ => ',',
        }
    });

    let mut rows = match parse_delimited(&text, delimiter) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };
    if rows.is_empty() {
        eprintln!("Error: {} has no header line", cli.input.display());
        return ExitCode::FAILURE;
    }
    let headers = rows.remove(0);

    for name in cli.sum.iter().chain(cli.group_by.iter()) {
        if !headers.contains(name) {
            eprintln!("Error: no column named '{name}'");
            return ExitCode::FAILURE;
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .map(|h| {
            if cli.sum.contains(h) {
                Column::new(h).summed()
            } else {
                Column::new(h)
            }
        })
        .collect();

    let document_name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = cli.title.clone().unwrap_or_else(|| document_name.clone());

    let mut report = TableReport::new(title, columns, rows);
    if let Some(subtitle) = &cli.subtitle {
        report = report.subtitle(subtitle.as_str());
    }
    if let Some(description) = &cli.description {
        report = report.description(description.as_str());
    }
    if let Some(name) = &cli.group_by
        && let Some(index) = headers.iter().position(|h| h == name)
    {
        report = report.group_by(index);
    }

    let orientation = if cli.landscape {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    let mut engine = ReportEngine::new(ReportConfig::default().document_name(document_name));
    engine.configure(paper, orientation, cli.font_size, cli.group_on_new_page);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let ok = engine.run(&mut report, &output);
    let message = engine.message().unwrap_or_default();
    if ok {
        println!("{}: {message}", output.display());
        ExitCode::SUCCESS
    } else {
        eprintln!("Error: {message}");
        ExitCode::FAILURE
    }
}
