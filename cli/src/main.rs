//! secdiff CLI - section-aware PDF comparison tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use secdiff::export::to_json;
use secdiff::{
    load_pair, segment_with_path, CompareMode, ComparisonReport, ComparisonSession, DiffPart,
    DocumentSections, DocumentSummary, ExportOutcome, ExtractOptions, JsonFormat, PdfDocument,
    SectionChanges, WriterRegistry,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "secdiff")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compare two versions of a PDF document section by section", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CompareArgs {
    /// Old version of the document
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// New version of the document
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Comparison mode
    #[arg(long, value_enum, env = "SECDIFF_MODE", default_value = "full-text")]
    mode: ModeArg,

    /// Compare `key = value` lines only (same as --mode numeric)
    #[arg(long)]
    numeric: bool,

    /// Compare only these section titles
    #[arg(long, value_name = "TITLE")]
    only: Vec<String>,

    /// Fail on unreadable pages instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Extract the two documents one after the other
    #[arg(long)]
    sequential: bool,
}

impl CompareArgs {
    fn mode(&self) -> CompareMode {
        if self.numeric {
            CompareMode::NumericOnly
        } else {
            self.mode.into()
        }
    }

    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if self.strict {
            options = options.strict();
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the sections of a document
    #[command(alias = "ls")]
    Sections {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two documents and print the changes
    #[command(alias = "diff")]
    Compare {
        #[command(flatten)]
        args: CompareArgs,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Compare two documents and export the changes as rows
    Export {
        #[command(flatten)]
        args: CompareArgs,

        /// Output file; the format is chosen by its extension
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Extension to use when the output file has none (csv, json, md)
        #[arg(long, env = "SECDIFF_FORMAT", default_value = "csv")]
        format: String,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Line diff of the full section text
    FullText,
    /// Only `key = value` lines
    Numeric,
}

impl From<ModeArg> for CompareMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FullText => CompareMode::FullText,
            ModeArg::Numeric => CompareMode::NumericOnly,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Sections { input, json } => cmd_sections(&input, json),
        Commands::Compare {
            args,
            json,
            compact,
        } => cmd_compare(&args, json, compact),
        Commands::Export {
            args,
            output,
            format,
        } => cmd_export(&args, &output, &format),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_disclaimer(name: &str, doc: &DocumentSections) {
    if let Some(notice) = doc.mode.disclaimer() {
        eprintln!("{} {}: {}", "Note:".yellow().bold(), name, notice);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_sections(input: &Path, json: bool) -> CliResult {
    let pdf = PdfDocument::open(input)?;
    let doc = segment_with_path(&pdf, input, &ExtractOptions::new())?;
    log::debug!("{}: {} sections in {} mode", input.display(), doc.len(), doc.mode);

    if json {
        println!("{}", to_json(&doc, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let info = pdf.info();
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), info.pdf_version);
    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref modified) = info.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }
    println!("{}: {}", "Pages".bold(), doc.page_count);
    println!("{}: {}", "Mode".bold(), doc.mode);
    println!();

    for section in &doc.sections {
        let pages = if section.end_page > section.start_page {
            format!("pp. {}-{}", section.start_page, section.end_page)
        } else {
            format!("p. {}", section.start_page)
        };
        println!(
            "{}{}  {}",
            "  ".repeat(section.level as usize),
            section.title,
            pages.dimmed()
        );
    }

    print_disclaimer(&display_name(input), &doc);
    Ok(())
}

/// Load both documents into a session and apply `--only`.
fn open_session(args: &CompareArgs) -> Result<ComparisonSession, Box<dyn std::error::Error>> {
    let pb = spinner("Extracting sections...")?;
    let loaded = load_pair(&args.old, &args.new, &args.extract_options());
    pb.finish_and_clear();
    let (old, new) = loaded?;

    print_disclaimer(&display_name(&args.old), &old);
    print_disclaimer(&display_name(&args.new), &new);

    log::debug!(
        "Loaded {} and {} sections; comparing in {:?} mode",
        old.len(),
        new.len(),
        args.mode()
    );
    let mut session = ComparisonSession::with_documents(old, new, args.mode());
    if !args.only.is_empty() {
        let unknown = session.select_only(args.only.iter().map(String::as_str));
        for title in unknown {
            eprintln!("{} no section titled \"{}\"", "Warning:".yellow().bold(), title);
        }
    }
    Ok(session)
}

fn print_part(part: &DiffPart) {
    for line in part.value.lines() {
        if part.added {
            println!("{}", format!("+ {}", line).green());
        } else if part.removed {
            println!("{}", format!("- {}", line).red());
        } else {
            println!("{}", format!("  {}", line).dimmed());
        }
    }
}

fn cmd_compare(args: &CompareArgs, json: bool, compact: bool) -> CliResult {
    let session = open_session(args)?;
    let results = session.compare()?;

    if json {
        let (Some(old), Some(new)) = (session.old(), session.new_document()) else {
            return Err("Both documents must be loaded".into());
        };
        let report = ComparisonReport::new(
            DocumentSummary::from_path(&args.old, old),
            DocumentSummary::from_path(&args.new, new),
            session.mode(),
            results,
        );
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", report.to_json(format)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No differences found".green());
        return Ok(());
    }

    for result in &results {
        println!("\n{}", result.title.cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        match &result.changes {
            SectionChanges::Text(parts) => parts.iter().for_each(print_part),
            SectionChanges::Numeric(changes) => {
                for change in changes {
                    println!(
                        "  {}: {} {} {}",
                        change.category.bold(),
                        change.old_value.red(),
                        "→".dimmed(),
                        change.new_value.green()
                    );
                }
            }
        }
    }

    println!(
        "\n{} {} sections changed",
        "Done!".green().bold(),
        results.len()
    );
    Ok(())
}

/// Add `format` as extension when `output` has none.
fn resolve_output(output: &Path, format: &str) -> PathBuf {
    if output.extension().is_some() {
        output.to_path_buf()
    } else {
        output.with_extension(format.trim_start_matches('.'))
    }
}

fn cmd_export(args: &CompareArgs, output: &Path, format: &str) -> CliResult {
    let output = resolve_output(output, format);
    log::debug!("Exporting to {}", output.display());
    let registry = WriterRegistry::with_defaults();
    registry.writer_for_path(&output)?;

    let session = open_session(args)?;
    match session.export_to_path(&registry, &output)? {
        ExportOutcome::Written { path, rows } => {
            println!("{} {} rows to {}", "Saved".green(), rows, path.display());
        }
        ExportOutcome::Empty => {
            println!("{}", "No differences found; nothing to export".yellow());
        }
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "secdiff".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Section-aware PDF comparison tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/secdiff".dimmed());
    println!("License: MIT");
}
