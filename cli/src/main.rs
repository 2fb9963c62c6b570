//! docgrade CLI - rubric grading for PowerPoint and Word documents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docgrade::render::{to_json, JsonFormat};
use docgrade::{
    BatchGrader, BatchJob, BatchReport, FileType, GradeOptions, GradeResult, Grader,
    RoundingPolicy, Rubric,
};

#[derive(Parser)]
#[command(name = "docgrade")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Grade PowerPoint and Word documents against a rubric", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single document
    Grade {
        /// Input .pptx or .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Rubric JSON file (built-in rubric if not specified)
        #[arg(short, long, value_name = "FILE")]
        rubric: Option<PathBuf>,

        /// Override the rubric's rounding policy
        #[arg(long, value_enum)]
        rounding: Option<Rounding>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Grade many documents at once
    Batch {
        /// Input files or directories
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Rubric JSON file (built-in rubric if not specified)
        #[arg(short, long, value_name = "FILE")]
        rubric: Option<PathBuf>,

        /// Documents graded at once
        #[arg(short, long, env = "DOCGRADE_JOBS")]
        jobs: Option<usize>,

        /// Pass threshold in percent
        #[arg(long, default_value = "50")]
        threshold: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the extracted feature set as JSON
    Features {
        /// Input .pptx or .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a built-in rubric
    Rubric {
        /// Document kind
        #[arg(value_enum)]
        kind: RubricKind,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Rounding {
    /// Keep exact points
    None,
    /// Round to the nearest quarter point
    #[value(name = "half_up_0.25")]
    Quarter,
}

impl From<Rounding> for RoundingPolicy {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::None => RoundingPolicy::None,
            Rounding::Quarter => RoundingPolicy::HalfUpQuarter,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RubricKind {
    /// Presentation rubric
    Presentation,
    /// Word document rubric
    Word,
}

impl From<RubricKind> for FileType {
    fn from(kind: RubricKind) -> Self {
        match kind {
            RubricKind::Presentation => FileType::Pptx,
            RubricKind::Word => FileType::Docx,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            input,
            rubric,
            rounding,
            json,
            compact,
            output,
        } => cmd_grade(&input, rubric.as_deref(), rounding, json, compact, output.as_deref()),
        Commands::Batch {
            inputs,
            rubric,
            jobs,
            threshold,
            json,
            output,
        } => cmd_batch(&inputs, rubric.as_deref(), jobs, threshold, json, output.as_deref()),
        Commands::Features {
            input,
            compact,
            output,
        } => cmd_features(&input, compact, output.as_deref()),
        Commands::Rubric { kind } => {
            println!("{}", Rubric::builtin_json(kind.into()));
            Ok(())
        }
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

fn build_grader(rubric: Option<&Path>, options: GradeOptions) -> Result<Grader, Box<dyn std::error::Error>> {
    let mut grader = Grader::new().with_options(options);
    if let Some(path) = rubric {
        grader = grader.with_rubric(Rubric::from_file(path)?);
    }
    Ok(grader)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_grade(
    input: &Path,
    rubric: Option<&Path>,
    rounding: Option<Rounding>,
    json: bool,
    compact: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = GradeOptions::new();
    if let Some(rounding) = rounding {
        options = options.with_rounding(rounding.into());
    }
    let grader = build_grader(rubric, options)?;
    let result = grader.grade_file(input)?;

    if json || compact || output.is_some() {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        return write_output(&to_json(&result, format)?, output);
    }

    print_result(&result);
    Ok(())
}

fn print_result(result: &GradeResult) {
    println!("{}", "Grade Report".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("{}: {}", "File".bold(), result.filename);
    println!("{}: {}", "Type".bold(), result.file_type);
    println!("{}: {}", "Rubric".bold(), result.rubric_name);
    println!();

    for (id, criterion) in &result.by_criteria {
        let mark = if criterion.passed {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {:<16} {:>5.2}  {:<3} {}",
            mark,
            id,
            criterion.points,
            criterion.level.as_deref().unwrap_or("-"),
            criterion.reason.dimmed()
        );
    }

    println!("{}", "─".repeat(60).dimmed());
    let summary = format!(
        "{} / {} ({:.2}%)",
        result.total_points, result.max_possible_points, result.percentage
    );
    println!("{}: {}", "Total".bold(), summary.bold());
    println!(
        "{}",
        format!("Graded in {}ms", result.processing_time_ms).dimmed()
    );
}

/// Expand directories into the documents they contain.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file())
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .and_then(FileType::from_filename)
                        .is_some()
                })
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn cmd_batch(
    inputs: &[PathBuf],
    rubric: Option<&Path>,
    jobs: Option<usize>,
    threshold: f64,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_inputs(inputs)?;
    log::debug!("Collected {} documents from {} inputs", files.len(), inputs.len());
    if files.is_empty() {
        println!("{}", "No .pptx or .docx files found".yellow());
        return Ok(());
    }

    let grader = build_grader(rubric, GradeOptions::new().with_pass_threshold(threshold))?;
    let mut batch = BatchGrader::new(grader);
    if let Some(jobs) = jobs {
        batch = batch.with_concurrency(jobs);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let rx = batch.stream(files.into_iter().map(BatchJob::file).collect())?;
    let mut outcomes = Vec::new();
    for outcome in rx {
        let name = match &outcome {
            Ok(result) => result.filename.clone(),
            Err(error) => error.filename.clone(),
        };
        pb.set_message(name);
        pb.inc(1);
        outcomes.push(outcome);
    }
    pb.finish_and_clear();

    outcomes.sort_by(|a, b| outcome_name(a).cmp(outcome_name(b)));
    let report = BatchReport::from_outcomes(outcomes, threshold);

    if json || output.is_some() {
        return write_output(&to_json(&report, JsonFormat::Pretty)?, output);
    }

    print_report(&report, threshold);
    Ok(())
}

fn outcome_name(outcome: &docgrade::grade::BatchOutcome) -> &str {
    match outcome {
        Ok(result) => &result.filename,
        Err(error) => &error.filename,
    }
}

fn print_report(report: &BatchReport, threshold: f64) {
    println!("{}", "Batch Results".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());

    for result in &report.results {
        let percentage = format!("{:>6.2}%", result.percentage);
        let percentage = if result.is_pass(threshold) {
            percentage.green()
        } else {
            percentage.red()
        };
        println!(
            "  {} {:>6.2} / {:<6.2} {}",
            percentage, result.total_points, result.max_possible_points, result.filename
        );
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors".red().bold());
        for error in &report.errors {
            println!("  {} {}: {}", "✗".red(), error.filename, error.message.dimmed());
        }
    }

    let stats = &report.stats;
    println!("{}", "─".repeat(60).dimmed());
    println!("{}: {}", "Graded".bold(), stats.count);
    println!("{}: {}", "Failed to grade".bold(), report.errors.len());
    if stats.count > 0 {
        println!(
            "{}: {:.2}%  (min {:.2}%, max {:.2}%)",
            "Average".bold(),
            stats.average,
            stats.min,
            stats.max
        );
        println!(
            "{}: {}  {}: {}  (threshold {}%)",
            "Pass".green().bold(),
            stats.pass_count,
            "Fail".red().bold(),
            stats.fail_count,
            threshold
        );
    }
}

fn cmd_features(input: &Path, compact: bool, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let features = docgrade::extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(&to_json(&features, format)?, output)
}

fn cmd_version() {
    println!("{} {}", "docgrade".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rubric grading for PowerPoint and Word documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docgrade".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_inputs_filters_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pptx"), b"x").unwrap();
        fs::write(dir.path().join("a.docx"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let explicit = PathBuf::from("other.pptx");
        let files = collect_inputs(&[dir.path().to_path_buf(), explicit.clone()]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.docx"), dir.path().join("b.pptx"), explicit]
        );
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::try_parse_from(["docgrade", "batch", "subs/", "--jobs", "4", "--threshold", "60"]).unwrap();
        match cli.command {
            Commands::Batch { jobs, threshold, .. } => {
                assert_eq!(jobs, Some(4));
                assert_eq!(threshold, 60.0);
            }
            _ => panic!("expected batch"),
        }
    }

    #[test]
    fn test_rounding_value_names() {
        let cli = Cli::try_parse_from(["docgrade", "grade", "a.pptx", "--rounding", "half_up_0.25"]).unwrap();
        match cli.command {
            Commands::Grade { rounding, .. } => {
                assert_eq!(rounding.map(RoundingPolicy::from), Some(RoundingPolicy::HalfUpQuarter));
            }
            _ => panic!("expected grade"),
        }
    }
}
