//! razbor - clause segmentation and role labeling CLI
//!
//! Operates on CoNLL-style documents produced by an upstream parser and on
//! JSON ruleset files.
//!
//! # Usage
//!
//! ```bash
//! # Derive the per-token feature table as CSV
//! razbor features -i doc.conll -o features.csv
//!
//! # Segment into clauses with the sentence-start baseline
//! razbor segment -i doc.conll
//!
//! # Segment with explicit boundary token indices
//! razbor segment -i doc.conll --boundaries 0,4
//!
//! # Label predicate arguments with a ruleset file
//! razbor label -i doc.conll -r rules.json --format json
//!
//! # Validate a ruleset file
//! razbor rules -r rules.json
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use razbor::features::{DeriverConfig, FeatureDeriver};
use razbor::segment::{assemble, ClauseSegmenter, SentenceStartClassifier};
use razbor::srl::{PredicateArgumentExtractor, SrlLabeler};
use razbor::{parse_document, Annotation, Clause, LabeledPredicateArguments};

// ============================================================================
// CLI Structure
// ============================================================================

/// Clause segmentation and semantic role labeling over parsed Russian text
#[derive(Parser)]
#[command(name = "razbor")]
#[command(
    author,
    version,
    about = "Clause segmentation and semantic role labeling over parsed Russian text",
    long_about = r#"
razbor - clause segmentation and semantic role labeling

The toolkit consumes CoNLL-style documents (one token per line, sentences
separated by blank lines, `# newdoc id = <id>` headers) produced by an
upstream tokenizer/tagger/parser, and JSON ruleset files for role labeling.

EXAMPLES:
  razbor features -i doc.conll -o features.csv
  razbor segment -i doc.conll --boundaries 0,4
  razbor label -i doc.conll -r rules.json --format json
  razbor rules -r rules.json

Pass `-` as the input path to read from stdin.
"#
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the per-token feature table as CSV
    #[command(visible_alias = "f")]
    Features(FeaturesArgs),

    /// Segment a document into clauses
    #[command(visible_alias = "s")]
    Segment(SegmentArgs),

    /// Label predicate arguments with a ruleset file
    #[command(visible_alias = "l")]
    Label(LabelArgs),

    /// Validate a ruleset file and summarize its contents
    #[command(visible_alias = "r")]
    Rules(RulesArgs),
}

#[derive(Args)]
struct FeaturesArgs {
    /// CoNLL input file, or `-` for stdin
    #[arg(short, long)]
    input: String,

    /// Window size: how many previous tokens contribute features
    #[arg(long, default_value_t = 2)]
    window: usize,

    /// Also derive lowest-common-ancestor features
    #[arg(long)]
    ancestors: bool,

    /// Partition count for parallel derivation (1 = sequential)
    #[arg(long, default_value_t = 8)]
    partitions: usize,

    /// Write CSV here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SegmentArgs {
    /// CoNLL input file, or `-` for stdin
    #[arg(short, long)]
    input: String,

    /// Explicit clause-start token indices (document order); without this
    /// the sentence-start baseline classifier runs
    #[arg(long, value_delimiter = ',')]
    boundaries: Option<Vec<usize>>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct LabelArgs {
    /// CoNLL input file, or `-` for stdin
    #[arg(short, long)]
    input: String,

    /// JSON ruleset file (array of rulesets, applied in order)
    #[arg(short, long)]
    rules: PathBuf,

    /// Preposition search radius in preceding tokens
    #[arg(long, default_value_t = razbor::srl::DEFAULT_PREPOSITION_RADIUS)]
    radius: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct RulesArgs {
    /// JSON ruleset file to validate
    #[arg(short, long)]
    rules: PathBuf,
}

/// Output rendering for segment and label results
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON
    Json,
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Features(args) => cmd_features(args),
        Commands::Segment(args) => cmd_segment(args),
        Commands::Label(args) => cmd_label(args),
        Commands::Rules(args) => cmd_rules(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_features(args: FeaturesArgs) -> Result<(), String> {
    let annotation = load_annotation(&args.input)?;
    let deriver = FeatureDeriver::with_config(DeriverConfig {
        window: args.window,
        ancestor_features: args.ancestors,
        partitions: args.partitions,
    });
    let table = deriver.derive(annotation.sentences());
    let csv = table.to_csv();
    match args.output {
        Some(path) => fs::write(&path, csv)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?,
        None => print!("{csv}"),
    }
    Ok(())
}

fn cmd_segment(args: SegmentArgs) -> Result<(), String> {
    let annotation = load_annotation(&args.input)?;
    let clauses = match args.boundaries {
        Some(boundaries) => {
            let tokens = annotation.flat_tokens();
            assemble(annotation.text(), &tokens, &boundaries)
        }
        None => ClauseSegmenter::new(SentenceStartClassifier)
            .segment(&annotation)
            .map_err(|e| e.to_string())?,
    };
    print_clauses(&clauses, args.format)
}

fn cmd_label(args: LabelArgs) -> Result<(), String> {
    let annotation = load_annotation(&args.input)?;
    let labeler = load_labeler(&args.rules)?;
    let pairs = PredicateArgumentExtractor::new()
        .with_preposition_radius(args.radius)
        .extract(&annotation);
    let labeled = labeler.label_all(&pairs);
    print_labeled(&labeled, args.format)
}

fn cmd_rules(args: RulesArgs) -> Result<(), String> {
    let labeler = load_labeler(&args.rules)?;
    println!("{}: {} rulesets", args.rules.display(), labeler.rulesets().len());
    for (i, ruleset) in labeler.rulesets().iter().enumerate() {
        let roles: Vec<&str> = ruleset.argument_rules.iter().map(|(role, _)| role).collect();
        println!(
            "  [{i}] predicate pattern with {} attrs, roles: {}",
            ruleset.predicate_rule.pattern.len(),
            if roles.is_empty() {
                "(none)".to_string()
            } else {
                roles.join(", ")
            }
        );
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn load_annotation(input: &str) -> Result<Annotation, String> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("cannot read stdin: {e}"))?;
        buffer
    } else {
        fs::read_to_string(input).map_err(|e| format!("cannot read {input}: {e}"))?
    };
    parse_document(&text).map_err(|e| e.to_string())
}

fn load_labeler(path: &PathBuf) -> Result<SrlLabeler, String> {
    let json =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    SrlLabeler::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

fn print_clauses(clauses: &[Clause], format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(clauses).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for clause in clauses {
                println!("[{}] {}..{}\t{}", clause.id, clause.start, clause.end, clause.text);
            }
        }
    }
    Ok(())
}

fn print_labeled(
    labeled: &[LabeledPredicateArguments],
    format: OutputFormat,
) -> Result<(), String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(labeled).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for pair in labeled {
                println!(
                    "sentence {} predicate {} ({})",
                    pair.sentence_index, pair.predicate_index, pair.predicate.text
                );
                for argument in &pair.arguments {
                    println!(
                        "  {} -> {}",
                        argument.descriptor.text,
                        argument.role.as_deref().unwrap_or("-")
                    );
                }
            }
        }
    }
    Ok(())
}
