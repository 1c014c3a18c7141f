// htmlpress CLI: read a file, compress/reformat it, optionally re-wrap under
// a byte budget, report sizes and residual violations on stderr, write the
// result (in place by default).

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use htmlpress::{compress, find_violations, reformat, stats, wrap, Mode, WrapStrategy};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    /// Compress only the <head> section
    HeaderOnly,
    /// Strip comments and tighten lines, keep readability (recommended)
    Smart,
    /// Remove all line breaks and comments
    Aggressive,
    /// Smallest possible output, single logical line
    Complete,
    /// Left-justify existing indentation
    Indent,
    /// Complete on the head, indent-preserving on the body
    Hybrid,
    /// Rebuild nested indentation from tag structure
    Reformat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliStrategy {
    /// Re-split existing lines, quote-aware
    Lines,
    /// Re-pack the token stream
    Tokens,
}

impl From<CliStrategy> for WrapStrategy {
    fn from(s: CliStrategy) -> Self {
        match s {
            CliStrategy::Lines => WrapStrategy::Lines,
            CliStrategy::Tokens => WrapStrategy::Tokens,
        }
    }
}

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Processing mode
    #[arg(long, value_enum, default_value_t = CliMode::Smart)]
    mode: CliMode,

    /// Re-wrap the output so no line exceeds this many bytes
    #[arg(long, value_name = "BYTES")]
    line_budget: Option<usize>,

    /// Wrapping strategy, used with --line-budget
    #[arg(long, value_enum, default_value_t = CliStrategy::Lines)]
    wrap_strategy: CliStrategy,

    /// Exit nonzero if any output line still exceeds the budget
    #[arg(long)]
    strict: bool,

    /// Input file
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let mut result = match cli.mode {
        CliMode::HeaderOnly => compress(&src, Mode::HeaderOnly),
        CliMode::Smart => compress(&src, Mode::Smart),
        CliMode::Aggressive => compress(&src, Mode::Aggressive),
        CliMode::Complete => compress(&src, Mode::Complete),
        CliMode::Indent => compress(&src, Mode::IndentPreserve),
        CliMode::Hybrid => compress(&src, Mode::Hybrid),
        CliMode::Reformat => reformat(&src),
    };

    let mut violations = Vec::new();
    if let Some(budget) = cli.line_budget {
        let lines = wrap(&result, budget, cli.wrap_strategy.into())?;
        violations = find_violations(&lines, budget);
        result = lines.join("\n");
    }

    let report = stats(&src, &result);
    eprintln!(
        "{} B -> {} B ({:.1}% reduction)",
        report.original_bytes, report.transformed_bytes, report.reduction_percent
    );
    for v in &violations {
        eprintln!(
            "line {}: {} B over budget: {}",
            v.line, v.byte_length, v.preview
        );
    }

    let out_path = cli.output.as_ref().unwrap_or(&cli.input);
    fs::write(out_path, &result).with_context(|| format!("writing {}", out_path.display()))?;

    if cli.strict && !violations.is_empty() {
        anyhow::bail!("{} line(s) exceed the byte budget", violations.len());
    }
    Ok(())
}
