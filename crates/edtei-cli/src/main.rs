use anyhow::{Context, Result, bail};
use clap::Parser;
use edtei_config::Config;
use edtei_engine::{
    Annotator, DirectiveKind, NumeralStyle, Report, TextMode, io, parse_document, to_tei_string,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when `--strict` is set and a directive was skipped.
const EXIT_SKIPPED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "edtei",
    version,
    about = "Convert a plain-text transcription into an annotated TEI edition"
)]
struct Cli {
    /// Plain-text transcription
    input: PathBuf,

    /// Where to write the TEI file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Set the text as verse: blocks become stanzas (`lg`)
    #[arg(long, conflicts_with = "prose")]
    verse: bool,

    /// Set the text as prose: blocks become paragraphs (`p`)
    #[arg(long)]
    prose: bool,

    /// Show the stanza or paragraph number on each block
    #[arg(long)]
    number_blocks: bool,

    /// Use Roman numerals for block numbers
    #[arg(long)]
    roman: bool,

    /// Show a line number on every Nth line of a page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    number_lines_every: Option<u32>,

    /// Restart block and line counts at each page break
    #[arg(long)]
    reset_counts_on_page_break: bool,

    /// Explanatory notes list
    #[arg(long, value_name = "FILE")]
    notes: Option<PathBuf>,

    /// Rejected readings list
    #[arg(long, value_name = "FILE")]
    rejected: Option<PathBuf>,

    /// Variant readings list
    #[arg(long, value_name = "FILE")]
    variants: Option<PathBuf>,

    /// Title written into the TEI header
    #[arg(long)]
    title: Option<String>,

    /// Responsibility pointer for notes and corrections
    #[arg(long)]
    resp: Option<String>,

    /// Config file to use instead of ~/.config/edtei/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Exit with status 2 when any directive was skipped
    #[arg(long)]
    strict: bool,

    /// Log every applied directive
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply_overrides(&self, mut config: Config) -> Config {
        if self.verse {
            config.parse.mode = TextMode::Verse;
        }
        if self.prose {
            config.parse.mode = TextMode::Prose;
        }
        if self.number_blocks {
            config.parse.number_blocks = true;
        }
        if self.roman {
            config.parse.numeral_style = NumeralStyle::Roman;
        }
        if let Some(every) = self.number_lines_every {
            config.parse.number_lines_every = every;
        }
        if self.reset_counts_on_page_break {
            config.parse.reset_counts_on_page_break = true;
        }
        if let Some(title) = &self.title {
            config.tei.title = title.clone();
        }
        if let Some(resp) = &self.resp {
            config.annotate.resp = resp.clone();
        }
        config
    }

    /// Directive lists in application order.
    fn directive_lists(&self) -> Vec<(&Path, DirectiveKind)> {
        [
            (&self.rejected, DirectiveKind::Rejected),
            (&self.variants, DirectiveKind::Variant),
            (&self.notes, DirectiveKind::Note),
        ]
        .into_iter()
        .filter_map(|(path, kind)| path.as_deref().map(|p| (p, kind)))
        .collect()
    }

    fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let loaded = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load_from_path(path)?
        }
        None => Config::load()?,
    };
    if loaded.is_none() {
        log::debug!("No config file found, using defaults");
    }
    Ok(loaded.unwrap_or_default())
}

fn run(cli: &Cli) -> Result<Report> {
    let config = cli.apply_overrides(load_config(cli.config.as_deref())?);

    let rows = io::read_transcription(&cli.input)
        .with_context(|| format!("Failed to read transcription {}", cli.input.display()))?;
    let mut doc = parse_document(&rows, &config.parse);
    log::info!(
        "Parsed {} lines from {}",
        doc.lines().len(),
        cli.input.display()
    );

    let mut annotator = Annotator::new(config.annotate.resp.as_str());
    for (path, kind) in cli.directive_lists() {
        let list = io::read_directive_list(path, kind)
            .with_context(|| format!("Failed to read {kind} list {}", path.display()))?;
        annotator.apply(&mut doc, &list);
    }

    let xml = to_tei_string(&doc, &config.tei).context("Failed to serialize TEI")?;
    io::write_output(&cli.output, &xml)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Wrote {}", cli.output.display());

    Ok(annotator.into_report())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    match run(&cli) {
        Ok(report) => {
            if !report.passes.is_empty() {
                eprint!("{report}");
            }
            if cli.strict && report.has_skips() {
                ExitCode::from(EXIT_SKIPPED)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(["edtei", "in.txt", "-o", "out.xml"].iter().chain(args)).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.parse.number_lines_every = 5;
        config.tei.title = "From config".into();

        let cli = parse(&["--verse", "--roman", "--number-lines-every", "3"]);
        let config = cli.apply_overrides(config);

        assert_eq!(config.parse.mode, TextMode::Verse);
        assert_eq!(config.parse.numeral_style, NumeralStyle::Roman);
        assert_eq!(config.parse.number_lines_every, 3);
        assert_eq!(config.tei.title, "From config");
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = Config::default();
        config.parse.mode = TextMode::Verse;
        config.parse.number_blocks = true;

        let config = parse(&[]).apply_overrides(config);

        assert_eq!(config.parse.mode, TextMode::Verse);
        assert!(config.parse.number_blocks);
    }

    #[test]
    fn lists_apply_rejected_variants_notes() {
        let cli = parse(&["--notes", "n.txt", "--variants", "v.txt", "--rejected", "r.txt"]);
        let kinds: Vec<_> = cli.directive_lists().into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            vec![
                DirectiveKind::Rejected,
                DirectiveKind::Variant,
                DirectiveKind::Note
            ]
        );
    }

    #[test]
    fn rejects_zero_line_interval_and_mixed_modes() {
        let base = ["edtei", "in.txt", "-o", "out.xml"];
        assert!(Cli::try_parse_from(base.iter().chain(&["--number-lines-every", "0"])).is_err());
        assert!(Cli::try_parse_from(base.iter().chain(&["--verse", "--prose"])).is_err());
    }

    #[test]
    fn verbosity() {
        assert_eq!(parse(&["-v"]).log_level(), log::LevelFilter::Debug);
        assert_eq!(parse(&["-q"]).log_level(), log::LevelFilter::Warn);
        assert_eq!(parse(&[]).log_level(), log::LevelFilter::Info);
    }
}
