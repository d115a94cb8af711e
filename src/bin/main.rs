use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use crossterm::style::{style, Stylize};
use env_logger::Builder;
use log::LevelFilter;
use morph_core::persistence::{load_dictionary, save_to_disk};
use morph_core::{Analysis, Lexicon, MorphError, Morphology, MorphologyConfig, PrefixOrder};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "morph_engine", about = "Predict morphological analyses of word forms")]
struct Cli {
    /// Dictionary file: a `.json` source or a binary snapshot.
    #[arg(short, long)]
    dict: PathBuf,

    /// Words to analyze. If omitted, reads one word per line from stdin.
    words: Vec<String>,

    /// Write the dictionary as a binary snapshot to this path and exit.
    #[arg(long, value_name = "OUT")]
    compile: Option<PathBuf>,

    /// Output JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Show at most N analyses per word.
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Do not strip known prefixes.
    #[arg(long)]
    no_prefixes: bool,

    /// Try longer prefixes before shorter ones.
    #[arg(long)]
    longest_prefix_first: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct WordReport<'a> {
    word: &'a str,
    known: bool,
    analyses: &'a [Analysis],
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MorphError> {
    let store = load_dictionary(&cli.dict)?;

    if let Some(out) = &cli.compile {
        save_to_disk(&store, out)?;
        println!("Dictionary compiled to '{}'", out.display());
        return Ok(());
    }

    let config = MorphologyConfig {
        strip_prefixes: !cli.no_prefixes,
        prefix_order: if cli.longest_prefix_first {
            PrefixOrder::LongestFirst
        } else {
            PrefixOrder::Store
        },
    };
    let lexicon = Lexicon::new(Morphology::with_config(store, config));

    if cli.words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                report(&lexicon, line.trim(), cli)?;
            }
        }
    } else {
        for word in &cli.words {
            report(&lexicon, word, cli)?;
        }
    }
    Ok(())
}

fn report<S: morph_core::LexicalStore>(
    lexicon: &Lexicon<S>,
    word: &str,
    cli: &Cli,
) -> Result<(), MorphError> {
    let mut analyses = match lexicon.analyze(word) {
        Ok(analyses) => analyses,
        Err(MorphError::UnknownWord { .. }) => Vec::new(),
        Err(e) => return Err(e),
    };
    if let Some(top) = cli.top {
        analyses.truncate(top);
    }

    if cli.json {
        let report = WordReport { word, known: !analyses.is_empty(), analyses: &analyses };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{json}");
        return Ok(());
    }

    if analyses.is_empty() {
        println!("{} {}", style(word).bold(), MorphError::unknown_word(word).to_string().red());
        return Ok(());
    }

    println!("{}", style(word).bold());
    for (i, a) in analyses.iter().enumerate() {
        println!(
            "  {}: {} {} [{}] stem={} suffix={} lemma={} (freq {})",
            i + 1,
            a.rule_form.to_string().dark_grey(),
            style(&a.pattern.pos).green(),
            a.pattern.grammemes.join(","),
            a.stem,
            a.suffix,
            style(&a.lemma).cyan(),
            a.rule.frequency
        );
    }
    Ok(())
}
