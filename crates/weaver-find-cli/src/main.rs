use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use weaver_editor_search::{Document, EditorSession, QueryMode, SearchHost, SearchOptions};

use clap::{Parser, Subcommand};

mod config;

use config::{FindConfig, default_config_path};

#[derive(Parser)]
#[command(version, about = "Find and remove text in weaver editor documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config file (default: <config dir>/weaver/find.kdl)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Match letter case exactly
    #[arg(long, global = true, overrides_with = "ignore_case")]
    case_sensitive: bool,

    /// Ignore letter case, even if the config says otherwise
    #[arg(long, global = true, overrides_with = "case_sensitive")]
    ignore_case: bool,

    /// Treat the query as a regular expression
    #[arg(long, global = true, overrides_with = "literal")]
    regex: bool,

    /// Match the query as typed, even if the config says otherwise
    #[arg(long, global = true, overrides_with = "regex")]
    literal: bool,

    /// Log search activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every occurrence of a query
    Find {
        /// Document in editor JSON format
        file: PathBuf,

        query: String,
    },
    /// Remove every occurrence of a query in one edit
    Remove {
        /// Document in editor JSON format
        file: PathBuf,

        query: String,

        /// Where to write the edited document (default: overwrite FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => FindConfig::load(&path)?,
        None => FindConfig::default(),
    };

    let options = search_options(&cli, &config);

    match cli.command {
        Commands::Find { file, query } => {
            let mut session = open_session(&file, options, &config)?;
            find(&mut session, &query)?;
        }
        Commands::Remove {
            file,
            query,
            output,
            yes,
        } => {
            let mut session = open_session(&file, options, &config)?;
            let dest = output.unwrap_or_else(|| file.clone());
            remove(&mut session, &query, &dest, yes)?;
        }
    }

    Ok(())
}

/// Settings from the config file, with any flag given on the command line
/// taking precedence.
fn search_options(cli: &Cli, config: &FindConfig) -> SearchOptions {
    let case_sensitive = flag(cli.case_sensitive, cli.ignore_case).unwrap_or(config.case_sensitive);
    let mode = match flag(cli.regex, cli.literal) {
        Some(true) => QueryMode::Pattern,
        Some(false) => QueryMode::Literal,
        None => config.mode,
    };
    SearchOptions::new().case_sensitive(case_sensitive).mode(mode)
}

/// Resolve an on/off flag pair. `None` when neither was given.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn open_session(file: &Path, options: SearchOptions, config: &FindConfig) -> Result<EditorSession> {
    let source = std::fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read {}", file.display()))?;
    let document = Document::from_json(&source)?;

    let mut session = EditorSession::new(document)
        .with_options(options)
        .with_history_depth(config.history_depth);
    session.subscribe(|state| {
        tracing::debug!(
            query = state.query(),
            matches = state.len(),
            case_sensitive = state.case_sensitive(),
            "search state changed"
        );
    });
    Ok(session)
}

/// Search and print matches. Returns the number of matches.
fn find(session: &mut EditorSession, query: &str) -> Result<usize> {
    if !session.find_text(query)? {
        println!("⚠ Empty query, nothing to search for");
        return Ok(0);
    }

    let matches = session.matches();
    if matches.is_empty() {
        println!("No matches for {query:?}");
        return Ok(0);
    }

    for m in matches.iter() {
        println!("  {m}");
    }
    println!("✓ Found {} occurrence(s)", matches.len());
    Ok(matches.len())
}

fn remove(session: &mut EditorSession, query: &str, dest: &Path, yes: bool) -> Result<()> {
    let count = find(session, query)?;
    if count == 0 {
        return Ok(());
    }

    if !yes && !confirm(&format!("Remove {count} occurrence(s)?"))? {
        println!("Aborted, nothing changed");
        return Ok(());
    }

    if !session.remove_text(query)? {
        println!("No matches for {query:?}");
        return Ok(());
    }

    let json = session.document().to_json()?;
    std::fs::write(dest, json)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not write {}", dest.display()))?;

    println!("✓ Removed {count} occurrence(s)");
    println!("✓ Output: {}", dest.display());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().into_diagnostic()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .into_diagnostic()?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str], config: &FindConfig) -> SearchOptions {
        let cli = Cli::try_parse_from(args).unwrap();
        search_options(&cli, config)
    }

    fn strict_config() -> FindConfig {
        FindConfig {
            case_sensitive: true,
            mode: QueryMode::Pattern,
            ..FindConfig::default()
        }
    }

    #[test]
    fn test_config_used_without_flags() {
        let opts = options(&["weaver-find", "find", "doc.json", "q"], &strict_config());
        assert!(opts.case_sensitive);
        assert_eq!(opts.mode, QueryMode::Pattern);
    }

    #[test]
    fn test_flags_switch_config_off() {
        let opts = options(
            &["weaver-find", "find", "doc.json", "q", "--ignore-case", "--literal"],
            &strict_config(),
        );
        assert!(!opts.case_sensitive);
        assert_eq!(opts.mode, QueryMode::Literal);
    }

    #[test]
    fn test_flags_switch_defaults_on() {
        let opts = options(
            &["weaver-find", "--case-sensitive", "--regex", "find", "doc.json", "q"],
            &FindConfig::default(),
        );
        assert!(opts.case_sensitive);
        assert_eq!(opts.mode, QueryMode::Pattern);
    }

    #[test]
    fn test_last_flag_of_a_pair_wins() {
        let opts = options(
            &[
                "weaver-find",
                "remove",
                "doc.json",
                "q",
                "--case-sensitive",
                "--ignore-case",
                "--literal",
                "--regex",
            ],
            &FindConfig::default(),
        );
        assert!(!opts.case_sensitive);
        assert_eq!(opts.mode, QueryMode::Pattern);
    }
}
