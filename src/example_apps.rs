use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::JourneyConfig;
use crate::constants::sampler::DEFAULT_METHOD_COUNT;
use crate::session::JourneySession;
use crate::source::{DynSource, JsonFileSource};
#[cfg(feature = "http")]
use crate::source::{SheetSource, SheetSourceConfig};
use crate::types::MethodSlot;

#[derive(Debug, Parser)]
#[command(
    name = "shuffle_demo",
    disable_help_subcommand = true,
    about = "Interactive method shuffling over a published sheet",
    long_about = "Derive a random set of methods from a JSON-published spreadsheet (or a local JSON file) and rotate each method through its alternative phrasings.",
    after_help = "Without --file or --endpoint the endpoint is read from JOURNEYS_SHEET_ENDPOINT. Commands: new, shuffle <n>, rename <title>, show, help, quit."
)]
struct ShuffleDemoCli {
    #[arg(long, help = "Sheet endpoint returning rows as a JSON array")]
    endpoint: Option<String>,
    #[arg(
        long,
        conflicts_with = "endpoint",
        help = "Local JSON file with the same row array"
    )]
    file: Option<PathBuf>,
    #[arg(
        long,
        default_value_t = DEFAULT_METHOD_COUNT,
        value_parser = parse_positive_usize,
        help = "Number of methods drawn per topic"
    )]
    count: usize,
    #[arg(long, help = "Seed for reproducible draws and shuffles")]
    seed: Option<u64>,
}

/// One line of user input in the shuffle demo loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DemoCommand {
    New,
    Shuffle(MethodSlot),
    Rename(String),
    Show,
    Help,
    Quit,
}

/// Run the interactive shuffle demo, reading commands from `input` and writing to `output`.
pub fn run_shuffle_demo<I, In, Out>(
    args_iter: I,
    input: In,
    mut output: Out,
) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    In: BufRead,
    Out: Write,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<ShuffleDemoCli, _>(
        std::iter::once("shuffle_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config = JourneyConfig::from_env()?.with_method_count(cli.count);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let source = build_source(&cli)?;
    let mut session = JourneySession::with_cache(config, source, Default::default());

    writeln!(output, "Type 'new' to draw a topic, 'help' for commands.")?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        match command {
            DemoCommand::New => {
                session.derive_topic_set();
                print_topic(&session, &mut output)?;
            }
            DemoCommand::Shuffle(number) => {
                match number.checked_sub(1).map(|slot| session.advance(slot)) {
                    Some(Ok(text)) => writeln!(output, "{number}. {text}")?,
                    _ => writeln!(output, "no method #{number} in the current topic")?,
                }
            }
            DemoCommand::Rename(title) => match session.rename_topic(title) {
                Ok(()) => print_topic(&session, &mut output)?,
                Err(err) => writeln!(output, "{err}")?,
            },
            DemoCommand::Show => print_topic(&session, &mut output)?,
            DemoCommand::Help => writeln!(
                output,
                "new | shuffle <n> | rename <title> | show | help | quit"
            )?,
            DemoCommand::Quit => break,
        }
    }
    Ok(())
}

fn build_source(cli: &ShuffleDemoCli) -> Result<DynSource, Box<dyn Error>> {
    if let Some(path) = &cli.file {
        return Ok(Box::new(JsonFileSource::new("local_file", path)));
    }
    endpoint_source(cli.endpoint.as_deref())
}

#[cfg(feature = "http")]
fn endpoint_source(endpoint: Option<&str>) -> Result<DynSource, Box<dyn Error>> {
    let config = match endpoint {
        Some(endpoint) => SheetSourceConfig::new(endpoint),
        None => SheetSourceConfig::from_env()?,
    };
    Ok(Box::new(SheetSource::new(config)?))
}

#[cfg(not(feature = "http"))]
fn endpoint_source(_endpoint: Option<&str>) -> Result<DynSource, Box<dyn Error>> {
    Err("--file is required when the `http` feature is disabled".into())
}

fn parse_command(line: &str) -> Result<Option<DemoCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));
    let command = match verb.to_ascii_lowercase().as_str() {
        "new" => DemoCommand::New,
        "shuffle" => {
            let number = rest
                .parse::<usize>()
                .ok()
                .filter(|number| *number > 0)
                .ok_or_else(|| format!("shuffle expects a method number, got '{rest}'"))?;
            DemoCommand::Shuffle(number)
        }
        "rename" if !rest.is_empty() => DemoCommand::Rename(rest.to_string()),
        "rename" => return Err("rename expects a title".to_string()),
        "show" => DemoCommand::Show,
        "help" => DemoCommand::Help,
        "quit" | "exit" => DemoCommand::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(command))
}

fn print_topic(session: &JourneySession, output: &mut impl Write) -> std::io::Result<()> {
    let Some(topic) = session.topic() else {
        return writeln!(output, "no topic yet");
    };
    writeln!(output, "--- {} ---", topic.title)?;
    if topic.set.is_empty() {
        return writeln!(output, "(no methods available)");
    }
    for (idx, text) in session.displayed_texts().into_iter().enumerate() {
        writeln!(output, "{}. {}", idx + 1, text)?;
    }
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --count value '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("--count must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
