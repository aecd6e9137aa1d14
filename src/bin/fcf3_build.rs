//! `fcf3-build` — compiles a word-list text file into an FCF3 container.
//!
//! ```text
//! fcf3-build -i words.txt -o dictionary.fcf3
//! fcf3-build -i words.txt -o dictionary.fcf3 -n case  # case-sensitive dictionary
//! fcf3-build -i words.txt -o dictionary.fcf3 -vv       # trace-level logging
//! ```

use std::fs;
use std::process;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use fcf3::builder::{parse_word_list, Builder};
use fcf3::format::container::write_container;

struct BuilderArgs {
    input: String,
    output: String,
    normalize: bool,
    verbosity: u8,
}

fn parse_args() -> Result<BuilderArgs> {
    let mut input = None;
    let mut output = None;
    let mut normalize = true;
    let mut verbosity = 0u8;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-i" | "--input" => {
                input = Some(it.next().context("-i/--input requires a path")?);
            }
            "-o" | "--output" => {
                output = Some(it.next().context("-o/--output requires a path")?);
            }
            "-n" | "--normalize" => {
                let mode = it.next().context("-n/--normalize requires a mode")?;
                normalize = mode == "lower";
            }
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            "--verbose" => verbosity += 1,
            other => bail!("unrecognized argument: {other}"),
        }
    }

    Ok(BuilderArgs {
        input: input.context("missing required -i/--input <word-list path>")?,
        output: output.context("missing required -o/--output <container path>")?,
        normalize,
        verbosity,
    })
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let level = match args.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading word list {}", args.input))?;
    let words = parse_word_list(&text);
    info!("parsed {} word-list entries from {}", words.len(), args.input);

    let mut builder = Builder::with_normalization(args.normalize);
    for word in &words {
        debug!("inserting {word:?}");
        builder.insert(word);
    }
    let tables = builder.build();
    info!(
        "built trie: {} nodes, {} edges, {} distinct words (length {}..={})",
        tables.nodes.len(),
        tables.edges.len(),
        tables.hashes.len(),
        tables.min_len,
        tables.max_len
    );

    let mut file =
        fs::File::create(&args.output).with_context(|| format!("creating {}", args.output))?;
    write_container(
        &mut file,
        &tables.nodes,
        &tables.edges,
        &tables.hashes,
        tables.min_len,
        tables.max_len,
    )
    .with_context(|| format!("writing container to {}", args.output))?;
    info!("wrote container to {}", args.output);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("fcf3-build: error: {e:#}");
        process::exit(1);
    }
}
