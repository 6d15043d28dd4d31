//! Command-line interface for lexitrie
//!
//! Usage:
//!   lexitrie [OPTIONS] <TEXT>
//!   cat subtitles.txt | lexitrie
//!
//! Options:
//!   -i, --irregular <FILE>  Irregular forms table (TSV)
//!   -e, --english           Use the built-in English irregular forms
//!   -v, --vocab <FILE>      Tracked vocabulary (JSON array)
//!   -m, --min <N>           Only show families occurring at least N times
//!       --no-collapse       Do not fold regular inflections into stems
//!   -j, --json              Output as JSON
//!   -h, --help              Show help

use lexitrie::{IndexOptions, Indexer, IndexerBuilder};
use std::env;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn print_help() {
    eprintln!(
        r#"lexitrie - Index text into word families

USAGE:
    lexitrie [OPTIONS] [TEXT]
    cat subtitles.txt | lexitrie

OPTIONS:
    -i, --irregular <FILE>  Irregular forms table (stem<TAB>form...)
    -e, --english           Use the built-in English irregular forms
    -v, --vocab <FILE>      Tracked vocabulary (JSON array of words)
    -m, --min <N>           Only show families occurring at least N times
        --no-collapse       Do not fold regular inflections into stems
    -j, --json              Output as JSON
    -h, --help              Show this help message

Set RUST_LOG=lexitrie=debug to trace the pipeline stages.

EXAMPLES:
    lexitrie -e "The cat runs. The cats ran fast."
    lexitrie -v vocab.json -m 2 < article.txt
    lexitrie -i irregular.tsv -j "Children went home."
"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut builder = IndexerBuilder::new();
    let mut options = IndexOptions::default();
    let mut json_output = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-e" | "--english" => {
                builder = builder.english_irregulars();
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "--no-collapse" => {
                options.collapse_suffixes = false;
            }
            "-i" | "--irregular" | "-v" | "--vocab" | "-m" | "--min" => {
                let flag = args[i].clone();
                i += 1;
                let Some(value) = args.get(i) else {
                    fail(format!("{} requires a value", flag));
                };
                builder = match flag.as_str() {
                    "-i" | "--irregular" => builder.irregulars_file(value).unwrap_or_else(|e| fail(e)),
                    "-v" | "--vocab" => builder.tracked_words_file(value).unwrap_or_else(|e| fail(e)),
                    _ => {
                        options.min_occurrences = value
                            .parse()
                            .unwrap_or_else(|_| fail(format!("invalid count for {}: {}", flag, value)));
                        builder
                    }
                };
            }
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read from stdin if no text provided
    let input_text = match text {
        Some(t) => t,
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(format!("reading stdin: {}", e));
            }
            buffer
        }
    };

    if input_text.trim().is_empty() {
        eprintln!("Error: No input text provided");
        print_help();
        std::process::exit(1);
    }

    let indexer: Indexer = builder.options(options).build();
    let report = indexer.index(&input_text);

    // Output
    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("serializing to JSON: {}", e)),
        }
    } else {
        for row in &report.rows {
            println!(
                "{}\t{}\t{}\t{}",
                row.stem(),
                row.tracked_word.learning_phase,
                row.occurrence_count(),
                row.forms().join(",")
            );
            for occurrence in &row.word_occurrences {
                if let Some(sentence) = report.sentence(occurrence.sentence_id) {
                    println!(
                        "    [{}] {}",
                        occurrence.sentence_id,
                        occurrence.highlight(sentence, "[", "]")
                    );
                }
            }
        }
    }
}
