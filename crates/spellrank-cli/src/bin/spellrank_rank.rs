// spellrank-rank: Re-rank spelling suggestions read from TSV input.
//
// Each input line has four tab-separated fields:
//   sentence  misspelled-word  start-offset  cand1|cand2|...
// The start offset is in characters. Ranked candidates are printed one
// line per input line.
//
// Usage:
//   spellrank-rank [-c CONFIG] [OPTIONS] [FILE...]
//
// Options:
//   -c, --config PATH   Ranker config (JSON)
//   --json              Print one JSON object per line
//   --show-context      Also print the context window of the top suggestion
//   -h, --help          Print help

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use serde_json::json;
use spellrank::orderer::contextual::correction_window;
use spellrank::{RankedSuggestions, SuggestionRanker};

struct Query {
    sentence: String,
    word: String,
    start: usize,
    candidates: Vec<String>,
}

fn parse_line(line: &str) -> Result<Query, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [sentence, word, start, candidates] = fields[..] else {
        return Err(format!("expected 4 tab-separated fields, got {}", fields.len()));
    };
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start offset: {start}"))?;
    let candidates = candidates
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    Ok(Query {
        sentence: sentence.to_string(),
        word: word.to_string(),
        start,
        candidates,
    })
}

fn format_plain(query: &Query, ranked: &RankedSuggestions) -> String {
    let suggestions: Vec<String> = ranked
        .suggestions
        .iter()
        .map(|s| match s.confidence {
            Some(c) => format!("{} ({c:.4})", s.replacement),
            None => s.replacement.clone(),
        })
        .collect();
    let marker = if ranked.auto_correct { " [auto]" } else { "" };
    format!("{}:{marker} {}", query.word, suggestions.join(", "))
}

fn format_json(query: &Query, ranked: &RankedSuggestions) -> String {
    json!({
        "word": query.word,
        "start": query.start,
        "auto_correct": ranked.auto_correct,
        "suggestions": ranked.suggestions,
    })
    .to_string()
}

fn process<R: BufRead>(
    reader: R,
    ranker: &SuggestionRanker,
    json_output: bool,
    context_length: Option<usize>,
    out: &mut impl Write,
) {
    for (n, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading input: {e}");
                break;
            }
        };
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let query = match parse_line(&line) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("line {}: {e}", n + 1);
                continue;
            }
        };

        let ranked = ranker.rank_text(&query.candidates, &query.word, &query.sentence, query.start);
        let text = if json_output {
            format_json(&query, &ranked)
        } else {
            format_plain(&query, &ranked)
        };
        let _ = writeln!(out, "{text}");

        if let (Some(length), Some(top)) = (context_length, ranked.suggestions.first()) {
            let (window, correction) =
                correction_window(&query.sentence, query.start, &query.word, &top.replacement, length);
            let _ = writeln!(out, "  context:    [{}] [{}]", window.left, window.right);
            let _ = writeln!(out, "  corrected:  [{}] [{}]", correction.left, correction.right);
        }
    }
}

fn main() {
    spellrank_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = spellrank_cli::parse_config_path(&args);

    if spellrank_cli::wants_help(&args) {
        println!("spellrank-rank: Re-rank spelling suggestions.");
        println!();
        println!("Usage: spellrank-rank [-c CONFIG] [OPTIONS] [FILE...]");
        println!();
        println!("Reads TSV lines from FILEs or stdin:");
        println!("  sentence<TAB>word<TAB>start<TAB>cand1|cand2|...");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   Ranker config (JSON)");
        println!("  --json              Print one JSON object per line");
        println!("  --show-context      Also print the context window of the top suggestion");
        println!("  -h, --help          Print this help");
        println!();
        println!("Set SPELLRANK_LOG (e.g. spellrank=debug) for diagnostics.");
        return;
    }

    let json_output = args.iter().any(|a| a == "--json");
    let show_context = args.iter().any(|a| a == "--show-context");
    let files = spellrank_cli::positional(&args, &[]);

    let config =
        spellrank_cli::load_config(config_path.as_deref()).unwrap_or_else(|e| spellrank_cli::fatal(&e));
    let ranker = spellrank_cli::build_ranker(&config).unwrap_or_else(|e| spellrank_cli::fatal(&e));
    let context_length = show_context.then_some(config.context_length);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if files.is_empty() {
        process(io::stdin().lock(), &ranker, json_output, context_length, &mut out);
    } else {
        for path in &files {
            let file = File::open(path)
                .unwrap_or_else(|e| spellrank_cli::fatal(&format!("failed to open {path}: {e}")));
            process(BufReader::new(file), &ranker, json_output, context_length, &mut out);
        }
    }
}
