// spellrank-distance: Print the detailed edit distance between word pairs.
//
// Reads pairs from stdin (one per line, separated by a tab or a space), or
// takes a single pair from the arguments.
//
// Usage:
//   spellrank-distance [OPTIONS] [WORD1 WORD2]
//
// Options:
//   --json       Print one JSON object per pair
//   -h, --help   Print help

use std::io::{self, BufRead, Write};

use serde_json::json;
use spellrank_distance::{DEFAULT_DISTANCE_CAP, capped_distance, compare, jaro_winkler};

fn report(a: &str, b: &str, json_output: bool, out: &mut impl Write) {
    let ops = compare(a, b);
    let capped = capped_distance(a, b, DEFAULT_DISTANCE_CAP);
    let similarity = jaro_winkler(a, b);
    let _ = if json_output {
        writeln!(
            out,
            "{}",
            json!({
                "source": a,
                "target": b,
                "distance": ops.value(),
                "operations": ops,
                "capped": capped,
                "jaro_winkler": similarity,
            })
        )
    } else {
        writeln!(
            out,
            "{a} -> {b}: {} (ins {}, del {}, rep {}, trans {}; capped {capped}, jw {similarity:.4})",
            ops.value(),
            ops.inserts,
            ops.deletes,
            ops.replaces,
            ops.transposes,
        )
    };
}

fn main() {
    spellrank_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if spellrank_cli::wants_help(&args) {
        println!("spellrank-distance: Detailed Damerau-Levenshtein distance.");
        println!();
        println!("Usage: spellrank-distance [OPTIONS] [WORD1 WORD2]");
        println!();
        println!("Without WORD arguments, reads pairs from stdin (one per line,");
        println!("separated by a tab or a space).");
        println!();
        println!("Options:");
        println!("  --json       Print one JSON object per pair");
        println!("  -h, --help   Print this help");
        return;
    }

    let json_output = args.iter().any(|a| a == "--json");
    let words = spellrank_cli::positional(&args, &[]);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match words.as_slice() {
        [] => {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("error reading stdin: {e}");
                        break;
                    }
                };
                let line = line.trim_end_matches(['\r', '\n']);
                if line.trim().is_empty() {
                    continue;
                }
                let pair = line.split_once('\t').or_else(|| line.split_once(' '));
                match pair {
                    Some((a, b)) => report(a, b, json_output, &mut out),
                    None => eprintln!("skipping line without a pair: {line}"),
                }
            }
        }
        [a, b] => report(a, b, json_output, &mut out),
        _ => spellrank_cli::fatal("expected exactly two words"),
    }
}
