// spellrank-mutate: Generate misspellings for test data.
//
// Applies random edit operations (insert, delete, replace, transpose) to
// each input word and prints the original, the misspelling and the
// operations applied, tab-separated.
//
// Usage:
//   spellrank-mutate [OPTIONS] [WORD...]
//
// Options:
//   --seed N        Random seed (default: random)
//   -n, --count N   Misspellings per word (default: 1)
//   -e, --edits N   Edit operations per misspelling (default: 1)
//   -h, --help      Print help

use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use spellrank_distance::EditOperationCount;
use spellrank_distance::mutation::mutate;

const VALUE_OPTIONS: &[&str] = &["--seed", "-n", "--count", "-e", "--edits"];

fn format_ops(ops: &EditOperationCount) -> String {
    format!(
        "ins={} del={} rep={} trans={}",
        ops.inserts, ops.deletes, ops.replaces, ops.transposes
    )
}

fn main() {
    spellrank_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if spellrank_cli::wants_help(&args) {
        println!("spellrank-mutate: Generate misspellings for test data.");
        println!();
        println!("Usage: spellrank-mutate [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, mutates each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!("Output: word<TAB>misspelling<TAB>operations");
        println!();
        println!("Options:");
        println!("  --seed N        Random seed (default: random)");
        println!("  -n, --count N   Misspellings per word (default: 1)");
        println!("  -e, --edits N   Edit operations per misspelling (default: 1)");
        println!("  -h, --help      Print this help");
        return;
    }

    let seed: Option<u64> = spellrank_cli::option_value(&args, &["--seed"]);
    let count: usize = spellrank_cli::option_value(&args, &["-n", "--count"]).unwrap_or(1);
    let edits: usize = spellrank_cli::option_value(&args, &["-e", "--edits"]).unwrap_or(1);
    let words = spellrank_cli::positional(&args, VALUE_OPTIONS);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut mutate_word = |word: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        for _ in 0..count {
            let (misspelling, ops) = mutate(word, edits, &mut rng);
            let _ = writeln!(out, "{word}\t{misspelling}\t{}", format_ops(&ops));
        }
    };

    if words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if !word.is_empty() {
                mutate_word(word, &mut out);
            }
        }
    } else {
        for word in &words {
            mutate_word(word, &mut out);
        }
    }
}
