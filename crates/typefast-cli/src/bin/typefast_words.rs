// typefast-words: Inspect the words a corpus yields.
//
// Loads the corpus, prints how many words and unique words it holds, then
// prints a sample drawn the way the game draws them.
//
// Usage:
//   typefast-words [-c CORPUS] [--config FILE] [-n COUNT] [--seed N] [--dump]

use std::io::{self, Write};

use clap::Parser;
use typefast_cli::{CommonArgs, fatal, init_tracing, load_corpus};

/// Print corpus statistics and sampled words.
#[derive(Parser)]
#[command(name = "typefast-words", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of words to sample
    #[arg(short = 'n', long, default_value_t = 10)]
    samples: usize,

    /// Print the whole dictionary, sorted, instead of samples
    #[arg(long)]
    dump: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);

    let config = cli.common.game_config().unwrap_or_else(|e| fatal(&e));
    let policy = config.delimiters;
    let corpus = load_corpus(cli.common.corpus.as_deref()).unwrap_or_else(|e| fatal(&e));
    let dictionary = corpus
        .dictionary(&policy)
        .unwrap_or_else(|e| fatal(&e.to_string()));
    let mut generator = corpus
        .generator_with_rng(&policy, cli.common.rng(0))
        .unwrap_or_else(|e| fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if cli.dump {
        let mut words: Vec<&str> = dictionary.iter().collect();
        words.sort_unstable();
        for word in words {
            let _ = writeln!(out, "{word}");
        }
        return;
    }

    let _ = writeln!(out, "words:  {}", generator.word_count());
    let _ = writeln!(out, "unique: {}", dictionary.len());
    let _ = writeln!(out);
    for word in generator.by_ref().take(cli.samples) {
        let _ = writeln!(out, "{word}");
    }
}
