// typefast-replay: Play a headless round from scripted input.
//
// Each stdin line is one word to type. Letters are entered a few per frame,
// then the word is submitted with space. The clock advances by a fixed frame
// time, so a replay with a seed is fully repeatable.
//
// Usage:
//   typefast-replay [-c CORPUS] [--config FILE] [--seed N] < words.txt
//
// Options:
//   --frame-ms MS          Frame length in milliseconds (default 16)
//   --keys-per-frame N     Keystrokes entered per frame (default 1)
//   --warmup-frames N      Frames run before typing starts (default 0)

use std::io::{self, BufRead};
use std::time::Duration;

use clap::Parser;
use tracing::info;
use typefast_cli::{CommonArgs, fatal, init_tracing, load_corpus};
use typefast_game::scroll::MonospaceMeasure;
use typefast_game::session::{GameSession, Key};
use typefast_game::wpm::ManualClock;

/// Replay typed words from stdin against a simulated round.
#[derive(Parser)]
#[command(name = "typefast-replay", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Keystrokes entered per frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    keys_per_frame: u64,

    /// Frames to run before typing starts
    #[arg(long, default_value_t = 0)]
    warmup_frames: u64,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);

    let config = cli.common.game_config().unwrap_or_else(|e| fatal(&e));
    let corpus = load_corpus(cli.common.corpus.as_deref()).unwrap_or_else(|e| fatal(&e));
    let generator = corpus
        .generator_with_rng(&config.delimiters, cli.common.rng(0))
        .unwrap_or_else(|e| fatal(&e.to_string()));

    let clock = ManualClock::new();
    let measure = MonospaceMeasure::default();
    let mut session = GameSession::new(config, generator, &clock, cli.common.rng(1))
        .unwrap_or_else(|e| fatal(&e.to_string()));
    let frame = Duration::from_millis(cli.frame_ms);

    let mut run = |keys: &[Key]| {
        clock.advance(frame);
        session.tick(keys, &measure);
    };

    for _ in 0..cli.warmup_frames {
        run(&[]);
    }

    let mut frames = cli.warmup_frames;
    let mut typed = 0u64;
    for line in io::stdin().lock().lines() {
        let line = line.unwrap_or_else(|e| fatal(&format!("failed to read stdin: {e}")));
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let mut keys: Vec<Key> = word.chars().map(|c| Key::Char(u32::from(c))).collect();
        keys.push(Key::Space);
        for chunk in keys.chunks(cli.keys_per_frame as usize) {
            run(chunk);
            frames += 1;
        }
        typed += 1;
    }

    let stats = session.stats();
    info!(frames, typed, "replay finished");
    println!("typed:        {typed}");
    println!("spawned:      {}", stats.spawned);
    println!("hits:         {}", stats.hits);
    println!("misses:       {}", stats.misses);
    println!("wpm:          {:.1}", stats.wpm);
    println!("adjusted wpm: {:.1}", stats.adjusted_wpm);
}
