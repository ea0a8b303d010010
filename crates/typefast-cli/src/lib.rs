// typefast-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use typefast_core::policy::DelimiterPolicy;
use typefast_game::config::GameConfig;
use typefast_text::corpus::Corpus;

/// Environment variable naming the corpus file.
pub const CORPUS_ENV: &str = "TYPEFAST_CORPUS";

/// Corpus location relative to the working directory.
const DEFAULT_CORPUS: &str = "res/dict/mobydick.txt";

/// Options shared by every tool.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Corpus text file (falls back to $TYPEFAST_CORPUS, then ./res/dict/mobydick.txt)
    #[arg(short, long)]
    pub corpus: Option<PathBuf>,

    /// JSON game configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for word sampling and placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep apostrophes inside words
    #[arg(long)]
    pub apostrophe: bool,

    /// Keep hyphens inside words
    #[arg(long)]
    pub hyphen: bool,

    /// Keep all punctuation inside words
    #[arg(long)]
    pub punctuation: bool,

    /// Keep digits inside words
    #[arg(long)]
    pub digits: bool,

    /// Do not lowercase words
    #[arg(long)]
    pub keep_case: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Apply the delimiter flags on top of `policy`. Flags only ever widen it.
    pub fn delimiter_policy(&self, policy: DelimiterPolicy) -> DelimiterPolicy {
        DelimiterPolicy {
            only_lowercase: policy.only_lowercase && !self.keep_case,
            allow_apostrophe: policy.allow_apostrophe || self.apostrophe,
            allow_hyphen: policy.allow_hyphen || self.hyphen,
            allow_punctuation: policy.allow_punctuation || self.punctuation,
            allow_digits: policy.allow_digits || self.digits,
        }
    }

    /// Load the config file (or defaults) with the delimiter flags applied.
    pub fn game_config(&self) -> Result<GameConfig, String> {
        let mut config = load_config(self.config.as_deref())?;
        config.delimiters = self.delimiter_policy(config.delimiters);
        Ok(config)
    }

    /// RNG seeded from `--seed` plus `stream`, or from entropy.
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read and validate a JSON config; `None` gives the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig, String> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    config
        .validate()
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    Ok(config)
}

/// Find and read the corpus.
///
/// An explicit path is used as given. Otherwise the search order is:
/// 1. `TYPEFAST_CORPUS` environment variable
/// 2. `./res/dict/mobydick.txt`
pub fn load_corpus(explicit: Option<&Path>) -> Result<Corpus, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => locate_corpus(&build_search_paths())?,
    };
    Corpus::from_path(&path).map_err(|e| e.to_string())
}

/// First existing file in `paths`.
fn locate_corpus(paths: &[PathBuf]) -> Result<PathBuf, String> {
    paths.iter().find(|p| p.is_file()).cloned().ok_or_else(|| {
        format!(
            "could not find a corpus in any of the search paths:\n{}",
            paths
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n")
        )
    })
}

fn build_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = std::env::var(CORPUS_ENV) {
        paths.push(PathBuf::from(env_path));
    }
    paths.push(PathBuf::from(DEFAULT_CORPUS));
    paths
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("typefast-cli-{}", process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(flags: &[&str]) -> CommonArgs {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(flatten)]
            common: CommonArgs,
        }
        let argv = std::iter::once("test").chain(flags.iter().copied());
        Cli::parse_from(argv).common
    }

    // -- config --

    #[test]
    fn no_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn config_file_is_read_and_validated() {
        let good = temp_file("good.json", r#"{"wpm_target": 90}"#);
        assert_eq!(load_config(Some(&good)).unwrap().wpm_target, 90);

        let bad = temp_file("bad.json", r#"{"wpm_target_min": 0}"#);
        assert!(load_config(Some(&bad)).unwrap_err().contains("wpm target"));

        let broken = temp_file("broken.json", "{");
        assert!(load_config(Some(&broken)).is_err());
    }

    // -- flags --

    #[test]
    fn delimiter_flags_widen_policy() {
        let policy = args(&["--hyphen", "--keep-case"]).delimiter_policy(DelimiterPolicy::default());
        assert!(policy.allow_hyphen);
        assert!(!policy.only_lowercase);
        assert!(!policy.allow_digits);
    }

    #[test]
    fn seeded_rng_is_repeatable() {
        use rand::Rng;
        let a = args(&["--seed", "5"]);
        let x: u64 = a.rng(1).gen_range(0..u64::MAX);
        let y: u64 = a.rng(1).gen_range(0..u64::MAX);
        assert_eq!(x, y);
    }

    // -- corpus --

    #[test]
    fn explicit_corpus_path() {
        let path = temp_file("corpus.txt", "one two");
        assert_eq!(load_corpus(Some(&path)).unwrap().len(), 7);
        assert!(load_corpus(Some(Path::new("/no/such/corpus.txt"))).is_err());
    }

    #[test]
    fn locate_reports_searched_paths() {
        let missing = vec![PathBuf::from("/no/such/a.txt"), PathBuf::from("/no/such/b.txt")];
        let err = locate_corpus(&missing).unwrap_err();
        assert!(err.contains("/no/such/a.txt"));
        assert!(err.contains("/no/such/b.txt"));

        let found = temp_file("found.txt", "x");
        let paths = vec![PathBuf::from("/no/such/a.txt"), found.clone()];
        assert_eq!(locate_corpus(&paths).unwrap(), found);
    }
}
