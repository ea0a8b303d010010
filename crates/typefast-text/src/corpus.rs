// Corpus loading.
//
// The corpus is plain UTF-8 text with no structure, read fully into memory
// before tokenization. A read failure is fatal to everything built from it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use typefast_core::policy::DelimiterPolicy;

use crate::dictionary::{WordSet, build_dictionary};
use crate::generator::WordGenerator;
use crate::{CorpusError, TokenizeError};

/// Raw corpus bytes.
#[derive(Debug, Clone)]
pub struct Corpus {
    path: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl Corpus {
    /// Read the whole file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let started = Instant::now();
        let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "loaded corpus"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: None,
            bytes: bytes.into(),
        }
    }

    /// Path the corpus was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Build the unique word set.
    pub fn dictionary(&self, policy: &DelimiterPolicy) -> Result<WordSet, TokenizeError> {
        let started = Instant::now();
        let set = build_dictionary(&self.bytes, policy)?;
        info!(
            words = set.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "built dictionary"
        );
        Ok(set)
    }

    /// Build a word generator seeded from entropy.
    pub fn generator(
        &self,
        policy: &DelimiterPolicy,
    ) -> Result<WordGenerator<StdRng>, CorpusError> {
        self.generator_with_rng(policy, StdRng::from_entropy())
    }

    /// Build a word generator drawing from `rng`.
    pub fn generator_with_rng<R: Rng>(
        &self,
        policy: &DelimiterPolicy,
        rng: R,
    ) -> Result<WordGenerator<R>, CorpusError> {
        let started = Instant::now();
        let generator = WordGenerator::load_with_rng(&self.bytes, policy, rng)?;
        info!(
            words = generator.word_count(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "initialized word generator"
        );
        Ok(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_corpus() {
        let corpus = Corpus::from_bytes("Ett två tre ett".as_bytes());
        assert_eq!(corpus.path(), None);
        assert_eq!(corpus.len(), "Ett två tre ett".len());
        let policy = DelimiterPolicy::default();
        assert_eq!(corpus.dictionary(&policy).unwrap().len(), 3);
        assert_eq!(corpus.generator(&policy).unwrap().word_count(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Corpus::from_path("/nonexistent/typefast/corpus.txt").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
        assert!(err.to_string().contains("corpus.txt"));
    }
}
