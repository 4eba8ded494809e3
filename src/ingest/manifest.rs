//! Job manifest listing the document pairs of one run
//!
//! ```toml
//! [[pairs]]
//! rfp = ["rfp/scope.txt", "rfp/terms.html"]
//! proposal = ["proposal/answer.md"]
//! ```
//!
//! Relative paths resolve against the manifest's own directory.

use crate::errors::{Result, TunerError};
use crate::ingest::decode::decode_file;
use crate::types::{Document, DocumentPair};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Files making up one pair, before decoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PairSpec {
    #[serde(default)]
    pub rfp: Vec<PathBuf>,
    #[serde(default)]
    pub proposal: Vec<PathBuf>,
}

/// All pairs of a job
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobManifest {
    #[serde(default)]
    pub pairs: Vec<PairSpec>,
}

/// A pair that could not be decoded
#[derive(Debug)]
pub struct PairFailure {
    pub index: usize,
    pub error: TunerError,
}

impl JobManifest {
    /// Load manifest, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TunerError::Input {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut manifest: JobManifest = toml::from_str(&contents)
            .map_err(|e| TunerError::Config(format!("Failed to parse manifest: {}", e)))?;

        if let Some(base) = path.parent() {
            manifest.resolve_against(base);
        }
        Ok(manifest)
    }

    /// Single-pair job built from command-line file lists
    pub fn single(rfp: Vec<PathBuf>, proposal: Vec<PathBuf>) -> Self {
        Self {
            pairs: vec![PairSpec { rfp, proposal }],
        }
    }

    fn resolve_against(&mut self, base: &Path) {
        for pair in &mut self.pairs {
            for path in pair.rfp.iter_mut().chain(pair.proposal.iter_mut()) {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    /// Decode every pair. A pair with an unreadable file is reported and
    /// left out; the remaining pairs are unaffected.
    pub fn decode_pairs(&self) -> (Vec<DocumentPair>, Vec<PairFailure>) {
        let mut pairs = Vec::new();
        let mut failures = Vec::new();

        for (index, spec) in self.pairs.iter().enumerate() {
            match decode_pair(spec) {
                Ok(pair) => pairs.push(pair),
                Err(error) => {
                    warn!(pair = index, error = %error, "pair excluded: unreadable file");
                    failures.push(PairFailure { index, error });
                }
            }
        }

        (pairs, failures)
    }
}

fn decode_pair(spec: &PairSpec) -> Result<DocumentPair> {
    Ok(DocumentPair {
        rfp_files: decode_all(&spec.rfp)?,
        proposal_files: decode_all(&spec.proposal)?,
    })
}

fn decode_all(paths: &[PathBuf]) -> Result<Vec<Document>> {
    paths.iter().map(|p| decode_file(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rfp.txt"), "requirement").unwrap();
        fs::write(temp.path().join("proposal.txt"), "answer").unwrap();
        let manifest_path = temp.path().join("job.toml");
        fs::write(
            &manifest_path,
            "[[pairs]]\nrfp = [\"rfp.txt\"]\nproposal = [\"proposal.txt\"]\n",
        )
        .unwrap();

        let manifest = JobManifest::load(&manifest_path).unwrap();
        assert_eq!(manifest.pairs[0].rfp[0], temp.path().join("rfp.txt"));

        let (pairs, failures) = manifest.decode_pairs();
        assert!(failures.is_empty());
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].is_complete());
        assert_eq!(pairs[0].rfp_files[0].content, "requirement");
    }

    #[test]
    fn test_unreadable_file_excludes_only_its_pair() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.txt");
        fs::write(&good, "text").unwrap();

        let manifest = JobManifest {
            pairs: vec![
                PairSpec {
                    rfp: vec![temp.path().join("missing.txt")],
                    proposal: vec![good.clone()],
                },
                PairSpec {
                    rfp: vec![good.clone()],
                    proposal: vec![good],
                },
            ],
        };

        let (pairs, failures) = manifest.decode_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 0);
        assert!(matches!(failures[0].error, TunerError::Input { .. }));
    }

    #[test]
    fn test_missing_proposal_key_gives_incomplete_pair() {
        let manifest: JobManifest = toml::from_str("[[pairs]]\nrfp = [\"a.txt\"]\n").unwrap();
        assert!(manifest.pairs[0].proposal.is_empty());
    }

    #[test]
    fn test_bad_manifest_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("job.toml");
        fs::write(&path, "pairs = 3").unwrap();
        assert!(matches!(JobManifest::load(&path), Err(TunerError::Config(_))));
    }
}
