//! Test helpers for staging request files in a temporary workspace.

use super::*;
use crate::commands::Capabilities;
use alumni_match_core::{
    CapabilityError, Sentiment, SentimentResult, TextClassifier, Topic, TopicExtractor,
    TopicSummary,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `request` as JSON under `name` and return its path.
    pub(super) fn request(&self, name: &str, request: &serde_json::Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(request).expect("serialise request");
        write_utf8(&path, &payload);
        path
    }
}

/// Parse `argv` and run the selected command, capturing stdout.
pub(super) fn run_cli(
    argv: &[&str],
    capabilities: Capabilities<'_>,
) -> (Result<(), CliError>, String) {
    let mut stdout = Vec::new();
    let outcome = Cli::try_parse_from(argv.iter().copied())
        .map_err(CliError::from)
        .and_then(|cli| cli.command.execute(capabilities, &mut stdout));
    let printed = String::from_utf8(stdout).expect("stdout utf-8");
    (outcome, printed)
}

/// Classifier that calls every text positive.
pub(super) struct AlwaysPositive;

impl TextClassifier for AlwaysPositive {
    fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, CapabilityError> {
        Ok(texts
            .iter()
            .map(|_| SentimentResult {
                sentiment: Sentiment::Positive,
                confidence: 0.8,
                scores: BTreeMap::from([
                    (Sentiment::Positive, 0.8),
                    (Sentiment::Neutral, 0.1),
                    (Sentiment::Negative, 0.1),
                ]),
            })
            .collect())
    }
}

/// Extractor that reports one keyword per requested topic.
pub(super) struct KeywordPerTopic;

impl TopicExtractor for KeywordPerTopic {
    fn extract(
        &self,
        texts: &[String],
        num_topics: usize,
    ) -> Result<TopicSummary, CapabilityError> {
        Ok(TopicSummary {
            topics: texts
                .iter()
                .take(num_topics)
                .enumerate()
                .map(|(topic_id, text)| Topic {
                    topic_id,
                    keywords: vec![text.clone()],
                    weights: vec![1.0],
                })
                .collect(),
            coherence_score: 0.4,
        })
    }
}
