//! Request commands: argument layering, request loading and dispatch.

use std::io::Write;

use alumni_match_core::{
    EngagementRequest, MatchRequest, PairScorer, RankRequest, SentimentRequest, TextClassifier,
    TopicExtractor, TopicsRequest, classify_or_neutral, extract_topics_or_empty,
};
use alumni_match_ranker::{CandidateRanker, RankStrategy, RankerConfig};
use alumni_match_scorer::{EngagementScorer, MatchScorer};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{ARG_OUTPUT, ARG_REQUEST, ARG_STRATEGY, CliError};

pub(crate) const ENV_MATCH_REQUEST: &str = "ALUMNI_MATCH_CMDS_MATCH_REQUEST_PATH";
pub(crate) const ENV_RANK_REQUEST: &str = "ALUMNI_MATCH_CMDS_RANK_REQUEST_PATH";
pub(crate) const ENV_EXPLAIN_REQUEST: &str = "ALUMNI_MATCH_CMDS_EXPLAIN_REQUEST_PATH";
pub(crate) const ENV_ENGAGEMENT_REQUEST: &str = "ALUMNI_MATCH_CMDS_ENGAGEMENT_REQUEST_PATH";
pub(crate) const ENV_SENTIMENT_REQUEST: &str = "ALUMNI_MATCH_CMDS_SENTIMENT_REQUEST_PATH";
pub(crate) const ENV_TOPICS_REQUEST: &str = "ALUMNI_MATCH_CMDS_TOPICS_REQUEST_PATH";

/// External text services available to the commands.
#[derive(Clone, Copy, Default)]
pub(crate) struct Capabilities<'a> {
    /// Sentiment classifier; neutral answers when absent.
    pub(crate) classifier: Option<&'a dyn TextClassifier>,
    /// Topic extractor; no topics when absent.
    pub(crate) topics: Option<&'a dyn TopicExtractor>,
}

/// Declares the arguments of a command that only needs a request path and an
/// optional output path.
macro_rules! request_command {
    ($(#[$meta:meta])* $args:ident, name = $name:literal, env = $env:ident) => {
        #[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
        $(#[$meta])*
        #[command(name = $name)]
        #[ortho_config(prefix = "ALUMNI_MATCH")]
        pub(crate) struct $args {
            /// Path to the JSON request file.
            #[arg(value_name = "path")]
            #[serde(default)]
            pub(crate) request_path: Option<Utf8PathBuf>,
            /// Write the JSON response to this file instead of stdout.
            #[arg(long = ARG_OUTPUT, value_name = "path")]
            #[serde(default)]
            pub(crate) output: Option<Utf8PathBuf>,
        }

        impl $args {
            pub(crate) fn into_config(self) -> Result<RequestConfig, CliError> {
                let merged = self.load_and_merge().map_err(CliError::Configuration)?;
                RequestConfig::try_from(merged)
            }
        }

        impl TryFrom<$args> for RequestConfig {
            type Error = CliError;

            fn try_from(args: $args) -> Result<Self, Self::Error> {
                Self::resolve(args.request_path, args.output, $env)
            }
        }
    };
}

request_command!(
    /// Score one candidate for one seeker.
    #[command(about = "Score one candidate for one seeker")]
    MatchArgs,
    name = "match",
    env = ENV_MATCH_REQUEST
);

request_command!(
    /// Explain why a candidate suits a seeker.
    #[command(about = "Explain the match between a seeker and a candidate")]
    ExplainArgs,
    name = "explain",
    env = ENV_EXPLAIN_REQUEST
);

request_command!(
    /// Calculate a user's engagement score.
    #[command(about = "Calculate engagement from activity, messages and posts")]
    EngagementArgs,
    name = "engagement",
    env = ENV_ENGAGEMENT_REQUEST
);

request_command!(
    /// Classify the sentiment of a batch of texts.
    #[command(about = "Classify the sentiment of a batch of texts")]
    SentimentArgs,
    name = "sentiment",
    env = ENV_SENTIMENT_REQUEST
);

request_command!(
    /// Extract topics from a batch of texts.
    #[command(about = "Extract topics from a batch of texts")]
    TopicsArgs,
    name = "topics",
    env = ENV_TOPICS_REQUEST
);

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank candidate profiles for a seeker. The request holds the \
                 seeker, free-form candidate mappings and an optional limit \
                 (default 10). Malformed candidates are reported as skipped.",
    about = "Rank candidates for a seeker"
)]
#[ortho_config(prefix = "ALUMNI_MATCH")]
pub(crate) struct RankArgs {
    /// Path to the JSON request file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the JSON response to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Ranking strategy: `direct` (default) or `distance`.
    #[arg(long = ARG_STRATEGY, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<RankStrategy>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved paths shared by every request command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional response file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RequestConfig {
    fn resolve(
        request_path: Option<Utf8PathBuf>,
        output: Option<Utf8PathBuf>,
        env: &'static str,
    ) -> Result<Self, CliError> {
        let request_path = request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env,
        })?;
        Ok(Self {
            request_path,
            output,
        })
    }

    pub(crate) fn validate_source(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)
    }

    /// Decode the request file as `T`.
    pub(crate) fn load<T: DeserializeOwned>(&self) -> Result<T, CliError> {
        let path = &self.request_path;
        let payload =
            alumni_match_fs::read_document(path).map_err(|source| CliError::OpenRequest {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&payload).map_err(|source| CliError::ParseRequest {
            path: path.clone(),
            source,
        })
    }

    /// Write `response` as pretty JSON to the output file or `writer`.
    pub(crate) fn emit<T: Serialize>(
        &self,
        response: &T,
        writer: &mut dyn Write,
    ) -> Result<(), CliError> {
        let mut payload =
            serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
        payload.push('\n');
        if let Some(path) = &self.output {
            return alumni_match_fs::write_document(path, &payload).map_err(|source| {
                CliError::WriteOutputFile {
                    path: path.clone(),
                    source,
                }
            });
        }
        writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput)
    }
}

/// Resolved `rank` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) request: RequestConfig,
    pub(crate) strategy: RankStrategy,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request = RequestConfig::resolve(args.request_path, args.output, ENV_RANK_REQUEST)?;
        Ok(Self {
            request,
            strategy: args.strategy.unwrap_or_default(),
        })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match alumni_match_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn prepare(config: RequestConfig) -> Result<RequestConfig, CliError> {
    config.validate_source()?;
    Ok(config)
}

pub(crate) fn run_match(args: MatchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = prepare(args.into_config()?)?;
    let request: MatchRequest = config.load()?;
    let result = MatchScorer::new().score(&request.seeker, &request.candidate)?;
    tracing::info!(match_percent = result.match_percent, "scored match request");
    config.emit(&result, writer)
}

pub(crate) fn run_explain(args: ExplainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = prepare(args.into_config()?)?;
    let request: MatchRequest = config.load()?;
    let explanation = MatchScorer::new().explain(&request.seeker, &request.candidate)?;
    config.emit(&explanation, writer)
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let request_config = prepare(config.request)?;
    let request: RankRequest = request_config.load()?;
    let ranker = CandidateRanker::with_config(
        MatchScorer::new(),
        RankerConfig {
            strategy: config.strategy,
        },
    );
    let ranking = ranker.rank_request(&request);
    tracing::info!(
        requested = %config.strategy,
        used = %ranking.strategy,
        matches = ranking.matches.len(),
        skipped = ranking.skipped.len(),
        "ranked candidates"
    );
    request_config.emit(&ranking, writer)
}

pub(crate) fn run_engagement(args: EngagementArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = prepare(args.into_config()?)?;
    let request: EngagementRequest = config.load()?;
    let result = EngagementScorer::new().score_request(&request);
    tracing::info!(user = ?request.user_id, score = result.score, "scored engagement");
    config.emit(&result, writer)
}

pub(crate) fn run_sentiment(
    args: SentimentArgs,
    classifier: Option<&dyn TextClassifier>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = prepare(args.into_config()?)?;
    let request: SentimentRequest = config.load()?;
    if classifier.is_none() {
        tracing::debug!("no text classifier configured; answering neutral");
    }
    let results = classify_or_neutral(classifier, &request.texts);
    config.emit(&results, writer)
}

pub(crate) fn run_topics(
    args: TopicsArgs,
    extractor: Option<&dyn TopicExtractor>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = prepare(args.into_config()?)?;
    let request: TopicsRequest = config.load()?;
    let summary = extract_topics_or_empty(extractor, &request.texts, request.num_topics);
    tracing::info!(
        documents = request.texts.len(),
        requested = request.num_topics,
        extracted = summary.topics.len(),
        "extracted topics"
    );
    config.emit(&summary, writer)
}

#[cfg(test)]
pub(crate) fn rank_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
