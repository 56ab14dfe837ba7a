//! Command-line interface for the alumni matching engine.
//!
//! Every subcommand reads one JSON request file, runs the matching engine
//! and prints the pretty-printed JSON response to stdout, or to `--output`.
//! Options can also come from configuration files and
//! `ALUMNI_MATCH_CMDS_<COMMAND>_<FIELD>` environment variables.
#![forbid(unsafe_code)]

mod commands;
mod error;
mod logging;

use std::io::Write;

use clap::{Parser, Subcommand};

use commands::{
    Capabilities, EngagementArgs, ExplainArgs, MatchArgs, RankArgs, SentimentArgs, TopicsArgs,
};
pub use error::CliError;

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_LOG_LEVEL: &str = "log-level";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// request loading, scoring or writing the response fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init(cli.log_level.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    cli.command.execute(Capabilities::default(), &mut stdout)
}

#[derive(Debug, Parser)]
#[command(
    name = "alumni-match",
    about = "Mentor matching, candidate ranking and engagement scoring",
    version
)]
struct Cli {
    /// Log filter directive, e.g. `debug` or `alumni_match_ranker=debug`.
    /// Overrides `RUST_LOG`.
    #[arg(long = ARG_LOG_LEVEL, value_name = "filter", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one candidate for one seeker.
    Match(MatchArgs),
    /// Rank candidates for a seeker.
    Rank(RankArgs),
    /// Explain the match between a seeker and a candidate.
    Explain(ExplainArgs),
    /// Calculate a user's engagement score.
    Engagement(EngagementArgs),
    /// Classify the sentiment of a batch of texts.
    Sentiment(SentimentArgs),
    /// Extract topics from a batch of texts.
    Topics(TopicsArgs),
}

impl Command {
    fn execute(
        self,
        capabilities: Capabilities<'_>,
        writer: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self {
            Self::Match(args) => commands::run_match(args, writer),
            Self::Rank(args) => commands::run_rank(args, writer),
            Self::Explain(args) => commands::run_explain(args, writer),
            Self::Engagement(args) => commands::run_engagement(args, writer),
            Self::Sentiment(args) => {
                commands::run_sentiment(args, capabilities.classifier, writer)
            }
            Self::Topics(args) => commands::run_topics(args, capabilities.topics, writer),
        }
    }
}

#[cfg(test)]
mod tests;
