use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FeedError {
    #[error("source request failed: {0}")]
    SourceHttp(String),

    #[error("source returned status {status}: {message}")]
    SourceStatus { status: u16, message: String },

    #[error("invalid JSON from source: {0}")]
    InvalidJson(String),

    #[error("unexpected source payload: {0}")]
    UnexpectedPayload(String),

    #[error("invalid numbering mode: {0} (expected stable or random)")]
    InvalidNumberingMode(String),

    #[error("channel number out of range: {0}")]
    ChannelNumberRange(u16),

    #[error("channel number space exhausted: batch holds more than 9999 playable records")]
    NumberSpaceExhausted,

    #[error("selection rules mismatched: {names} names vs {replacements} replacements")]
    RuleCountMismatch { names: usize, replacements: usize },

    #[error("no selection rules provided")]
    RulesMissing,

    #[error("failed to read rules file at {0}")]
    RulesRead(Utf8PathBuf),

    #[error("failed to parse rules file: {0}")]
    RulesParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
