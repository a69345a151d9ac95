use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised while assembling a single video.
///
/// Everything here is caught at the batch loop so one bad video never
/// takes down the remaining queue.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("clip pool is empty, run the splitter over the footage directory first")]
    EmptyPool,

    #[error("TTS engine failed for {output}: exited with non-zero status")]
    Tts { output: String },

    #[error("transcoder command failed: {command}\n{stderr}")]
    TranscoderFailed { command: String, stderr: String },

    #[error("alignment service returned no usable word timings")]
    NoAlignedWords,

    #[error("speech length {secs:.1}s outside accepted window {min}..{max}s")]
    Rejected { secs: f64, min: i64, max: i64 },

    #[error("alignment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed aligner response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read wav file: {0}")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn transcoder_failed(command: &[String], stderr: impl Into<String>) -> Self {
        Self::TranscoderFailed {
            command: command.join(" "),
            stderr: stderr.into(),
        }
    }
}
