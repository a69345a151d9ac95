use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::PipelineResult;

/// Start offset of one spoken word, as reported by the forced aligner.
/// Ordered by start time ascending; words the aligner could not place are
/// dropped rather than padded.
#[derive(Debug, Clone, PartialEq)]
pub struct WordTiming {
    pub start: f64,
    pub word: String,
}

#[derive(Debug, Deserialize)]
struct AlignmentResponse {
    words: Vec<AlignedWord>,
}

#[derive(Debug, Deserialize)]
struct AlignedWord {
    start: Option<f64>,
    word: Option<String>,
}

/// Submit speech audio plus its transcript to a gentle-style forced aligner
/// and return per-word start timestamps.
///
/// Network errors and non-2xx responses propagate; the batch loop decides
/// what a failed video means.
pub async fn align(
    client: &reqwest::Client,
    base_url: &str,
    speech_path: &Path,
    transcript: &str,
) -> PipelineResult<Vec<WordTiming>> {
    let url = format!(
        "{}/transcriptions?async=false",
        base_url.trim_end_matches('/')
    );
    info!("Aligning speech text using {}", url);

    let audio = tokio::fs::read(speech_path).await?;
    let form = reqwest::multipart::Form::new()
        .part(
            "audio",
            reqwest::multipart::Part::bytes(audio)
                .file_name("speech.wav")
                .mime_str("audio/wav")?,
        )
        .part(
            "transcript",
            reqwest::multipart::Part::text(transcript.to_string())
                .file_name("speech.txt")
                .mime_str("text/plain")?,
        );

    let body = client
        .post(&url)
        .multipart(form)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let timings = parse_alignment(&body)?;
    info!("Aligner placed {} words", timings.len());
    Ok(timings)
}

/// Extract word timings from the aligner's JSON body. Words missing either
/// a start timestamp or the word text are silently omitted.
pub fn parse_alignment(body: &str) -> PipelineResult<Vec<WordTiming>> {
    let response: AlignmentResponse = serde_json::from_str(body)?;
    Ok(response
        .words
        .into_iter()
        .filter_map(|w| match (w.start, w.word) {
            (Some(start), Some(word)) => Some(WordTiming { start, word }),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_words_and_drops_unaligned() {
        let body = r#"{
            "words": [
                {"start": 0.0, "word": "hello", "end": 0.4},
                {"word": "mumbled"},
                {"start": 1.2, "word": "world"}
            ]
        }"#;
        let timings = parse_alignment(body).unwrap();
        assert_eq!(
            timings,
            vec![
                WordTiming { start: 0.0, word: "hello".into() },
                WordTiming { start: 1.2, word: "world".into() },
            ]
        );
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(parse_alignment("not json").is_err());
    }
}
