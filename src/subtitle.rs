use crate::align::WordTiming;
use crate::error::{PipelineError, PipelineResult};

/// Build an SRT document from aligned word timings.
///
/// One cue per word: each cue ends where the next one starts, and the final
/// cue is held for one second. Returns the document together with the total
/// spoken duration, `ceil(last_word.start + 1)` seconds, which sizes the
/// background footage.
pub fn build(word_timings: &[WordTiming]) -> PipelineResult<(String, i64)> {
    let last = word_timings.last().ok_or(PipelineError::NoAlignedWords)?;

    // words stamped with the same start share one cue, so every cue keeps a
    // strictly positive length
    let mut cues: Vec<(f64, String)> = Vec::new();
    for timing in word_timings {
        match cues.last_mut() {
            Some((start, text)) if *start == timing.start => {
                text.push(' ');
                text.push_str(&timing.word);
            }
            _ => cues.push((timing.start, timing.word.clone())),
        }
    }

    let mut srt = String::new();
    for (i, (start, text)) in cues.iter().enumerate() {
        let end = cues.get(i + 1).map(|next| next.0).unwrap_or(start + 1.0);
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_srt_time(*start),
            format_srt_time(end),
            text
        ));
    }

    let total_secs = (last.start + 1.0).ceil() as i64;
    Ok((srt, total_secs))
}

fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_sec = total_ms / 1000;
    let s = total_sec % 60;
    let total_min = total_sec / 60;
    let m = total_min % 60;
    let h = total_min / 60;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(start: f64, word: &str) -> WordTiming {
        WordTiming {
            start,
            word: word.to_string(),
        }
    }

    #[test]
    fn cues_chain_and_last_is_held_one_second() {
        let timings = vec![timing(0.0, "a"), timing(1.2, "b"), timing(2.0, "c")];
        let (srt, total) = build(&timings).unwrap();
        assert_eq!(total, 3);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,200\na\n\n\
             2\n00:00:01,200 --> 00:00:02,000\nb\n\n\
             3\n00:00:02,000 --> 00:00:03,000\nc\n\n"
        );
    }

    #[test]
    fn words_sharing_a_start_merge_into_one_cue() {
        let timings = vec![timing(0.0, "a"), timing(0.0, "b"), timing(1.0, "c")];
        let (srt, total) = build(&timings).unwrap();
        assert_eq!(total, 2);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,000\na b\n\n\
             2\n00:00:01,000 --> 00:00:02,000\nc\n\n"
        );
    }

    #[test]
    fn total_duration_rounds_up() {
        let (_, total) = build(&[timing(3.2, "word")]).unwrap();
        assert_eq!(total, 5); // 3.2 + 1.0 rounded up
    }

    #[test]
    fn no_words_is_an_error() {
        assert!(build(&[]).is_err());
    }

    #[test]
    fn srt_timestamp_format() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(61.205), "00:01:01,205");
        assert_eq!(format_srt_time(3661.0), "01:01:01,000");
    }
}
