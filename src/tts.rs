use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{error, info};

use crate::error::{PipelineError, PipelineResult};
use crate::ffmpeg;

/// Synthesize speech for `text` into a wav file by piping the narration into
/// the piper TTS engine.
pub fn synthesize(model: &str, text: &str, out_path: &str) -> PipelineResult<()> {
    info!("Generating speech into {}", out_path);

    let mut child = Command::new("piper")
        .args(["--model", model, "--output_file", out_path])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        error!("TTS engine failed for {}", out_path);
        return Err(PipelineError::Tts {
            output: out_path.to_string(),
        });
    }
    Ok(())
}

/// Re-time speech with a tempo-only filter, preserving pitch. `rate` above
/// 1.0 speeds the narration up, below 1.0 slows it down.
pub fn retime(input: &str, output: &str, rate: f64) -> PipelineResult<()> {
    info!("Applying audio speed multiplier of {rate}x");
    let args: Vec<String> = vec![
        "-i".into(),
        input.into(),
        "-af".into(),
        format!("atempo={rate}"),
        "-y".into(),
        output.into(),
    ];
    ffmpeg::run_ffmpeg(&args)
}
