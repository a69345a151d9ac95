use std::process::Command;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// Hardware acceleration used by transcoder invocations. Each variant maps
/// to the decode flags passed before the inputs and the H.264 encoder to
/// use for outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Acceleration {
    None,
    IntelQsv,
    NvidiaCuda,
    AmdAmf,
    Vaapi,
    Metal,
}

impl Acceleration {
    pub fn decode_args(self) -> &'static [&'static str] {
        match self {
            Acceleration::None => &[],
            Acceleration::IntelQsv => &["-hwaccel", "qsv"],
            Acceleration::NvidiaCuda => &["-hwaccel", "cuda"],
            Acceleration::AmdAmf => &["-hwaccel", "d3d11va"],
            Acceleration::Vaapi => &["-hwaccel", "vaapi"],
            Acceleration::Metal => &["-hwaccel", "videotoolbox"],
        }
    }

    pub fn encode_codec(self) -> &'static str {
        match self {
            Acceleration::None => "libx264",
            Acceleration::IntelQsv => "h264_qsv",
            Acceleration::NvidiaCuda => "h264_nvenc",
            Acceleration::AmdAmf => "h264_amf",
            Acceleration::Vaapi => "h264_vaapi",
            Acceleration::Metal => "h264_videotoolbox",
        }
    }
}

/// Run ffmpeg to completion, capturing diagnostics. On non-zero exit the
/// error carries both the full command line and the engine's stderr.
pub fn run_ffmpeg(args: &[String]) -> PipelineResult<()> {
    debug!("ffmpeg {}", args.join(" "));
    let output = Command::new("ffmpeg").args(args).output()?;
    if !output.status.success() {
        let mut command = vec!["ffmpeg".to_string()];
        command.extend_from_slice(args);
        return Err(PipelineError::transcoder_failed(
            &command,
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(())
}

/// Length of a media container in seconds, via ffprobe.
pub fn media_duration_seconds(path: &str) -> PipelineResult<f64> {
    let args = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
        path,
    ];
    let output = Command::new("ffprobe").args(args).output()?;
    let command = || {
        let mut c = vec!["ffprobe".to_string()];
        c.extend(args.iter().map(|a| a.to_string()));
        c
    };
    if !output.status.success() {
        return Err(PipelineError::transcoder_failed(
            &command(),
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    let text = String::from_utf8_lossy(&output.stdout);
    text.trim().parse::<f64>().map_err(|_| {
        PipelineError::transcoder_failed(&command(), format!("unparsable duration: {text}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_maps_to_encoder() {
        assert_eq!(Acceleration::None.encode_codec(), "libx264");
        assert_eq!(Acceleration::NvidiaCuda.encode_codec(), "h264_nvenc");
        assert!(Acceleration::None.decode_args().is_empty());
        assert_eq!(Acceleration::Vaapi.decode_args(), ["-hwaccel", "vaapi"]);
    }
}
