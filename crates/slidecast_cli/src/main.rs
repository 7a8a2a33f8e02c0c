use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use slidecast_core::config::ConfigManager;
use slidecast_core::logging::{init_tracing, LogLevel};
use slidecast_core::pipeline::run_lesson;
use slidecast_core::script;
use slidecast_core::segmentation::{segment_file, SegmentationOutcome, SilenceConfig};

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    /// Config file path (created with defaults if missing).
    #[arg(long, default_value = "slidecast.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a narration recording into per-slide clips at silence gaps.
    Segment(SegmentArgs),
    /// Build a lesson video from its directory (requires `ffmpeg` on PATH).
    Build(BuildArgs),
    /// Print per-slide narration text extracted from a script.
    ScriptTexts(ScriptTextsArgs),
}

#[derive(Parser, Debug)]
struct SegmentArgs {
    /// Input audio recording.
    input: PathBuf,

    /// Directory for the exported slide_NN.wav clips.
    #[arg(long, default_value = "segments")]
    output_dir: PathBuf,

    /// Minimum silence run that counts as a boundary, seconds.
    #[arg(long)]
    min_silence: Option<f64>,

    /// Absolute amplitude at or below which a sample is silent.
    #[arg(long)]
    threshold: Option<f64>,

    /// Report the planned cuts without writing any files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the dry-run report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Lesson directory (script.txt, audios/, frames/).
    lesson_dir: PathBuf,

    /// Override the configured CRF.
    #[arg(long)]
    crf: Option<u32>,

    /// Override the configured x264 preset.
    #[arg(long)]
    preset: Option<String>,

    /// Encode with an explicit video bitrate (e.g. 6M) instead of CRF.
    #[arg(long)]
    bitrate: Option<String>,

    /// Override the configured output frame rate.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct ScriptTextsArgs {
    /// Script file with slide markers.
    script: PathBuf,

    /// Print as JSON instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("load config '{}'", cli.config.display()))?;

    let settings = config.settings().clone();
    let level = LogLevel::from_config_str(&settings.logging.level);
    let logs_folder = settings
        .logging
        .file_logging
        .then(|| PathBuf::from(&settings.paths.logs_folder));
    let _guard = init_tracing(level, logs_folder.as_deref())?;

    match cli.cmd {
        Command::Segment(args) => cmd_segment(args, &settings),
        Command::Build(args) => cmd_build(args, settings),
        Command::ScriptTexts(args) => cmd_script_texts(args),
    }
}

fn cmd_segment(
    args: SegmentArgs,
    settings: &slidecast_core::config::Settings,
) -> anyhow::Result<()> {
    let seg = &settings.segmentation;
    let config = SilenceConfig {
        min_silence_secs: args.min_silence.unwrap_or(seg.min_silence_secs),
        amplitude_threshold: args.threshold.unwrap_or(seg.amplitude_threshold),
    };

    let outcome = segment_file(
        &args.input,
        &args.output_dir,
        &config,
        seg.detection_sample_rate,
        args.dry_run,
    )
    .with_context(|| format!("segment '{}'", args.input.display()))?;

    match outcome {
        SegmentationOutcome::DryRun(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} silences, {} segments planned:",
                    report.silences.len(),
                    report.segments.len()
                );
                for seg in &report.segments {
                    println!(
                        "  segment {:02}: {:.2}s .. {:.2}s ({:.2}s)",
                        seg.index,
                        seg.start_secs,
                        seg.end_secs,
                        seg.end_secs - seg.start_secs
                    );
                }
            }
        }
        SegmentationOutcome::Written(paths) => {
            eprintln!("wrote {} clips to {}", paths.len(), args.output_dir.display());
        }
    }
    Ok(())
}

fn cmd_build(
    args: BuildArgs,
    mut settings: slidecast_core::config::Settings,
) -> anyhow::Result<()> {
    if let Some(crf) = args.crf {
        settings.encode.crf = crf;
    }
    if let Some(preset) = args.preset {
        settings.encode.preset = preset;
    }
    if let Some(fps) = args.fps {
        settings.encode.fps = fps;
    }
    if args.bitrate.is_some() {
        settings.encode.bitrate = args.bitrate;
    }

    let state = run_lesson(&args.lesson_dir, &settings)
        .with_context(|| format!("build lesson '{}'", args.lesson_dir.display()))?;

    let output = state
        .output
        .context("pipeline finished without recording an output path")?;
    eprintln!("wrote {}", output.display());
    Ok(())
}

fn cmd_script_texts(args: ScriptTextsArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let texts = script::slide_texts(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&texts)?);
    } else {
        for (slide, narration) in &texts {
            println!("slide_{slide}:");
            for line in wrap_preview(narration) {
                println!("  {line}");
            }
        }
    }
    Ok(())
}

/// Split long narration onto rough 80-column lines for terminal output.
fn wrap_preview(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > 80 {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
