use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use framegrab::{
    ExtractOptions, ExtractionReport, ExtractionResult, FrameGrabError, FrameSource,
    ProgressCallback, ProgressInfo, Resize, SamplingPlan, SamplingRequest, VideoFile, catalog,
    configuration, prompt,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use serde_json::{Value, json};

const CLI_AFTER_HELP: &str = "Examples:\n  framegrab\n  framegrab --out stills extract video/input.mp4 --count 8\n  framegrab --ext png --width 640 extract input.mkv --count 12 --json\n  framegrab plan input.mp4 --count 5\n  framegrab completions zsh > _framegrab";

#[derive(Debug, Parser)]
#[command(
    name = "framegrab",
    version,
    about = "Grab evenly spaced still frames from a video",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    /// Defaults to the interactive menu when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Args, Clone)]
struct GlobalOptions {
    /// Show debug logging (RUST_LOG overrides).
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while extracting.
    #[arg(long)]
    progress: bool,

    /// Output directory for extracted frames.
    #[arg(long, default_value = configuration::DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Output image extension (jpg, jpeg, png, bmp, tiff, webp).
    #[arg(long, default_value = configuration::DEFAULT_EXTENSION)]
    ext: String,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = configuration::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Scale frames to this width (keeps aspect ratio unless --height is also set).
    #[arg(long)]
    width: Option<u32>,

    /// Scale frames to this height (keeps aspect ratio unless --width is also set).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pick a video from a directory and a frame count at the prompt.
    #[command(
        about = "Choose a video and frame count interactively",
        visible_alias = "menu",
        after_help = "Examples:\n  framegrab interactive\n  framegrab interactive --video-dir clips"
    )]
    Interactive {
        /// Directory listed in the menu.
        #[arg(long, default_value = catalog::DEFAULT_VIDEO_DIR)]
        video_dir: PathBuf,
    },

    /// Extract frames from one video without prompting.
    #[command(
        about = "Extract evenly spaced frames",
        after_help = "Examples:\n  framegrab extract input.mp4 --count 5\n  framegrab --out stills extract input.mp4 -n 10 --json"
    )]
    Extract {
        /// Input video path.
        input: PathBuf,
        /// Number of frames to extract.
        #[arg(short = 'n', long)]
        count: u64,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show which frame positions would be extracted.
    #[command(
        about = "Print the sampling plan without decoding",
        after_help = "Examples:\n  framegrab plan input.mp4 --count 5\n  framegrab plan --frames 100 --count 5"
    )]
    Plan {
        /// Input video path; read only for its frame count.
        input: Option<PathBuf>,
        /// Number of frames to extract.
        #[arg(short = 'n', long)]
        count: u64,
        /// Use this total frame count instead of opening a video.
        #[arg(long)]
        frames: Option<u64>,
        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print video metadata.
    #[command(about = "Print video metadata", visible_alias = "probe")]
    Metadata {
        /// Input video path.
        input: PathBuf,
        /// Output metadata as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn log_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn init_logging(verbose: bool) {
    let default_filter = log_filter(verbose).to_string().to_ascii_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
    framegrab::sync_decoder_log_level(log::max_level());
}

fn resize_from(width: Option<u32>, height: Option<u32>) -> Resize {
    match (width, height) {
        (Some(width), Some(height)) => Resize::Exact(width, height),
        (Some(width), None) => Resize::Width(width),
        (None, Some(height)) => Resize::Height(height),
        (None, None) => Resize::Original,
    }
}

fn extract_options(global: &GlobalOptions, requested: u64, quiet: bool) -> ExtractOptions {
    let reporter = ConsoleProgress::new(requested, global.progress, quiet);
    ExtractOptions::new()
        .with_output_dir(&global.out)
        .with_extension(&global.ext)
        .with_jpeg_quality(global.quality)
        .with_resize(resize_from(global.width, global.height))
        .with_progress(Arc::new(reporter))
}

/// Prints one line per frame and optionally drives a progress bar.
struct ConsoleProgress {
    requested: u64,
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl ConsoleProgress {
    fn new(requested: u64, show_bar: bool, quiet: bool) -> Self {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("##-"));
            }
            bar
        });
        Self {
            requested,
            bar,
            quiet,
        }
    }

    fn print(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(bar) = &self.bar {
            bar.set_length(info.total);
            bar.set_position(info.current);
        }

        match &info.latest {
            Some(result) if !self.quiet => self.print(frame_line(result, self.requested)),
            Some(_) => {}
            None => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message("done");
                }
            }
        }
    }
}

fn frame_line(result: &ExtractionResult, requested: u64) -> String {
    match result {
        ExtractionResult::Saved { index, .. } => {
            format!("{} frame {index} of {requested}", "Saved".green())
        }
        ExtractionResult::Failed { index, .. } => {
            format!("{} {index}", "Failed to extract frame".red())
        }
    }
}

fn plan_json(plan: &SamplingPlan) -> Value {
    json!({
        "total_frames": plan.total_frames(),
        "requested_count": plan.requested_count(),
        "interval": plan.interval(),
        "positions": plan.positions(),
    })
}

fn report_json(report: &ExtractionReport) -> Value {
    let frames: Vec<Value> = report
        .results
        .iter()
        .map(|result| match result {
            ExtractionResult::Saved {
                index,
                position,
                path,
            } => json!({
                "index": index,
                "position": position,
                "status": "saved",
                "path": path.display().to_string(),
            }),
            ExtractionResult::Failed {
                index,
                position,
                reason,
            } => json!({
                "index": index,
                "position": position,
                "status": "failed",
                "reason": reason,
            }),
        })
        .collect();

    json!({
        "video": report.video_path.display().to_string(),
        "source_opened": report.source_opened(),
        "source_error": report.source_error,
        "plan": plan_json(&report.plan),
        "saved": report.saved(),
        "failed": report.failed(),
        "frames": frames,
    })
}

fn print_summary(report: &ExtractionReport) {
    if let Some(reason) = &report.source_error {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!(
                "could not open {} ({reason}); no frames extracted",
                report.video_path.display()
            )
            .yellow()
        );
        return;
    }

    let shortfall = report.plan.shortfall();
    if shortfall > 0 {
        eprintln!(
            "{} {}",
            "note:".cyan().bold(),
            format!(
                "only {} of {} requested position(s) fit in {} frame(s)",
                report.plan.len(),
                report.plan.requested_count(),
                report.plan.total_frames()
            )
            .cyan()
        );
    }
}

/// Frame count a plan is computed for. An unopenable video counts as empty,
/// the same as during extraction.
fn planned_total_frames(
    frames: Option<u64>,
    input: Option<&Path>,
) -> Result<u64, Box<dyn std::error::Error>> {
    match (frames, input) {
        (Some(frames), _) => Ok(frames),
        (None, Some(input)) => match VideoFile::open(input) {
            Ok(video) => Ok(video.frame_count()),
            Err(error) => {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("{error}; planning for 0 frames").yellow()
                );
                Ok(0)
            }
        },
        (None, None) => Err("provide an input video or --frames".into()),
    }
}

fn run_extraction(
    video: &Path,
    count: u64,
    global: &GlobalOptions,
    json: bool,
) -> Result<ExtractionReport, Box<dyn std::error::Error>> {
    let request = SamplingRequest::new(video, count)?;
    let options = extract_options(global, count, json);
    let report = framegrab::extract_from_path(&request, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_summary(&report);
    }
    Ok(report)
}

fn run_interactive(
    video_dir: &Path,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let videos = framegrab::list_videos(video_dir)?;
    if videos.is_empty() {
        println!(
            "No video files found in the '{}' directory!",
            video_dir.display()
        );
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let video = prompt::select_video(&mut input, &mut output, &videos)?;
    let count = prompt::frame_count(&mut input, &mut output)?;

    println!("{}", prompt::processing_banner(&video));
    let _ = run_extraction(&video, count, global, false)?;
    println!("\n{}", "Frame extraction completed!".green().bold());
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let command = cli.command.unwrap_or(Commands::Interactive {
        video_dir: PathBuf::from(catalog::DEFAULT_VIDEO_DIR),
    });

    match command {
        Commands::Interactive { video_dir } => run_interactive(&video_dir, &cli.global)?,
        Commands::Extract { input, count, json } => {
            let report = run_extraction(&input, count, &cli.global, json)?;
            if !json {
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!(
                        "Extracted {} of {count} frame(s) to {}",
                        report.saved(),
                        cli.global.out.display()
                    )
                    .green()
                );
            }
        }
        Commands::Plan {
            input,
            count,
            frames,
            json,
        } => {
            let total_frames = planned_total_frames(frames, input.as_deref())?;
            if count == 0 {
                return Err(FrameGrabError::InvalidFrameCount(count).into());
            }
            let plan = SamplingPlan::new(total_frames, count);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
            } else {
                println!("Total frames: {}", plan.total_frames());
                println!("Interval: {}", plan.interval());
                let positions: Vec<String> =
                    plan.positions().iter().map(u64::to_string).collect();
                println!("Positions ({}): {}", plan.len(), positions.join(", "));
            }
        }
        Commands::Metadata { input, json } => {
            let video = VideoFile::open(&input)?;
            let metadata = video.metadata();
            if json {
                let payload = json!({
                    "path": video.path().display().to_string(),
                    "width": metadata.width,
                    "height": metadata.height,
                    "fps": metadata.frames_per_second,
                    "frame_count": metadata.frame_count,
                    "codec": metadata.codec,
                    "duration_seconds": metadata.duration.as_secs_f64(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "Video: {}x{} @ {:.2} fps [{}]",
                    metadata.width, metadata.height, metadata.frames_per_second, metadata.codec,
                );
                println!("Frames: {}", metadata.frame_count);
                println!("Duration: {:?}", metadata.duration);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framegrab", &mut io::stdout());
        }
    }

    io::stdout().flush()?;
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use framegrab::{ExtractionResult, Resize, SamplingPlan};

    use super::{frame_line, log_filter, plan_json, planned_total_frames, resize_from};

    #[test]
    fn resize_from_flags() {
        assert_eq!(resize_from(None, None), Resize::Original);
        assert_eq!(resize_from(Some(640), None), Resize::Width(640));
        assert_eq!(resize_from(None, Some(480)), Resize::Height(480));
        assert_eq!(resize_from(Some(640), Some(480)), Resize::Exact(640, 480));
    }

    #[test]
    fn verbose_enables_debug_logging() {
        assert_eq!(log_filter(true), log::LevelFilter::Debug);
        assert_eq!(log_filter(false), log::LevelFilter::Warn);
    }

    #[test]
    fn frame_lines_name_the_sequence_index() {
        colored::control::set_override(false);

        let saved = ExtractionResult::Saved {
            index: 2,
            position: 25,
            path: PathBuf::from("images/frame_2.jpg"),
        };
        assert_eq!(frame_line(&saved, 5), "Saved frame 2 of 5");

        let failed = ExtractionResult::Failed {
            index: 3,
            position: 50,
            reason: "End of stream reached before frame 50".to_string(),
        };
        assert_eq!(frame_line(&failed, 5), "Failed to extract frame 3");
    }

    #[test]
    fn plan_json_lists_positions() {
        let payload = plan_json(&SamplingPlan::new(100, 5));
        assert_eq!(payload["interval"], 25);
        assert_eq!(payload["positions"], serde_json::json!([0, 25, 50, 75]));
    }

    #[test]
    fn unopenable_video_plans_zero_frames() {
        let total = planned_total_frames(None, Some(Path::new("no_such_video.mp4"))).unwrap();
        assert_eq!(total, 0);
        assert!(SamplingPlan::new(total, 5).is_empty());
    }

    #[test]
    fn frame_override_skips_opening_the_video() {
        let total = planned_total_frames(Some(100), Some(Path::new("no_such_video.mp4"))).unwrap();
        assert_eq!(total, 100);
        assert!(planned_total_frames(None, None).is_err());
    }
}
