use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pcc_tools::{
    format_inspect_pretty, frame_file_name, inspect_frame, list_frames, load_point_cloud,
    write_point_cloud, FrameEntry, Profile, StreamDecoder, StreamEncoder,
};
use wire::Compression;

#[derive(Parser)]
#[command(
    name = "pcc-tools",
    version,
    about = "pcc point-cloud stream encoding, decoding and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone, Copy)]
struct CodecArgs {
    /// Codec profile.
    #[arg(long, value_enum, default_value_t = Profile::Pc60)]
    profile: Profile,
    /// Override the grid scale factor.
    #[arg(long)]
    precision: Option<f64>,
    /// Override the I-frame interval.
    #[arg(long)]
    iframe_rate: Option<NonZeroU32>,
}

#[derive(Subcommand)]
enum Command {
    /// Encode point-cloud JSON files, in order, as one stream of frames.
    Encode {
        /// Point-cloud JSON files, one per frame.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory for the frame files.
        #[arg(long)]
        out_dir: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
        /// DEFLATE level, 0-9.
        #[arg(long, default_value_t = 6)]
        level: u32,
    },
    /// Decode a directory of frames, in name order, as one stream.
    Decode {
        /// Directory holding frame files.
        frames_dir: PathBuf,
        /// Directory for the decoded point-cloud JSON files.
        #[arg(long)]
        out_dir: PathBuf,
        /// Glob filter for frame files.
        #[arg(long, default_value = "*.pcc")]
        glob: String,
        #[command(flatten)]
        codec: CodecArgs,
    },
    /// Inspect frame structure and sizes.
    Inspect {
        /// Path to a frame file or a directory of frames.
        frame_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected frames.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected frames (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Key width used to parse payloads.
        #[arg(long, value_enum, default_value_t = Profile::Pc60)]
        profile: Profile,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            inputs,
            out_dir,
            codec,
            level,
        } => {
            let config = codec_config(codec)?.with_compression(Compression::new(level));
            let mut encoder = StreamEncoder::new(codec.profile, config)?;
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("create dir {}", out_dir.display()))?;

            for (index, input) in inputs.iter().enumerate() {
                let points = load_point_cloud(input)?;
                let frame = encoder
                    .encode_cloud(&points)
                    .with_context(|| format!("encode {}", input.display()))?;
                let path = out_dir.join(frame_file_name(index));
                fs::write(&path, &frame)
                    .with_context(|| format!("write frame {}", path.display()))?;
                if let Some(stats) = encoder.last_stats() {
                    println!(
                        "{} -> {}: {} {} voxels, {} bytes",
                        input.display(),
                        path.display(),
                        stats.frame_type,
                        stats.voxels,
                        stats.compressed_bytes
                    );
                }
            }
        }
        Command::Decode {
            frames_dir,
            out_dir,
            glob,
            codec,
        } => {
            let config = codec_config(codec)?;
            let mut decoder = StreamDecoder::new(codec.profile, config)?;
            let entries = list_frames(&frames_dir, Some(&glob))?;
            if entries.is_empty() {
                bail!("no frames matching {glob} in {}", frames_dir.display());
            }
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("create dir {}", out_dir.display()))?;

            for entry in entries {
                let bytes = read_frame(&entry.path)?;
                let Some(points) = decoder
                    .decode_or_resync(&bytes)
                    .with_context(|| format!("decode {}", entry.path.display()))?
                else {
                    println!("{}: skipped, waiting for an i-frame", entry.path.display());
                    continue;
                };
                let path = out_dir.join(json_name(&entry.path));
                write_point_cloud(&path, &points)?;
                println!(
                    "{} -> {}: {} points",
                    entry.path.display(),
                    path.display(),
                    points.len()
                );
            }
        }
        Command::Inspect {
            frame_path,
            glob,
            sort,
            limit,
            profile,
            json,
        } => {
            let limits = profile.config().limits;
            if frame_path.is_dir() {
                let entries = list_frames(&frame_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = read_frame(&entry.path)?;
                    let report = inspect_frame(&bytes, profile, &limits)
                        .with_context(|| format!("inspect {}", entry.path.display()))?;
                    if json {
                        println!("{}", serde_json::to_string(&report)?);
                    } else {
                        println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                        println!("{}", format_inspect_pretty(&report));
                    }
                }
            } else {
                let bytes = read_frame(&frame_path)?;
                let report = inspect_frame(&bytes, profile, &limits)
                    .with_context(|| format!("inspect {}", frame_path.display()))?;
                if json {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                } else {
                    println!("{}", format_inspect_pretty(&report));
                }
            }
        }
    }
    Ok(())
}

fn codec_config(args: CodecArgs) -> Result<codec::CodecConfig> {
    let mut config = args.profile.config();
    if let Some(precision) = args.precision {
        config = config.with_precision(precision);
    }
    if let Some(rate) = args.iframe_rate {
        config = config.with_iframe_rate(rate);
    }
    config.validate()?;
    Ok(config)
}

fn read_frame(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read frame {}", path.display()))
}

fn json_name(frame_path: &Path) -> PathBuf {
    let stem = frame_path
        .file_stem()
        .map_or_else(|| "frame".into(), |stem| stem.to_string_lossy());
    PathBuf::from(format!("{stem}.json"))
}

fn maybe_sort_entries(mut entries: Vec<FrameEntry>, sort: Option<InspectSort>) -> Vec<FrameEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
