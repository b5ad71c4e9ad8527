use std::time::Duration;

use clap::Parser;

use crate::animation::{self, AnimationConfig, DEFAULT_FRAMES};
use crate::basic_structs::Vector2D;
use crate::error::{BezierError, BezierResult};
use crate::palette::{self, PaletteLayout};
use crate::seeds;

/// A cli utility to animate the construction of a Bezier curve from N seed points.
#[derive(Parser, Debug)]
#[command(
    name = "bezier-anim",
    version,
    after_help = "And that's how you generate the Bezier Curve."
)]
pub struct Cli {
    /// Number of seed points
    #[arg(short = 'n', long = "count", value_name = "N")]
    pub count: usize,

    /// Number of frames to generate
    #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
    pub frames: usize,

    /// Display intermediate bezier curves
    #[arg(short, long)]
    pub verbose: bool,

    /// Pause after each frame, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub pause_ms: u64,

    /// Seed for the random seed-point generator
    #[arg(long, conflicts_with_all = ["points", "pick"])]
    pub seed: Option<u64>,

    /// Fixed seed points, e.g. "0,0;10,0;10,10"
    #[arg(long, value_name = "X,Y;...", conflicts_with = "pick")]
    pub points: Option<String>,

    /// Place the seed points by clicking in the window
    #[arg(long)]
    pub pick: bool,

    /// Advance the palette cursor by level index (old coloring)
    #[arg(long)]
    pub legacy_palette: bool,
}

/// 种子点的来源
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    Random { seed: Option<u64> },
    Fixed(Vec<Vector2D>),
    Pick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub count: usize,
    pub source: SeedSource,
    pub animation: AnimationConfig,
}

impl Settings {
    /// 校验命令行参数。任何一帧开始之前失败
    pub fn from_cli(cli: &Cli) -> BezierResult<Self> {
        if cli.count < 2 {
            return Err(BezierError::InvalidConfiguration(format!(
                "number of seed points must be at least 2, got {}",
                cli.count
            )));
        }
        // 种子点在校验之前就会生成，过大的 N 在这里拦下
        if palette::palette_size(cli.count).is_none_or(|size| size > palette::MAX_PALETTE_SWATCHES) {
            return Err(BezierError::InvalidConfiguration(format!(
                "number of seed points {} is too large",
                cli.count
            )));
        }
        if cli.frames < 2 {
            return Err(BezierError::InvalidConfiguration(format!(
                "number of frames must be at least 2, got {}",
                cli.frames
            )));
        }

        let source = match (&cli.points, cli.pick) {
            (Some(text), _) => {
                let points = seeds::parse_points(text)?;
                if points.len() != cli.count {
                    return Err(BezierError::InvalidConfiguration(format!(
                        "expected {} points, --points gave {}",
                        cli.count,
                        points.len()
                    )));
                }
                SeedSource::Fixed(points)
            }
            (None, true) => SeedSource::Pick,
            (None, false) => SeedSource::Random { seed: cli.seed },
        };

        Ok(Self {
            count: cli.count,
            source,
            animation: AnimationConfig {
                frame_count: cli.frames,
                verbose: cli.verbose,
                pause: Duration::from_millis(cli.pause_ms),
                palette_layout: if cli.legacy_palette {
                    PaletteLayout::Legacy
                } else {
                    PaletteLayout::Packed
                },
            },
        })
    }

    /// 非交互来源直接得到种子点；交互模式返回 None
    pub fn resolve_seeds(&self) -> BezierResult<Option<Vec<Vector2D>>> {
        let points = match &self.source {
            SeedSource::Random { seed } => seeds::random_points(self.count, *seed),
            SeedSource::Fixed(points) => points.clone(),
            SeedSource::Pick => return Ok(None),
        };
        animation::validate(&points, &self.animation)?;
        Ok(Some(points))
    }
}
