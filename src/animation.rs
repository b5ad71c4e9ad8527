use std::time::Duration;

use log::{debug, info, trace, warn};
use macroquad::color::BLACK;

use crate::basic_structs::Vector2D;
use crate::bezier::{CurveTrace, InterpolationGraph};
use crate::error::{BezierError, BezierResult};
use crate::lifecycle::RenderLifecycle;
use crate::palette::{self, ColorAssignment, PaletteLayout};
use crate::render::{LineStyle, RenderHandle, Renderer};

pub const DEFAULT_FRAMES: usize = 100;
pub const CURVE_LEGEND: &str = "Bezier Curve";

const CONNECTOR_OPACITY: f32 = 0.5;
const CONNECTOR_WIDTH: f32 = 1.5;
const CURVE_WIDTH: f32 = 1.0;
// 轨迹预分配的上限，帧数更多时按需增长
const TRACE_RESERVE: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub frame_count: usize,
    /// 是否绘制中间层
    pub verbose: bool,
    /// 每帧之后的停顿
    pub pause: Duration,
    pub palette_layout: PaletteLayout,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAMES,
            verbose: false,
            pause: Duration::from_millis(10),
            palette_layout: PaletteLayout::default(),
        }
    }
}

/// 驱动器状态：Initializing -> Frame(0..F-1) -> Finalizing -> Done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Initializing,
    Frame(usize),
    Finalizing,
    Done,
}

/// 逐帧推进德卡斯特里奥构造的动画。
///
/// 渲染器在构造时交给驱动器，`into_renderer` 在结束后取回。
pub struct AnimationDriver<R: Renderer> {
    renderer: R,
    seeds: Vec<Vector2D>,
    config: AnimationConfig,
    colors: ColorAssignment,
    trace: CurveTrace,
    lifecycle: RenderLifecycle,
    // 最近一段轨迹的句柄，结束时用于图例
    trace_handle: Option<RenderHandle>,
    last_graph: Option<InterpolationGraph>,
    state: AnimationState,
}

/// 第 k 层点的标签字母：A, B, C...
pub fn level_letter(level: usize) -> char {
    u32::try_from(level)
        .ok()
        .and_then(|k| ('A' as u32).checked_add(k))
        .and_then(char::from_u32)
        .unwrap_or('?')
}

/// 把 0..F-1 的帧号映射为 [0, 1] 上的均匀参数。
///
/// 要求 `frame_count >= 2`（`validate` 保证）。更小的帧数没有均匀划分，
/// 此时按只有一段处理，返回 `frame as f64`，不会下溢也不会得到 NaN。
pub fn frame_parameter(frame: usize, frame_count: usize) -> f64 {
    let segments = frame_count.saturating_sub(1).max(1);
    frame as f64 / segments as f64
}

pub fn validate(seeds: &[Vector2D], config: &AnimationConfig) -> BezierResult<()> {
    if seeds.len() < 2 {
        return Err(BezierError::InvalidConfiguration(format!(
            "at least 2 seed points are required, got {}",
            seeds.len()
        )));
    }
    if config.frame_count < 2 {
        return Err(BezierError::InvalidConfiguration(format!(
            "frame count must be at least 2, got {}",
            config.frame_count
        )));
    }
    match palette::palette_size(seeds.len()) {
        Some(size) if size <= palette::MAX_PALETTE_SWATCHES => {}
        _ => {
            return Err(BezierError::InvalidConfiguration(format!(
                "{} seed points need more than {} palette colors",
                seeds.len(),
                palette::MAX_PALETTE_SWATCHES
            )));
        }
    }
    if let Some(bad) = seeds.iter().position(|p| !p.is_finite()) {
        return Err(BezierError::InvalidConfiguration(format!(
            "seed point {bad} is not finite"
        )));
    }
    Ok(())
}

impl<R: Renderer> AnimationDriver<R> {
    /// 校验配置。失败时不会有任何绘制
    pub fn new(seeds: Vec<Vector2D>, config: AnimationConfig, renderer: R) -> BezierResult<Self> {
        validate(&seeds, &config)?;

        let n = seeds.len();
        info!(
            "animating order-{n} curve over {} frames (verbose: {})",
            config.frame_count, config.verbose
        );
        Ok(Self {
            renderer,
            colors: ColorAssignment::new(n, config.palette_layout),
            trace: CurveTrace::with_capacity(config.frame_count.min(TRACE_RESERVE)),
            lifecycle: RenderLifecycle::new(n),
            trace_handle: None,
            last_graph: None,
            state: AnimationState::Initializing,
            seeds,
            config,
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == AnimationState::Done
    }

    pub fn trace(&self) -> &CurveTrace {
        &self.trace
    }

    pub fn seeds(&self) -> &[Vector2D] {
        &self.seeds
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// 最近一帧的插值图，只保留一帧
    pub fn last_graph(&self) -> Option<&InterpolationGraph> {
        self.last_graph.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// 执行当前状态并转入下一个状态，返回新状态。Done 之后调用无效果
    pub fn step(&mut self) -> BezierResult<AnimationState> {
        let next = match self.state {
            AnimationState::Initializing => {
                self.initialize();
                AnimationState::Frame(0)
            }
            AnimationState::Frame(frame) => {
                self.render_frame(frame)?;
                if frame + 1 < self.config.frame_count {
                    AnimationState::Frame(frame + 1)
                } else {
                    AnimationState::Finalizing
                }
            }
            AnimationState::Finalizing => {
                self.finalize();
                AnimationState::Done
            }
            AnimationState::Done => AnimationState::Done,
        };
        if next != self.state {
            debug!("{:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }

    /// 一直推进到 Done
    pub fn run(&mut self) -> BezierResult<()> {
        while !self.is_done() {
            self.step()?;
        }
        Ok(())
    }

    // --- 各状态的处理 ---

    fn initialize(&mut self) {
        let n = self.seeds.len();
        self.renderer.set_title(&format!("Bezier Curve (order-{n})"));
        // 种子层只画一次，不交给生命周期管理
        draw_level(&mut self.renderer, &self.colors, 0, &self.seeds);
    }

    fn render_frame(&mut self, frame: usize) -> BezierResult<()> {
        let t = frame_parameter(frame, self.config.frame_count);
        self.renderer.frame_started(frame, self.config.frame_count, t);

        let graph = InterpolationGraph::build(&self.seeds, t)?;
        let point = graph.final_point();
        trace!("frame {frame}: t = {t:.4}, curve point {point}");

        self.trace.append(point);
        let style = LineStyle::new(BLACK, 1.0, CURVE_WIDTH);
        self.trace_handle = Some(self.renderer.draw_polyline(self.trace.last_segment(), style));

        if self.config.verbose {
            for (level, points) in graph.intermediate_levels() {
                let handles = draw_level(&mut self.renderer, &self.colors, level, points);
                self.lifecycle.replace(&mut self.renderer, level, handles);
            }
        }

        self.last_graph = Some(graph);
        self.renderer.pause(self.config.pause);
        Ok(())
    }

    fn finalize(&mut self) {
        if self.config.verbose {
            self.lifecycle.retire_all(&mut self.renderer);
        }
        if let Some(handle) = self.trace_handle {
            self.renderer.show_legend(handle, CURVE_LEGEND);
        }
        self.renderer.pause(self.config.pause);
        info!("animation finished with {} curve points", self.trace.len());
    }
}

/// 画出一层的连线和点标签，返回所有句柄
fn draw_level<R: Renderer>(
    renderer: &mut R,
    colors: &ColorAssignment,
    level: usize,
    points: &[Vector2D],
) -> Vec<RenderHandle> {
    let letter = level_letter(level);
    let swatches = colors.connector_colors(level);
    let mut handles = Vec::with_capacity(points.len() * 2);

    for (i, pair) in points.windows(2).enumerate() {
        let color = swatches.get(i).copied().unwrap_or_else(|| {
            warn!("no palette color for level {level} segment {i}");
            BLACK
        });
        let style = LineStyle::new(color, CONNECTOR_OPACITY, CONNECTOR_WIDTH);
        handles.push(renderer.draw_polyline(pair, style));
    }
    for (i, point) in points.iter().enumerate() {
        handles.push(renderer.draw_label(&format!("{letter}{i}"), *point));
    }
    handles
}
