// 职责：保留式场景渲染器。驱动器通过句柄增删图元，窗口每帧把场景完整重绘一次。

use std::time::Duration;

use log::{debug, info};
use macroquad::prelude::*;

use crate::animation::{AnimationConfig, AnimationDriver};
use crate::basic_structs::Vector2D;
use crate::error::BezierResult;
use crate::render::{LineStyle, RenderHandle, Renderer};

/// 绘图窗口显示的世界坐标范围 [-EXTENT, EXTENT]
pub const EXTENT: f64 = 100.0;
const GRID_STEP: f64 = 25.0;
const LABEL_SIZE: f32 = 18.0;

/// 世界坐标与屏幕坐标之间的变换。
///
/// 假定世界中 Y 轴向上，X 轴向右；原点位于绘图区中心。
#[derive(Debug, Clone, Copy)]
pub struct View {
    /// 像素/单位
    scale: f64,
    origin: Vec2,
}

impl View {
    /// 按当前窗口大小计算，使 [-EXTENT, EXTENT] 的正方形完整可见
    pub fn fit_window() -> Self {
        let top_margin = 60.0;
        let usable_h = screen_height() - top_margin - 20.0;
        let side = screen_width().min(usable_h).max(1.0) as f64;
        Self {
            scale: side / (2.0 * EXTENT * 1.05),
            origin: vec2(screen_width() / 2.0, top_margin + usable_h / 2.0),
        }
    }

    pub fn world_to_screen(&self, world_pos: Vector2D) -> Vec2 {
        vec2(
            self.origin.x + (world_pos.x * self.scale) as f32,
            self.origin.y - (world_pos.y * self.scale) as f32, // Y 轴反转
        )
    }

    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vector2D {
        Vector2D {
            x: (screen_pos.x - self.origin.x) as f64 / self.scale,
            y: (self.origin.y - screen_pos.y) as f64 / self.scale, // Y 轴反转
        }
    }

    pub fn contains(&self, world_pos: Vector2D) -> bool {
        world_pos.x.abs() <= EXTENT && world_pos.y.abs() <= EXTENT
    }
}

/// 绘制 [-100, 100] 的绘图框、网格和坐标轴
pub fn draw_axes(view: &View) {
    let grid_color = Color::new(0.0, 0.0, 0.0, 0.08);
    let lo = view.world_to_screen(Vector2D::new(-EXTENT, -EXTENT));
    let hi = view.world_to_screen(Vector2D::new(EXTENT, EXTENT));

    let mut v = -EXTENT;
    while v <= EXTENT {
        let x = view.world_to_screen(Vector2D::new(v, 0.0)).x;
        let y = view.world_to_screen(Vector2D::new(0.0, v)).y;
        draw_line(x, hi.y, x, lo.y, 1.0, grid_color);
        draw_line(lo.x, y, hi.x, y, 1.0, grid_color);
        draw_text(&format!("{v:.0}"), x - 10.0, lo.y + 16.0, 14.0, GRAY);
        draw_text(&format!("{v:.0}"), lo.x - 32.0, y + 4.0, 14.0, GRAY);
        v += GRID_STEP;
    }

    draw_rectangle_lines(lo.x, hi.y, hi.x - lo.x, lo.y - hi.y, 1.5, DARKGRAY);
    let o = view.world_to_screen(Vector2D::new(0.0, 0.0));
    draw_line(lo.x, o.y, hi.x, o.y, 1.0, LIGHTGRAY); // X 轴
    draw_line(o.x, hi.y, o.x, lo.y, 1.0, LIGHTGRAY); // Y 轴
}

pub fn draw_polyline_screen(view: &View, points: &[Vector2D], style: LineStyle) {
    let color = Color { a: style.opacity, ..style.color };
    match points {
        [] => {}
        [single] => {
            let p = view.world_to_screen(*single);
            draw_circle(p.x, p.y, style.width.max(1.5), color);
        }
        _ => {
            for pair in points.windows(2) {
                let p1 = view.world_to_screen(pair[0]);
                let p2 = view.world_to_screen(pair[1]);
                draw_line(p1.x, p1.y, p2.x, p2.y, style.width, color);
            }
        }
    }
}

enum SceneItem {
    Line { points: Vec<Vector2D>, style: LineStyle },
    Label { text: String, at: Vector2D },
}

/// macroquad 上的渲染器
pub struct SceneRenderer {
    items: Vec<(RenderHandle, SceneItem)>,
    next_id: u64,
    title: String,
    legend: Option<(RenderHandle, String)>,
    /// 在这个时刻 (get_time) 之前不推进驱动器
    hold_until: f64,
    progress: Option<(usize, usize, f64)>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            title: String::new(),
            legend: None,
            hold_until: 0.0,
            progress: None,
        }
    }

    fn issue(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    pub fn is_holding(&self) -> bool {
        get_time() < self.hold_until
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 重绘整个场景
    pub fn present(&self) {
        clear_background(WHITE);
        let view = View::fit_window();
        draw_axes(&view);

        // 先画线，再画标签，避免标签被遮挡
        for (_, item) in &self.items {
            if let SceneItem::Line { points, style } = item {
                draw_polyline_screen(&view, points, *style);
            }
        }
        for (_, item) in &self.items {
            if let SceneItem::Label { text, at } = item {
                let p = view.world_to_screen(*at);
                draw_text(text, p.x + 4.0, p.y - 4.0, LABEL_SIZE, BLACK);
            }
        }

        let title_size = 32.0;
        let dims = measure_text(&self.title, None, title_size as u16, 1.0);
        draw_text(&self.title, (screen_width() - dims.width) / 2.0, 40.0, title_size, BLACK);

        self.draw_legend();
        self.draw_info_panel();
    }

    fn draw_legend(&self) {
        let Some((handle, text)) = &self.legend else { return };
        let style = self.items.iter().find_map(|(h, item)| match item {
            SceneItem::Line { style, .. } if h == handle => Some(*style),
            _ => None,
        });
        let Some(style) = style else { return };

        let dims = measure_text(text, None, 18, 1.0);
        let w = dims.width + 60.0;
        let x = screen_width() - w - 20.0;
        let y = 70.0;
        draw_rectangle(x, y, w, 30.0, Color::new(1.0, 1.0, 1.0, 0.9));
        draw_rectangle_lines(x, y, w, 30.0, 1.0, LIGHTGRAY);
        draw_line(x + 8.0, y + 15.0, x + 40.0, y + 15.0, style.width.max(1.5), style.color);
        draw_text(text, x + 48.0, y + 20.0, 18.0, BLACK);
    }

    fn draw_info_panel(&self) {
        if let Some((frame, frame_count, t)) = self.progress {
            draw_text(&format!("F: {}/{}", frame + 1, frame_count), 20.0, 30.0, 20.0, DARKGRAY);
            draw_text(&format!("t = {t:.3}"), 20.0, 52.0, 20.0, DARKGRAY);
        }
        draw_text("R: Restart | ESC: Quit", 20.0, screen_height() - 12.0, 18.0, GRAY);
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SceneRenderer {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn draw_polyline(&mut self, points: &[Vector2D], style: LineStyle) -> RenderHandle {
        let handle = self.issue();
        self.items.push((handle, SceneItem::Line { points: points.to_vec(), style }));
        handle
    }

    fn draw_label(&mut self, text: &str, at: Vector2D) -> RenderHandle {
        let handle = self.issue();
        self.items.push((handle, SceneItem::Label { text: text.to_string(), at }));
        handle
    }

    fn remove(&mut self, handle: RenderHandle) {
        self.items.retain(|(h, _)| *h != handle);
    }

    fn pause(&mut self, duration: Duration) {
        self.hold_until = get_time() + duration.as_secs_f64();
    }

    fn show_legend(&mut self, handle: RenderHandle, text: &str) {
        self.legend = Some((handle, text.to_string()));
    }

    fn frame_started(&mut self, frame: usize, frame_count: usize, t: f64) {
        self.progress = Some((frame, frame_count, t));
    }
}

/// 窗口主循环：按渲染器的停顿节奏推进驱动器，动画结束后保持显示直到关闭窗口
pub async fn run_animation(seeds: Vec<Vector2D>, config: AnimationConfig) -> BezierResult<()> {
    let mut driver = AnimationDriver::new(seeds, config, SceneRenderer::new())?;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("closed by user");
            break;
        }
        if is_key_pressed(KeyCode::R) {
            debug!("restarting animation");
            driver = AnimationDriver::new(
                driver.seeds().to_vec(),
                driver.config().clone(),
                SceneRenderer::new(),
            )?;
        }

        if !driver.is_done() && !driver.renderer().is_holding() {
            driver.step()?;
        }

        driver.renderer().present();
        next_frame().await
    }

    debug!("scene held {} items at exit", driver.into_renderer().item_count());
    Ok(())
}
