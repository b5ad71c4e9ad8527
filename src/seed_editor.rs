use macroquad::prelude::*;

use crate::basic_structs::Vector2D;
use crate::bezier::de_iterative;
use crate::render::LineStyle;
use crate::viewer::{View, draw_axes, draw_polyline_screen};

// 预览曲线的采样点数
const PREVIEW_POINTS: usize = 200;

#[derive(PartialEq, Debug)]
pub enum EditorMode {
    Picking,
    Finished,
    Cancelled,
}

/// 点击放置种子点，放满 N 个后按 Enter 开始动画
pub struct SeedEditor {
    pub mode: EditorMode,
    target: usize,
    points: Vec<Vector2D>,
}

impl SeedEditor {
    pub fn new(target: usize) -> Self {
        Self {
            mode: EditorMode::Picking,
            target,
            points: Vec::with_capacity(target),
        }
    }

    /// 运行编辑器循环，直到完成或取消。取消时返回 None
    pub async fn run(mut self) -> Option<Vec<Vector2D>> {
        loop {
            clear_background(WHITE);
            let view = View::fit_window();
            draw_axes(&view);

            self.handle_input(&view);
            self.draw(&view);

            match self.mode {
                EditorMode::Picking => {}
                EditorMode::Finished => return Some(self.points),
                EditorMode::Cancelled => return None,
            }
            next_frame().await
        }
    }

    // --- 输入处理 ---
    fn handle_input(&mut self, view: &View) {
        if is_key_pressed(KeyCode::Escape) {
            self.mode = EditorMode::Cancelled;
            return;
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.points.pop();
        }
        if is_key_pressed(KeyCode::Enter) && self.is_complete() {
            self.mode = EditorMode::Finished;
            return;
        }

        if is_mouse_button_pressed(MouseButton::Left) && !self.is_complete() {
            let world_pos = view.screen_to_world(mouse_position().into());
            // 只接受绘图框内的点
            if view.contains(world_pos) {
                self.points.push(world_pos);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.points.len() == self.target
    }

    // --- 绘制控制点、控制多边形和预览曲线 ---
    fn draw(&self, view: &View) {
        let hint = if self.is_complete() {
            "Press Enter to animate. Backspace: undo | ESC: quit".to_string()
        } else {
            format!(
                "Click to place seed point {} of {}. Backspace: undo | ESC: quit",
                self.points.len() + 1,
                self.target
            )
        };
        draw_text(&hint, 20.0, 30.0, 20.0, DARKGRAY);

        let polygon = LineStyle::new(GRAY, 0.5, 1.0);
        draw_polyline_screen(view, &self.points, polygon);
        for (i, p) in self.points.iter().enumerate() {
            let screen_pos = view.world_to_screen(*p);
            draw_circle(screen_pos.x, screen_pos.y, 4.0, RED);
            draw_text(&format!("A{i}"), screen_pos.x + 4.0, screen_pos.y - 4.0, 18.0, BLACK);
        }

        if self.points.len() > 1 {
            let curve: Vec<Vector2D> = (0..=PREVIEW_POINTS)
                .filter_map(|i| de_iterative(&self.points, i as f64 / PREVIEW_POINTS as f64))
                .collect();
            draw_polyline_screen(view, &curve, LineStyle::new(BLACK, 0.3, 1.0));
        }
    }
}
