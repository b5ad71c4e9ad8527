use std::time::Duration;

use macroquad::color::Color;

use crate::basic_structs::Vector2D;

/// 渲染器返回的句柄，只用于之后移除对应的图元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// 不透明度 0..=1
    pub opacity: f32,
    /// 线宽 (像素)
    pub width: f32,
}

impl LineStyle {
    pub fn new(color: Color, opacity: f32, width: f32) -> Self {
        Self { color, opacity, width }
    }
}

/// 动画驱动器所依赖的绘图后端。
///
/// 实现可以是窗口里的保留式场景，也可以是测试里的记录器；
/// 驱动器只通过句柄引用已绘制的图元。
pub trait Renderer {
    /// 整个运行只调用一次，在绘制任何图元之前
    fn set_title(&mut self, title: &str);

    /// 按顺序连接 `points` 的折线。只有一个点时画成一个点
    fn draw_polyline(&mut self, points: &[Vector2D], style: LineStyle) -> RenderHandle;

    fn draw_label(&mut self, text: &str, at: Vector2D) -> RenderHandle;

    /// 移除之前绘制的图元。未知句柄忽略
    fn remove(&mut self, handle: RenderHandle);

    /// 帧间停顿，用来控制动画节奏
    fn pause(&mut self, duration: Duration);

    /// 为 `handle` 所指的线显示图例
    fn show_legend(&mut self, handle: RenderHandle, text: &str);

    /// 每帧开始时的进度通知，默认忽略
    fn frame_started(&mut self, _frame: usize, _frame_count: usize, _t: f64) {}
}

#[cfg(test)]
pub mod recording {
    use super::*;

    /// 测试用的渲染器：记录每一次调用，并跟踪当前仍可见的图元
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        next_id: u64,
        pub ops: Vec<Op>,
        pub visible: Vec<RenderHandle>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Title(String),
        Polyline { handle: RenderHandle, points: Vec<Vector2D>, style: LineStyle },
        Label { handle: RenderHandle, text: String, at: Vector2D },
        Remove(RenderHandle),
        Pause(Duration),
        Legend { handle: RenderHandle, text: String },
        Frame { frame: usize, t: f64 },
    }

    impl RecordingRenderer {
        fn issue(&mut self) -> RenderHandle {
            let handle = RenderHandle(self.next_id);
            self.next_id += 1;
            self.visible.push(handle);
            handle
        }

        pub fn labels(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Label { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl Renderer for RecordingRenderer {
        fn set_title(&mut self, title: &str) {
            self.ops.push(Op::Title(title.to_string()));
        }

        fn draw_polyline(&mut self, points: &[Vector2D], style: LineStyle) -> RenderHandle {
            let handle = self.issue();
            self.ops.push(Op::Polyline { handle, points: points.to_vec(), style });
            handle
        }

        fn draw_label(&mut self, text: &str, at: Vector2D) -> RenderHandle {
            let handle = self.issue();
            self.ops.push(Op::Label { handle, text: text.to_string(), at });
            handle
        }

        fn remove(&mut self, handle: RenderHandle) {
            self.visible.retain(|h| *h != handle);
            self.ops.push(Op::Remove(handle));
        }

        fn pause(&mut self, duration: Duration) {
            self.ops.push(Op::Pause(duration));
        }

        fn show_legend(&mut self, handle: RenderHandle, text: &str) {
            self.ops.push(Op::Legend { handle, text: text.to_string() });
        }

        fn frame_started(&mut self, frame: usize, _frame_count: usize, t: f64) {
            self.ops.push(Op::Frame { frame, t });
        }
    }
}
