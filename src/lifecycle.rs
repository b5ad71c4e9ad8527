use log::{debug, warn};

use crate::render::{RenderHandle, Renderer};

/// 中间层图元的生命周期管理。
///
/// 每个中间层 (1..N-2) 只保留上一帧画出的句柄；新一帧的图元准备好后，
/// 旧句柄被移除，新句柄接替。种子层和曲线轨迹不归这里管。
#[derive(Debug)]
pub struct RenderLifecycle {
    // tracked[level - 1] 对应第 level 层
    tracked: Vec<Vec<RenderHandle>>,
}

impl RenderLifecycle {
    /// `n` 为种子点数，中间层共 N-2 个
    pub fn new(n: usize) -> Self {
        Self { tracked: vec![Vec::new(); n.saturating_sub(2)] }
    }

    pub fn is_managed(&self, level: usize) -> bool {
        level >= 1 && level <= self.tracked.len()
    }

    /// 移除 `level` 层当前跟踪的全部句柄，并记录新的一组。
    ///
    /// 种子层、顶层或越界的层不受管理：新句柄不会被跟踪，立即移除。
    pub fn replace<R: Renderer>(
        &mut self,
        renderer: &mut R,
        level: usize,
        handles: Vec<RenderHandle>,
    ) {
        if !self.is_managed(level) {
            warn!("level {level} is not an intermediate level, dropping {} handles", handles.len());
            for handle in handles {
                renderer.remove(handle);
            }
            return;
        }
        let slot = &mut self.tracked[level - 1];
        debug!("level {level}: retiring {} handles, tracking {}", slot.len(), handles.len());
        for old in slot.drain(..) {
            renderer.remove(old);
        }
        *slot = handles;
    }

    /// 移除所有层的全部句柄，动画结束时调用
    pub fn retire_all<R: Renderer>(&mut self, renderer: &mut R) {
        let mut retired = 0;
        for slot in &mut self.tracked {
            retired += slot.len();
            for old in slot.drain(..) {
                renderer.remove(old);
            }
        }
        debug!("retired {retired} handles at end of animation");
    }

    pub fn tracked(&self, level: usize) -> &[RenderHandle] {
        if self.is_managed(level) {
            &self.tracked[level - 1]
        } else {
            &[]
        }
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_structs::Vector2D;
    use crate::render::recording::{Op, RecordingRenderer};

    fn label(renderer: &mut RecordingRenderer, text: &str) -> RenderHandle {
        renderer.draw_label(text, Vector2D::new(0.0, 0.0))
    }

    #[test]
    fn replace_retires_previous_handles_once() {
        let mut renderer = RecordingRenderer::default();
        let mut lifecycle = RenderLifecycle::new(4);

        let first = vec![label(&mut renderer, "B0"), label(&mut renderer, "B1")];
        lifecycle.replace(&mut renderer, 1, first.clone());
        assert_eq!(renderer.count(|op| matches!(op, Op::Remove(_))), 0);
        assert_eq!(lifecycle.tracked(1), first.as_slice());

        let second = vec![label(&mut renderer, "B0")];
        lifecycle.replace(&mut renderer, 1, second.clone());
        assert_eq!(renderer.count(|op| matches!(op, Op::Remove(_))), 2);
        assert_eq!(renderer.visible, second);
        assert_eq!(lifecycle.tracked(1), second.as_slice());
    }

    #[test]
    fn seed_and_top_levels_are_not_managed() {
        let mut renderer = RecordingRenderer::default();
        let mut lifecycle = RenderLifecycle::new(4);
        let h = label(&mut renderer, "A0");

        let top = label(&mut renderer, "D0");

        lifecycle.replace(&mut renderer, 0, vec![h]);
        lifecycle.replace(&mut renderer, 3, vec![top]);
        assert!(lifecycle.is_managed(2));
        assert_eq!(lifecycle.tracked_count(), 0);
        assert!(lifecycle.tracked(0).is_empty());
        // 不受管理的句柄不会留在屏幕上
        assert!(renderer.visible.is_empty());
        assert_eq!(renderer.count(|op| matches!(op, Op::Remove(_))), 2);

        // 两个点没有中间层
        assert!(!RenderLifecycle::new(2).is_managed(1));
    }

    #[test]
    fn retire_all_clears_every_level() {
        let mut renderer = RecordingRenderer::default();
        let mut lifecycle = RenderLifecycle::new(5);
        for level in 1..=3 {
            let handles = vec![label(&mut renderer, "x"), label(&mut renderer, "y")];
            lifecycle.replace(&mut renderer, level, handles);
        }
        assert_eq!(lifecycle.tracked_count(), 6);

        lifecycle.retire_all(&mut renderer);
        assert_eq!(lifecycle.tracked_count(), 0);
        assert!(renderer.visible.is_empty());

        // 再次调用不会重复移除
        lifecycle.retire_all(&mut renderer);
        assert_eq!(renderer.count(|op| matches!(op, Op::Remove(_))), 6);
    }
}
