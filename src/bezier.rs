use crate::basic_structs::Vector2D;
use crate::error::{BezierError, BezierResult};

/// 单帧的德卡斯特里奥金字塔。
///
/// `levels[0]` 是种子点原样拷贝，`levels[k]` 有 N-k 个点，
/// 每个点由上一层相邻两点插值得到，最后一层只有一个点，即当前 t 的曲线点。
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationGraph {
    t: f64,
    levels: Vec<Vec<Vector2D>>,
}

impl InterpolationGraph {
    /// 对给定种子点和参数 t 计算整个金字塔。
    ///
    /// 纯函数：相同的 (seeds, t) 总是得到逐位相同的结果。t 不做截断。
    pub fn build(seeds: &[Vector2D], t: f64) -> BezierResult<Self> {
        if seeds.len() < 2 {
            return Err(BezierError::InsufficientPoints { found: seeds.len() });
        }

        let n = seeds.len();
        let mut levels: Vec<Vec<Vector2D>> = Vec::with_capacity(n);
        levels.push(seeds.to_vec());

        for k in 1..n {
            let prev = &levels[k - 1];
            let level: Vec<Vector2D> = prev
                .windows(2)
                .map(|pair| pair[0].lerp(pair[1], t))
                .collect();
            debug_assert_eq!(level.len(), n - k);
            levels.push(level);
        }

        Ok(Self { t, levels })
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    /// 层数，等于种子点数 N
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, level: usize) -> Option<&[Vector2D]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// 中间层 1..N-2（不含种子层和顶层）
    pub fn intermediate_levels(&self) -> impl Iterator<Item = (usize, &[Vector2D])> {
        let top = self.levels.len() - 1;
        self.levels
            .iter()
            .enumerate()
            .skip(1)
            .take(top.saturating_sub(1))
            .map(|(level, points)| (level, points.as_slice()))
    }

    /// 顶层唯一的点：当前帧的贝塞尔曲线点
    pub fn final_point(&self) -> Vector2D {
        // build 保证至少两层，且顶层恰好一个点
        self.levels[self.levels.len() - 1][0]
    }
}

//使用德卡斯特里奥算法计算 n 阶贝塞尔曲线在 t 处的值，只保留最终点，不构建整个金字塔。
//`points`: 包含 n+1 个控制点的切片。
pub fn de_iterative(points: &[Vector2D], t: f64) -> Option<Vector2D> {
    if points.is_empty() {
        return None;
    }

    let mut buffer = points.to_vec();
    let mut n = buffer.len();

    while n > 1 {
        //在原地更新 buffer[i] 为它与下一个点的插值
        for i in 0..(n - 1) {
            buffer[i] = buffer[i].lerp(buffer[i + 1], t);
        }
        //点的数量减少 1 (上升一层)
        n -= 1;
    }

    Some(buffer[0])
}

/// 已处理帧的曲线点，只追加，不重排也不删除
#[derive(Debug, Clone, Default)]
pub struct CurveTrace {
    points: Vec<Vector2D>,
}

impl CurveTrace {
    pub fn with_capacity(frames: usize) -> Self {
        Self { points: Vec::with_capacity(frames) }
    }

    pub fn append(&mut self, point: Vector2D) {
        self.points.push(point);
    }

    pub fn as_polyline(&self) -> &[Vector2D] {
        &self.points
    }

    /// 最新的一段：帧 0 时只有一个点，之后是最后两个点
    pub fn last_segment(&self) -> &[Vector2D] {
        let start = self.points.len().saturating_sub(2);
        &self.points[start..]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
