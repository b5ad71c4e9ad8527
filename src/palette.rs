use macroquad::color::Color;

// viridis 色图的 9 个等距锚点 (sRGB)，中间按线性插值取色
const VIRIDIS: [[u8; 3]; 9] = [
    [0x44, 0x01, 0x54],
    [0x47, 0x2c, 0x7a],
    [0x3b, 0x51, 0x8b],
    [0x2c, 0x71, 0x8e],
    [0x21, 0x90, 0x8d],
    [0x27, 0xad, 0x81],
    [0x5c, 0xc8, 0x63],
    [0xaa, 0xdc, 0x32],
    [0xfd, 0xe7, 0x25],
];

/// 在 viridis 上取 s ∈ [0, 1] 处的颜色
pub fn viridis(s: f64) -> Color {
    let s = s.clamp(0.0, 1.0);
    let scaled = s * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = (scaled - lo as f64) as f32;
    let channel = |c: usize| {
        let a = VIRIDIS[lo][c] as f32 / 255.0;
        let b = VIRIDIS[lo + 1][c] as f32 / 255.0;
        a + (b - a) * frac
    };
    Color::new(channel(0), channel(1), channel(2), 1.0)
}

/// 调色板颜色数的上限，约对应 1449 个种子点
pub const MAX_PALETTE_SWATCHES: usize = 1 << 20;

/// 三角数 N(N-1)/2，溢出时返回 None
pub fn palette_size(n: usize) -> Option<usize> {
    n.checked_mul(n.saturating_sub(1)).map(|v| v / 2)
}

/// 调色板切片的游标推进方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteLayout {
    /// 游标按上一组的宽度推进，各层切片首尾相接、互不重叠
    #[default]
    Packed,
    /// 游标按层号推进（旧行为）。N >= 3 时相邻层的切片会重叠，调色板尾部的颜色则被跳过
    Legacy,
}

impl PaletteLayout {
    /// 第 `level` 层（从 1 开始）那组颜色在调色板中的起点
    fn offset(self, n: usize, level: usize) -> usize {
        match self {
            PaletteLayout::Packed => (1..level).map(|j| n - j).sum(),
            PaletteLayout::Legacy => (1..level).sum(),
        }
    }
}

/// (层, 段) -> 颜色，整个运行期间只计算一次。
///
/// 第 L 层 (1..N-1) 的第 i 段是连接第 L-1 层第 i 与第 i+1 个点、
/// 并由插值产生第 L 层第 i 个点的那条线。每层有 N-L 段。
#[derive(Debug, Clone)]
pub struct ColorAssignment {
    groups: Vec<Vec<Color>>,
}

impl ColorAssignment {
    pub fn new(n: usize, layout: PaletteLayout) -> Self {
        // 三角数 N(N-1)/2 个颜色，均匀分布在色图上。调用者需保证 N 不超出上限
        let size = palette_size(n).unwrap_or(0).min(MAX_PALETTE_SWATCHES);
        let palette: Vec<Color> = (0..size)
            .map(|i| {
                if size > 1 {
                    viridis(i as f64 / (size - 1) as f64)
                } else {
                    viridis(0.0)
                }
            })
            .collect();

        let groups = (1..n)
            .map(|level| {
                let start = layout.offset(n, level);
                // 两种布局下 start + (n - level) 都不会超过 size
                palette[start..start + (n - level)].to_vec()
            })
            .collect();

        Self { groups }
    }

    pub fn color(&self, level: usize, segment: usize) -> Option<Color> {
        level
            .checked_sub(1)
            .and_then(|group| self.groups.get(group))
            .and_then(|swatches| swatches.get(segment))
            .copied()
    }

    /// 第 `level` 层点之间连线所用的颜色组，即它们所喂给的下一层
    pub fn connector_colors(&self, level: usize) -> &[Color] {
        self.groups.get(level).map(Vec::as_slice).unwrap_or(&[])
    }
}
