use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::basic_structs::Vector2D;
use crate::error::{BezierError, BezierResult};

// 随机种子点的取值范围，与绘图窗口 [-100, 100] 对应
pub const COORD_MIN: i32 = -100;
pub const COORD_MAX: i32 = 100;

/// 生成 n 个整数坐标的随机种子点，坐标取自 [-100, 100)
pub fn generate_start_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vector2D> {
    (0..n)
        .map(|_| {
            Vector2D::new(
                rng.random_range(COORD_MIN..COORD_MAX) as f64,
                rng.random_range(COORD_MIN..COORD_MAX) as f64,
            )
        })
        .collect()
}

/// 指定 seed 时可复现，否则使用系统熵
pub fn random_points(n: usize, seed: Option<u64>) -> Vec<Vector2D> {
    match seed {
        Some(seed) => generate_start_points(n, &mut StdRng::seed_from_u64(seed)),
        None => generate_start_points(n, &mut rand::rng()),
    }
}

/// 解析 "x,y;x,y;..." 形式的点列表
pub fn parse_points(text: &str) -> BezierResult<Vec<Vector2D>> {
    text.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (x, y) = item.split_once(',').ok_or_else(|| {
                BezierError::InvalidConfiguration(format!("point `{item}` is not of the form x,y"))
            })?;
            let coord = |s: &str| {
                s.trim().parse::<f64>().map_err(|e| {
                    BezierError::InvalidConfiguration(format!("bad coordinate `{}` in `{item}`: {e}", s.trim()))
                })
            };
            let point = Vector2D::new(coord(x)?, coord(y)?);
            if !point.is_finite() {
                return Err(BezierError::InvalidConfiguration(format!(
                    "point `{item}` is not finite"
                )));
            }
            Ok(point)
        })
        .collect()
}
