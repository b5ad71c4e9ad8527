
// 二维坐标。种子点、各层插值点和曲线轨迹都使用这个结构
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 线性插值 (1-t)·self + t·other
    ///
    /// 按分量计算，不做任何截断；t 超出 [0, 1] 时由调用者负责。
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl std::ops::Sub for Vector2D {
    type Output = Self;
    fn sub(self, other: Self) -> Self::Output {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}
impl std::ops::Add for Vector2D {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}
impl std::ops::Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::fmt::Display for Vector2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends() {
        let a = Vector2D::new(-3.0, 4.0);
        let b = Vector2D::new(5.0, -1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vector2D::new(1.0, 1.5));
    }

    #[test]
    fn operators_are_componentwise() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, 5.0);
        assert_eq!(a + b, Vector2D::new(4.0, 7.0));
        assert_eq!(b - a, Vector2D::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(Vector2D::new(0.0, 0.0).distance(Vector2D::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn non_finite_is_detected() {
        assert!(Vector2D::new(1.0, 2.0).is_finite());
        assert!(!Vector2D::new(f64::NAN, 2.0).is_finite());
        assert!(!Vector2D::new(1.0, f64::INFINITY).is_finite());
    }
}
