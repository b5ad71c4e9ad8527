/// 动画引擎的错误类型
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BezierError {
    /// 配置非法：点数或帧数小于 2、坐标非有限值、点列表无法解析等。
    /// 在处理任何一帧之前报告。
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// 插值图内部保护，上游校验通过时不应出现
    #[error("insufficient points: need at least 2, got {found}")]
    InsufficientPoints { found: usize },
}

pub type BezierResult<T> = Result<T, BezierError>;
