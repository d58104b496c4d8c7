//! # Error 模块
//!
//! 定义 css-transition 中使用的错误类型。

use thiserror::Error;

/// 阶段表配置错误
///
/// 只在严格模式（[`CheckMode::Strict`](crate::config::CheckMode::Strict)）下产生，
/// 表示阶段表编写有误，不可重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// 激活的阶段没有可用的持续时间（自身和默认阶段都未提供）
    #[error("阶段 \"{phase}\" 没有可用的 duration：所有阶段都必须指定持续时间")]
    MissingDuration { phase: String },
}

/// Result 类型别名
pub type TransitionResult<T> = Result<T, TransitionError>;
