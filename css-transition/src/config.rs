//! # Config 模块
//!
//! 解析器配置。
//!
//! 严格/宽松模式由调用方显式传入，不存在全局开关。

use serde::{Deserialize, Serialize};

/// duration 检查模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// 缺少 duration 时返回 [`TransitionError::MissingDuration`](crate::TransitionError::MissingDuration)
    Strict,
    /// 缺少 duration 时照常输出（省略 duration），只记录警告
    Permissive,
}

impl Default for CheckMode {
    fn default() -> Self {
        default_check_mode()
    }
}

/// 解析器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// duration 检查模式
    ///
    /// - debug build 默认宽松（见 `default_check_mode()`）
    /// - release build 默认严格
    #[serde(default = "default_check_mode")]
    pub mode: CheckMode,
}

fn default_check_mode() -> CheckMode {
    if cfg!(debug_assertions) {
        CheckMode::Permissive
    } else {
        CheckMode::Strict
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mode: default_check_mode(),
        }
    }
}

impl ResolverConfig {
    /// 严格模式配置
    pub fn strict() -> Self {
        Self {
            mode: CheckMode::Strict,
        }
    }

    /// 宽松模式配置
    pub fn permissive() -> Self {
        Self {
            mode: CheckMode::Permissive,
        }
    }

    /// 是否为严格模式
    pub fn is_strict(&self) -> bool {
        self.mode == CheckMode::Strict
    }
}
