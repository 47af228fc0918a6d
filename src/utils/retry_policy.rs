// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 重试策略配置
///
/// 页面抓取失败后由工作器决定是否重新入队，以及入队前等待多久。
/// `max_attempts` 为 0 表示不限次数。
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// 每个页面最多尝试的次数（包括第一次），0 表示不限
    pub max_attempts: u32,
    /// 初始退避时间，为零时立即重新入队
    pub initial_backoff: Duration,
    /// 最大退避时间
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// 不限次数、立即重试
    pub fn unlimited() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    /// 创建带指数退避的策略
    pub fn with_backoff(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            ..Self::default()
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_attempts == 0
    }

    /// 第 `attempt` 次尝试失败后是否还能再试
    pub fn should_retry(&self, attempt: u32) -> bool {
        self.is_unlimited() || attempt < self.max_attempts
    }

    /// 计算第 `attempt` 次失败后的退避时间
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        if self.initial_backoff.is_zero() {
            return Duration::ZERO;
        }

        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let backoff_secs =
            self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        let final_backoff = if self.jitter_factor > 0.0 {
            let jitter_range = capped_backoff * self.jitter_factor;
            let jitter = rand::random_range(-jitter_range..=jitter_range);
            (capped_backoff + jitter).max(0.0)
        } else {
            capped_backoff
        };

        Duration::from_secs_f64(final_backoff)
    }
}
