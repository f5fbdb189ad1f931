//! 变体选择的随机源
//!
//! 生产环境使用系统熵源（每次调用独立取随机数，不存在可复现的种子）；
//! 测试中可注入按脚本返回下标的实现。

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::Rng;

/// 在候选集中均匀选出一个下标
pub trait VariantPicker: Send + Sync {
    /// 返回 [0, len) 内的下标；调用方保证 len > 0
    fn pick_index(&self, len: usize) -> usize;
}

/// 基于操作系统熵源的选择器
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngPicker;

impl VariantPicker for OsRngPicker {
    fn pick_index(&self, len: usize) -> usize {
        OsRng.gen_range(0..len)
    }
}

/// 按预设序列返回下标（对 len 取模）；序列用完后恒返回 0
#[derive(Debug, Default)]
pub struct SequencePicker {
    script: Mutex<VecDeque<usize>>,
}

impl SequencePicker {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// 恒选第一个候选
    pub fn first() -> Self {
        Self::default()
    }
}

impl VariantPicker for SequencePicker {
    fn pick_index(&self, len: usize) -> usize {
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or(0);
        next % len
    }
}
