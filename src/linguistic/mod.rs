//! 语言变体层：在意图确定之后、输出之前改变表层措辞
//!
//! - **picker**: 随机源抽象（系统熵源 / 测试脚本）
//! - **pools**: 各 act 的固定变体池
//! - **realizer**: 三级回退的变体选择、尾句去重、按意图组合响应

pub mod picker;
pub mod pools;
pub mod realizer;

pub use picker::{OsRngPicker, SequencePicker, VariantPicker};
pub use pools::Variant;
pub use realizer::{is_greeting_message, LinguisticRealizer, RenderInput, Rendered};
