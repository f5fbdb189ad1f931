//! Eduvane 对话编排引擎
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **content**: 内容协作方（薄弱点抽取、出题、书写反馈、正文合成）
//! - **core**: 错误类型、角色解析、对话编排器
//! - **gateway**: 意图识别、请求/响应协议、HTTP 服务
//! - **linguistic**: 措辞变体池与防重复选择
//! - **memory**: 会话记忆与会话存储
//! - **observability**: 日志初始化

pub mod config;
pub mod content;
pub mod core;
pub mod gateway;
pub mod linguistic;
pub mod memory;
pub mod observability;

pub use crate::core::{EngineError, Orchestrator, Role};
pub use gateway::{EngineRequest, EngineResponse, Intent};
