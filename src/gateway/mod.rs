//! 引擎入口层
//!
//! - **intent**: 基于关键词子串的意图识别
//! - **message**: 请求/响应协议（camelCase JSON）
//! - **server**: HTTP 服务（健康检查 + 编排接口，共享密钥鉴权），需启用 `server` feature

mod intent;
mod message;
#[cfg(feature = "server")]
pub mod server;

pub use intent::{Intent, IntentClassifier};
pub use message::{EngineRequest, EngineResponse, HandwritingFeedback, HistoryTurn, UploadArtifact};
