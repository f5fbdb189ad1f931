//! 核心编排层：错误类型、角色解析、对话编排器

pub mod error;
pub mod orchestrator;
pub mod role;

pub use error::EngineError;
pub use orchestrator::Orchestrator;
pub use role::{resolve_role, Role};
