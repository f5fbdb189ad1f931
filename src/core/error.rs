//! 引擎错误类型
//!
//! 编排过程中的错误对单个请求都是终止性的：不重试、不回滚已写入的会话记忆。
//! 对外（HTTP 层）只返回笼统的失败信息，细节仅进入日志。

use thiserror::Error;

/// 编排过程中可能出现的错误
#[derive(Error, Debug)]
pub enum EngineError {
    /// 外部协作方（出题、文本合成等）返回了不符合约定的结果
    #[error("Invalid collaborator output: {0}")]
    InvalidCollaboratorOutput(String),
}
