//! 记忆层：单会话状态（对话轮次、薄弱点、近期措辞）与进程内会话存储

pub mod session;
pub mod store;

pub use session::{SessionState, Speaker, Turn, MAX_LEARNING_GAPS, MAX_RECENT_PHRASES, MAX_TURNS};
pub use store::{SessionId, SessionStore};
