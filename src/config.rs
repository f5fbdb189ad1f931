//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `EDUVANE__*` 覆盖（双下划线表示嵌套，如
//! `EDUVANE__ENGINE__LINGUISTIC_VARIATION=true`）。

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// 环境变量前缀
const ENV_PREFIX: &str = "EDUVANE";

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub engine: EngineConfig,
    pub session: SessionSection,
    pub server: ServerSection,
}

/// [app] 段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSection {
    pub name: Option<String>,
}

/// [engine] 段：渲染模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// true 时通过变体池渲染措辞；false（默认）时使用固定模板文本
    pub linguistic_variation: bool,
}

impl EngineConfig {
    pub fn fixed() -> Self {
        Self {
            linguistic_variation: false,
        }
    }

    pub fn varied() -> Self {
        Self {
            linguistic_variation: true,
        }
    }
}

/// [session] 段：会话过期
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// 会话空闲多久后可被清理（秒）；0 表示永不过期
    pub idle_timeout_secs: u64,
    /// 后台清理间隔（秒）
    pub cleanup_interval_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 3600,
            cleanup_interval_secs: 300,
        }
    }
}

/// [server] 段：监听地址与网关共享密钥
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    /// 网关调用引擎时需在 `x-eduvane-shared-secret` 头中携带；为空则不校验
    pub shared_secret: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8090".to_string(),
            shared_secret: "change-me".to_string(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 EDUVANE__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 EDUVANE__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    load_with_env(config_path, None)
}

/// 与 [`load_config`] 相同，但可用给定的键值表代替进程环境变量
pub fn load_with_env(
    config_path: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
