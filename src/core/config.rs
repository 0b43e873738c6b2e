//! 配置管理模块
//!
//! 提供导入工具配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [import]
//! models = ["assets/crate.obj"]
//! worker_threads = 4
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 工具配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 导入配置
    #[serde(default)]
    pub import: ImportConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 导入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// 需要导入的模型文件
    #[serde(default)]
    pub models: Vec<String>,

    /// 并行导入使用的线程数
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

// 默认值函数
fn default_worker_threads() -> usize { 4 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_import.log".to_string() }

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            worker_threads: default_worker_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use mesh_import::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), mesh_import::core::MeshImportError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--log-level <level>`: 设置日志级别
    /// - `--threads <n>`: 设置并行导入线程数
    /// - `--log-file <path>`: 同时输出日志到文件
    /// - 其余不以 `--` 开头的参数视为模型路径，替换配置中的模型列表
    ///
    /// 第一个参数被视为程序名并跳过。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut models = Vec::new();

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--log-level" => {
                    if let Some(level) = iter.next().and_then(|v| LogLevel::parse(v)) {
                        self.logging.level = level;
                    }
                }
                "--threads" => {
                    if let Some(threads) = iter.next().and_then(|v| v.parse().ok()) {
                        self.import.worker_threads = threads;
                    }
                }
                "--log-file" => {
                    if let Some(path) = iter.next() {
                        self.logging.file_output = true;
                        self.logging.log_file = path.clone();
                    }
                }
                "--config" => {
                    // 由调用方在加载阶段处理
                    iter.next();
                }
                other if !other.starts_with("--") => models.push(other.to_string()),
                _ => {}
            }
        }

        if !models.is_empty() {
            self.import.models = models;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.import.worker_threads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.worker_threads".to_string(),
                reason: "At least one worker thread is required".to_string(),
            }.into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "File output is enabled but no log file was given".to_string(),
            }.into());
        }

        Ok(())
    }
}

/// 从参数中找出 `--config <path>`
pub fn config_path_from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg.as_ref() == "--config" {
            return iter.next().map(|p| p.as_ref().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.import.models.is_empty());
        assert_eq!(config.import.worker_threads, 4);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.import.worker_threads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [import]
            models = ["a.obj", "b.obj"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.import.models, vec!["a.obj", "b.obj"]);
        assert_eq!(config.import.worker_threads, 4);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.file_output);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(Config::from_toml_str("[import\nmodels = 1").is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.import.models = vec!["from_config.obj".to_string()];
        config.apply_args([
            "mesh_import",
            "--log-level",
            "warn",
            "--threads",
            "2",
            "--config",
            "other.toml",
            "cube.obj",
            "sphere.obj",
        ]);

        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.import.worker_threads, 2);
        assert_eq!(config.import.models, vec!["cube.obj", "sphere.obj"]);
    }

    #[test]
    fn test_config_path_from_args() {
        assert_eq!(
            config_path_from_args(["bin", "--config", "my.toml"]),
            Some("my.toml".to_string())
        );
        assert_eq!(config_path_from_args(["bin", "cube.obj"]), None);
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join("mesh_import_config_roundtrip.toml");
        let mut config = Config::default();
        config.import.models.push("teapot.obj".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.import.models, vec!["teapot.obj"]);
        let _ = std::fs::remove_file(&path);
    }
}
