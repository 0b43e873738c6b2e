//! 错误处理模块
//!
//! 定义了导入管线中使用的统一错误类型，使用 `thiserror` 提供友好的错误消息。
//!
//! # 设计原则
//!
//! - 使用 `thiserror` 自动实现 `Error` trait
//! - 致命的解析错误携带文件名和行号
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::path::PathBuf;
use thiserror::Error;

/// 导入管线统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, MeshImportError>;

/// mesh_import 的错误类型
#[derive(Debug, Error)]
pub enum MeshImportError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 网格加载错误
    #[error("Mesh loading error: {0}")]
    MeshLoading(#[from] MeshLoadError),

    /// 上传适配器错误
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshImportError {
    /// 加载失败时出错的行号
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshImportError::MeshLoading(e) => e.line(),
            _ => None,
        }
    }
}

/// 配置相关的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件未找到
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// 配置值无效
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 面引用的数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTable {
    Position,
    TexCoord,
    Normal,
}

impl std::fmt::Display for AttributeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AttributeTable::Position => "position",
            AttributeTable::TexCoord => "texture coordinate",
            AttributeTable::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// 网格加载相关的错误
///
/// 任何一个变体都意味着整个加载失败，调用方拿不到网格。
#[derive(Debug, Error)]
pub enum MeshLoadError {
    /// 文件不存在
    #[error("Mesh file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// 面不是完整 UV 映射的三角形
    #[error("{file}:{line}: malformed face ({reason}), only fully UV mapped triangles are supported")]
    MalformedFace {
        file: String,
        line: usize,
        reason: String,
    },

    /// 数值解析失败
    #[error("{file}:{line}: failed to parse {what} from '{token}'")]
    ParseError {
        file: String,
        line: usize,
        what: &'static str,
        token: String,
    },

    /// 面引用了尚未读取的属性
    #[error("{file}:{line}: {table} index {index} out of range ({len} defined so far)")]
    IndexOutOfRange {
        file: String,
        line: usize,
        table: AttributeTable,
        index: usize,
        len: usize,
    },

    /// 内存中的数据不是 UTF-8 文本
    #[error("Mesh data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// 数据验证失败
    #[error("Mesh validation failed: {0}")]
    ValidationError(String),
}

impl MeshLoadError {
    /// 解析类错误所在的行号
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshLoadError::MalformedFace { line, .. }
            | MeshLoadError::ParseError { line, .. }
            | MeshLoadError::IndexOutOfRange { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// 上传适配器相关的错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 未知的顶点数组句柄
    #[error("Unknown vertex array {0}")]
    UnknownVertexArray(u32),

    /// 属性数组长度不是分量数的整数倍
    #[error("Attribute slot {slot} expects {components} components, got {len} floats")]
    AttributeSize {
        slot: u32,
        components: u32,
        len: usize,
    },

    /// 顶点数组已经完成，不能再写入
    #[error("Vertex array {0} is already finalized")]
    AlreadyFinalized(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_face_message_names_file_and_line() {
        let err = MeshLoadError::MalformedFace {
            file: "cube.obj".to_string(),
            line: 12,
            reason: "2 corners".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cube.obj:12:"));
        assert_eq!(err.line(), Some(12));

        let err: MeshImportError = err.into();
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn test_conversion_into_crate_error() {
        let err: MeshImportError = MeshLoadError::UnsupportedFormat("fbx".into()).into();
        assert!(matches!(err, MeshImportError::MeshLoading(_)));
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("fbx"));
    }
}
