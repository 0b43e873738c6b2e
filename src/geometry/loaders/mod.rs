/// 模型加载器模块
///
/// 提供统一的模型加载接口和具体格式的实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 的三角形子集（自带解析器，见 `obj_parser`）
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_import::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"))?;
/// # Ok::<(), mesh_import::core::MeshImportError>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use std::path::{Path, PathBuf};
use std::thread;

pub mod obj_parser;
pub mod obj_loader;

pub use obj_loader::{ObjGeometry, ObjLoader};

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。加载器是无状态的，
/// 每次调用都拥有自己的工作集，因此可以在多个线程上同时加载不同的模型。
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    /// - 数据验证失败
    fn load_from_file(path: &Path) -> Result<MeshData>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<MeshData>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat(format!(
                "Cannot determine the extension of {}",
                path.display()
            ))
        })?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!(".{}", extension)).into())
    }
}

/// 在多个线程上并行加载多个模型
///
/// 每个加载彼此独立，不共享任何可变状态。结果与 `paths` 顺序一致。
/// `workers` 为 0 时按 1 处理。
pub fn load_meshes_parallel(
    paths: &[PathBuf],
    workers: usize,
) -> Vec<(PathBuf, Result<MeshData>)> {
    if paths.is_empty() {
        return Vec::new();
    }

    let chunk_size = paths.len().div_ceil(workers.max(1));

    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| (path.clone(), load_mesh(path)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
