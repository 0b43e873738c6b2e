//! mesh_import - OBJ 网格导入工具
//!
//! 并行导入一组 OBJ 文件，上传到内存中的顶点数组，并输出每个模型的统计信息和包围盒。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件中的模型列表
//! mesh_import
//!
//! # 命令行指定模型（覆盖配置文件）
//! mesh_import assets/crate.obj assets/sphere.obj --threads 2 --log-level debug
//!
//! # 指定配置文件
//! mesh_import --config tools/import.toml
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{error, info};

use mesh_import::core::config::config_path_from_args;
use mesh_import::core::{log, Config};
use mesh_import::geometry::loaders::load_meshes_parallel;
use mesh_import::geometry::{Aabb, Vertex};
use mesh_import::gfx::{upload_mesh, HeadlessUploader};

/// 应用程序入口点
///
/// # 流程
///
/// 1. 加载配置文件（默认 config.toml，可用 `--config` 指定）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 并行加载所有模型
/// 5. 逐个上传并计算包围盒
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let config_path =
        config_path_from_args(std::env::args()).unwrap_or_else(|| "config.toml".to_string());
    let mut config = Config::from_file_or_default(&config_path);

    // 2. 应用命令行参数
    config.apply_args(std::env::args());
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", config_path))?;

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "mesh_import starting");

    if config.import.models.is_empty() {
        bail!("No models to import; pass OBJ paths or list them under [import] in {}", config_path);
    }

    // 4. 并行加载
    let paths: Vec<PathBuf> = config.import.models.iter().map(PathBuf::from).collect();
    info!(
        models = paths.len(),
        workers = config.import.worker_threads,
        "Importing models"
    );
    let results = load_meshes_parallel(&paths, config.import.worker_threads);

    // 5. 上传在单线程上进行
    let mut uploader = HeadlessUploader::new();
    let mut failures = 0usize;

    for (path, result) in results {
        let mesh = match result {
            Ok(mesh) => mesh,
            Err(e) => {
                error!(path = %path.display(), line = ?e.line(), "Import failed: {}", e);
                eprintln!("{}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let vao = upload_mesh(&mut uploader, &mesh)
            .with_context(|| format!("Failed to upload {}", path.display()))?;
        let aabb = Aabb::from_positions(&mesh.positions);
        let interleaved = mesh.to_interleaved();

        println!(
            "{}: vao {} | {} vertices ({} bytes) | {} triangles | draw {} | {}",
            path.display(),
            vao.0,
            mesh.vertex_count(),
            Vertex::as_bytes(&interleaved).len(),
            mesh.triangle_count(),
            mesh.draw_length(),
            aabb,
        );
    }

    info!(
        imported = uploader.len(),
        failed = failures,
        "Import finished"
    );

    if failures > 0 {
        bail!("{} of {} models failed to import", failures, paths.len());
    }

    Ok(())
}
