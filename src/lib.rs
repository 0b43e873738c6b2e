//! mesh_import - OBJ 网格导入管线
//!
//! 把 Wavefront OBJ 的三角形子集转换成可以直接上传到 GPU 的扁平顶点数组：
//! 按 位置/纹理/法线 组合去重顶点，逐面累加切线，翻转纹理 V 坐标，
//! 通过上传接口交给图形后端，并计算轴对齐包围盒。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 向量类型和切线计算
//! - `geometry`: 顶点注册表、网格数据、包围盒、OBJ 加载器、模型
//! - `gfx`: 网格上传接口和无图形设备的实现
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_import::geometry::Model;
//! use mesh_import::gfx::HeadlessUploader;
//!
//! let mut uploader = HeadlessUploader::new();
//! let model = Model::builder()
//!     .file("assets/crate.obj")
//!     .create(&mut uploader)?;
//!
//! println!("{} elements, bounds {:?}", model.vao_length(), model.aabb());
//! # Ok::<(), mesh_import::core::MeshImportError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod gfx;
