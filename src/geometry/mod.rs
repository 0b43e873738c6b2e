/// 几何体导入和处理模块
///
/// 把 OBJ 文本转换成可以直接上传到 GPU 的扁平数组，并计算包围盒。
///
/// # 模块结构
///
/// - `registry`: 顶点注册表（按 位置/纹理/法线 组合去重）
/// - `mesh`: 扁平化后的网格数据
/// - `vertex`: 交错布局的顶点
/// - `bounds`: 轴对齐包围盒
/// - `loaders`: OBJ 解析器和加载器
/// - `model`: 加载、上传、包围盒计算的组合入口
///
/// # 数据流
///
/// ```text
/// OBJ 文本
///     ↓
/// ObjRecords（逐行记录）
///     ↓
/// ObjGeometry（注册表 + 索引 + 切线累加）
///     ↓
/// MeshData（扁平数组，V 翻转）
///     ↓
/// MeshUploader（顶点数组）+ Aabb
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_import::geometry::loaders::{MeshLoader, ObjLoader};
/// use mesh_import::geometry::Aabb;
/// use std::path::Path;
///
/// let mesh_data = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// let aabb = Aabb::from_positions(&mesh_data.positions);
///
/// println!("顶点数: {}", mesh_data.vertex_count());
/// println!("包围盒: {:?} - {:?}", aabb.min, aabb.max);
///
/// # Ok::<(), mesh_import::core::MeshImportError>(())
/// ```

pub mod vertex;
pub mod registry;
pub mod mesh;
pub mod bounds;
pub mod loaders;
pub mod model;

pub use bounds::Aabb;
pub use mesh::MeshData;
pub use model::{Model, ModelBuilder};
pub use registry::{FaceCorner, VertexRecord, VertexRegistry};
pub use vertex::Vertex;
