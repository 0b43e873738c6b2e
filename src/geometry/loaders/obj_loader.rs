/// OBJ 文件加载器
///
/// 只接受完整 UV 映射的三角形面（`f p/t/n p/t/n p/t/n`）。
/// 解析是单遍的：`v`/`vt`/`vn` 行追加到各自的表中，`f` 行立即解析，
/// 所以面只能引用它之前出现的属性。
use super::obj_parser::{FaceCornerRef, ObjRecord, ObjRecords};
use super::MeshLoader;
use crate::core::error::{AttributeTable, MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use crate::geometry::registry::{FaceCorner, VertexRegistry};
use crate::math::geometry::accumulate_tangent;
use crate::math::{Vector2, Vector3};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// OBJ 格式加载器
///
/// # 特性
///
/// - 同一位置搭配不同纹理/法线时拆分顶点，其余情况共享顶点
/// - 按三角形累加并平均切线
/// - UV 坐标翻转（V轴：1.0 - v）
///
/// # 使用示例
///
/// ```rust
/// use mesh_import::geometry::loaders::ObjLoader;
///
/// let mesh = ObjLoader::load_from_str("triangle.obj", "\
/// v 0 0 0
/// v 1 0 0
/// v 0 1 0
/// vt 0 0
/// vt 1 0
/// vt 0 1
/// vn 0 0 1
/// f 1/1/1 2/2/1 3/3/1
/// ")?;
/// assert_eq!(mesh.indices, vec![0, 1, 2]);
/// # Ok::<(), mesh_import::core::MeshImportError>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    /// 从文本加载，`file` 用于诊断信息和网格名称
    pub fn load_from_str(file: &str, contents: &str) -> Result<MeshData> {
        let geometry = ObjGeometry::parse(file, contents).map_err(|e| {
            error!(file, error = %e, "Error reading the OBJ, the model will not be loaded");
            e
        })?;

        let mut mesh = geometry.flatten();
        mesh.name = Some(
            Path::new(file)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unnamed")
                .to_string(),
        );

        mesh.validate().map_err(MeshLoadError::ValidationError)?;

        info!(
            file,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Loaded OBJ"
        );

        Ok(mesh)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshData> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::load_from_str(&path.display().to_string(), &contents)
    }

    fn load_from_memory(data: &[u8]) -> Result<MeshData> {
        let contents = std::str::from_utf8(data).map_err(MeshLoadError::from)?;
        Self::load_from_str("<memory>", contents)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

/// 解析完成、尚未展开的几何数据
///
/// 持有整个加载过程的工作集；`flatten` 消费它生成 `MeshData`。
#[derive(Debug)]
pub struct ObjGeometry {
    pub registry: VertexRegistry,
    pub indices: Vec<u32>,
    pub texcoords: Vec<Vector2>,
    pub normals: Vec<Vector3>,

    /// 被忽略的无法识别的行数
    pub unknown_lines: usize,
}

impl ObjGeometry {
    /// 解析 OBJ 文本并处理所有面
    ///
    /// 遇到第一个致命错误立即返回；无法识别的行只记录警告。
    /// 返回前未被任何面引用的顶点，纹理和法线索引被置为 0。
    pub fn parse(file: &str, contents: &str) -> std::result::Result<Self, MeshLoadError> {
        let mut geometry = Self {
            registry: VertexRegistry::new(),
            indices: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            unknown_lines: 0,
        };

        for record in ObjRecords::new(file, contents) {
            let (line, record) = record?;
            match record {
                ObjRecord::Position(position) => {
                    geometry.registry.push_anchor(position);
                }
                ObjRecord::TexCoord(texcoord) => geometry.texcoords.push(texcoord),
                ObjRecord::Normal(normal) => geometry.normals.push(normal),
                ObjRecord::Face(corners) => geometry.process_face(file, line, corners)?,
                ObjRecord::Unknown(text) => {
                    warn!(file, line, text, "OBJ unknown line");
                    geometry.unknown_lines += 1;
                }
            }
        }

        let unused = geometry.registry.default_unset();
        debug!(
            file,
            positions = geometry.registry.position_count(),
            vertices = geometry.registry.len(),
            unused,
            "OBJ faces processed"
        );

        Ok(geometry)
    }

    /// 解析一个面的三个角，写入索引并累加切线
    fn process_face(
        &mut self,
        file: &str,
        line: usize,
        corners: [FaceCornerRef; 3],
    ) -> std::result::Result<(), MeshLoadError> {
        let mut resolved = [0usize; 3];

        for (slot, corner) in resolved.iter_mut().zip(corners) {
            let out_of_range = |table, index, len| MeshLoadError::IndexOutOfRange {
                file: file.to_string(),
                line,
                table,
                index,
                len,
            };
            let lookup = |table, index: usize, len: usize| {
                index
                    .checked_sub(1)
                    .filter(|&i| i < len)
                    .ok_or_else(|| out_of_range(table, index, len))
            };

            let corner = FaceCorner {
                position: lookup(
                    AttributeTable::Position,
                    corner.position,
                    self.registry.position_count(),
                )?,
                texture: lookup(AttributeTable::TexCoord, corner.texture, self.texcoords.len())?,
                normal: lookup(AttributeTable::Normal, corner.normal, self.normals.len())?,
            };

            *slot = self.registry.resolve(corner).ok_or_else(|| {
                out_of_range(
                    AttributeTable::Position,
                    corner.position + 1,
                    self.registry.position_count(),
                )
            })?;

            let index = u32::try_from(*slot).map_err(|_| {
                MeshLoadError::ValidationError(format!("{}: more than {} vertices", file, u32::MAX))
            })?;
            self.indices.push(index);
        }

        accumulate_tangent(&mut self.registry, resolved, &self.texcoords);
        Ok(())
    }

    /// 展开为分离的属性数组，消费整个工作集
    pub fn flatten(self) -> MeshData {
        MeshData::flatten(&self.registry, self.indices, &self.texcoords, &self.normals)
    }
}
