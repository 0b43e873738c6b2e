/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器：四个分离的属性数组加上索引数组，
/// 这是导入管线交给上传适配器的最终产物。

use super::registry::VertexRegistry;
use super::vertex::Vertex;
use crate::math::convert::{vec2_to_array, vec3_to_array};
use crate::math::{Vector2, Vector3};

/// 每个属性的分量数
pub const POSITION_COMPONENTS: usize = 3;
pub const TEXCOORD_COMPONENTS: usize = 2;
pub const NORMAL_COMPONENTS: usize = 3;
pub const TANGENT_COMPONENTS: usize = 3;

/// CPU侧网格数据
///
/// 所有属性数组按顶点对齐：第 i 个顶点的位置是 `positions[3i..3i+3]`，
/// 纹理坐标是 `texcoords[2i..2i+2]`，以此类推。
///
/// # 示例
///
/// ```rust
/// use mesh_import::geometry::MeshData;
///
/// let mesh = MeshData {
///     indices: vec![0, 1, 2],
///     positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     texcoords: vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0],
///     normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
///     tangents: vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
///     name: Some("Triangle".to_string()),
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 三角形顶点索引，每3个索引定义一个三角形
    pub indices: Vec<u32>,

    pub positions: Vec<f32>,

    /// V 分量已翻转为 `1 - v`
    pub texcoords: Vec<f32>,

    pub normals: Vec<f32>,
    pub tangents: Vec<f32>,

    /// 网格名称（可选），通常取自文件名
    pub name: Option<String>,
}

impl MeshData {
    /// 把注册表中的顶点展开成分离的属性数组
    ///
    /// 顶点按输出索引顺序写出，纹理坐标在这里翻转 V。
    /// 注册表中的每个记录都必须已经分配了纹理和法线索引；
    /// 指向空表的索引写出零向量。
    pub fn flatten(
        registry: &VertexRegistry,
        indices: Vec<u32>,
        texcoords: &[Vector2],
        normals: &[Vector3],
    ) -> Self {
        let count = registry.len();
        let mut mesh = Self {
            indices,
            positions: Vec::with_capacity(count * POSITION_COMPONENTS),
            texcoords: Vec::with_capacity(count * TEXCOORD_COMPONENTS),
            normals: Vec::with_capacity(count * NORMAL_COMPONENTS),
            tangents: Vec::with_capacity(count * TANGENT_COMPONENTS),
            name: None,
        };

        for record in registry.iter() {
            debug_assert_eq!(record.output_index, mesh.vertex_count());

            let texcoord = record
                .texture_index
                .and_then(|i| texcoords.get(i).copied())
                .unwrap_or_else(Vector2::zeros);
            let normal = record
                .normal_index
                .and_then(|i| normals.get(i).copied())
                .unwrap_or_else(Vector3::zeros);
            let tangent = record.average_tangent();

            let flipped = Vector2::new(texcoord.x, 1.0 - texcoord.y);

            mesh.positions.extend_from_slice(&vec3_to_array(&record.position));
            mesh.texcoords.extend_from_slice(&vec2_to_array(&flipped));
            mesh.normals.extend_from_slice(&vec3_to_array(&normal));
            mesh.tangents.extend_from_slice(&vec3_to_array(&tangent));
        }

        mesh
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 绘制长度：有索引时为索引数，否则为顶点数
    pub fn draw_length(&self) -> usize {
        if self.indices.is_empty() {
            self.vertex_count()
        } else {
            self.indices.len()
        }
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 位置数组长度是3的倍数
    /// - 其余属性数组与顶点数量匹配（允许为空）
    /// - 索引数量是3的倍数，且都在顶点范围内
    pub fn validate(&self) -> Result<(), String> {
        if self.positions.len() % POSITION_COMPONENTS != 0 {
            return Err(format!(
                "Position array length {} is not a multiple of {}",
                self.positions.len(),
                POSITION_COMPONENTS
            ));
        }

        let vertex_count = self.vertex_count();
        let attributes = [
            ("texcoords", self.texcoords.len(), TEXCOORD_COMPONENTS),
            ("normals", self.normals.len(), NORMAL_COMPONENTS),
            ("tangents", self.tangents.len(), TANGENT_COMPONENTS),
        ];
        for (name, len, components) in attributes {
            if len != 0 && len != vertex_count * components {
                return Err(format!(
                    "{} has {} floats, expected {} for {} vertices",
                    name,
                    len,
                    vertex_count * components,
                    vertex_count
                ));
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "Index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(format!(
                "Index {} at position {} is out of range ({} vertices)",
                index, i, vertex_count
            ));
        }

        Ok(())
    }

    /// 生成交错顶点数组
    ///
    /// 缺失的属性数组按零填充。
    pub fn to_interleaved(&self) -> Vec<Vertex> {
        fn take<const N: usize>(data: &[f32], i: usize) -> [f32; N] {
            let mut out = [0.0; N];
            if let Some(chunk) = data.get(i * N..(i + 1) * N) {
                out.copy_from_slice(chunk);
            }
            out
        }

        (0..self.vertex_count())
            .map(|i| Vertex {
                position: take(&self.positions, i),
                normal: take(&self.normals, i),
                texcoord: take(&self.texcoords, i),
                tangent: take(&self.tangents, i),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::registry::FaceCorner;

    fn triangle() -> MeshData {
        MeshData {
            indices: vec![0, 1, 2],
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoords: vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            tangents: vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            name: None,
        }
    }

    #[test]
    fn test_mesh_data_counts() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.draw_length(), 3);
    }

    #[test]
    fn test_draw_length_without_indices() {
        let mut mesh = triangle();
        mesh.positions.extend_from_slice(&[0.0; 9]);
        mesh.indices.clear();
        assert_eq!(mesh.draw_length(), 6);
    }

    #[test]
    fn test_validation_valid() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_index_range() {
        let mut mesh = triangle();
        mesh.indices = vec![0, 1, 5];

        let result = mesh.validate();
        assert!(result.unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_validation_invalid_index_count() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validation_attribute_mismatch() {
        let mut mesh = triangle();
        mesh.normals.pop();
        assert!(mesh.validate().unwrap_err().contains("normals"));
    }

    #[test]
    fn test_flatten_flips_v_and_keeps_order() {
        let mut registry = VertexRegistry::new();
        registry.push_anchor(Vector3::new(1.0, 2.0, 3.0));
        registry.push_anchor(Vector3::new(4.0, 5.0, 6.0));
        let texcoords = vec![Vector2::new(0.25, 0.125), Vector2::new(0.5, 0.75)];
        let normals = vec![Vector3::new(0.0, 1.0, 0.0)];

        registry.resolve(FaceCorner { position: 0, texture: 1, normal: 0 });
        registry.resolve(FaceCorner { position: 1, texture: 0, normal: 0 });
        registry.resolve(FaceCorner { position: 0, texture: 0, normal: 0 });

        let mesh = MeshData::flatten(&registry, vec![0, 1, 2], &texcoords, &normals);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        assert_eq!(mesh.texcoords, vec![0.5, 0.25, 0.25, 0.875, 0.25, 0.875]);
        assert_eq!(mesh.tangents, vec![0.0; 9]);
        // V 翻转可以精确还原
        assert_eq!(1.0 - mesh.texcoords[1], 0.75);
    }

    #[test]
    fn test_flatten_with_empty_tables() {
        let mut registry = VertexRegistry::new();
        registry.push_anchor(Vector3::new(1.0, 1.0, 1.0));
        registry.default_unset();

        let mesh = MeshData::flatten(&registry, Vec::new(), &[], &[]);
        assert_eq!(mesh.texcoords, vec![0.0, 1.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_to_interleaved() {
        let vertices = triangle().to_interleaved();

        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].texcoord, [1.0, 1.0]);
        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].tangent, [1.0, 0.0, 0.0]);
    }
}
