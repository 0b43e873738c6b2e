//! 网格上传接口
//!
//! 导入管线通过这个 trait 把展开后的网格交给图形后端。适配器由调用方显式传入，
//! 管线本身不持有任何全局的图形上下文。
//!
//! # 调用顺序
//!
//! ```text
//! create_vertex_array
//!   → upload_indices            （网格有索引时）
//!   → upload_attribute × 4      （按槽位 0..3 的顺序）
//!   → finish
//! ```
//!
//! 槽位编号是与着色器之间的约定，不能调整顺序。

use crate::core::error::Result;
use crate::geometry::mesh::MeshData;

/// 顶点数组句柄，由适配器分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayId(pub u32);

/// 顶点属性槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttributeSlot {
    Position = 0,
    TexCoord = 1,
    Normal = 2,
    Tangent = 3,
}

impl AttributeSlot {
    /// 按槽位顺序排列的全部属性
    pub const ALL: [AttributeSlot; 4] = [
        AttributeSlot::Position,
        AttributeSlot::TexCoord,
        AttributeSlot::Normal,
        AttributeSlot::Tangent,
    ];

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    /// 每个顶点的分量数
    pub fn components(self) -> u32 {
        match self {
            AttributeSlot::TexCoord => 2,
            _ => 3,
        }
    }

    /// 网格中对应的属性数组
    pub fn data(self, mesh: &MeshData) -> &[f32] {
        match self {
            AttributeSlot::Position => &mesh.positions,
            AttributeSlot::TexCoord => &mesh.texcoords,
            AttributeSlot::Normal => &mesh.normals,
            AttributeSlot::Tangent => &mesh.tangents,
        }
    }
}

/// 图形后端的网格上传接口
///
/// 实现方负责自己的线程约束（例如图形上下文只能在一个线程上访问），
/// 这里通过 `&mut self` 保证同一适配器不会被并发调用。
pub trait MeshUploader {
    /// 分配一个新的顶点数组
    fn create_vertex_array(&mut self) -> Result<VertexArrayId>;

    /// 上传索引缓冲区
    fn upload_indices(&mut self, vao: VertexArrayId, indices: &[u32]) -> Result<()>;

    /// 上传一个属性数组并绑定到槽位
    fn upload_attribute(
        &mut self,
        vao: VertexArrayId,
        slot: AttributeSlot,
        components: u32,
        data: &[f32],
    ) -> Result<()>;

    /// 完成顶点数组的设置（解绑）
    fn finish(&mut self, vao: VertexArrayId) -> Result<()>;
}

/// 按约定的顺序把网格上传到适配器
pub fn upload_mesh(uploader: &mut dyn MeshUploader, mesh: &MeshData) -> Result<VertexArrayId> {
    let vao = uploader.create_vertex_array()?;

    if !mesh.indices.is_empty() {
        uploader.upload_indices(vao, &mesh.indices)?;
    }

    for slot in AttributeSlot::ALL {
        uploader.upload_attribute(vao, slot, slot.components(), slot.data(mesh))?;
    }

    uploader.finish(vao)?;

    tracing::debug!(
        vao = vao.0,
        indices = mesh.index_count(),
        vertices = mesh.vertex_count(),
        "Mesh uploaded"
    );

    Ok(vao)
}
