/// 交错顶点定义模块
///
/// 导入管线的主要产物是分离的属性数组（见 `mesh`），
/// 需要单个交错缓冲区的后端可以用 `MeshData::to_interleaved` 得到这里的 `Vertex`。

use bytemuck::{Pod, Zeroable};

/// 交错的3D顶点
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - tangent: 12 bytes (3 * f32)
/// - **总计**: 44 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],

    /// 已经翻转过 V 的纹理坐标
    pub texcoord: [f32; 2],

    /// 平均切线，未归一化
    pub tangent: [f32; 3],
}

impl Vertex {
    #[inline]
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        texcoord: [f32; 2],
        tangent: [f32; 3],
    ) -> Self {
        Self {
            position,
            normal,
            texcoord,
            tangent,
        }
    }

    /// 整个顶点切片的原始字节视图
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
