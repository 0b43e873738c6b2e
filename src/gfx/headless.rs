//! 无图形设备的上传适配器
//!
//! 把上传的缓冲区保存在内存中，用于命令行工具和测试。
//! 行为约束与真实后端一致：属性长度必须是分量数的整数倍，完成后的顶点数组不可再写。

use std::collections::HashMap;

use tracing::trace;

use super::upload::{AttributeSlot, MeshUploader, VertexArrayId};
use crate::core::error::{Result, UploadError};

/// 一个已上传的属性缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    pub components: u32,
    pub data: Vec<f32>,
}

/// 一个顶点数组的全部内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexArray {
    pub indices: Vec<u32>,
    pub attributes: HashMap<u32, AttributeBuffer>,
    pub finalized: bool,
}

impl VertexArray {
    pub fn attribute(&self, slot: AttributeSlot) -> Option<&AttributeBuffer> {
        self.attributes.get(&slot.index())
    }

    /// 内存占用（字节）
    pub fn byte_size(&self) -> usize {
        let attributes: usize = self.attributes.values().map(|a| a.data.len()).sum();
        (self.indices.len() + attributes) * 4
    }
}

/// 内存中的上传适配器
#[derive(Debug, Default)]
pub struct HeadlessUploader {
    next_id: u32,
    arrays: HashMap<VertexArrayId, VertexArray>,
}

impl HeadlessUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_array(&self, vao: VertexArrayId) -> Option<&VertexArray> {
        self.arrays.get(&vao)
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// 释放一个顶点数组
    pub fn remove(&mut self, vao: VertexArrayId) -> Option<VertexArray> {
        self.arrays.remove(&vao)
    }

    fn writable(&mut self, vao: VertexArrayId) -> Result<&mut VertexArray> {
        let array = self
            .arrays
            .get_mut(&vao)
            .ok_or(UploadError::UnknownVertexArray(vao.0))?;
        if array.finalized {
            return Err(UploadError::AlreadyFinalized(vao.0).into());
        }
        Ok(array)
    }
}

impl MeshUploader for HeadlessUploader {
    fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        // 0 保留给“无顶点数组”
        self.next_id += 1;
        let vao = VertexArrayId(self.next_id);
        self.arrays.insert(vao, VertexArray::default());
        trace!(vao = vao.0, "Created vertex array");
        Ok(vao)
    }

    fn upload_indices(&mut self, vao: VertexArrayId, indices: &[u32]) -> Result<()> {
        self.writable(vao)?.indices = indices.to_vec();
        Ok(())
    }

    fn upload_attribute(
        &mut self,
        vao: VertexArrayId,
        slot: AttributeSlot,
        components: u32,
        data: &[f32],
    ) -> Result<()> {
        if components == 0 || data.len() % components as usize != 0 {
            return Err(UploadError::AttributeSize {
                slot: slot.index(),
                components,
                len: data.len(),
            }
            .into());
        }

        self.writable(vao)?.attributes.insert(
            slot.index(),
            AttributeBuffer {
                components,
                data: data.to_vec(),
            },
        );
        Ok(())
    }

    fn finish(&mut self, vao: VertexArrayId) -> Result<()> {
        self.writable(vao)?.finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeshImportError;
    use crate::geometry::mesh::MeshData;
    use crate::gfx::upload::upload_mesh;

    #[test]
    fn test_ids_are_unique_and_nonzero() {
        let mut uploader = HeadlessUploader::new();
        let a = uploader.create_vertex_array().unwrap();
        let b = uploader.create_vertex_array().unwrap();

        assert_ne!(a, b);
        assert_ne!(a.0, 0);
        assert_eq!(uploader.len(), 2);
    }

    #[test]
    fn test_stores_uploaded_mesh() {
        let mesh = MeshData {
            indices: vec![0, 1, 2],
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoords: vec![0.0; 6],
            normals: vec![0.0; 9],
            tangents: vec![0.0; 9],
            name: None,
        };

        let mut uploader = HeadlessUploader::new();
        let vao = upload_mesh(&mut uploader, &mesh).unwrap();
        let array = uploader.vertex_array(vao).unwrap();

        assert!(array.finalized);
        assert_eq!(array.indices, vec![0, 1, 2]);
        assert_eq!(array.attribute(AttributeSlot::Position).unwrap().data, mesh.positions);
        assert_eq!(array.attribute(AttributeSlot::TexCoord).unwrap().components, 2);
        assert_eq!(array.byte_size(), (3 + 9 + 6 + 9 + 9) * 4);
    }

    #[test]
    fn test_rejects_bad_attribute_length() {
        let mut uploader = HeadlessUploader::new();
        let vao = uploader.create_vertex_array().unwrap();

        let result = uploader.upload_attribute(vao, AttributeSlot::Normal, 3, &[0.0; 4]);
        assert!(matches!(
            result,
            Err(MeshImportError::Upload(UploadError::AttributeSize { slot: 2, .. }))
        ));
    }

    #[test]
    fn test_rejects_unknown_and_finalized_arrays() {
        let mut uploader = HeadlessUploader::new();
        assert!(uploader.upload_indices(VertexArrayId(42), &[0]).is_err());

        let vao = uploader.create_vertex_array().unwrap();
        uploader.finish(vao).unwrap();
        assert!(matches!(
            uploader.upload_indices(vao, &[0]),
            Err(MeshImportError::Upload(UploadError::AlreadyFinalized(_)))
        ));

        assert!(uploader.remove(vao).is_some());
        assert!(uploader.is_empty());
    }
}
