/// 模型
///
/// 把加载、上传和包围盒计算串起来：`Model::builder()` 指定数据来源（文件或直接给出的数组），
/// `create` 依次加载网格、通过上传适配器提交给图形后端，并计算 AABB。

use std::path::{Path, PathBuf};

use tracing::info;

use super::bounds::Aabb;
use super::loaders::load_mesh;
use super::mesh::MeshData;
use crate::core::error::{MeshLoadError, Result};
use crate::gfx::upload::{upload_mesh, MeshUploader, VertexArrayId};

/// 已上传到图形后端的模型
#[derive(Debug, Clone)]
pub struct Model {
    file: Option<PathBuf>,
    mesh: MeshData,
    vao: VertexArrayId,
    vao_length: usize,
    aabb: Aabb,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// 来源文件，直接给出数据时为 `None`
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn vao(&self) -> VertexArrayId {
        self.vao
    }

    /// 绘制时提交的元素数
    pub fn vao_length(&self) -> usize {
        self.vao_length
    }

    /// 原始包围盒，没有位置数据时保持 ±∞ 初始状态
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// 计算出的包围盒，网格没有位置时为 `None`
    pub fn bounds(&self) -> Option<&Aabb> {
        (!self.aabb.is_degenerate()).then_some(&self.aabb)
    }
}

/// `Model` 构建器
///
/// 同时设置了文件和直接数据时以文件为准。
#[derive(Debug, Default)]
pub struct ModelBuilder {
    file: Option<PathBuf>,
    mesh: Option<MeshData>,
}

impl ModelBuilder {
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 直接给出展开后的数组，`indices` 可以为空
    pub fn directly(
        mut self,
        indices: Vec<u32>,
        positions: Vec<f32>,
        texcoords: Vec<f32>,
        normals: Vec<f32>,
        tangents: Vec<f32>,
    ) -> Self {
        self.mesh = Some(MeshData {
            indices,
            positions,
            texcoords,
            normals,
            tangents,
            name: None,
        });
        self
    }

    /// 加载、上传并计算包围盒
    ///
    /// 任何一步失败都不会返回模型。
    pub fn create(self, uploader: &mut dyn MeshUploader) -> Result<Model> {
        let mesh = match (&self.file, self.mesh) {
            (Some(path), _) => load_mesh(path)?,
            (None, Some(mesh)) => {
                mesh.validate().map_err(MeshLoadError::ValidationError)?;
                mesh
            }
            (None, None) => {
                return Err(MeshLoadError::ValidationError(
                    "Model has neither a file nor vertex data".to_string(),
                )
                .into())
            }
        };

        let vao = upload_mesh(uploader, &mesh)?;
        let vao_length = mesh.draw_length();
        let aabb = Aabb::from_positions(&mesh.positions);

        info!(
            file = %self.file.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
            vao = vao.0,
            vao_length,
            bounds = %aabb,
            "Model created"
        );

        Ok(Model {
            file: self.file,
            mesh,
            vao,
            vao_length,
            aabb,
        })
    }
}
