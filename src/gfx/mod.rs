//! 图形后端接口模块
//!
//! 导入管线只通过 `MeshUploader` 与图形后端交互。
//!
//! # 模块组织
//!
//! - `upload`：上传接口、属性槽位约定和 `upload_mesh`
//! - `headless`：不依赖图形设备的内存实现

pub mod upload;
pub mod headless;

pub use upload::{upload_mesh, AttributeSlot, MeshUploader, VertexArrayId};
pub use headless::HeadlessUploader;
