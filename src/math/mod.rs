//! 数学类型模块
//!
//! 基于 `nalgebra` 的向量类型别名，以及导入管线使用的几何数学（见 geometry 子模块）。

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数组与向量之间的转换
pub mod convert {
    use super::*;

    #[inline]
    pub fn vec3_to_array(v: &Vector3) -> [f32; 3] {
        [v.x, v.y, v.z]
    }

    #[inline]
    pub fn vec2_to_array(v: &Vector2) -> [f32; 2] {
        [v.x, v.y]
    }
}

pub mod geometry;
