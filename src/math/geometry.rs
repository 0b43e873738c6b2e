//! 几何数学工具模块
//!
//! 切线空间计算（用于法线贴图）。导入时每个三角形算出一个切线，
//! 累加到它的三个顶点上，最后按贡献次数取平均。

use super::{Vector2, Vector3};
use crate::geometry::registry::VertexRegistry;

/// 计算单个三角形的切线
///
/// # 算法
///
/// - 位置导数: e1 = p1 - p0, e2 = p2 - p0
/// - UV 导数: d1 = uv1 - uv0, d2 = uv2 - uv0
/// - r = 1 / (d1.u * d2.v - d1.v * d2.u)
/// - tangent = (e1 * d2.v - e2 * d1.v) * r
///
/// 行列式为零时不做保护，结果为无穷大或 NaN，并原样写入输出。
///
/// # 示例
///
/// ```rust
/// use mesh_import::math::{Vector2, Vector3};
/// use mesh_import::math::geometry::triangle_tangent;
///
/// let tangent = triangle_tangent(
///     [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)],
///     [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
/// );
/// assert_eq!(tangent, Vector3::new(1.0, 0.0, 0.0));
/// ```
pub fn triangle_tangent(positions: [Vector3; 3], uvs: [Vector2; 3]) -> Vector3 {
    let e1 = positions[1] - positions[0];
    let e2 = positions[2] - positions[0];
    let d1 = uvs[1] - uvs[0];
    let d2 = uvs[2] - uvs[0];

    let r = 1.0 / (d1.x * d2.y - d1.y * d2.x);
    (e1 * d2.y - e2 * d1.y) * r
}

/// 将三角形切线累加到注册表中的三个顶点
///
/// `corners` 是三个顶点在注册表中的下标（即输出索引），
/// 每个顶点的纹理坐标通过它已分配的纹理索引从 `texcoords` 中查找。
pub fn accumulate_tangent(
    registry: &mut VertexRegistry,
    corners: [usize; 3],
    texcoords: &[Vector2],
) {
    let positions = corners.map(|i| registry[i].position);
    let uvs = corners.map(|i| {
        registry[i]
            .texture_index
            .and_then(|t| texcoords.get(t).copied())
            .unwrap_or_else(Vector2::zeros)
    });

    let tangent = triangle_tangent(positions, uvs);

    for i in corners {
        registry[i].add_tangent(&tangent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::registry::FaceCorner;

    fn unit_triangle() -> [Vector3; 3] {
        [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_tangent_follows_u_axis() {
        let tangent = triangle_tangent(
            unit_triangle(),
            [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
        );
        assert!((tangent - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_tangent_scales_with_uv_density() {
        // U 方向只占一半纹理，切线长度翻倍
        let tangent = triangle_tangent(
            unit_triangle(),
            [Vector2::new(0.0, 0.0), Vector2::new(0.5, 0.0), Vector2::new(0.0, 1.0)],
        );
        assert!((tangent - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_degenerate_uv_is_not_finite() {
        let tangent = triangle_tangent(
            unit_triangle(),
            [Vector2::new(0.5, 0.5), Vector2::new(0.5, 0.5), Vector2::new(0.5, 0.5)],
        );
        assert!(tangent.iter().all(|c| !c.is_finite()));
    }

    #[test]
    fn test_accumulate_into_all_three_vertices() {
        let mut registry = VertexRegistry::new();
        for p in unit_triangle() {
            registry.push_anchor(p);
        }
        let texcoords = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ];
        let corners = [0, 1, 2].map(|i| {
            registry
                .resolve(FaceCorner { position: i, texture: i, normal: 0 })
                .unwrap()
        });

        accumulate_tangent(&mut registry, corners, &texcoords);

        for i in corners {
            assert_eq!(registry[i].tangent_contributions(), 1);
            assert!((registry[i].average_tangent() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        }
    }
}
