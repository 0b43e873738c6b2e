/// 轴对齐包围盒
///
/// 从展开后的位置数组计算网格的 AABB。

use std::fmt;

use crate::math::Vector3;

/// 轴对齐包围盒
///
/// 初始状态下 `min` 为 +∞、`max` 为 -∞。没有足够位置数据时包围盒保持这个状态，
/// 调用方应通过 [`Aabb::is_degenerate`] 判断是否真的计算出了范围。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vector3::repeat(f32::INFINITY),
            max: Vector3::repeat(f32::NEG_INFINITY),
        }
    }
}

impl Aabb {
    /// 扫描 xyz 三元组构建包围盒
    ///
    /// 第一个三元组同时作为最小值和最大值，之后每个轴先与最小值比较，
    /// 只有不小于最小值时才与最大值比较。
    /// 少于2个浮点数时直接返回初始状态；末尾不足三个的分量被忽略。
    ///
    /// # 示例
    ///
    /// ```rust
    /// use mesh_import::geometry::Aabb;
    ///
    /// let aabb = Aabb::from_positions(&[0.0, 0.0, 0.0, 1.0, 2.0, -3.0]);
    /// assert_eq!(aabb.min.z, -3.0);
    /// assert_eq!(aabb.max.y, 2.0);
    /// ```
    pub fn from_positions(positions: &[f32]) -> Self {
        let mut aabb = Self::default();
        if positions.len() < 2 {
            return aabb;
        }

        let mut triples = positions.chunks_exact(3);
        if let Some(first) = triples.next() {
            aabb.min = Vector3::new(first[0], first[1], first[2]);
            aabb.max = aabb.min;
        }

        for p in triples {
            for axis in 0..3 {
                let value = p[axis];
                if value < aabb.min[axis] {
                    aabb.min[axis] = value;
                } else if value > aabb.max[axis] {
                    aabb.max[axis] = value;
                }
            }
        }

        aabb
    }

    /// 没有计算出任何范围
    pub fn is_degenerate(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: &Vector3) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_degenerate() {
            return write!(f, "no extent");
        }
        write!(
            f,
            "min [{:.4}, {:.4}, {:.4}] max [{:.4}, {:.4}, {:.4}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_degenerate() {
        let aabb = Aabb::from_positions(&[]);
        assert!(aabb.is_degenerate());
        assert_eq!(aabb.min.x, f32::INFINITY);
        assert_eq!(aabb.max.x, f32::NEG_INFINITY);

        assert!(Aabb::from_positions(&[1.0]).is_degenerate());
        assert_eq!(aabb.to_string(), "no extent");
    }

    #[test]
    fn test_display() {
        let aabb = Aabb::from_positions(&[0.0, -1.0, 2.0, 1.0, 0.5, 3.0]);
        assert_eq!(
            aabb.to_string(),
            "min [0.0000, -1.0000, 2.0000] max [1.0000, 0.5000, 3.0000]"
        );
    }

    #[test]
    fn test_bounds_contain_all_points() {
        let positions = [
            0.5, -1.0, 2.0, //
            -3.0, 4.0, 0.0, //
            1.0, 1.0, 1.0, //
            2.0, -2.0, -5.0,
        ];
        let aabb = Aabb::from_positions(&positions);

        assert_eq!(aabb.min, Vector3::new(-3.0, -2.0, -5.0));
        assert_eq!(aabb.max, Vector3::new(2.0, 4.0, 2.0));
        for p in positions.chunks_exact(3) {
            assert!(aabb.contains(&Vector3::new(p[0], p[1], p[2])));
        }
        assert_eq!(aabb.center(), Vector3::new(-0.5, 1.0, -1.5));
        assert_eq!(aabb.extents(), Vector3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_single_point() {
        let aabb = Aabb::from_positions(&[1.0, 2.0, 3.0]);
        assert_eq!(aabb.min, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.max, aabb.min);
        assert!(!aabb.is_degenerate());
    }

    #[test]
    fn test_incomplete_triple_is_degenerate() {
        assert!(Aabb::from_positions(&[1.0, 2.0]).is_degenerate());
    }

    #[test]
    fn test_decreasing_sequence() {
        let aabb = Aabb::from_positions(&[3.0, 3.0, 3.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0]);
        assert_eq!(aabb.min, Vector3::repeat(1.0));
        assert_eq!(aabb.max, Vector3::repeat(3.0));
    }
}
