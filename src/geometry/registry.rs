//! 顶点注册表
//!
//! 导入 OBJ 时，同一个位置可能在不同的面上搭配不同的纹理坐标和法线。
//! GPU 顶点只能绑定一组属性，所以这种位置需要拆分成多个输出顶点。
//!
//! 注册表是一个只增不减的 arena：每个源位置有一个锚点记录，
//! 拆分出的副本通过 `duplicate` 下标串成单链表，链表从锚点开始、按插入顺序排列。
//! 记录在 arena 中的下标就是它的输出索引。

use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::math::Vector3;

/// 面角引用（0 基下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    pub position: usize,
    pub texture: usize,
    pub normal: usize,
}

/// 一个输出顶点
#[derive(Debug, Clone)]
pub struct VertexRecord {
    /// 来源位置的下标，副本与锚点共享
    pub source_position: usize,

    /// 输出顶点列表中的位置，创建时分配，之后不变
    pub output_index: usize,

    pub position: Vector3,

    /// 首次使用前为 `None`
    pub texture_index: Option<usize>,
    pub normal_index: Option<usize>,

    /// 同一位置、不同纹理/法线组合的下一个记录
    pub duplicate: Option<usize>,

    tangent_sum: Vector3,
    tangent_count: u32,
}

impl VertexRecord {
    fn new(source_position: usize, output_index: usize, position: Vector3) -> Self {
        Self {
            source_position,
            output_index,
            position,
            texture_index: None,
            normal_index: None,
            duplicate: None,
            tangent_sum: Vector3::zeros(),
            tangent_count: 0,
        }
    }

    /// 纹理和法线是否都已分配
    #[inline]
    pub fn is_set(&self) -> bool {
        self.texture_index.is_some() && self.normal_index.is_some()
    }

    #[inline]
    pub fn has_same_texture_and_normal(&self, texture: usize, normal: usize) -> bool {
        self.texture_index == Some(texture) && self.normal_index == Some(normal)
    }

    pub fn add_tangent(&mut self, tangent: &Vector3) {
        self.tangent_sum += tangent;
        self.tangent_count += 1;
    }

    #[inline]
    pub fn tangent_contributions(&self) -> u32 {
        self.tangent_count
    }

    /// 所有贡献切线的平均值；没有贡献时为零向量
    pub fn average_tangent(&self) -> Vector3 {
        self.tangent_sum / self.tangent_count.max(1) as f32
    }
}

/// 输出顶点的 arena
#[derive(Debug, Default)]
pub struct VertexRegistry {
    records: Vec<VertexRecord>,
    anchors: Vec<usize>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为新读取的源位置创建锚点，返回它的输出索引
    pub fn push_anchor(&mut self, position: Vector3) -> usize {
        let output_index = self.records.len();
        let source_position = self.anchors.len();
        self.records
            .push(VertexRecord::new(source_position, output_index, position));
        self.anchors.push(output_index);
        output_index
    }

    /// 已登记的源位置数量
    #[inline]
    pub fn position_count(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VertexRecord> {
        self.records.iter()
    }

    /// 从锚点开始遍历某个源位置的全部记录
    pub fn chain(&self, position: usize) -> impl Iterator<Item = &VertexRecord> + '_ {
        let mut next = self.anchors.get(position).copied();
        std::iter::from_fn(move || {
            let record = &self.records[next?];
            next = record.duplicate;
            Some(record)
        })
    }

    /// 将面角解析为输出索引
    ///
    /// 锚点尚未使用时直接占用它；否则沿副本链查找纹理和法线完全相同的记录，
    /// 找不到就在链尾追加一个新副本。源位置未登记时返回 `None`。
    pub fn resolve(&mut self, corner: FaceCorner) -> Option<usize> {
        let anchor = &mut self.records[*self.anchors.get(corner.position)?];
        if !anchor.is_set() {
            anchor.texture_index = Some(corner.texture);
            anchor.normal_index = Some(corner.normal);
            return Some(anchor.output_index);
        }

        // 副本创建时即已设置，链上只有锚点可能未使用
        if let Some(found) = self
            .chain(corner.position)
            .find(|r| r.has_same_texture_and_normal(corner.texture, corner.normal))
        {
            return Some(found.output_index);
        }

        let tail = self.chain(corner.position).last()?;
        let (current, source_position, position) =
            (tail.output_index, tail.source_position, tail.position);

        let output_index = self.records.len();
        let mut duplicate = VertexRecord::new(source_position, output_index, position);
        duplicate.texture_index = Some(corner.texture);
        duplicate.normal_index = Some(corner.normal);

        self.records.push(duplicate);
        self.records[current].duplicate = Some(output_index);

        trace!(
            position = corner.position,
            texture = corner.texture,
            normal = corner.normal,
            output_index,
            "Split vertex"
        );

        Some(output_index)
    }

    /// 未被任何面引用的记录，纹理和法线索引置 0
    pub fn default_unset(&mut self) -> usize {
        let mut count = 0;
        for record in self.records.iter_mut().filter(|r| !r.is_set()) {
            record.texture_index.get_or_insert(0);
            record.normal_index.get_or_insert(0);
            count += 1;
        }
        count
    }
}

impl Index<usize> for VertexRegistry {
    type Output = VertexRecord;

    fn index(&self, index: usize) -> &VertexRecord {
        &self.records[index]
    }
}

impl IndexMut<usize> for VertexRegistry {
    fn index_mut(&mut self, index: usize) -> &mut VertexRecord {
        &mut self.records[index]
    }
}
