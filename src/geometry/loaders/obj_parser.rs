/// OBJ 记录解析器
///
/// 把 OBJ 文本逐行分类为类型化记录。解析是惰性的：迭代器每次前进只处理一行，
/// 致命错误以 `Err` 形式产出，调用方遇到后应停止迭代。
///
/// 支持的记录：
///
/// ```text
/// v  <x> <y> <z>
/// vt <u> <v>
/// vn <x> <y> <z>
/// f  <p/t/n> <p/t/n> <p/t/n>
/// # 注释
/// ```
use std::iter::Enumerate;
use std::str::Lines;

use crate::core::error::MeshLoadError;
use crate::math::{Vector2, Vector3};

/// 面角引用，三个下标都是文件中的 1 基下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCornerRef {
    pub position: usize,
    pub texture: usize,
    pub normal: usize,
}

/// 一行 OBJ 的分类结果
#[derive(Debug, Clone, PartialEq)]
pub enum ObjRecord<'a> {
    Position(Vector3),
    TexCoord(Vector2),
    Normal(Vector3),
    Face([FaceCornerRef; 3]),
    /// 无法识别的行，原样保留（已去除首尾空白）
    Unknown(&'a str),
}

/// 逐行产出 `(行号, 记录)` 的惰性迭代器，行号从 1 开始
///
/// 空行和注释行被静默跳过。
///
/// # 示例
///
/// ```rust
/// use mesh_import::geometry::loaders::obj_parser::{ObjRecord, ObjRecords};
///
/// let mut records = ObjRecords::new("cube.obj", "# comment\nv 1 2 3\n");
/// let (line, record) = records.next().unwrap().unwrap();
/// assert_eq!(line, 2);
/// assert!(matches!(record, ObjRecord::Position(_)));
/// assert!(records.next().is_none());
/// ```
pub struct ObjRecords<'a> {
    file: &'a str,
    lines: Enumerate<Lines<'a>>,
}

impl<'a> ObjRecords<'a> {
    /// `file` 只用于错误信息
    pub fn new(file: &'a str, contents: &'a str) -> Self {
        Self {
            file,
            lines: contents.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for ObjRecords<'a> {
    type Item = Result<(usize, ObjRecord<'a>), MeshLoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (i, raw) in self.lines.by_ref() {
            let line = raw.trim();
            let mut tokens = line.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };
            if keyword.starts_with('#') {
                continue;
            }

            let mut ctx = LineContext {
                file: self.file,
                line: i + 1,
                tokens,
            };
            let record = match keyword {
                "v" => ctx.vector3("vertex position").map(ObjRecord::Position),
                "vt" => ctx.vector2("texture coordinate").map(ObjRecord::TexCoord),
                "vn" => ctx.vector3("normal").map(ObjRecord::Normal),
                "f" => ctx.face().map(ObjRecord::Face),
                _ => Ok(ObjRecord::Unknown(line)),
            };
            return Some(record.map(|record| (i + 1, record)));
        }
        None
    }
}

struct LineContext<'a, I> {
    file: &'a str,
    line: usize,
    tokens: I,
}

impl<'a, I> LineContext<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    fn parse_error(&self, what: &'static str, token: &str) -> MeshLoadError {
        MeshLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            what,
            token: token.to_string(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> MeshLoadError {
        MeshLoadError::MalformedFace {
            file: self.file.to_string(),
            line: self.line,
            reason: reason.into(),
        }
    }

    fn float(&mut self, what: &'static str) -> Result<f32, MeshLoadError> {
        let token = self.tokens.next().ok_or_else(|| self.parse_error(what, ""))?;
        token.parse().map_err(|_| self.parse_error(what, token))
    }

    fn vector3(&mut self, what: &'static str) -> Result<Vector3, MeshLoadError> {
        Ok(Vector3::new(self.float(what)?, self.float(what)?, self.float(what)?))
    }

    fn vector2(&mut self, what: &'static str) -> Result<Vector2, MeshLoadError> {
        Ok(Vector2::new(self.float(what)?, self.float(what)?))
    }

    fn face(&mut self) -> Result<[FaceCornerRef; 3], MeshLoadError> {
        let corners: Vec<&'a str> = self.tokens.by_ref().collect();
        if corners.len() != 3 {
            return Err(self.malformed(format!("{} corners", corners.len())));
        }

        let mut refs = [FaceCornerRef { position: 0, texture: 0, normal: 0 }; 3];
        for (slot, token) in refs.iter_mut().zip(corners) {
            *slot = self.corner(token)?;
        }
        Ok(refs)
    }

    fn corner(&self, token: &str) -> Result<FaceCornerRef, MeshLoadError> {
        let fields: Vec<&str> = token.split('/').collect();
        match fields.as_slice() {
            [p, t, n] if !p.is_empty() && !t.is_empty() && !n.is_empty() => {
                Ok(FaceCornerRef {
                    position: self.index(p)?,
                    texture: self.index(t)?,
                    normal: self.index(n)?,
                })
            }
            [_, t, _] if t.is_empty() => {
                Err(self.malformed(format!("corner '{}' has no texture coordinate", token)))
            }
            _ => Err(self.malformed(format!("corner '{}' is not in p/t/n form", token))),
        }
    }

    fn index(&self, token: &str) -> Result<usize, MeshLoadError> {
        token.parse().map_err(|_| self.parse_error("face index", token))
    }
}
