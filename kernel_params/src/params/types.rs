//! Uniform parameter types and their std140 layout classes
//!
//! Sizes and alignments are in slots (one 4-byte word each).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size and base alignment of a buffer-resident type, in slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Std140Layout {
    pub size: u32,
    pub base_alignment: u32,
}

impl Std140Layout {
    const fn new(size: u32, base_alignment: u32) -> Self {
        Self {
            size,
            base_alignment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamType {
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "vec2")]
    Vec2,
    #[serde(rename = "vec3")]
    Vec3,
    #[serde(rename = "vec4")]
    Vec4,
    #[serde(rename = "mat2")]
    Mat2,
    #[serde(rename = "mat3")]
    Mat3,
    #[serde(rename = "mat4")]
    Mat4,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "ivec2")]
    IVec2,
    #[serde(rename = "ivec3")]
    IVec3,
    #[serde(rename = "ivec4")]
    IVec4,
    #[serde(rename = "sampler1D")]
    Sampler1D,
    #[serde(rename = "sampler2D")]
    Sampler2D,
}

impl ParamType {
    /// Every type, in the order keywords are tried
    pub const ALL: [ParamType; 13] = [
        ParamType::Float,
        ParamType::Vec2,
        ParamType::Vec3,
        ParamType::Vec4,
        ParamType::Mat2,
        ParamType::Mat3,
        ParamType::Mat4,
        ParamType::Int,
        ParamType::IVec2,
        ParamType::IVec3,
        ParamType::IVec4,
        ParamType::Sampler1D,
        ParamType::Sampler2D,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ParamType::Float => "float",
            ParamType::Vec2 => "vec2",
            ParamType::Vec3 => "vec3",
            ParamType::Vec4 => "vec4",
            ParamType::Mat2 => "mat2",
            ParamType::Mat3 => "mat3",
            ParamType::Mat4 => "mat4",
            ParamType::Int => "int",
            ParamType::IVec2 => "ivec2",
            ParamType::IVec3 => "ivec3",
            ParamType::IVec4 => "ivec4",
            ParamType::Sampler1D => "sampler1D",
            ParamType::Sampler2D => "sampler2D",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.keyword() == keyword)
    }

    /// Buffer layout, or `None` for samplers which occupy no slots.
    ///
    /// Matrices are laid out as arrays of column vectors, each column
    /// padded to a 4-slot boundary.
    pub fn layout(self) -> Option<Std140Layout> {
        let layout = match self {
            ParamType::Float | ParamType::Int => Std140Layout::new(1, 1),
            ParamType::Vec2 | ParamType::IVec2 => Std140Layout::new(2, 2),
            ParamType::Vec3 | ParamType::IVec3 => Std140Layout::new(3, 4),
            ParamType::Vec4 | ParamType::IVec4 => Std140Layout::new(4, 4),
            ParamType::Mat2 => Std140Layout::new(8, 4),
            ParamType::Mat3 => Std140Layout::new(12, 4),
            ParamType::Mat4 => Std140Layout::new(16, 4),
            ParamType::Sampler1D | ParamType::Sampler2D => return None,
        };
        Some(layout)
    }

    pub fn is_sampler(self) -> bool {
        matches!(self, ParamType::Sampler1D | ParamType::Sampler2D)
    }

    pub fn is_matrix(self) -> bool {
        matches!(self, ParamType::Mat2 | ParamType::Mat3 | ParamType::Mat4)
    }

    /// Component count of numeric scalar and vector types; these are the
    /// types that accept `mean`/`scale` hints
    pub fn component_count(self) -> Option<usize> {
        match self {
            ParamType::Float | ParamType::Int => Some(1),
            ParamType::Vec2 | ParamType::IVec2 => Some(2),
            ParamType::Vec3 | ParamType::IVec3 => Some(3),
            ParamType::Vec4 | ParamType::IVec4 => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

/// Round `offset` up to the next multiple of `alignment`
pub fn align_offset(offset: u32, alignment: u32) -> u32 {
    match offset % alignment {
        0 => offset,
        rem => offset + (alignment - rem),
    }
}
