//! Parameter descriptors and the ordered table they are collected in

use super::types::{align_offset, ParamType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MEAN: [f32; 4] = [0.0; 4];
pub const DEFAULT_SCALE: [f32; 4] = [1.0; 4];

/// Bytes per layout slot
pub const SLOT_BYTES: u32 = 4;

/// One declared uniform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub mean: [f32; 4],
    pub scale: [f32; 4],
    /// Offset into the uniform buffer, in slots
    pub std140_offset: u32,
    /// Size in slots; zero for samplers
    pub std140_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_tex_unit: Option<u32>,
    /// Resource path from `file="..."` sampler metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ParameterDescriptor {
    pub fn is_sampler(&self) -> bool {
        self.param_type.is_sampler()
    }

    /// Slot range `[offset, offset + size)` occupied in the buffer
    pub fn slot_range(&self) -> std::ops::Range<u32> {
        self.std140_offset..self.std140_offset + self.std140_size
    }
}

/// Where the next declaration of a given type would land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub offset: u32,
    pub size: u32,
    pub tex_unit: Option<u32>,
}

/// Ordered parameter descriptors in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    params: Vec<ParameterDescriptor>,
    sampler_count: u32,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterDescriptor> {
        self.params.iter()
    }

    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    pub fn get(&self, index: usize) -> Option<&ParameterDescriptor> {
        self.params.get(index)
    }

    /// First parameter with the given name
    pub fn find(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Buffer offset (in slots) of a named non-sampler parameter
    pub fn offset_of(&self, name: &str) -> Option<u32> {
        self.find(name)
            .filter(|p| !p.is_sampler())
            .map(|p| p.std140_offset)
    }

    /// Number of sampler parameters, which is also the next texture unit
    pub fn sampler_count(&self) -> u32 {
        self.sampler_count
    }

    /// Slots needed to hold every non-sampler parameter
    pub fn buffer_slots(&self) -> u32 {
        self.params
            .iter()
            .filter(|p| !p.is_sampler())
            .map(|p| p.slot_range().end)
            .max()
            .unwrap_or(0)
    }

    pub fn buffer_size_bytes(&self) -> u32 {
        self.buffer_slots() * SLOT_BYTES
    }

    /// Compute offset, size and texture unit for a new parameter.
    ///
    /// Buffer types start at the end of the buffer so far, rounded up to
    /// their base alignment. Samplers take no slots; they repeat the
    /// previous entry's offset and take the next texture unit.
    pub(crate) fn place(&self, param_type: ParamType) -> Placement {
        match param_type.layout() {
            Some(layout) => Placement {
                offset: align_offset(self.buffer_slots(), layout.base_alignment),
                size: layout.size,
                tex_unit: None,
            },
            None => Placement {
                offset: self.params.last().map_or(0, |p| p.std140_offset),
                size: 0,
                tex_unit: Some(self.sampler_count),
            },
        }
    }

    /// Append a fully parsed descriptor
    pub(crate) fn push(&mut self, descriptor: ParameterDescriptor) {
        if descriptor.is_sampler() {
            self.sampler_count += 1;
        }
        self.params.push(descriptor);
    }
}

impl<'a> IntoIterator for &'a ParameterTable {
    type Item = &'a ParameterDescriptor;
    type IntoIter = std::slice::Iter<'a, ParameterDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(table: &mut ParameterTable, name: &str, param_type: ParamType) {
        let placement = table.place(param_type);
        table.push(ParameterDescriptor {
            name: name.to_string(),
            param_type,
            mean: DEFAULT_MEAN,
            scale: DEFAULT_SCALE,
            std140_offset: placement.offset,
            std140_size: placement.size,
            assigned_tex_unit: placement.tex_unit,
            file: None,
        });
    }

    #[test]
    fn test_empty_table() {
        let table = ParameterTable::new();
        assert!(table.is_empty());
        assert_eq!(table.buffer_slots(), 0);
        assert_eq!(table.sampler_count(), 0);
        assert_eq!(table.place(ParamType::Vec4).offset, 0);
    }

    #[test]
    fn test_placement_pads_to_alignment() {
        let mut table = ParameterTable::new();
        declare(&mut table, "a", ParamType::Float);
        declare(&mut table, "b", ParamType::Vec2);
        declare(&mut table, "c", ParamType::Vec3);
        declare(&mut table, "d", ParamType::Float);
        declare(&mut table, "e", ParamType::Mat2);

        let offsets: Vec<_> = table.iter().map(|p| (p.std140_offset, p.std140_size)).collect();
        assert_eq!(offsets, vec![(0, 1), (2, 2), (4, 3), (7, 1), (8, 8)]);
        assert_eq!(table.buffer_slots(), 16);
        assert_eq!(table.buffer_size_bytes(), 64);
    }

    #[test]
    fn test_samplers_take_units_not_slots() {
        let mut table = ParameterTable::new();
        declare(&mut table, "a", ParamType::Vec2);
        declare(&mut table, "t0", ParamType::Sampler2D);
        declare(&mut table, "b", ParamType::Float);
        declare(&mut table, "t1", ParamType::Sampler1D);

        let t0 = table.find("t0").unwrap();
        assert_eq!((t0.std140_offset, t0.std140_size), (0, 0));
        assert_eq!(t0.assigned_tex_unit, Some(0));

        // The sampler does not pull the next buffer entry back over `a`
        assert_eq!(table.offset_of("b"), Some(2));

        let t1 = table.find("t1").unwrap();
        assert_eq!(t1.std140_offset, 2);
        assert_eq!(t1.assigned_tex_unit, Some(1));
        assert_eq!(table.sampler_count(), 2);
        assert_eq!(table.offset_of("t1"), None);
    }

    #[test]
    fn test_lookup() {
        let mut table = ParameterTable::new();
        declare(&mut table, "speed", ParamType::Float);
        declare(&mut table, "color", ParamType::Vec3);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).map(|p| p.name.as_str()), Some("color"));
        assert_eq!(table.offset_of("color"), Some(4));
        assert_eq!(table.offset_of("missing"), None);
        assert_eq!((&table).into_iter().count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut table = ParameterTable::new();
        declare(&mut table, "tex", ParamType::Sampler2D);

        let value = serde_json::to_value(&table).unwrap();
        let param = &value["params"][0];
        assert_eq!(param["type"], "sampler2D");
        assert_eq!(param["assigned_tex_unit"], 0);
        assert!(param.get("file").is_none());
        assert_eq!(value["sampler_count"], 1);

        let back: ParameterTable = serde_json::from_value(value).unwrap();
        assert_eq!(back, table);
    }
}
