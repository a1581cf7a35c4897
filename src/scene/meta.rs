use glam::Vec3;

/// A typed metadata value; the variant is the declared type tag.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Int32(i32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Vector3(Vec3),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetadataEntry {
    pub key: String,
    pub value: MetadataValue,
}

/// Ordered key/value pairs attached to a scene or node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.entries.push(MetadataEntry {
            key: key.into(),
            value,
        });
    }
}
