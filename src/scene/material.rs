/// Key of the material name property.
pub const KEY_NAME: &str = "?mat.name";

/// Key of the texture path properties; the semantic and index select the slot.
pub const KEY_TEXTURE_FILE: &str = "$tex.file";

symbol_enum! {
    /// How a texture slot is used by a material.
    pub enum TextureType: "TextureType" {
        #[default]
        None = 0 => "none",
        Diffuse = 1 => "diffuse",
        Specular = 2 => "specular",
        Ambient = 3 => "ambient",
        Emissive = 4 => "emissive",
        Height = 5 => "height",
        Normals = 6 => "normals",
        Shininess = 7 => "shininess",
        Opacity = 8 => "opacity",
        Displacement = 9 => "displacement",
        Lightmap = 10 => "lightmap",
        Reflection = 11 => "reflection",
        BaseColor = 12 => "baseColor",
        NormalCamera = 13 => "normalCamera",
        EmissionColor = 14 => "emissionColor",
        Metalness = 15 => "metalness",
        DiffuseRoughness = 16 => "diffuseRoughness",
        AmbientOcclusion = 17 => "ambientOcclusion",
        Unknown = 18 => "unknown",
    }
}

impl TextureType {
    /// Every usage category a texture can be bound to, in native code order.
    pub const ALL: [Self; 18] = [
        Self::Diffuse,
        Self::Specular,
        Self::Ambient,
        Self::Emissive,
        Self::Height,
        Self::Normals,
        Self::Shininess,
        Self::Opacity,
        Self::Displacement,
        Self::Lightmap,
        Self::Reflection,
        Self::BaseColor,
        Self::NormalCamera,
        Self::EmissionColor,
        Self::Metalness,
        Self::DiffuseRoughness,
        Self::AmbientOcclusion,
        Self::Unknown,
    ];
}

/// A typed material property value; the variant is the declared type tag.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(String),
    Integer(Vec<i32>),
    Buffer(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialProperty {
    pub key: String,

    /// Native [`TextureType`] code; unchecked until the property is walked.
    pub semantic: u32,
    pub index: u32,
    pub value: PropertyValue,
}

impl MaterialProperty {
    /// A non-texture property.
    pub fn new(key: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            key: key.into(),
            semantic: TextureType::None.code(),
            index: 0,
            value,
        }
    }

    /// A property bound to texture slot `index` of `semantic`.
    pub fn texture(
        key: impl Into<String>,
        semantic: TextureType,
        index: u32,
        value: PropertyValue,
    ) -> Self {
        Self {
            key: key.into(),
            semantic: semantic.code(),
            index,
            value,
        }
    }
}

/// An ordered list of key/value properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub properties: Vec<MaterialProperty>,
}

impl Material {
    pub fn name(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.key == KEY_NAME)
            .and_then(|property| match &property.value {
                PropertyValue::String(name) => Some(name.as_str()),
                _ => None,
            })
    }

    /// Texture file paths bound to `semantic`, ordered by slot index.
    ///
    /// The binding looks paths up one `(semantic, index)` slot at a time, so property order does
    /// not matter here.
    pub fn texture_paths(&self, semantic: TextureType) -> Vec<&str> {
        let mut paths = self
            .properties
            .iter()
            .filter(|property| property.key == KEY_TEXTURE_FILE && property.semantic == semantic.code())
            .filter_map(|property| match &property.value {
                PropertyValue::String(path) => Some((property.index, path.as_str())),
                _ => None,
            })
            .collect::<Vec<_>>();

        // Stable, so duplicate slots keep their declaration order
        paths.sort_by_key(|(index, _)| *index);
        paths.into_iter().map(|(_, path)| path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_paths_are_ordered_by_slot() {
        let material = Material {
            properties: vec![
                MaterialProperty::new(KEY_NAME, PropertyValue::String("brick".to_owned())),
                MaterialProperty::texture(
                    KEY_TEXTURE_FILE,
                    TextureType::Diffuse,
                    1,
                    PropertyValue::String("b.png".to_owned()),
                ),
                MaterialProperty::texture(
                    KEY_TEXTURE_FILE,
                    TextureType::Normals,
                    0,
                    PropertyValue::String("n.png".to_owned()),
                ),
                MaterialProperty::texture(
                    KEY_TEXTURE_FILE,
                    TextureType::Diffuse,
                    0,
                    PropertyValue::String("a.png".to_owned()),
                ),
            ],
        };

        assert_eq!(material.name(), Some("brick"));
        assert_eq!(material.texture_paths(TextureType::Diffuse), ["a.png", "b.png"]);
        assert_eq!(material.texture_paths(TextureType::Normals), ["n.png"]);
        assert!(material.texture_paths(TextureType::Specular).is_empty());
    }

    #[test]
    fn every_category_except_none() {
        assert!(!TextureType::ALL.contains(&TextureType::None));
        assert!(
            TextureType::ALL
                .windows(2)
                .all(|pair| pair[0].code() < pair[1].code())
        );
    }
}
