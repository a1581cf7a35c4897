use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Material, MaterialProperty, PropertyValue, Scene, TextureType},
        value::{Kind, Symbol, Value},
    },
};

static PROPERTY_KEY: &[Field<MaterialProperty>] = &[Field {
    name: "key",
    kind: Kind::String,
    read: |property: &MaterialProperty| Value::from(property.key.as_str()),
}];

static PROPERTY_INDEX: &[Field<MaterialProperty>] = &[Field {
    name: "index",
    kind: Kind::UInt,
    read: |property: &MaterialProperty| Value::UInt(property.index as _),
}];

static MATERIAL: &[Field<Material>] = &[Field {
    name: "properties.length",
    kind: Kind::UInt,
    read: |material: &Material| Value::count(material.properties.len()),
}];

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("materials", "length", Value::count(scene.materials.len()));

    for (material_idx, material) in scene.materials.iter().enumerate() {
        let path = NodePath::new().at("material", material_idx);
        let ident = walker.element(&path, "materials", material_idx)?;

        walker.unit.fields(&ident, material, MATERIAL)?;

        for (property_idx, property) in material.properties.iter().enumerate() {
            let property_ident = walker.element(
                &path.at("property", property_idx),
                &format!("{ident}.properties"),
                property_idx,
            )?;

            walker.unit.fields(&property_ident, property, PROPERTY_KEY)?;

            let (ty, value) = typed_value(&property.value);
            walker.expect(&property_ident, "value", Value::TypeIs(ty));
            walker.expect(&property_ident, "value", value);

            walker.unit.fields(&property_ident, property, PROPERTY_INDEX)?;

            let semantic = TextureType::try_from(property.semantic)?;
            walker.expect(&property_ident, "semantic", Value::symbol(semantic));
        }

        walker.unit.blank();

        for semantic in TextureType::ALL {
            let paths = material
                .texture_paths(semantic)
                .into_iter()
                .map(str::to_owned)
                .collect();

            walker.expect(
                &ident,
                &format!("textures({}.{})", TextureType::TYPE_NAME, semantic.symbol()),
                Value::StringList(paths),
            );
        }
    }

    Ok(())
}

/// The Dart runtime type of a property value and the value itself.
///
/// Single-element numeric arrays are exposed as scalars.
fn typed_value(value: &PropertyValue) -> (&'static str, Value) {
    match value {
        PropertyValue::Float(vals) if vals.len() == 1 => ("double", Value::Float(vals[0])),
        PropertyValue::Float(vals) => ("List<double>", Value::FloatList(vals.clone())),
        PropertyValue::Double(vals) if vals.len() == 1 => ("double", Value::Double(vals[0])),
        PropertyValue::Double(vals) => ("List<double>", Value::DoubleList(vals.clone())),
        PropertyValue::String(val) => ("String", Value::String(val.clone())),
        PropertyValue::Integer(vals) if vals.len() == 1 => ("int", Value::Int(vals[0] as _)),
        PropertyValue::Integer(vals) => (
            "List<int>",
            Value::IntList(vals.iter().map(|&val| val as _).collect()),
        ),
        PropertyValue::Buffer(bytes) => ("Uint8List", Value::Bytes(bytes.clone())),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            config::TexelIndexing,
            scene::{KEY_NAME, KEY_TEXTURE_FILE},
            walk::RecordKind,
        },
    };

    fn rendered(scene: &Scene) -> Vec<String> {
        RecordKind::Material
            .walk("mat.gltf", scene, TexelIndexing::Legacy)
            .unwrap()
            .assertions()
            .iter()
            .map(|record| record.render())
            .collect()
    }

    #[test]
    fn string_property() {
        let scene = Scene::default().with_materials(vec![Material {
            properties: vec![MaterialProperty::new(
                KEY_NAME,
                PropertyValue::String("it's $5".to_owned()),
            )],
        }]);
        let lines = rendered(&scene);

        assert_eq!(
            &lines[..7],
            [
                "expect(materials.length, equals(1));",
                "expect(material_0.properties.length, equals(1));",
                "expect(property_0_0.key, equals('?mat.name'));",
                "expect(property_0_0.value, isA<String>());",
                "expect(property_0_0.value, equals('it\\'s \\$5'));",
                "expect(property_0_0.index, isZero);",
                "expect(property_0_0.semantic, equals(TextureType.none));",
            ]
        );

        // One texture path list per usage category
        assert_eq!(lines.len(), 7 + TextureType::ALL.len());
        assert_eq!(
            lines[7],
            "expect(material_0.textures(TextureType.diffuse), isEmpty);"
        );
    }

    #[test]
    fn numeric_properties_and_texture_paths() {
        let scene = Scene::default().with_materials(vec![Material {
            properties: vec![
                MaterialProperty::new("$mat.shininess", PropertyValue::Float(vec![0.5])),
                MaterialProperty::new(
                    "$clr.diffuse",
                    PropertyValue::Float(vec![1.0, 0.0, 0.25, 1.0]),
                ),
                MaterialProperty::new("$mat.twosided", PropertyValue::Integer(vec![1])),
                MaterialProperty::new("$raw", PropertyValue::Buffer(vec![])),
                MaterialProperty::texture(
                    KEY_TEXTURE_FILE,
                    TextureType::BaseColor,
                    0,
                    PropertyValue::String("*0".to_owned()),
                ),
            ],
        }]);
        let lines = rendered(&scene);

        assert!(lines.contains(&"expect(property_0_0.value, isA<double>());".to_owned()));
        assert!(lines.contains(&"expect(property_0_0.value, floatEquals(0.5));".to_owned()));
        assert!(lines.contains(&"expect(property_0_1.value, isA<List<double>>());".to_owned()));
        assert!(lines.contains(
            &"expect(property_0_1.value, floatListEquals([1.0, 0.0, 0.25, 1.0]));".to_owned()
        ));
        assert!(lines.contains(&"expect(property_0_2.value, equals(1));".to_owned()));
        assert!(lines.contains(&"expect(property_0_3.value, isA<Uint8List>());".to_owned()));
        assert!(lines.contains(&"expect(property_0_3.value, isEmpty);".to_owned()));
        assert!(lines.contains(
            &"expect(property_0_4.semantic, equals(TextureType.baseColor));".to_owned()
        ));
        assert!(lines.contains(
            &"expect(material_0.textures(TextureType.baseColor), equals(['*0']));".to_owned()
        ));
    }

    #[test]
    fn unknown_semantic_code_is_fatal() {
        let mut property = MaterialProperty::new("$tex.mapping", PropertyValue::Integer(vec![0]));
        property.semantic = 99;

        let scene = Scene::default().with_materials([Material {
            properties: vec![property],
        }]);
        let err = RecordKind::Material
            .walk("mat.gltf", &scene, TexelIndexing::Legacy)
            .unwrap_err();

        assert!(matches!(
            err,
            EmitError::UnknownEnumCode {
                ty: "TextureType",
                code: 99
            }
        ));
        assert_eq!(err.to_string(), "unknown TextureType code 99");
    }
}
