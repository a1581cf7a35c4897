use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Bone, Mesh, Scene},
        value::{Kind, Value},
    },
    glam::Vec3,
};

static HEAD: &[Field<Mesh>] = &[
    Field {
        name: "primitiveTypes",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::UInt(mesh.primitive_types.bits() as _),
    },
    Field {
        name: "vertices.length",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::count(mesh.vertices.len()),
    },
];

static TAIL: &[Field<Mesh>] = &[
    Field {
        name: "faces.length",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::count(mesh.faces.len()),
    },
    Field {
        name: "bones.length",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::count(mesh.bones.len()),
    },
    Field {
        name: "materialIndex",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::UInt(mesh.material_index as _),
    },
    Field {
        name: "name",
        kind: Kind::String,
        read: |mesh: &Mesh| Value::from(mesh.name.as_str()),
    },
    Field {
        name: "animMeshes.length",
        kind: Kind::UInt,
        read: |mesh: &Mesh| Value::count(mesh.anim_meshes.len()),
    },
    Field {
        name: "morphingMethod",
        kind: Kind::Enum,
        read: |mesh: &Mesh| Value::symbol(mesh.method),
    },
    Field {
        name: "aabb",
        kind: Kind::Aabb,
        read: |mesh: &Mesh| Value::Aabb(mesh.aabb),
    },
];

static BONE: &[Field<Bone>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |bone: &Bone| Value::from(bone.name.as_str()),
    },
    Field {
        name: "offsetMatrix",
        kind: Kind::Matrix4,
        read: |bone: &Bone| Value::Matrix4(bone.offset),
    },
    Field {
        name: "weights.length",
        kind: Kind::UInt,
        read: |bone: &Bone| Value::count(bone.weights.len()),
    },
];

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("meshes", "length", Value::count(scene.meshes.len()));

    for (mesh_idx, mesh) in scene.meshes.iter().enumerate() {
        let path = NodePath::new().at("mesh", mesh_idx);
        let ident = walker.element(&path, "meshes", mesh_idx)?;

        walker.unit.fields(&ident, mesh, HEAD)?;
        vectors(walker, &ident, "vertices", &mesh.vertices);

        for (name, attribute) in [
            ("normals", &mesh.normals),
            ("tangents", &mesh.tangents),
            ("bitangents", &mesh.bitangents),
        ] {
            walker.expect(&ident, &format!("{name}.length"), Value::count(attribute.len()));
            vectors(walker, &ident, name, attribute);
        }

        walker.expect(&ident, "colors.length", Value::count(mesh.colors.len()));

        for (set_idx, colors) in mesh.colors.iter().enumerate() {
            let set = walker.bind(
                &path.at("colorSet", set_idx),
                format!("{ident}.colors.elementAt({set_idx})"),
            )?;
            walker.expect(&set, "length", Value::count(colors.len()));

            for (idx, color) in colors.iter().enumerate() {
                walker.expect(&set, &format!("elementAt({idx})"), Value::Color4(*color));
            }
        }

        walker.expect(
            &ident,
            "textureCoords.length",
            Value::count(mesh.texture_coords.len()),
        );

        for (set_idx, coords) in mesh.texture_coords.iter().enumerate() {
            let set = walker.bind(
                &path.at("uvSet", set_idx),
                format!("{ident}.textureCoords.elementAt({set_idx})"),
            )?;
            walker.expect(&set, "length", Value::count(coords.len()));

            for (idx, coord) in coords.iter().enumerate() {
                walker.expect(&set, &format!("elementAt({idx})"), Value::Vector3(*coord));
            }
        }

        walker.expect(
            &ident,
            "uvComponents.length",
            Value::count(mesh.uv_components.len()),
        );

        for (idx, &components) in mesh.uv_components.iter().enumerate() {
            walker.expect(
                &ident,
                &format!("uvComponents.elementAt({idx})"),
                Value::UInt(components as _),
            );
        }

        walker.unit.fields(&ident, mesh, TAIL)?;
    }

    Ok(())
}

pub(super) fn walk_bones(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("meshes", "length", Value::count(scene.meshes.len()));

    for (mesh_idx, mesh) in scene.meshes.iter().enumerate() {
        let path = NodePath::new().at("mesh", mesh_idx);
        let mesh_ident = walker.element(&path, "meshes", mesh_idx)?;

        walker.expect(&mesh_ident, "bones.length", Value::count(mesh.bones.len()));

        for (bone_idx, bone) in mesh.bones.iter().enumerate() {
            let ident = walker.element(
                &path.at("bone", bone_idx),
                &format!("{mesh_ident}.bones"),
                bone_idx,
            )?;

            walker.unit.fields(&ident, bone, BONE)?;

            for (idx, weight) in bone.weights.iter().enumerate() {
                walker.expect(
                    &ident,
                    &format!("weights.elementAt({idx}).vertexId"),
                    Value::UInt(weight.vertex_id as _),
                );
                walker.expect(
                    &ident,
                    &format!("weights.elementAt({idx}).weight"),
                    Value::Float(weight.weight),
                );
            }
        }
    }

    Ok(())
}

pub(super) fn walk_faces(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("meshes", "length", Value::count(scene.meshes.len()));

    for (mesh_idx, mesh) in scene.meshes.iter().enumerate() {
        let ident = walker.element(&NodePath::new().at("mesh", mesh_idx), "meshes", mesh_idx)?;

        walker.expect(&ident, "faces.length", Value::count(mesh.faces.len()));

        for (idx, face) in mesh.faces.iter().enumerate() {
            walker.expect(
                &ident,
                &format!("faces.elementAt({idx}).indices"),
                Value::UIntList(face.indices.iter().map(|&index| index as _).collect()),
            );
        }
    }

    Ok(())
}

/// One assertion per element of a per-vertex attribute.
fn vectors(walker: &mut Walker, ident: &str, name: &str, vectors: &[Vec3]) {
    for (idx, vector) in vectors.iter().enumerate() {
        walker.expect(ident, &format!("{name}.elementAt({idx})"), Value::Vector3(*vector));
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            config::TexelIndexing,
            scene::{Face, PrimitiveType, VertexWeight},
            walk::RecordKind,
        },
        glam::{Mat4, Vec4},
    };

    fn triangle() -> Mesh {
        Mesh {
            primitive_types: PrimitiveType::TRIANGLE,
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            colors: vec![vec![Vec4::ONE; 3]],
            faces: vec![Face::new([0, 1, 2])],
            name: "tri".to_owned(),
            ..Default::default()
        }
    }

    fn rendered(kind: RecordKind, scene: &Scene) -> Vec<String> {
        kind.walk("tri.gltf", scene, TexelIndexing::Legacy)
            .unwrap()
            .assertions()
            .iter()
            .map(|record| record.render())
            .collect()
    }

    #[test]
    fn three_vertices_without_normals() {
        let scene = Scene::default().with_meshes(vec![triangle()]);
        let lines = rendered(RecordKind::Mesh, &scene);
        let count = |prefix: &str| lines.iter().filter(|line| line.starts_with(prefix)).count();

        assert!(lines.contains(&"expect(mesh_0.vertices.length, equals(3));".to_owned()));
        assert_eq!(count("expect(mesh_0.vertices.elementAt("), 3);
        assert!(lines.contains(&"expect(mesh_0.normals.length, isZero);".to_owned()));
        assert_eq!(count("expect(mesh_0.normals.elementAt("), 0);
        assert_eq!(count("expect(colorSet_0_0.elementAt("), 3);
        assert!(lines.contains(&"expect(mesh_0.textureCoords.length, isZero);".to_owned()));
        assert!(lines.contains(&"expect(mesh_0.uvComponents.length, isZero);".to_owned()));
        assert_eq!(count("expect(mesh_0.uvComponents.elementAt("), 0);
        assert!(lines.contains(&"expect(mesh_0.primitiveTypes, equals(4));".to_owned()));
        assert!(lines.contains(
            &"expect(mesh_0.morphingMethod, equals(MorphingMethod.unknown));".to_owned()
        ));
        assert_eq!(
            lines.last().unwrap(),
            "expect(mesh_0.aabb, aabbEquals(Aabb3.minMax(Vector3(0.0, 0.0, 0.0), Vector3(0.0, \
             0.0, 0.0))));"
        );
    }

    #[test]
    fn faces_and_bones() {
        let mut mesh = triangle();
        mesh.bones.push(Bone {
            name: "joint".to_owned(),
            offset: Mat4::IDENTITY,
            weights: vec![
                VertexWeight {
                    vertex_id: 0,
                    weight: 1.0,
                },
                VertexWeight {
                    vertex_id: 2,
                    weight: 0.5,
                },
            ],
        });
        let scene = Scene::default().with_meshes(vec![mesh]);

        assert_eq!(
            rendered(RecordKind::Face, &scene),
            [
                "expect(meshes.length, equals(1));",
                "expect(mesh_0.faces.length, equals(1));",
                "expect(mesh_0.faces.elementAt(0).indices, equals([0, 1, 2]));",
            ]
        );

        let bones = rendered(RecordKind::Bone, &scene);
        assert_eq!(bones[2], "expect(bone_0_0.name, equals('joint'));");
        assert_eq!(bones[4], "expect(bone_0_0.weights.length, equals(2));");
        assert_eq!(bones[5], "expect(bone_0_0.weights.elementAt(0).vertexId, isZero);");
        assert_eq!(
            bones[8],
            "expect(bone_0_0.weights.elementAt(1).weight, floatEquals(0.5));"
        );
        assert_eq!(bones.len(), 9);
    }

    #[test]
    fn uv_components_follow_the_uv_sets() {
        let mut mesh = triangle();
        mesh.texture_coords = vec![vec![Vec3::ZERO; 3], vec![Vec3::X; 3]];
        mesh.uv_components = vec![2, 3];

        let lines = rendered(RecordKind::Mesh, &Scene::default().with_meshes([mesh]));
        let start = lines
            .iter()
            .position(|line| line.starts_with("expect(mesh_0.uvComponents"))
            .unwrap();

        assert_eq!(
            &lines[start..start + 3],
            [
                "expect(mesh_0.uvComponents.length, equals(2));",
                "expect(mesh_0.uvComponents.elementAt(0), equals(2));",
                "expect(mesh_0.uvComponents.elementAt(1), equals(3));",
            ]
        );
        assert_eq!(lines[start + 3], "expect(mesh_0.faces.length, equals(1));");
    }
}
