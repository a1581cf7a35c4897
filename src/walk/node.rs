use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Node, Scene},
        value::{Kind, Value},
    },
};

static HEAD: &[Field<Node>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |node: &Node| Value::from(node.name.as_str()),
    },
    Field {
        name: "transformation",
        kind: Kind::Matrix4,
        read: |node: &Node| Value::Matrix4(node.transform),
    },
    Field {
        name: "parent",
        kind: Kind::Presence,
        read: |node: &Node| Value::Presence(node.parent().is_some()),
    },
    Field {
        name: "children.length",
        kind: Kind::UInt,
        read: |node: &Node| Value::count(node.children().len()),
    },
];

static TAIL: &[Field<Node>] = &[
    Field {
        name: "meshes",
        kind: Kind::UIntList,
        read: |node: &Node| Value::UIntList(node.meshes.iter().map(|&mesh| mesh as _).collect()),
    },
    Field {
        name: "metaData",
        kind: Kind::Presence,
        read: |node: &Node| Value::Presence(node.metadata.is_some()),
    },
];

/// Walks the root and its direct children; grandchildren are only counted.
pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    let Some(root) = scene.root() else {
        walker.expect("rootNode", "", Value::Presence(false));

        return Ok(());
    };

    walker.unit.fields("rootNode", root.node(), HEAD)?;

    for (idx, child) in root.children().enumerate() {
        let ident = walker.element(&NodePath::new().at("child", idx), "rootNode.children", idx)?;

        walker.unit.fields(&ident, child.node(), HEAD)?;
        walker.unit.fields(&ident, child.node(), TAIL)?;
    }

    walker.unit.blank();
    walker.unit.fields("rootNode", root.node(), TAIL)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            config::TexelIndexing,
            scene::{Metadata, MetadataValue},
            walk::RecordKind,
        },
        glam::{Mat4, Vec3},
    };

    #[test]
    fn root_and_one_level_of_children() {
        let mut scene = Scene::default();
        let root = scene.push_node(Node::new("ROOT").with_meshes([0]), None);
        let mut metadata = Metadata::default();
        metadata.push("answer", MetadataValue::Int32(42));
        let child = scene.push_node(
            Node::new("arm")
                .with_transform(Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)))
                .with_metadata(metadata),
            Some(root),
        );
        scene.push_node(Node::new("hand").with_meshes([1, 2]), Some(child));

        let lines = RecordKind::Node
            .walk("arm.gltf", &scene, TexelIndexing::Legacy)
            .unwrap()
            .assertions()
            .iter()
            .map(|record| record.render())
            .collect::<Vec<_>>();

        assert_eq!(lines.len(), 4 + 6 + 2);
        assert_eq!(lines[0], "expect(rootNode.name, equals('ROOT'));");
        assert_eq!(lines[2], "expect(rootNode.parent, isNull);");
        assert_eq!(lines[3], "expect(rootNode.children.length, equals(1));");
        assert_eq!(lines[4], "expect(child_0.name, equals('arm'));");
        assert_eq!(
            lines[5],
            "expect(child_0.transformation, matrix4Equals(Matrix4(1.0, 0.0, 0.0, 0.0, 0.0, \
             1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 1.0)));"
        );
        assert_eq!(lines[6], "expect(child_0.parent, isNotNull);");
        assert_eq!(lines[7], "expect(child_0.children.length, equals(1));");
        assert_eq!(lines[8], "expect(child_0.meshes, equals([]));");
        assert_eq!(lines[9], "expect(child_0.metaData, isNotNull);");
        assert_eq!(lines[10], "expect(rootNode.meshes, equals([0]));");
        assert_eq!(lines[11], "expect(rootNode.metaData, isNull);");
    }

    #[test]
    fn missing_root() {
        let unit = RecordKind::Node
            .walk("empty.gltf", &Scene::default(), TexelIndexing::Legacy)
            .unwrap();

        assert_eq!(unit.assertions()[0].render(), "expect(rootNode, isNull);");
    }
}
