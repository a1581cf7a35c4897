use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Metadata, MetadataValue, NodeId, NodeRef, Scene},
        value::{Kind, Value},
    },
    log::trace,
    std::collections::HashMap,
};

static COUNTS: &[Field<Metadata>] = &[
    Field {
        name: "keys.length",
        kind: Kind::UInt,
        read: |metadata: &Metadata| Value::count(metadata.len()),
    },
    Field {
        name: "values.length",
        kind: Kind::UInt,
        read: |metadata: &Metadata| Value::count(metadata.len()),
    },
    Field {
        name: "numProperties",
        kind: Kind::UInt,
        read: |metadata: &Metadata| Value::count(metadata.entries.len()),
    },
];

/// Walks the scene metadata, then the metadata of every node in arena order.
pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    match &scene.metadata {
        Some(metadata) => {
            let ident = walker.bind(&NodePath::new().field("sceneMetaData"), "scene.metaData")?;
            entries(walker, &ident, metadata)?;
        }
        None => walker.expect("scene", "metaData", Value::Pointer(false)),
    }

    let routes = child_routes(scene);

    for node in scene.nodes() {
        let Some(metadata) = node.metadata() else {
            continue;
        };
        let Some(route) = routes.get(&node.id()) else {
            trace!("Skipping metadata of unreachable node {}", node.name());
            continue;
        };

        let mut path = NodePath::new();
        let mut expr = "scene.rootNode".to_owned();

        for &idx in route {
            path = path.at("child", idx);
            expr.push_str(&format!(".children.elementAt({idx})"));
        }

        walker.unit.blank();
        let ident = walker.bind(&path.field("nodeMetaData"), format!("{expr}.metaData"))?;
        entries(walker, &ident, metadata)?;
    }

    Ok(())
}

/// The child indices leading from the root to each reachable node.
fn child_routes(scene: &Scene) -> HashMap<NodeId, Vec<usize>> {
    fn visit(node: NodeRef<'_>, route: Vec<usize>, routes: &mut HashMap<NodeId, Vec<usize>>) {
        for (idx, child) in node.children().enumerate() {
            let mut child_route = route.clone();
            child_route.push(idx);
            visit(child, child_route, routes);
        }

        routes.insert(node.id(), route);
    }

    let mut routes = HashMap::new();

    if let Some(root) = scene.root() {
        visit(root, vec![], &mut routes);
    }

    routes
}

fn entries(walker: &mut Walker, ident: &str, metadata: &Metadata) -> Result<(), EmitError> {
    walker.unit.fields(ident, metadata, COUNTS)?;

    for (idx, entry) in metadata.entries.iter().enumerate() {
        walker.expect(
            ident,
            &format!("keys.elementAt({idx})"),
            Value::from(entry.key.as_str()),
        );
        walker.expect(ident, &format!("values.elementAt({idx})"), value(&entry.value));
    }

    Ok(())
}

fn value(value: &MetadataValue) -> Value {
    match value {
        MetadataValue::Bool(val) => Value::Bool(*val),
        MetadataValue::Int32(val) => Value::Int(*val as _),
        MetadataValue::UInt64(val) => Value::UInt(*val),
        MetadataValue::Float(val) => Value::Float(*val),
        MetadataValue::Double(val) => Value::Double(*val),
        MetadataValue::String(val) => Value::String(val.clone()),
        MetadataValue::Vector3(val) => Value::Vector3(*val),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{config::TexelIndexing, emit::Item, scene::Node, walk::RecordKind},
        glam::Vec3,
    };

    /// Renders the tester callback without its enclosing group.
    fn rendered(scene: &Scene) -> Vec<String> {
        let group = RecordKind::MetaData
            .walk("meta.gltf", scene, TexelIndexing::Legacy)
            .unwrap();
        let Item::Unit(tester) = &group.items()[0] else {
            panic!("expected a tester");
        };

        let mut out = String::new();
        tester.render(&mut out, 0);

        out.lines().map(str::to_owned).collect()
    }

    #[test]
    fn scene_then_nodes_in_arena_order() {
        let mut scene = Scene::default();

        let mut asset = Metadata::default();
        asset.push("SourceAsset_Format", MetadataValue::String("glTF2".to_owned()));
        asset.push("UnitScaleFactor", MetadataValue::Double(1.0));
        scene.metadata = Some(asset);

        let mut extras = Metadata::default();
        extras.push("visible", MetadataValue::Bool(false));
        extras.push("offset", MetadataValue::Vector3(Vec3::Z));
        extras.push("id", MetadataValue::UInt64(7));

        let root = scene.push_node(Node::new("ROOT"), None);
        scene.push_node(Node::new("a"), Some(root));
        let b = scene.push_node(Node::new("b"), Some(root));
        scene.push_node(Node::new("c").with_metadata(extras), Some(b));

        assert_eq!(
            rendered(&scene)[1..],
            [
                "  final sceneMetaData = scene.metaData;",
                "  expect(sceneMetaData.keys.length, equals(2));",
                "  expect(sceneMetaData.values.length, equals(2));",
                "  expect(sceneMetaData.numProperties, equals(2));",
                "  expect(sceneMetaData.keys.elementAt(0), equals('SourceAsset_Format'));",
                "  expect(sceneMetaData.values.elementAt(0), equals('glTF2'));",
                "  expect(sceneMetaData.keys.elementAt(1), equals('UnitScaleFactor'));",
                "  expect(sceneMetaData.values.elementAt(1), floatEquals(1.0));",
                "",
                "  final nodeMetaData_1_0 = \
                 scene.rootNode.children.elementAt(1).children.elementAt(0).metaData;",
                "  expect(nodeMetaData_1_0.keys.length, equals(3));",
                "  expect(nodeMetaData_1_0.values.length, equals(3));",
                "  expect(nodeMetaData_1_0.numProperties, equals(3));",
                "  expect(nodeMetaData_1_0.keys.elementAt(0), equals('visible'));",
                "  expect(nodeMetaData_1_0.values.elementAt(0), isFalse);",
                "  expect(nodeMetaData_1_0.keys.elementAt(1), equals('offset'));",
                "  expect(nodeMetaData_1_0.values.elementAt(1), vector3Equals(Vector3(0.0, 0.0, \
                 1.0)));",
                "  expect(nodeMetaData_1_0.keys.elementAt(2), equals('id'));",
                "  expect(nodeMetaData_1_0.values.elementAt(2), equals(7));",
                "});",
            ]
        );
    }

    #[test]
    fn absent_scene_metadata() {
        let lines = rendered(&Scene::default());

        assert_eq!(lines[1], "  expect(scene.metaData, isNullPointer);");
        assert_eq!(lines.len(), 3);
    }
}
