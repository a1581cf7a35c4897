//! Turns a scene into assertions, one record kind at a time.
//!
//! Every kind walks its records in a fixed order: tables of [`Field`](crate::emit::Field)
//! descriptors cover the plain attributes and explicit loops cover the per-element collections.
//! Nothing is sorted or deduplicated, so the generated tests pin the importer's output exactly.

mod anim;
mod camera;
mod light;
mod material;
mod mesh;
mod meta;
mod node;
mod scene;
mod texture;

use {
    crate::{
        config::TexelIndexing,
        emit::{AssertionRecord, EmissionUnit, Namer, NodePath},
        error::EmitError,
        layout::native_size,
        scene::Scene,
        value::{Comparison, Value},
    },
    clap::ValueEnum,
    log::trace,
    serde::Deserialize,
};

/// A kind of native record; each kind is generated into its own test file.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Scene,
    Mesh,
    Face,
    Bone,
    Animation,
    Material,
    Node,
    #[value(name = "metadata")]
    MetaData,
    Camera,
    Light,
    Texture,
}

impl RecordKind {
    pub const ALL: [Self; 11] = [
        Self::Scene,
        Self::Mesh,
        Self::Face,
        Self::Bone,
        Self::Animation,
        Self::Material,
        Self::Node,
        Self::MetaData,
        Self::Camera,
        Self::Light,
        Self::Texture,
    ];

    /// The `null` group: the tester is handed an absent scene.
    pub fn baseline(self) -> EmissionUnit {
        let (func, param) = self.tester();
        let mut tester = EmissionUnit::tester(func, None, param);

        match self {
            Self::Scene => scene::baseline(&mut tester),
            Self::MetaData => tester.expect(param, "metaData", &Value::Pointer(false)),
            Self::Node => tester.expect(param, "", &Value::Presence(false)),
            _ => tester.expect(param, "", &Value::Length(0)),
        }

        let mut group = EmissionUnit::test("null");
        group.push(tester);
        group
    }

    /// The wrapper type exposed by the Dart binding.
    pub fn dart_type(self) -> &'static str {
        match self {
            Self::Scene => "Scene",
            Self::Mesh => "Mesh",
            Self::Face => "Face",
            Self::Bone => "Bone",
            Self::Animation => "Animation",
            Self::Material => "Material",
            Self::Node => "Node",
            Self::MetaData => "MetaData",
            Self::Camera => "Camera",
            Self::Light => "Light",
            Self::Texture => "Texture",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Scene => "scene_test.dart",
            Self::Mesh => "mesh_test.dart",
            Self::Face => "face_test.dart",
            Self::Bone => "bone_test.dart",
            Self::Animation => "animation_test.dart",
            Self::Material => "material_test.dart",
            Self::Node => "node_test.dart",
            Self::MetaData => "metadata_test.dart",
            Self::Camera => "camera_test.dart",
            Self::Light => "light_test.dart",
            Self::Texture => "texture_test.dart",
        }
    }

    /// The mirrored C struct.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Scene => "aiScene",
            Self::Mesh => "aiMesh",
            Self::Face => "aiFace",
            Self::Bone => "aiBone",
            Self::Animation => "aiAnimation",
            Self::Material => "aiMaterial",
            Self::Node => "aiNode",
            Self::MetaData => "aiMetadata",
            Self::Camera => "aiCamera",
            Self::Light => "aiLight",
            Self::Texture => "aiTexture",
        }
    }

    /// The `size` group, pinning the byte size of the native record.
    pub fn size(self) -> EmissionUnit {
        let mut group = EmissionUnit::test("size");
        group.expect(
            &format!("sizeOf<{}>()", self.native_name()),
            "",
            &Value::count(native_size(self)),
        );
        group
    }

    /// The `equals` and `toString` smoke groups, or `None` when `scene` has no record of this
    /// kind to test them with.
    pub fn smoke(self, sample: &str, scene: &Scene) -> Option<[EmissionUnit; 2]> {
        let len = match self {
            Self::Mesh => scene.meshes.len(),
            Self::Animation => scene.animations.len(),
            Self::Material => scene.materials.len(),
            Self::Camera => scene.cameras.len(),
            Self::Light => scene.lights.len(),
            Self::Texture => scene.textures.len(),
            Self::Scene | Self::Face | Self::Bone | Self::Node | Self::MetaData => return None,
        };

        if len == 0 {
            return None;
        }

        let (func, param) = self.tester();
        let first = format!("{param}.first");

        let mut equals = EmissionUnit::tester(func, Some(sample), param);
        equals.push_assertion(AssertionRecord {
            subject: first.clone(),
            field: String::new(),
            matcher: format!("equals({first})"),
            comparison: Comparison::Exact,
        });
        equals.push_assertion(AssertionRecord {
            subject: first.clone(),
            field: "hashCode".to_owned(),
            matcher: format!("equals({first}.hashCode)"),
            comparison: Comparison::Exact,
        });

        let mut to_string = EmissionUnit::tester(func, Some(sample), param);
        to_string.expect(
            &first,
            "toString()",
            &Value::Pattern(format!("^{}\\(", self.dart_type())),
        );

        let mut equals_group = EmissionUnit::test("equals");
        equals_group.push(equals);

        let mut to_string_group = EmissionUnit::test("toString");
        to_string_group.push(to_string);

        Some([equals_group, to_string_group])
    }

    /// The test helper which loads a sample and the name of its callback parameter.
    fn tester(self) -> (&'static str, &'static str) {
        match self {
            Self::Scene | Self::MetaData => ("testScene", "scene"),
            Self::Mesh | Self::Face | Self::Bone => ("testMeshes", "meshes"),
            Self::Animation => ("testAnimations", "animations"),
            Self::Material => ("testMaterials", "materials"),
            Self::Node => ("testNodes", "rootNode"),
            Self::Camera => ("testCameras", "cameras"),
            Self::Light => ("testLights", "lights"),
            Self::Texture => ("testTextures", "textures"),
        }
    }

    /// Walks the records of this kind in `scene` into the test group of `sample`.
    pub fn walk(
        self,
        sample: &str,
        scene: &Scene,
        texel_indexing: TexelIndexing,
    ) -> Result<EmissionUnit, EmitError> {
        let (func, param) = self.tester();
        let mut walker = Walker {
            names: Namer::default(),
            texel_indexing,
            unit: EmissionUnit::tester(func, Some(sample), param),
        };

        match self {
            Self::Scene => scene::walk(&mut walker, scene)?,
            Self::Mesh => mesh::walk(&mut walker, scene)?,
            Self::Face => mesh::walk_faces(&mut walker, scene)?,
            Self::Bone => mesh::walk_bones(&mut walker, scene)?,
            Self::Animation => anim::walk(&mut walker, scene)?,
            Self::Material => material::walk(&mut walker, scene)?,
            Self::Node => node::walk(&mut walker, scene)?,
            Self::MetaData => meta::walk(&mut walker, scene)?,
            Self::Camera => camera::walk(&mut walker, scene)?,
            Self::Light => light::walk(&mut walker, scene)?,
            Self::Texture => texture::walk(&mut walker, scene)?,
        }

        trace!(
            "Walked {:?} of {sample}: {} assertions",
            self,
            walker.unit.assertions().len()
        );

        let mut group = EmissionUnit::test(sample);
        group.push(walker.unit);

        Ok(group)
    }
}

/// State of one tester callback being filled in.
struct Walker {
    names: Namer,
    texel_indexing: TexelIndexing,
    unit: EmissionUnit,
}

impl Walker {
    /// Binds `expr` to the identifier of `path` and returns the identifier.
    fn bind(&mut self, path: &NodePath, expr: impl Into<String>) -> Result<String, EmitError> {
        let ident = self.names.claim(path)?;
        self.unit.bind(ident.clone(), expr);

        Ok(ident)
    }

    /// Starts a new element of a collection: a blank line, then the element binding.
    fn element(
        &mut self,
        path: &NodePath,
        collection: &str,
        index: usize,
    ) -> Result<String, EmitError> {
        self.unit.blank();
        self.bind(path, format!("{collection}.elementAt({index})"))
    }

    fn expect(&mut self, subject: &str, field: &str, value: Value) {
        self.unit.expect(subject, field, &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_unique() {
        let mut names = RecordKind::ALL.map(RecordKind::file_name).to_vec();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), RecordKind::ALL.len());
    }

    #[test]
    fn null_baselines() {
        let render = |kind: RecordKind| {
            let mut out = String::new();
            kind.baseline().render(&mut out, 0);
            out
        };

        assert_eq!(
            render(RecordKind::Mesh),
            "test('null', () {\n  testMeshes(null, tester: (meshes) {\n    expect(meshes, \
             isEmpty);\n  });\n});\n"
        );
        assert_eq!(
            render(RecordKind::Node),
            "test('null', () {\n  testNodes(null, tester: (rootNode) {\n    expect(rootNode, \
             isNull);\n  });\n});\n"
        );
    }

    #[test]
    fn smoke_needs_a_record() {
        let mut scene = Scene::default();

        assert!(RecordKind::Camera.smoke("a.gltf", &scene).is_none());

        scene.cameras.push(Default::default());
        let [equals, to_string] = RecordKind::Camera.smoke("a.gltf", &scene).unwrap();

        assert_eq!(
            equals
                .assertions()
                .iter()
                .map(|record| record.render())
                .collect::<Vec<_>>(),
            [
                "expect(cameras.first, equals(cameras.first));",
                "expect(cameras.first.hashCode, equals(cameras.first.hashCode));",
            ]
        );
        assert_eq!(
            to_string.assertions()[0].render(),
            "expect(cameras.first.toString(), matches('^Camera\\\\('));"
        );
        assert!(RecordKind::Scene.smoke("a.gltf", &scene).is_none());
    }
}
