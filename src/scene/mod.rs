//! An owned, read-only copy of an imported scene graph.
//!
//! The layout mirrors the records exposed by the FFI binding under test: a scene owns flat lists
//! of meshes, materials, animations, textures, lights and cameras, plus a tree of nodes. Nodes are
//! stored in an arena and addressed by [`NodeId`].

/// Declares a field-less enum which is stored in native records as a `u32` code and rendered in
/// generated tests as a Dart enum symbol.
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $dart:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $symbol:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $code,
            )*
        }

        impl $name {
            /// The native code of this value.
            pub fn code(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::EmitError;

            fn try_from(code: u32) -> Result<Self, Self::Error> {
                match code {
                    $(
                        $code => Ok(Self::$variant),
                    )*
                    _ => Err($crate::EmitError::UnknownEnumCode { ty: $dart, code }),
                }
            }
        }

        impl $crate::value::Symbol for $name {
            const TYPE_NAME: &'static str = $dart;

            fn symbol(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $symbol,
                    )*
                }
            }
        }
    };
}

mod anim;
mod material;
mod mesh;
mod meta;

pub use self::{
    anim::{
        AnimBehaviour, Animation, MeshAnim, MeshKey, MeshMorphAnim, MeshMorphKey, NodeAnim,
        QuatKey, VectorKey,
    },
    material::{
        KEY_NAME, KEY_TEXTURE_FILE, Material, MaterialProperty, PropertyValue, TextureType,
    },
    mesh::{
        AnimMesh, Bone, Face, MAX_COLOR_SETS, MAX_TEXTURE_COORDS, Mesh, MorphingMethod,
        PrimitiveType, VertexWeight,
    },
    meta::{Metadata, MetadataEntry, MetadataValue},
};

use {
    bitflags::bitflags,
    glam::{Mat4, Vec2, Vec3},
};

bitflags! {
    /// Post-import state flags of a scene.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct SceneFlags: u32 {
        const INCOMPLETE = 0x1;
        const VALIDATED = 0x2;
        const VALIDATION_WARNING = 0x4;
        const NON_VERBOSE_FORMAT = 0x8;
        const TERRAIN = 0x10;
        const ALLOW_SHARED = 0x20;
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Returns the smallest box containing every point, or the zero box when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };

        points.fold(
            Self {
                min: *first,
                max: *first,
            },
            |aabb, point| Self {
                min: aabb.min.min(*point),
                max: aabb.max.max(*point),
            },
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    pub name: String,
    pub position: Vec3,
    pub up: Vec3,
    pub look_at: Vec3,
    pub horizontal_fov: f32,
    pub clip_plane_near: f32,
    pub clip_plane_far: f32,
    pub aspect: f32,
    pub orthographic_width: f32,
}

symbol_enum! {
    /// The kind of light source.
    pub enum LightSourceType: "LightSourceType" {
        #[default]
        Undefined = 0 => "undefined",
        Directional = 1 => "directional",
        Point = 2 => "point",
        Spot = 3 => "spot",
        Ambient = 4 => "ambient",
        Area = 5 => "area",
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Light {
    pub name: String,
    pub ty: LightSourceType,
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    pub attenuation_constant: f32,
    pub attenuation_linear: f32,
    pub attenuation_quadratic: f32,
    pub color_diffuse: Vec3,
    pub color_specular: Vec3,
    pub color_ambient: Vec3,
    pub angle_inner_cone: f32,
    pub angle_outer_cone: f32,
    pub size: Vec2,
}

/// Index of a node within the arena of its [`Scene`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub usize);

/// A scene graph node. Use [`Scene::push_node`] to link nodes into the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Mat4,
    pub meshes: Vec<u32>,
    pub metadata: Option<Metadata>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Indices of the child nodes, in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            meshes: vec![],
            metadata: None,
            parent: None,
            children: vec![],
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn with_meshes(mut self, meshes: impl IntoIterator<Item = u32>) -> Self {
        self.meshes = meshes.into_iter().collect();
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

/// An embedded texture.
///
/// Compressed textures keep their encoded length in `width` and have a `height` of zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format_hint: String,
    pub filename: String,
    pub texels: Vec<Texel>,
}

impl Texture {
    /// The number of texels implied by the dimensions, not the length of `texels`.
    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One BGRA8 texel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Texel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

/// The root container of an imported asset.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub flags: SceneFlags,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub animations: Vec<Animation>,
    pub textures: Vec<Texture>,
    pub lights: Vec<Light>,
    pub cameras: Vec<Camera>,
    pub metadata: Option<Metadata>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Scene {
    /// Gets the node stored at `id`.
    ///
    /// Panics if `id` was not returned by [`Scene::push_node`] on this scene.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node {} out of range", id.0);

        NodeRef { id, scene: self }
    }

    /// Gets an iterator over every node in arena (insertion) order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|idx| NodeRef {
            id: NodeId(idx),
            scene: self,
        })
    }

    /// Adds a node under `parent`, or as the root when `parent` is `None`.
    ///
    /// A scene has at most one root; pushing a second parentless node replaces the root reference
    /// but keeps the old node in the arena.
    pub fn push_node(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());

        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.root = Some(id),
        }

        id
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.node(id))
    }

    pub fn with_meshes(mut self, meshes: impl IntoIterator<Item = Mesh>) -> Self {
        self.meshes = meshes.into_iter().collect();
        self
    }

    pub fn with_materials(mut self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.materials = materials.into_iter().collect();
        self
    }

    pub fn with_animations(mut self, animations: impl IntoIterator<Item = Animation>) -> Self {
        self.animations = animations.into_iter().collect();
        self
    }

    pub fn with_textures(mut self, textures: impl IntoIterator<Item = Texture>) -> Self {
        self.textures = textures.into_iter().collect();
        self
    }

    pub fn with_lights(mut self, lights: impl IntoIterator<Item = Light>) -> Self {
        self.lights = lights.into_iter().collect();
        self
    }

    pub fn with_cameras(mut self, cameras: impl IntoIterator<Item = Camera>) -> Self {
        self.cameras = cameras.into_iter().collect();
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A borrowed [`Node`] which can follow links to its parent and children.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    id: NodeId,
    scene: &'a Scene,
}

impl<'a> NodeRef<'a> {
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + use<'a> {
        let scene = self.scene;

        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { id, scene })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn meshes(&self) -> &'a [u32] {
        &self.node().meshes
    }

    pub fn metadata(&self) -> Option<&'a Metadata> {
        self.node().metadata.as_ref()
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn node(&self) -> &'a Node {
        &self.scene.nodes[self.id.0]
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            id,
            scene: self.scene,
        })
    }

    pub fn transform(&self) -> Mat4 {
        self.node().transform
    }
}
