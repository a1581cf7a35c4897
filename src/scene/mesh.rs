use {
    super::Aabb,
    bitflags::bitflags,
    glam::{Mat4, Vec3, Vec4},
};

/// Maximum number of vertex color sets per mesh.
pub const MAX_COLOR_SETS: usize = 8;

/// Maximum number of texture coordinate sets per mesh.
pub const MAX_TEXTURE_COORDS: usize = 8;

bitflags! {
    /// The kinds of primitives a mesh contains.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct PrimitiveType: u32 {
        const POINT = 0x1;
        const LINE = 0x2;
        const TRIANGLE = 0x4;
        const POLYGON = 0x8;
        const NGON_ENCODING_FLAG = 0x10;
    }
}

impl PrimitiveType {
    /// Classifies a face by its index count.
    pub fn of_face(face: &Face) -> Self {
        match face.indices.len() {
            1 => Self::POINT,
            2 => Self::LINE,
            3 => Self::TRIANGLE,
            _ => Self::POLYGON,
        }
    }
}

symbol_enum! {
    /// How the anim meshes of a mesh are blended.
    pub enum MorphingMethod: "MorphingMethod" {
        #[default]
        Unknown = 0 => "unknown",
        VertexBlend = 1 => "vertexBlend",
        MorphNormalized = 2 => "morphNormalized",
        MorphRelative = 3 => "morphRelative",
    }
}

/// A morph target of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub weight: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bone {
    pub name: String,

    /// Transforms from mesh space to bone space in bind pose.
    pub offset: Mat4,

    pub weights: Vec<VertexWeight>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

/// Geometry with a single material.
///
/// Optional per-vertex attributes are empty when absent, otherwise they hold exactly one element
/// per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub primitive_types: PrimitiveType,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,

    /// One list of RGBA colors per color set.
    pub colors: Vec<Vec<Vec4>>,

    /// One list of coordinates per UV set; unused components are zero.
    pub texture_coords: Vec<Vec<Vec3>>,

    /// The number of meaningful components for each UV set.
    pub uv_components: Vec<u32>,

    pub faces: Vec<Face>,
    pub bones: Vec<Bone>,
    pub material_index: u32,
    pub name: String,
    pub anim_meshes: Vec<AnimMesh>,
    pub method: MorphingMethod,
    pub aabb: Aabb,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VertexWeight {
    pub vertex_id: u32,
    pub weight: f32,
}
