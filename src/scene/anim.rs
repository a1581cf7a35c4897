use glam::{Quat, Vec3};

symbol_enum! {
    /// What a channel does outside of its key range.
    pub enum AnimBehaviour: "AnimBehaviour" {
        /// Take the value from the default node transformation. `default` is reserved in Dart.
        #[default]
        Default = 0 => "default_",
        /// Use the nearest key value.
        Constant = 1 => "constant",
        /// Extrapolate linearly from the two nearest keys.
        Linear = 2 => "linear",
        /// Repeat the key range.
        Repeat = 3 => "repeat",
    }
}

/// A keyframed animation.
///
/// Key times are expressed in ticks; `ticks_per_second` may be zero when the source format does
/// not specify it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    pub name: String,
    pub duration: f64,
    pub ticks_per_second: f64,
    pub channels: Vec<NodeAnim>,
    pub mesh_channels: Vec<MeshAnim>,
    pub morph_mesh_channels: Vec<MeshMorphAnim>,
}

/// Vertex-animation channel of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshAnim {
    pub name: String,
    pub keys: Vec<MeshKey>,
}

/// Selects the anim mesh shown from `time` on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshKey {
    pub time: f64,
    pub value: u32,
}

/// Morph-target weight channel of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshMorphAnim {
    pub name: String,
    pub keys: Vec<MeshMorphKey>,
}

/// Parallel lists of anim mesh indices and their weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshMorphKey {
    pub time: f64,
    pub values: Vec<u32>,
    pub weights: Vec<f64>,
}

/// Transformation channel of a single node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAnim {
    pub node_name: String,
    pub position_keys: Vec<VectorKey>,
    pub rotation_keys: Vec<QuatKey>,
    pub scaling_keys: Vec<VectorKey>,
    pub pre_state: AnimBehaviour,
    pub post_state: AnimBehaviour,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuatKey {
    pub time: f64,
    pub value: Quat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VectorKey {
    pub time: f64,
    pub value: Vec3,
}
