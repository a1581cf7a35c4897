//! Reads glTF 2.0 documents into the assimp-shaped scene model.

use {
    super::{Importer, lossy_utf8},
    crate::scene::{
        Aabb, AnimBehaviour, AnimMesh, Animation, Bone, Camera, Face, KEY_NAME, KEY_TEXTURE_FILE,
        Light, LightSourceType, MAX_COLOR_SETS, MAX_TEXTURE_COORDS, Material, MaterialProperty,
        Mesh, MeshMorphAnim, MeshMorphKey, Metadata, MetadataValue, MorphingMethod, Node, NodeAnim,
        NodeId, PrimitiveType, PropertyValue, QuatKey, Scene, Texture, TextureType, VectorKey,
        VertexWeight,
    },
    anyhow::Context,
    glam::{Mat4, Quat, Vec2, Vec3, Vec4},
    gltf::{
        Document,
        animation::{Interpolation, Property, util::ReadOutputs},
        buffer::Data,
        camera::Projection,
        image::Source,
        json::Extras,
        khr_lights_punctual::Kind,
        material::AlphaMode,
        mesh::Mode,
    },
    log::{info, trace, warn},
    serde_json::Value as Json,
    std::{collections::HashMap, ops::Range, path::Path},
};

/// Key times are converted from seconds to milliseconds.
pub const TICKS_PER_SECOND: f64 = 1000.0;

/// Name of the material appended for primitives which do not reference one.
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";

/// Imports `.gltf` and `.glb` files with the `gltf` crate.
///
/// Each primitive becomes its own mesh and the meshes of a glTF mesh keep their primitive order.
/// Key times are in milliseconds. Embedded images stay compressed: their `width` is the encoded
/// length and their `height` is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct GltfImporter;

impl Importer for GltfImporter {
    fn import(&self, path: &Path) -> anyhow::Result<Scene> {
        info!("Importing {}", path.display());

        let (doc, bufs, _) =
            gltf::import(path).with_context(|| format!("Importing {}", path.display()))?;

        let mut scene = Scene::default().with_metadata(asset_metadata(&doc));

        let embedded = read_textures(&doc, &bufs, &mut scene);
        read_materials(&doc, &embedded, &mut scene);
        let mesh_ranges = read_meshes(&doc, &bufs, &mut scene)?;
        read_nodes(&doc, &mesh_ranges, &mut scene);
        read_animations(&doc, &bufs, &mut scene)?;
        read_cameras(&doc, &mut scene);
        read_lights(&doc, &mut scene);

        trace!(
            "{} meshes, {} materials, {} animations, {} nodes",
            scene.meshes.len(),
            scene.materials.len(),
            scene.animations.len(),
            scene.nodes().len()
        );

        Ok(scene)
    }
}

fn asset_metadata(doc: &Document) -> Metadata {
    let asset = &doc.as_json().asset;
    let mut metadata = Metadata::default();

    metadata.push("SourceAsset_Format", MetadataValue::String("glTF2".to_owned()));
    metadata.push(
        "SourceAsset_FormatVersion",
        MetadataValue::String(asset.version.clone()),
    );

    if let Some(generator) = &asset.generator {
        metadata.push("SourceAsset_Generator", MetadataValue::String(generator.clone()));
    }

    if let Some(copyright) = &asset.copyright {
        metadata.push("SourceAsset_Copyright", MetadataValue::String(copyright.clone()));
    }

    metadata
}

/// Converts a node `extras` object into metadata; other JSON shapes are ignored.
fn extras_metadata(extras: &Extras, node: &str) -> Option<Metadata> {
    let raw = extras.as_ref()?;
    let json = match serde_json::from_str::<Json>(raw.get()) {
        Ok(Json::Object(json)) => json,
        Ok(_) => {
            warn!("Ignoring non-object extras of node {node}");
            return None;
        }
        Err(err) => {
            warn!("Unable to parse extras of node {node}: {err}");
            return None;
        }
    };

    let mut metadata = Metadata::default();

    for (key, value) in json {
        let value = match value {
            Json::Bool(val) => MetadataValue::Bool(val),
            Json::Number(val) => {
                if let Some(val) = val.as_i64().and_then(|val| i32::try_from(val).ok()) {
                    MetadataValue::Int32(val)
                } else if let Some(val) = val.as_u64() {
                    MetadataValue::UInt64(val)
                } else {
                    MetadataValue::Double(val.as_f64().unwrap_or_default())
                }
            }
            Json::String(val) => MetadataValue::String(val),
            Json::Array(vals) if vals.len() == 3 && vals.iter().all(Json::is_number) => {
                let component = |idx: usize| vals[idx].as_f64().unwrap_or_default() as f32;

                MetadataValue::Vector3(Vec3::new(component(0), component(1), component(2)))
            }
            _ => {
                trace!("Skipping extras key {key} of node {node}");
                continue;
            }
        };

        metadata.push(key, value);
    }

    Some(metadata)
}

/// Reads the embedded images and returns the texture index of each glTF image which has one.
fn read_textures(doc: &Document, bufs: &[Data], scene: &mut Scene) -> HashMap<usize, usize> {
    let mut embedded = HashMap::new();

    for image in doc.images() {
        let (len, format_hint) = match image.source() {
            Source::View { view, mime_type } => {
                let len = bufs
                    .get(view.buffer().index())
                    .map(|data| view.length().min(data.0.len()))
                    .unwrap_or_default();

                (len, format_hint(mime_type))
            }
            Source::Uri { uri, mime_type } if uri.starts_with("data:") => {
                let (header, payload) = uri.split_once(',').unwrap_or((uri, ""));
                let mime_type = mime_type
                    .or_else(|| header.strip_prefix("data:")?.split(';').next())
                    .unwrap_or_default();

                (decoded_len(payload), format_hint(mime_type))
            }
            Source::Uri { .. } => continue,
        };

        embedded.insert(image.index(), scene.textures.len());
        scene.textures.push(Texture {
            width: len as _,
            height: 0,
            format_hint,
            filename: image.name().unwrap_or_default().to_owned(),
            texels: vec![],
        });
    }

    embedded
}

/// The decoded length of a base64 payload.
fn decoded_len(payload: &str) -> usize {
    payload.trim_end_matches('=').len() * 3 / 4
}

fn format_hint(mime_type: &str) -> String {
    match mime_type {
        "image/jpeg" => "jpg".to_owned(),
        mime_type => mime_type
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_owned(),
    }
}

/// Percent-decodes a relative image URI.
fn decode_uri(uri: &str) -> String {
    let bytes = uri.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut idx = 0;

    while idx < bytes.len() {
        let escape = (bytes[idx] == b'%')
            .then(|| uri.get(idx + 1..idx + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());

        match escape {
            Some(byte) => {
                decoded.push(byte);
                idx += 3;
            }
            None => {
                decoded.push(bytes[idx]);
                idx += 1;
            }
        }
    }

    lossy_utf8(&decoded, "image uri")
}

fn read_materials(doc: &Document, embedded: &HashMap<usize, usize>, scene: &mut Scene) {
    let texture_path = |texture: gltf::Texture| {
        let image = texture.source();

        match (embedded.get(&image.index()), image.source()) {
            (Some(idx), _) => format!("*{idx}"),
            (None, Source::Uri { uri, .. }) => decode_uri(uri),
            (None, Source::View { .. }) => String::new(),
        }
    };

    for material in doc.materials() {
        let pbr = material.pbr_metallic_roughness();
        let mut properties = vec![];

        if let Some(name) = material.name() {
            properties.push(MaterialProperty::new(
                KEY_NAME,
                PropertyValue::String(name.to_owned()),
            ));
        }

        properties.push(MaterialProperty::new(
            "$clr.diffuse",
            PropertyValue::Float(pbr.base_color_factor().to_vec()),
        ));
        properties.push(MaterialProperty::new(
            "$clr.emissive",
            PropertyValue::Float(material.emissive_factor().to_vec()),
        ));
        properties.push(MaterialProperty::new(
            "$mat.gltf.pbrMetallicRoughness.metallicFactor",
            PropertyValue::Float(vec![pbr.metallic_factor()]),
        ));
        properties.push(MaterialProperty::new(
            "$mat.gltf.pbrMetallicRoughness.roughnessFactor",
            PropertyValue::Float(vec![pbr.roughness_factor()]),
        ));
        properties.push(MaterialProperty::new(
            "$mat.twosided",
            PropertyValue::Integer(vec![material.double_sided() as _]),
        ));
        properties.push(MaterialProperty::new(
            "$mat.gltf.alphaMode",
            PropertyValue::String(
                match material.alpha_mode() {
                    AlphaMode::Opaque => "OPAQUE",
                    AlphaMode::Mask => "MASK",
                    AlphaMode::Blend => "BLEND",
                }
                .to_owned(),
            ),
        ));

        if let Some(cutoff) = material.alpha_cutoff() {
            properties.push(MaterialProperty::new(
                "$mat.gltf.alphaCutoff",
                PropertyValue::Float(vec![cutoff]),
            ));
        }

        let textures = [
            (
                TextureType::Diffuse,
                pbr.base_color_texture().map(|info| info.texture()),
            ),
            (
                TextureType::Unknown,
                pbr.metallic_roughness_texture().map(|info| info.texture()),
            ),
            (
                TextureType::Normals,
                material.normal_texture().map(|info| info.texture()),
            ),
            (
                TextureType::Lightmap,
                material.occlusion_texture().map(|info| info.texture()),
            ),
            (
                TextureType::Emissive,
                material.emissive_texture().map(|info| info.texture()),
            ),
        ];

        for (semantic, texture) in textures {
            if let Some(texture) = texture {
                properties.push(MaterialProperty::texture(
                    KEY_TEXTURE_FILE,
                    semantic,
                    0,
                    PropertyValue::String(texture_path(texture)),
                ));
            }
        }

        scene.materials.push(Material { properties });
    }
}

fn default_material() -> Material {
    Material {
        properties: vec![
            MaterialProperty::new(
                KEY_NAME,
                PropertyValue::String(DEFAULT_MATERIAL_NAME.to_owned()),
            ),
            MaterialProperty::new(
                "$clr.diffuse",
                PropertyValue::Float(vec![0.6, 0.6, 0.6, 1.0]),
            ),
        ],
    }
}

/// Reads one mesh per primitive and returns the range of meshes made from each glTF mesh.
fn read_meshes(
    doc: &Document,
    bufs: &[Data],
    scene: &mut Scene,
) -> anyhow::Result<Vec<Range<u32>>> {
    // Bones come from the skin of the first node which instances a mesh
    let mut skins = HashMap::new();
    for node in doc.nodes() {
        if let (Some(mesh), Some(skin)) = (node.mesh(), node.skin()) {
            skins.entry(mesh.index()).or_insert(skin);
        }
    }

    let mut default_material_index = None;
    let mut ranges = vec![];

    for mesh in doc.meshes() {
        let start = scene.meshes.len() as u32;
        let primitive_count = mesh.primitives().count();
        let weights = mesh.weights().unwrap_or_default();

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buf| bufs.get(buf.index()).map(|data| data.0.as_slice()));
            let name = match (mesh.name(), primitive_count) {
                (Some(name), 1) => name.to_owned(),
                (Some(name), _) => format!("{name}-{}", primitive.index()),
                (None, _) => String::new(),
            };

            trace!("Reading mesh {} primitive {}", mesh.index(), primitive.index());

            let vertices = reader
                .read_positions()
                .map(|positions| positions.map(Vec3::from).collect::<Vec<_>>())
                .with_context(|| format!("Mesh {} has no positions", mesh.index()))?;
            let normals = reader
                .read_normals()
                .map(|normals| normals.map(Vec3::from).collect::<Vec<_>>())
                .unwrap_or_default();
            let tangents = reader
                .read_tangents()
                .map(|tangents| tangents.map(Vec4::from).collect::<Vec<_>>())
                .unwrap_or_default();
            let bitangents = if normals.len() == tangents.len() {
                normals
                    .iter()
                    .zip(&tangents)
                    .map(|(normal, tangent)| normal.cross(tangent.truncate()) * tangent.w)
                    .collect()
            } else {
                vec![]
            };

            let colors = (0..MAX_COLOR_SETS as u32)
                .map_while(|set| reader.read_colors(set))
                .map(|colors| colors.into_rgba_f32().map(Vec4::from).collect())
                .collect::<Vec<Vec<_>>>();
            let texture_coords = (0..MAX_TEXTURE_COORDS as u32)
                .map_while(|set| reader.read_tex_coords(set))
                .map(|coords| {
                    coords
                        .into_f32()
                        .map(|[u, v]| Vec3::new(u, 1.0 - v, 0.0))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let uv_components = vec![2; texture_coords.len()];

            let indices = reader
                .read_indices()
                .map(|indices| indices.into_u32().collect())
                .unwrap_or_else(|| (0..vertices.len() as u32).collect::<Vec<_>>());
            let faces = faces(primitive.mode(), &indices);
            let primitive_types = faces
                .iter()
                .fold(PrimitiveType::empty(), |types, face| {
                    types | PrimitiveType::of_face(face)
                });

            let bones = match skins.get(&mesh.index()) {
                Some(skin) => {
                    let joints = reader
                        .read_joints(0)
                        .map(|joints| joints.into_u16().collect::<Vec<_>>())
                        .unwrap_or_default();
                    let joint_weights = reader
                        .read_weights(0)
                        .map(|weights| weights.into_f32().collect::<Vec<_>>())
                        .unwrap_or_default();
                    let inverse_binds = skin
                        .reader(|buf| bufs.get(buf.index()).map(|data| data.0.as_slice()))
                        .read_inverse_bind_matrices()
                        .map(|matrices| matrices.map(|m| Mat4::from_cols_array_2d(&m)).collect())
                        .unwrap_or_else(Vec::new);

                    skin.joints()
                        .enumerate()
                        .map(|(joint_idx, joint)| Bone {
                            name: joint.name().unwrap_or_default().to_owned(),
                            offset: inverse_binds
                                .get(joint_idx)
                                .copied()
                                .unwrap_or(Mat4::IDENTITY),
                            weights: joints
                                .iter()
                                .zip(&joint_weights)
                                .enumerate()
                                .flat_map(|(vertex_id, (vertex_joints, vertex_weights))| {
                                    vertex_joints.iter().zip(vertex_weights).filter_map(
                                        move |(&joint, &weight)| {
                                            (joint as usize == joint_idx && weight > 0.0).then_some(
                                                VertexWeight {
                                                    vertex_id: vertex_id as _,
                                                    weight,
                                                },
                                            )
                                        },
                                    )
                                })
                                .collect(),
                        })
                        .collect()
                }
                None => vec![],
            };

            let anim_meshes = reader
                .read_morph_targets()
                .enumerate()
                .map(|(target_idx, (positions, target_normals, _))| AnimMesh {
                    name: String::new(),
                    vertices: displace(&vertices, positions),
                    normals: displace(&normals, target_normals),
                    weight: weights.get(target_idx).copied().unwrap_or_default(),
                })
                .collect::<Vec<_>>();

            let material_index = match primitive.material().index() {
                Some(idx) => idx as u32,
                None => *default_material_index.get_or_insert(doc.materials().len() as u32),
            };

            scene.meshes.push(Mesh {
                primitive_types,
                aabb: Aabb::from_points(&vertices),
                method: if anim_meshes.is_empty() {
                    MorphingMethod::Unknown
                } else {
                    MorphingMethod::MorphNormalized
                },
                vertices,
                normals,
                tangents: tangents.iter().map(|tangent| tangent.truncate()).collect(),
                bitangents,
                colors,
                texture_coords,
                uv_components,
                faces,
                bones,
                material_index,
                name,
                anim_meshes,
            });
        }

        ranges.push(start..scene.meshes.len() as u32);
    }

    if default_material_index.is_some() {
        trace!("Appending {DEFAULT_MATERIAL_NAME}");

        scene.materials.push(default_material());
    }

    Ok(ranges)
}

/// Applies morph target offsets to the base attribute; absent offsets give no attribute.
fn displace(base: &[Vec3], offsets: Option<impl Iterator<Item = [f32; 3]>>) -> Vec<Vec3> {
    offsets
        .map(|offsets| {
            base.iter()
                .zip(offsets)
                .map(|(base, offset)| *base + Vec3::from(offset))
                .collect()
        })
        .unwrap_or_default()
}

/// Splits an index list into faces; strips and fans become triangle lists.
fn faces(mode: Mode, indices: &[u32]) -> Vec<Face> {
    match mode {
        Mode::Points => indices.iter().map(|&idx| Face::new([idx])).collect(),
        Mode::Lines => indices.chunks_exact(2).map(Face::new).collect(),
        Mode::LineStrip => indices.windows(2).map(Face::new).collect(),
        Mode::LineLoop => {
            let mut faces = indices.windows(2).map(Face::new).collect::<Vec<_>>();
            if let (Some(&first), Some(&last)) = (indices.first(), indices.last()) {
                if indices.len() > 2 {
                    faces.push(Face::new([last, first]));
                }
            }

            faces
        }
        Mode::Triangles => indices.chunks_exact(3).map(Face::new).collect(),
        Mode::TriangleStrip => indices
            .windows(3)
            .enumerate()
            .map(|(idx, tri)| match idx % 2 {
                0 => Face::new([tri[0], tri[1], tri[2]]),
                _ => Face::new([tri[1], tri[0], tri[2]]),
            })
            .collect(),
        Mode::TriangleFan => indices
            .windows(2)
            .skip(1)
            .map(|pair| Face::new([indices[0], pair[0], pair[1]]))
            .collect(),
    }
}

fn read_nodes(doc: &Document, mesh_ranges: &[Range<u32>], scene: &mut Scene) {
    fn push(
        node: gltf::Node,
        parent: Option<NodeId>,
        mesh_ranges: &[Range<u32>],
        scene: &mut Scene,
    ) {
        let name = node.name().unwrap_or_default();
        let meshes = node
            .mesh()
            .and_then(|mesh| mesh_ranges.get(mesh.index()))
            .cloned()
            .unwrap_or_default();
        let mut imported = Node::new(name)
            .with_transform(Mat4::from_cols_array_2d(&node.transform().matrix()))
            .with_meshes(meshes);
        imported.metadata = extras_metadata(node.extras(), name);

        let id = scene.push_node(imported, parent);

        for child in node.children() {
            push(child, Some(id), mesh_ranges, scene);
        }
    }

    let Some(gltf_scene) = doc.default_scene().or_else(|| doc.scenes().next()) else {
        trace!("No scene, so no root node");
        return;
    };

    let roots = gltf_scene.nodes().collect::<Vec<_>>();

    if let [root] = roots.as_slice() {
        push(root.clone(), None, mesh_ranges, scene);
    } else {
        let root = scene.push_node(Node::new("ROOT"), None);

        for node in roots {
            push(node, Some(root), mesh_ranges, scene);
        }
    }
}

fn read_animations(doc: &Document, bufs: &[Data], scene: &mut Scene) -> anyhow::Result<()> {
    for animation in doc.animations() {
        let mut channels: Vec<(usize, NodeAnim)> = vec![];
        let mut morph_mesh_channels = vec![];
        let mut duration = 0.0f64;

        for channel in animation.channels() {
            let target = channel.target().node();
            let reader = channel.reader(|buf| bufs.get(buf.index()).map(|data| data.0.as_slice()));
            let times = reader
                .read_inputs()
                .with_context(|| format!("Animation {} has no inputs", animation.index()))?
                .map(|time| time as f64 * TICKS_PER_SECOND)
                .collect::<Vec<_>>();

            if times.is_empty() {
                warn!("Skipping empty channel of animation {}", animation.index());
                continue;
            }

            duration = times.iter().copied().fold(duration, f64::max);

            let cubic = channel.sampler().interpolation() == Interpolation::CubicSpline;
            let outputs = reader
                .read_outputs()
                .with_context(|| format!("Animation {} has no outputs", animation.index()))?;

            if let ReadOutputs::MorphTargetWeights(weights) = outputs {
                let weights = weights.into_f32().collect::<Vec<_>>();
                let stride = weights.len() / times.len();
                let targets = if cubic { stride / 3 } else { stride };
                let offset = if cubic { targets } else { 0 };

                morph_mesh_channels.push(MeshMorphAnim {
                    name: target.name().unwrap_or_default().to_owned(),
                    keys: times
                        .iter()
                        .enumerate()
                        .map(|(key, &time)| {
                            let start = key * stride + offset;

                            MeshMorphKey {
                                time,
                                values: (0..targets as u32).collect(),
                                weights: weights[start..start + targets]
                                    .iter()
                                    .map(|&weight| weight as f64)
                                    .collect(),
                            }
                        })
                        .collect(),
                });

                continue;
            }

            let idx = match channels
                .iter()
                .position(|(node, _)| *node == target.index())
            {
                Some(idx) => idx,
                None => {
                    channels.push((
                        target.index(),
                        NodeAnim {
                            node_name: target.name().unwrap_or_default().to_owned(),
                            pre_state: AnimBehaviour::Default,
                            post_state: AnimBehaviour::Default,
                            ..Default::default()
                        },
                    ));
                    channels.len() - 1
                }
            };
            let node_anim = &mut channels[idx].1;

            match (channel.target().property(), outputs) {
                (Property::Translation, ReadOutputs::Translations(translations)) => {
                    let values = key_values(translations.collect(), cubic);
                    node_anim.position_keys = vector_keys(&times, values);
                }
                (Property::Scale, ReadOutputs::Scales(scales)) => {
                    let values = key_values(scales.collect(), cubic);
                    node_anim.scaling_keys = vector_keys(&times, values);
                }
                (Property::Rotation, ReadOutputs::Rotations(rotations)) => {
                    node_anim.rotation_keys = times
                        .iter()
                        .zip(key_values(rotations.into_f32().collect(), cubic))
                        .map(|(&time, value)| QuatKey {
                            time,
                            value: Quat::from_array(value),
                        })
                        .collect();
                }
                (property, _) => {
                    warn!("Mismatched outputs for {property:?} channel");
                }
            }
        }

        scene.animations.push(Animation {
            name: animation.name().unwrap_or_default().to_owned(),
            duration,
            ticks_per_second: TICKS_PER_SECOND,
            channels: channels.into_iter().map(|(_, channel)| channel).collect(),
            mesh_channels: vec![],
            morph_mesh_channels,
        });
    }

    Ok(())
}

/// Drops the tangents of cubic spline outputs, which hold an in-tangent, a value and an
/// out-tangent per key.
fn key_values<T: Copy>(outputs: Vec<T>, cubic: bool) -> Vec<T> {
    if cubic {
        outputs.chunks_exact(3).map(|chunk| chunk[1]).collect()
    } else {
        outputs
    }
}

fn vector_keys(times: &[f64], values: Vec<[f32; 3]>) -> Vec<VectorKey> {
    times
        .iter()
        .zip(values)
        .map(|(&time, value)| VectorKey {
            time,
            value: Vec3::from(value),
        })
        .collect()
}

/// The name of the first node which references an object, falling back to the object's own name.
fn instance_name<'a>(
    doc: &'a Document,
    object: Option<&'a str>,
    references: impl Fn(&gltf::Node) -> bool,
) -> String {
    doc.nodes()
        .find(|node| references(node))
        .and_then(|node| node.name())
        .or(object)
        .unwrap_or_default()
        .to_owned()
}

fn read_cameras(doc: &Document, scene: &mut Scene) {
    for camera in doc.cameras() {
        let name = instance_name(doc, camera.name(), |node| {
            node.camera()
                .is_some_and(|node_camera| node_camera.index() == camera.index())
        });
        let mut imported = Camera {
            name,
            up: Vec3::Y,
            look_at: Vec3::NEG_Z,
            ..Default::default()
        };

        match camera.projection() {
            Projection::Perspective(perspective) => {
                let aspect = perspective.aspect_ratio().unwrap_or_default();

                imported.aspect = aspect;
                imported.horizontal_fov =
                    perspective.yfov() * if aspect == 0.0 { 1.0 } else { aspect };
                imported.clip_plane_near = perspective.znear();
                imported.clip_plane_far = perspective.zfar().unwrap_or(f32::MAX);
            }
            Projection::Orthographic(orthographic) => {
                imported.aspect = orthographic.xmag() / orthographic.ymag();
                imported.clip_plane_near = orthographic.znear();
                imported.clip_plane_far = orthographic.zfar();
                imported.orthographic_width = orthographic.xmag();
            }
        }

        scene.cameras.push(imported);
    }
}

fn read_lights(doc: &Document, scene: &mut Scene) {
    let Some(lights) = doc.lights() else {
        return;
    };

    for light in lights {
        let name = instance_name(doc, light.name(), |node| {
            node.light()
                .is_some_and(|node_light| node_light.index() == light.index())
        });
        let color = Vec3::from(light.color()) * light.intensity();
        let mut imported = Light {
            name,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            color_diffuse: color,
            color_specular: color,
            size: Vec2::ZERO,
            ..Default::default()
        };

        match light.kind() {
            Kind::Directional => {
                imported.ty = LightSourceType::Directional;
                imported.attenuation_constant = 1.0;
            }
            Kind::Point => {
                imported.ty = LightSourceType::Point;
                imported.attenuation_quadratic = 1.0;
            }
            Kind::Spot {
                inner_cone_angle,
                outer_cone_angle,
            } => {
                imported.ty = LightSourceType::Spot;
                imported.attenuation_quadratic = 1.0;
                imported.angle_inner_cone = inner_cone_angle;
                imported.angle_outer_cone = outer_cone_angle;
            }
        }

        scene.lights.push(imported);
    }
}
