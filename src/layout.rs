//! `#[repr(C)]` mirrors of the native records the Dart binding declares, used to pin their sizes
//! and field offsets.
//!
//! Field names follow the C headers so that the report reads like the binding's struct
//! declarations.

#![allow(non_camel_case_types, non_snake_case)]

use {
    crate::walk::RecordKind,
    std::{
        ffi::{c_char, c_double, c_float, c_int, c_long, c_short, c_uint, c_void},
        fmt::Write,
        mem::{offset_of, size_of},
    },
};

pub const MAXLEN: usize = 1024;
pub const AI_MAX_NUMBER_OF_COLOR_SETS: usize = 8;
pub const AI_MAX_NUMBER_OF_TEXTURECOORDS: usize = 8;
pub const HINTMAXTEXTURELEN: usize = 9;

/// Position, offset and size of one field of a native record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// Declares `#[repr(C)]` records and a `layout()` listing each field in declaration order.
macro_rules! native {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(pub $field:ident: $ty:ty,)*
        }
    )*) => {$(
        $(#[$meta])*
        #[repr(C)]
        #[derive(Clone, Copy, Debug)]
        pub struct $name {
            $(pub $field: $ty,)*
        }

        impl $name {
            pub fn layout() -> Vec<FieldLayout> {
                vec![$(
                    FieldLayout {
                        name: stringify!($field),
                        offset: offset_of!($name, $field),
                        size: size_of::<$ty>(),
                    },
                )*]
            }
        }
    )*};
}

type aiFileReadProc =
    Option<unsafe extern "C" fn(*mut aiFile, *mut c_char, usize, usize) -> usize>;
type aiFileWriteProc =
    Option<unsafe extern "C" fn(*mut aiFile, *const c_char, usize, usize) -> usize>;
type aiFileTellProc = Option<unsafe extern "C" fn(*mut aiFile) -> usize>;
type aiFileSeek = Option<unsafe extern "C" fn(*mut aiFile, usize, c_int) -> c_int>;
type aiFileFlushProc = Option<unsafe extern "C" fn(*mut aiFile)>;
type aiFileOpenProc =
    Option<unsafe extern "C" fn(*mut aiFileIO, *const c_char, *const c_char) -> *mut aiFile>;
type aiFileCloseProc = Option<unsafe extern "C" fn(*mut aiFileIO, *mut aiFile)>;
type aiLogStreamCallback = Option<unsafe extern "C" fn(*const c_char, *mut c_char)>;

native! {
    pub struct aiVector2D {
        pub x: c_float,
        pub y: c_float,
    }

    pub struct aiVector3D {
        pub x: c_float,
        pub y: c_float,
        pub z: c_float,
    }

    pub struct aiColor3D {
        pub r: c_float,
        pub g: c_float,
        pub b: c_float,
    }

    pub struct aiColor4D {
        pub r: c_float,
        pub g: c_float,
        pub b: c_float,
        pub a: c_float,
    }

    pub struct aiQuaternion {
        pub w: c_float,
        pub x: c_float,
        pub y: c_float,
        pub z: c_float,
    }

    pub struct aiMatrix3x3 {
        pub m: [c_float; 9],
    }

    /// Row-major, unlike the column-major `Matrix4` of the generated tests.
    pub struct aiMatrix4x4 {
        pub m: [c_float; 16],
    }

    pub struct aiPlane {
        pub a: c_float,
        pub b: c_float,
        pub c: c_float,
        pub d: c_float,
    }

    pub struct aiRay {
        pub pos: aiVector3D,
        pub dir: aiVector3D,
    }

    pub struct aiAABB {
        pub mMin: aiVector3D,
        pub mMax: aiVector3D,
    }

    /// Length-prefixed, UTF-8, always zero-terminated.
    pub struct aiString {
        pub length: u32,
        pub data: [c_char; MAXLEN],
    }

    pub struct aiTexel {
        pub b: u8,
        pub g: u8,
        pub r: u8,
        pub a: u8,
    }

    pub struct aiUVTransform {
        pub mTranslation: aiVector2D,
        pub mScaling: aiVector2D,
        pub mRotation: c_float,
    }

    pub struct aiFace {
        pub mNumIndices: c_uint,
        pub mIndices: *mut c_uint,
    }

    pub struct aiVertexWeight {
        pub mVertexId: c_uint,
        pub mWeight: c_float,
    }

    pub struct aiBone {
        pub mName: aiString,
        pub mNumWeights: c_uint,
        pub mWeights: *mut aiVertexWeight,
        pub mOffsetMatrix: aiMatrix4x4,
    }

    pub struct aiAnimMesh {
        pub mName: aiString,
        pub mVertices: *mut aiVector3D,
        pub mNormals: *mut aiVector3D,
        pub mTangents: *mut aiVector3D,
        pub mBitangents: *mut aiVector3D,
        pub mColors: [*mut aiColor4D; AI_MAX_NUMBER_OF_COLOR_SETS],
        pub mTextureCoords: [*mut aiVector3D; AI_MAX_NUMBER_OF_TEXTURECOORDS],
        pub mNumVertices: c_uint,
        pub mWeight: c_float,
    }

    pub struct aiMesh {
        pub mPrimitiveTypes: c_uint,
        pub mNumVertices: c_uint,
        pub mNumFaces: c_uint,
        pub mVertices: *mut aiVector3D,
        pub mNormals: *mut aiVector3D,
        pub mTangents: *mut aiVector3D,
        pub mBitangents: *mut aiVector3D,
        pub mColors: [*mut aiColor4D; AI_MAX_NUMBER_OF_COLOR_SETS],
        pub mTextureCoords: [*mut aiVector3D; AI_MAX_NUMBER_OF_TEXTURECOORDS],
        pub mNumUVComponents: [c_uint; AI_MAX_NUMBER_OF_TEXTURECOORDS],
        pub mFaces: *mut aiFace,
        pub mNumBones: c_uint,
        pub mBones: *mut *mut aiBone,
        pub mMaterialIndex: c_uint,
        pub mName: aiString,
        pub mNumAnimMeshes: c_uint,
        pub mAnimMeshes: *mut *mut aiAnimMesh,
        pub mMethod: c_uint,
        pub mAABB: aiAABB,
    }

    pub struct aiMaterialProperty {
        pub mKey: aiString,
        pub mSemantic: c_uint,
        pub mIndex: c_uint,
        pub mDataLength: c_uint,
        pub mType: c_uint,
        pub mData: *mut c_char,
    }

    pub struct aiMaterial {
        pub mProperties: *mut *mut aiMaterialProperty,
        pub mNumProperties: c_uint,
        pub mNumAllocated: c_uint,
    }

    pub struct aiMetadataEntry {
        pub mType: c_uint,
        pub mData: *mut c_void,
    }

    pub struct aiMetadata {
        pub mNumProperties: c_uint,
        pub mKeys: *mut aiString,
        pub mValues: *mut aiMetadataEntry,
    }

    pub struct aiNode {
        pub mName: aiString,
        pub mTransformation: aiMatrix4x4,
        pub mParent: *mut aiNode,
        pub mNumChildren: c_uint,
        pub mChildren: *mut *mut aiNode,
        pub mNumMeshes: c_uint,
        pub mMeshes: *mut c_uint,
        pub mMetaData: *mut aiMetadata,
    }

    pub struct aiVectorKey {
        pub mTime: c_double,
        pub mValue: aiVector3D,
    }

    pub struct aiQuatKey {
        pub mTime: c_double,
        pub mValue: aiQuaternion,
    }

    pub struct aiMeshKey {
        pub mTime: c_double,
        pub mValue: c_uint,
    }

    pub struct aiMeshMorphKey {
        pub mTime: c_double,
        pub mValues: *mut c_uint,
        pub mWeights: *mut c_double,
        pub mNumValuesAndWeights: c_uint,
    }

    pub struct aiNodeAnim {
        pub mNodeName: aiString,
        pub mNumPositionKeys: c_uint,
        pub mPositionKeys: *mut aiVectorKey,
        pub mNumRotationKeys: c_uint,
        pub mRotationKeys: *mut aiQuatKey,
        pub mNumScalingKeys: c_uint,
        pub mScalingKeys: *mut aiVectorKey,
        pub mPreState: c_uint,
        pub mPostState: c_uint,
    }

    pub struct aiMeshAnim {
        pub mName: aiString,
        pub mNumKeys: c_uint,
        pub mKeys: *mut aiMeshKey,
    }

    pub struct aiMeshMorphAnim {
        pub mName: aiString,
        pub mNumKeys: c_uint,
        pub mKeys: *mut aiMeshMorphKey,
    }

    pub struct aiAnimation {
        pub mName: aiString,
        pub mDuration: c_double,
        pub mTicksPerSecond: c_double,
        pub mNumChannels: c_uint,
        pub mChannels: *mut *mut aiNodeAnim,
        pub mNumMeshChannels: c_uint,
        pub mMeshChannels: *mut *mut aiMeshAnim,
        pub mNumMorphMeshChannels: c_uint,
        pub mMorphMeshChannels: *mut *mut aiMeshMorphAnim,
    }

    pub struct aiTexture {
        pub mWidth: c_uint,
        pub mHeight: c_uint,
        pub achFormatHint: [c_char; HINTMAXTEXTURELEN],
        pub pcData: *mut aiTexel,
        pub mFilename: aiString,
    }

    pub struct aiLight {
        pub mName: aiString,
        pub mType: c_uint,
        pub mPosition: aiVector3D,
        pub mDirection: aiVector3D,
        pub mUp: aiVector3D,
        pub mAttenuationConstant: c_float,
        pub mAttenuationLinear: c_float,
        pub mAttenuationQuadratic: c_float,
        pub mColorDiffuse: aiColor3D,
        pub mColorSpecular: aiColor3D,
        pub mColorAmbient: aiColor3D,
        pub mAngleInnerCone: c_float,
        pub mAngleOuterCone: c_float,
        pub mSize: aiVector2D,
    }

    pub struct aiCamera {
        pub mName: aiString,
        pub mPosition: aiVector3D,
        pub mUp: aiVector3D,
        pub mLookAt: aiVector3D,
        pub mHorizontalFOV: c_float,
        pub mClipPlaneNear: c_float,
        pub mClipPlaneFar: c_float,
        pub mAspect: c_float,
        pub mOrthographicWidth: c_float,
    }

    pub struct aiScene {
        pub mFlags: c_uint,
        pub mRootNode: *mut aiNode,
        pub mNumMeshes: c_uint,
        pub mMeshes: *mut *mut aiMesh,
        pub mNumMaterials: c_uint,
        pub mMaterials: *mut *mut aiMaterial,
        pub mNumAnimations: c_uint,
        pub mAnimations: *mut *mut aiAnimation,
        pub mNumTextures: c_uint,
        pub mTextures: *mut *mut aiTexture,
        pub mNumLights: c_uint,
        pub mLights: *mut *mut aiLight,
        pub mNumCameras: c_uint,
        pub mCameras: *mut *mut aiCamera,
        pub mMetaData: *mut aiMetadata,
        pub mPrivate: *mut c_char,
    }

    pub struct aiFile {
        pub ReadProc: aiFileReadProc,
        pub WriteProc: aiFileWriteProc,
        pub TellProc: aiFileTellProc,
        pub FileSizeProc: aiFileTellProc,
        pub SeekProc: aiFileSeek,
        pub FlushProc: aiFileFlushProc,
        pub UserData: *mut c_char,
    }

    pub struct aiFileIO {
        pub OpenProc: aiFileOpenProc,
        pub CloseProc: aiFileCloseProc,
        pub UserData: *mut c_char,
    }

    pub struct aiLogStream {
        pub callback: aiLogStreamCallback,
        pub user: *mut c_char,
    }

    pub struct aiPropertyStore {
        pub sentinel: c_char,
    }

    pub struct aiMemoryInfo {
        pub textures: c_uint,
        pub materials: c_uint,
        pub meshes: c_uint,
        pub nodes: c_uint,
        pub animations: c_uint,
        pub cameras: c_uint,
        pub lights: c_uint,
        pub total: c_uint,
    }

    pub struct aiExportFormatDesc {
        pub id: *const c_char,
        pub description: *const c_char,
        pub fileExtension: *const c_char,
    }

    pub struct aiExportDataBlob {
        pub size: usize,
        pub data: *mut c_void,
        pub name: aiString,
        pub next: *mut aiExportDataBlob,
    }

    pub struct aiImporterDesc {
        pub mName: *const c_char,
        pub mAuthor: *const c_char,
        pub mMaintainer: *const c_char,
        pub mComments: *const c_char,
        pub mFlags: c_uint,
        pub mMinMajor: c_uint,
        pub mMinMinor: c_uint,
        pub mMaxMajor: c_uint,
        pub mMaxMinor: c_uint,
        pub mFileExtensions: *const c_char,
    }
}

macro_rules! sizes {
    ($($ty:ty),* $(,)?) => {
        vec![$((stringify!($ty), size_of::<$ty>()),)*]
    };
}

/// Host sizes of the C primitive types.
pub fn primitive_sizes() -> Vec<(&'static str, usize)> {
    vec![
        ("int", size_of::<c_int>()),
        ("long", size_of::<c_long>()),
        ("short", size_of::<c_short>()),
        ("char", size_of::<c_char>()),
        ("float", size_of::<c_float>()),
        ("double", size_of::<c_double>()),
        ("void*", size_of::<*mut c_void>()),
    ]
}

/// Sizes of every mirrored record, by name.
pub fn record_sizes() -> Vec<(&'static str, usize)> {
    sizes![
        aiAABB,
        aiAnimation,
        aiAnimMesh,
        aiBone,
        aiCamera,
        aiColor3D,
        aiColor4D,
        aiExportDataBlob,
        aiExportFormatDesc,
        aiFace,
        aiFile,
        aiFileIO,
        aiImporterDesc,
        aiLight,
        aiLogStream,
        aiMaterial,
        aiMaterialProperty,
        aiMatrix3x3,
        aiMatrix4x4,
        aiMemoryInfo,
        aiMesh,
        aiMeshAnim,
        aiMeshKey,
        aiMeshMorphAnim,
        aiMeshMorphKey,
        aiMetadata,
        aiMetadataEntry,
        aiNode,
        aiNodeAnim,
        aiPlane,
        aiPropertyStore,
        aiQuaternion,
        aiQuatKey,
        aiRay,
        aiScene,
        aiString,
        aiTexel,
        aiTexture,
        aiUVTransform,
        aiVector2D,
        aiVector3D,
        aiVectorKey,
        aiVertexWeight,
    ]
}

/// The byte size of the native record behind `kind`.
pub fn native_size(kind: RecordKind) -> usize {
    match kind {
        RecordKind::Scene => size_of::<aiScene>(),
        RecordKind::Mesh => size_of::<aiMesh>(),
        RecordKind::Face => size_of::<aiFace>(),
        RecordKind::Bone => size_of::<aiBone>(),
        RecordKind::Animation => size_of::<aiAnimation>(),
        RecordKind::Material => size_of::<aiMaterial>(),
        RecordKind::Node => size_of::<aiNode>(),
        RecordKind::MetaData => size_of::<aiMetadata>(),
        RecordKind::Camera => size_of::<aiCamera>(),
        RecordKind::Light => size_of::<aiLight>(),
        RecordKind::Texture => size_of::<aiTexture>(),
    }
}

/// Writes the field table of a record, with padding holes as comments.
fn write_fields(out: &mut String, name: &str, size: usize, fields: &[FieldLayout]) {
    let mut end = 0;

    writeln!(out, "{name}:").unwrap_or_default();

    for field in fields {
        if field.offset > end {
            writeln!(out, "\t// @{end}: {} (padding)", field.offset - end).unwrap_or_default();
        }

        writeln!(
            out,
            "\tsizeof({}) = {} // @{}",
            field.name, field.size, field.offset
        )
        .unwrap_or_default();

        end = field.offset + field.size;
    }

    if size > end {
        writeln!(out, "\t// @{end}: {} (padding) => {size}", size - end).unwrap_or_default();
    }
}

/// The full report printed by the `sizeof` tool.
pub fn report() -> String {
    let mut out = String::new();

    writeln!(out, "primitive:").unwrap_or_default();
    for (name, size) in primitive_sizes() {
        writeln!(out, "\tsizeof({name}) = {size}").unwrap_or_default();
    }

    writeln!(out, "\nassimp:").unwrap_or_default();
    for (name, size) in record_sizes() {
        writeln!(out, "\tsizeof({name}) = {size}").unwrap_or_default();
    }

    out.push('\n');
    write_fields(&mut out, "aiMesh", size_of::<aiMesh>(), &aiMesh::layout());
    out.push('\n');

    out
}

#[cfg(all(test, target_pointer_width = "64"))]
mod tests {
    use super::*;

    #[test]
    fn mesh_layout() {
        let layout = aiMesh::layout();
        let offset = |name| {
            layout
                .iter()
                .find(|field| field.name == name)
                .unwrap()
                .offset
        };

        assert_eq!(size_of::<aiMesh>(), 1312);
        assert_eq!(offset("mVertices"), 16);
        assert_eq!(offset("mColors"), 48);
        assert_eq!(offset("mTextureCoords"), 112);
        assert_eq!(offset("mNumUVComponents"), 176);
        assert_eq!(offset("mBones"), 224);
        assert_eq!(offset("mName"), 236);
        assert_eq!(offset("mAnimMeshes"), 1272);
        assert_eq!(offset("mAABB"), 1284);
    }

    #[test]
    fn record_sizes() {
        let sizes = super::record_sizes();
        let size = |name| sizes.iter().find(|(ty, _)| *ty == name).unwrap().1;

        assert_eq!(size("aiString"), 1028);
        assert_eq!(size("aiScene"), 128);
        assert_eq!(size("aiNode"), 1144);
        assert_eq!(size("aiBone"), 1104);
        assert_eq!(size("aiTexture"), 1064);
        assert_eq!(size("aiVectorKey"), 24);
        assert_eq!(size("aiMeshMorphKey"), 32);
        assert_eq!(sizes.len(), 43);
        assert!(sizes.windows(2).all(|pair| pair[0].0.to_lowercase() < pair[1].0.to_lowercase()));
    }

    #[test]
    fn report_sections() {
        let report = report();

        assert!(report.starts_with("primitive:\n\tsizeof(int) = 4\n"));
        assert!(report.contains("\nassimp:\n\tsizeof(aiAABB) = 24\n"));
        assert!(report.contains("\naiMesh:\n\tsizeof(mPrimitiveTypes) = 4 // @0\n"));
        assert!(report.contains("\t// @12: 4 (padding)\n\tsizeof(mVertices) = 8 // @16\n"));
        assert!(report.contains("\t// @1308: 4 (padding) => 1312\n"));
    }

    #[test]
    fn native_sizes() {
        assert_eq!(native_size(RecordKind::Mesh), 1312);
        assert_eq!(native_size(RecordKind::Face), 16);
        assert_eq!(native_size(RecordKind::MetaData), 24);
    }
}
