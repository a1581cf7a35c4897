use {
    crate::walk::RecordKind,
    anyhow::Context,
    log::{info, trace},
    serde::Deserialize,
    std::{
        fs::read_to_string,
        path::{Path, PathBuf},
    },
};

/// Name of the optional configuration file looked up in the work directory.
pub const CONFIG_FILE_NAME: &str = "testgen.toml";

/// Sample files loaded when the configuration does not list any, relative to the model directory.
pub const DEFAULT_SAMPLES: [&str; 6] = [
    "glTF2/Box/glTF/Box.gltf",
    "glTF2/BoxAnimated/glTF/BoxAnimated.gltf",
    "glTF2/AnimatedMorphCube/glTF/AnimatedMorphCube.gltf",
    "glTF2/BoxTextured/glTF-Embedded/BoxTextured.gltf",
    "glTF2/Cameras/glTF/Cameras.gltf",
    "glTF2/LightsPunctualLamp/glTF/LightsPunctualLamp.gltf",
];

/// Settings shared by every step of a generation run.
///
/// Relative paths are resolved against the work directory by [`Config::resolve`]; nothing reads the
/// process current directory.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model_dir: PathBuf,
    pub out_dir: PathBuf,

    /// Dart package under test.
    pub package: String,

    pub texel_indexing: TexelIndexing,

    /// Record kinds to generate; empty means all of them.
    pub kinds: Vec<RecordKind>,

    #[serde(rename = "sample")]
    pub samples: Vec<Sample>,
}

impl Config {
    /// Reads the configuration for `work_dir`.
    ///
    /// An explicit `path` must exist; otherwise `testgen.toml` in the work directory is used when
    /// present and the defaults when it is not.
    pub fn load(work_dir: &Path, path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => Some(work_dir.join(path)),
            None => Some(work_dir.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
        };

        let config = match path {
            Some(path) => {
                info!("Reading {}", path.display());

                Self::read(&path)?
            }
            None => {
                trace!("No {CONFIG_FILE_NAME}, using defaults");

                Self::default()
            }
        };

        Ok(config.resolve(work_dir))
    }

    /// Parses a configuration file as-is, without resolving its paths.
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let str = read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;

        toml::from_str(&str).with_context(|| format!("Parsing config toml {}", path.display()))
    }

    /// Makes every relative path absolute against `work_dir` and fills in defaulted lists.
    pub fn resolve(mut self, work_dir: &Path) -> Self {
        self.model_dir = work_dir.join(&self.model_dir);
        self.out_dir = work_dir.join(&self.out_dir);

        if self.kinds.is_empty() {
            self.kinds = RecordKind::ALL.to_vec();
        }

        if self.samples.is_empty() {
            self.samples = DEFAULT_SAMPLES.iter().copied().map(Sample::from).collect();
        }

        self
    }

    /// The full path of a sample file.
    pub fn sample_path(&self, sample: &Sample) -> PathBuf {
        self.model_dir.join(&sample.path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models/model-db"),
            out_dir: PathBuf::from("."),
            package: "assimp".to_owned(),
            texel_indexing: TexelIndexing::default(),
            kinds: vec![],
            samples: vec![],
        }
    }
}

/// One sample model file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    /// Path relative to the model directory; also used as the test group name.
    pub path: String,
}

impl From<&str> for Sample {
    fn from(path: &str) -> Self {
        Self {
            path: path.to_owned(),
        }
    }
}

/// Which texel each per-texel assertion reads.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum TexelIndexing {
    /// Reads `row * width + width` for every column, like the existing fixtures do.
    #[default]
    Legacy,

    /// Reads `row * width + col`.
    RowMajor,
}

impl TexelIndexing {
    pub fn index(self, row: usize, col: usize, width: usize) -> usize {
        match self {
            Self::Legacy => row * width + width,
            Self::RowMajor => row * width + col,
        }
    }
}
