//! Wraps walked groups in the Dart test file boilerplate and writes them out.

use {
    crate::{config::Config, emit::EmissionUnit, import::Importer, walk::RecordKind},
    anyhow::Context,
    log::{info, trace},
    std::{
        fmt::Write as _,
        fs::{create_dir_all, write},
        io::{Write as _, stdout},
        path::PathBuf,
    },
};

/// Banner placed below the imports of every generated file.
pub const BANNER: &str = "// DO NOT EDIT (generated by tool/testgen)";

/// Where generated files go.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Sink {
    /// One file per record kind, overwritten, in this directory.
    Files(PathBuf),

    /// Every file concatenated on standard output, each preceded by a `// <file name>` line.
    Stdout,
}

/// One generated Dart test file.
#[derive(Clone, Debug)]
pub struct TestFile {
    package: String,
    groups: Vec<EmissionUnit>,
}

impl TestFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            groups: vec![],
        }
    }

    pub fn groups(&self) -> &[EmissionUnit] {
        &self.groups
    }

    pub fn push(&mut self, group: EmissionUnit) {
        self.groups.push(group);
    }

    pub fn render(&self) -> String {
        let package = &self.package;
        let mut out = String::new();

        for import in [
            "dart:ffi",
            "package:ffi/ffi.dart",
            "package:test/test.dart",
            &format!("package:{package}/{package}.dart"),
            "../lib/src/bindings.dart",
            "test_utils.dart",
        ] {
            writeln!(out, "import '{import}';").unwrap_or_default();
        }

        writeln!(out, "\n{BANNER}\n").unwrap_or_default();
        out.push_str("void main() {\n");

        for group in &self.groups {
            group.render(&mut out, 1);
            out.push('\n');
        }

        out.push_str("}\n");
        out
    }
}

/// Builds the test file of one record kind.
///
/// Groups are ordered: the null baseline, the record size, the smoke tests when any sample has a
/// record of this kind, then one group per sample in roster order. Every sample is imported anew.
pub fn assemble(
    config: &Config,
    importer: &dyn Importer,
    kind: RecordKind,
) -> anyhow::Result<TestFile> {
    let mut file = TestFile::new(&config.package);
    let mut smoke = None;
    let mut samples = vec![];

    file.push(kind.baseline());
    file.push(kind.size());

    for sample in &config.samples {
        let path = config.sample_path(sample);

        trace!("Walking {kind:?} of {}", path.display());

        let scene = importer
            .import(&path)
            .with_context(|| format!("Loading sample {}", sample.path))?;

        if smoke.is_none() {
            smoke = kind.smoke(&sample.path, &scene);
        }

        samples.push(
            kind.walk(&sample.path, &scene, config.texel_indexing)
                .with_context(|| format!("Walking {kind:?} of sample {}", sample.path))?,
        );
    }

    for group in smoke.into_iter().flatten().chain(samples) {
        file.push(group);
    }

    Ok(file)
}

/// Generates every configured record kind into `sink`.
pub fn generate(config: &Config, importer: &dyn Importer, sink: &Sink) -> anyhow::Result<()> {
    if let Sink::Files(dir) = sink {
        create_dir_all(dir)
            .with_context(|| format!("Unable to create directory {}", dir.display()))?;
    }

    for &kind in &config.kinds {
        let text = assemble(config, importer, kind)?.render();

        match sink {
            Sink::Files(dir) => {
                let path = dir.join(kind.file_name());

                info!("Writing {}", path.display());

                write(&path, text)
                    .with_context(|| format!("Unable to write test file {}", path.display()))?;
            }
            Sink::Stdout => {
                let mut stdout = stdout().lock();

                writeln!(stdout, "// {}", kind.file_name())
                    .and_then(|_| stdout.write_all(text.as_bytes()))
                    .context("Unable to write to stdout")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, crate::scene::Scene, std::path::Path};

    struct EmptyImporter;

    impl Importer for EmptyImporter {
        fn import(&self, _: &Path) -> anyhow::Result<Scene> {
            Ok(Scene::default())
        }
    }

    struct FailingImporter;

    impl Importer for FailingImporter {
        fn import(&self, path: &Path) -> anyhow::Result<Scene> {
            anyhow::bail!("No such file {}", path.display())
        }
    }

    #[test]
    fn file_layout() {
        let config = Config {
            samples: vec!["a.gltf".into()],
            ..Default::default()
        }
        .resolve(Path::new("/work"));
        let text = assemble(&config, &EmptyImporter, RecordKind::Light)
            .unwrap()
            .render();

        assert!(text.starts_with(
            "import 'dart:ffi';\nimport 'package:ffi/ffi.dart';\nimport \
             'package:test/test.dart';\nimport 'package:assimp/assimp.dart';\nimport \
             '../lib/src/bindings.dart';\nimport 'test_utils.dart';\n\n// DO NOT EDIT (generated \
             by tool/testgen)\n\nvoid main() {\n  test('null', () {\n"
        ));
        assert!(text.contains("  test('size', () {\n    expect(sizeOf<aiLight>(), equals("));
        assert!(text.contains(
            "  test('a.gltf', () {\n    testLights('a.gltf', tester: (lights) {\n      \
             expect(lights.length, isZero);\n    });\n  });\n\n}\n"
        ));
        assert!(!text.contains("'equals'"));
    }

    #[test]
    fn group_order() {
        let config = Config {
            samples: vec!["a.gltf".into(), "b.gltf".into()],
            ..Default::default()
        }
        .resolve(Path::new("/work"));
        let file = assemble(&config, &EmptyImporter, RecordKind::Scene).unwrap();
        let calls = file
            .groups()
            .iter()
            .map(EmissionUnit::call)
            .collect::<Vec<_>>();

        assert_eq!(
            calls,
            [
                "test('null', () {",
                "test('size', () {",
                "test('a.gltf', () {",
                "test('b.gltf', () {",
            ]
        );
    }

    #[test]
    fn load_failure_names_the_sample() {
        let config = Config {
            samples: vec!["missing.gltf".into()],
            ..Default::default()
        }
        .resolve(Path::new("/work"));
        let err = assemble(&config, &FailingImporter, RecordKind::Mesh).unwrap_err();

        assert_eq!(err.to_string(), "Loading sample missing.gltf");
        assert!(format!("{err:#}").contains("No such file"));
    }
}
