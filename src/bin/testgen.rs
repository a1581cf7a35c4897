use {
    anyhow::Context,
    clap::Parser,
    log::info,
    std::path::PathBuf,
    testgen::{Config, GltfImporter, RecordKind, Sink, generate},
};

/// Generates the golden-value Dart tests of the assimp binding.
#[derive(Debug, Parser)]
#[command(name = "testgen", version)]
struct Args {
    /// Directory which relative paths are resolved against.
    #[arg(long, env = "TESTGEN_WORK_DIR", default_value = env!("CARGO_MANIFEST_DIR"))]
    work_dir: PathBuf,

    /// Configuration file; defaults to `testgen.toml` in the work directory when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the sample models.
    #[arg(long, env = "TESTGEN_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Directory the test files are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the generated files instead of writing them.
    #[arg(long)]
    stdout: bool,

    /// Record kinds to generate; all configured kinds when omitted.
    #[arg(value_enum)]
    kinds: Vec<RecordKind>,
}

fn main() {
    pretty_env_logger::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let work_dir = dunce::canonicalize(&args.work_dir)
        .with_context(|| format!("Unable to find work directory {}", args.work_dir.display()))?;
    let mut config = Config::load(&work_dir, args.config.as_deref())?;

    if let Some(model_dir) = args.model_dir {
        config.model_dir = work_dir.join(model_dir);
    }

    if let Some(out_dir) = args.out_dir {
        config.out_dir = work_dir.join(out_dir);
    }

    if !args.kinds.is_empty() {
        config.kinds = args.kinds;
    }

    let sink = if args.stdout {
        Sink::Stdout
    } else {
        Sink::Files(config.out_dir.clone())
    };

    info!(
        "Generating {} kinds from {} samples in {}",
        config.kinds.len(),
        config.samples.len(),
        config.model_dir.display()
    );

    generate(&config, &GltfImporter, &sink)
}
