use clap::Parser;
use octofhir_fhir_types::{
    BaseType, BaseTypeRegistry, ClassifierConfig, DescriptorClassifier, DescriptorPool,
    DescriptorSet,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "fhir-classify",
    version,
    about = "Classify FHIR schema descriptors against the canonical base types"
)]
struct Args {
    /// JSON descriptor set: {"descriptors": [...]}
    descriptors: PathBuf,

    /// Only report the relationship to this base type (name or structure definition URL)
    #[arg(short, long)]
    target: Option<BaseType>,

    /// Classifier configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!(error = %err, "classification aborted");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

// Ok(false) when at least one descriptor failed to classify
fn run(args: Args) -> octofhir_fhir_types::Result<bool> {
    let config = match &args.config {
        Some(path) => ClassifierConfig::from_file(path)?,
        None => ClassifierConfig::default(),
    };

    let pool = Arc::new(DescriptorPool::from_set(DescriptorSet::from_file(
        &args.descriptors,
    )?));
    BaseTypeRegistry::install_default()?;
    let classifier = DescriptorClassifier::global()?
        .with_config(config)
        .with_resolver(pool.clone());

    let mut all_ok = true;
    for descriptor in pool.descriptors() {
        let outcome = match args.target {
            Some(target) => classifier
                .classify(&descriptor, target)
                .map(|result| result.to_string()),
            None => classifier
                .resolve(&descriptor)
                .map(|resolution| resolution.to_string()),
        };

        match outcome {
            Ok(line) => println!("{}: {line}", descriptor.full_name),
            Err(err) => {
                all_ok = false;
                error!(descriptor = %descriptor.full_name, error = %err, "failed to classify");
                println!("{}: error: {err}", descriptor.full_name);
            }
        }
    }

    Ok(all_ok)
}
