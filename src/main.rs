use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use atlasland::asset::scene::export_scenejson;
use atlasland::import::{self, Importer};
use atlasland::ontology;
use atlasland::scene::Scene;

struct Args {
    ontology: PathBuf,
    meshes: PathBuf,
    output: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage: atlasland --ontology <ontology.json> --meshes <dir> [--output <dir>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ontology <path>   Ontology JSON: an array of structure records");
    eprintln!("  --meshes <dir>      Directory containing one {{id}}.obj file per structure");
    eprintln!("  --output <dir>      Write the combined scene to <dir>/model.json");
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut ontology = None;
    let mut meshes = None;
    let mut output = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--ontology" => {
                i += 1;
                ontology = Some(PathBuf::from(
                    args.get(i).ok_or("--ontology needs a path")?,
                ));
            }
            "--meshes" => {
                i += 1;
                meshes = Some(PathBuf::from(args.get(i).ok_or("--meshes needs a path")?));
            }
            "--output" => {
                i += 1;
                output = Some(PathBuf::from(args.get(i).ok_or("--output needs a path")?));
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 1;
    }

    Ok(Args {
        ontology: ontology.ok_or("--ontology is required")?,
        meshes: meshes.ok_or("--meshes is required")?,
        output,
    })
}

fn run(args: &Args) -> Result<(), Error> {
    let structures = ontology::load(&args.ontology)?;
    info!(structures = structures.len(), "ontology loaded");

    let mut scene = Scene::new();
    let importer = Importer::new(&args.meshes);
    importer.import_all(&structures, &mut scene)?;

    scene.set_origins_to_geometry();
    scene.center_on_origin();
    info!("scene centered");

    if let Some(output) = &args.output {
        let path = output.join("model.json");
        let data = export_scenejson(&scene)?;
        std::fs::write(&path, data).map_err(Error::Write)?;
        info!(path = %path.display(), "scene saved");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("ontology: {0}")]
    Ontology(#[from] ontology::Error),

    #[error("import: {0}")]
    Import(#[from] import::Error),

    #[error("scene export: {0}")]
    Scene(#[from] atlasland::asset::scene::Error),

    #[error("failed to write scene file: {0}")]
    Write(std::io::Error),
}
