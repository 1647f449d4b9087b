#[macro_use]
extern crate clap;

mod bench;
mod error;
mod mesh;
mod parse;
mod report;
mod timer;

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{App, Arg};
use tracing::{info, warn, Level};
use unitpack::Codec;

use crate::{
    bench::{random_directions, run_dataset, Dataset},
    error::{BenchError, BenchResult},
    mesh::Mesh,
    parse::load_obj,
    timer::Timer,
};

// ----------------------------------------------------------------

fn main() {
    let args = App::new("Unitbench")
        .version(crate_version!())
        .about("Measures the speed and precision of unit vector codecs")
        .arg(
            Arg::with_name("count")
                .short("n")
                .long("count")
                .value_name("N")
                .help("Number of random directions to test")
                .takes_value(true)
                .default_value("1000000")
                .validator(|s| {
                    usize::from_str_radix(&s, 10)
                        .and(Ok(()))
                        .or(Err("must be an integer".to_string()))
                }),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for generating the random directions")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    u64::from_str_radix(&s, 10)
                        .and(Ok(()))
                        .or(Err("must be an integer".to_string()))
                }),
        )
        .arg(
            Arg::with_name("mesh_dir")
                .short("m")
                .long("mesh-dir")
                .value_name("PATH")
                .help("Directory of .obj files to take vertex normals from")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("methods")
                .long("methods")
                .value_name("LIST")
                .help("Comma separated codec names [default: all]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("csv")
                .long("csv")
                .help("Print results as CSV instead of a Markdown table"),
        )
        .arg(
            Arg::with_name("export_dir")
                .long("export-dir")
                .value_name("PATH")
                .help("Write each mesh with its computed normals to this directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log each codec measurement"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.is_present("verbose") {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let config = Config {
        // Both were checked by the validators above.
        count: value_t!(args, "count", usize).unwrap_or_else(|e| e.exit()),
        seed: value_t!(args, "seed", u64).unwrap_or_else(|e| e.exit()),
        mesh_dir: args.value_of("mesh_dir").map(PathBuf::from),
        methods: args.value_of("methods").map(str::to_string),
        csv: args.is_present("csv"),
        export_dir: args.value_of("export_dir").map(PathBuf::from),
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Config {
    count: usize,
    seed: u64,
    mesh_dir: Option<PathBuf>,
    methods: Option<String>,
    csv: bool,
    export_dir: Option<PathBuf>,
}

fn run(config: &Config) -> BenchResult<()> {
    let codecs = parse_methods(config.methods.as_deref())?;
    let total_timer = Timer::new();
    let mut sets: Vec<Dataset> = Vec::new();

    // Random directions.
    {
        let name = format!("{} random", config.count);
        info!(dataset = %name, "generating directions");
        let dirs = random_directions(config.count, config.seed);
        sets.push(run_dataset(&name, &dirs, &codecs)?);
    }

    // Mesh normals.
    if let Some(dir) = &config.mesh_dir {
        if let Some(export_dir) = &config.export_dir {
            fs::create_dir_all(export_dir)?;
        }

        for path in obj_files(dir)? {
            let mesh = match load_obj(&path) {
                Ok(mesh) => mesh,
                Err(source) => {
                    let e = BenchError::Obj { path, source };
                    warn!(error = %e, "skipping mesh");
                    continue;
                }
            };
            if mesh.triangles.is_empty() {
                warn!(path = %path.display(), "skipping mesh with no faces");
                continue;
            }

            let stem = path
                .file_stem()
                .map_or_else(|| "mesh".into(), |s| s.to_string_lossy());
            for &(kind, normals) in &[
                ("flat", &mesh.flat_normals()),
                ("smooth", &mesh.smooth_normals()),
            ] {
                let name = format!("{} {}", stem, kind);
                info!(dataset = %name, vertices = normals.len(), "measuring mesh normals");
                sets.push(run_dataset(&name, normals, &codecs)?);

                if let Some(export_dir) = &config.export_dir {
                    export(&mesh, normals, &export_dir.join(format!("{}_{}.obj", stem, kind)))?;
                }
            }
        }
    }

    info!(seconds = total_timer.elapsed(), "done");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.csv {
        report::write_csv(&mut out, &sets)?;
    } else {
        report::write_markdown(&mut out, &sets)?;
    }
    out.flush()?;

    Ok(())
}

/// Parses a comma separated list of codec names, or returns every codec
/// when no list is given.
fn parse_methods(list: Option<&str>) -> BenchResult<Vec<Codec>> {
    let list = match list {
        Some(list) => list,
        None => return Ok(Codec::ALL.to_vec()),
    };

    let mut codecs = Vec::new();
    for name in list.split(',').filter(|s| !s.trim().is_empty()) {
        let codec: Codec = name.parse()?;
        if !codecs.contains(&codec) {
            codecs.push(codec);
        }
    }
    if codecs.is_empty() {
        return Err(BenchError::BadArgument(
            "--methods needs at least one codec name".to_string(),
        ));
    }
    Ok(codecs)
}

/// The `.obj` files directly inside `dir`, sorted by path.
fn obj_files(dir: &Path) -> BenchResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BenchError::BadArgument(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_obj = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));
        if is_obj && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn export(mesh: &Mesh, normals: &[glam::DVec3], path: &Path) -> BenchResult<()> {
    info!(path = %path.display(), "exporting");
    let mut f = BufWriter::new(File::create(path)?);
    mesh.write_obj(normals, &mut f)?;
    f.flush()?;
    Ok(())
}
