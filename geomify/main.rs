//! Reconstruct an image from simple geometric shapes.
#![deny(missing_docs)]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use structopt::StructOpt;

use geomify::exporter::{bmp, shape_json, svg};
use geomify::{Bitmap, Model, Rgba, ShapeKind, ShapeResult};

/// Reconstruct an image from simple geometric shapes.
#[derive(StructOpt, Debug)]
#[structopt(name = "geomify")]
pub struct Opt {
    /// The image to approximate.
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,

    /// Where to save the result, can be given multiple times. The format is
    /// picked from the extension: .svg and .json save the committed shapes,
    /// .bmp saves the canvas through the builtin serializer and anything
    /// else is encoded as a raster image.
    #[structopt(short = "o", long = "output", parse(from_os_str), required = true)]
    pub outputs: Vec<PathBuf>,

    /// How many shapes to add to the canvas.
    #[structopt(short = "n", long = "shapes", default_value = "100")]
    pub shapes: u32,

    /// The opacity (0-255) every shape is committed with.
    #[structopt(short = "a", long = "alpha", default_value = "128")]
    pub alpha: u8,

    /// The kinds of shapes to draw, can be given multiple times among:
    /// rectangle, rotated-rectangle, triangle, ellipse, rotated-ellipse,
    /// circle, line, bezier, polyline, all.
    #[structopt(short = "m", long = "mode", default_value = "triangle")]
    pub modes: Vec<Mode>,

    /// How many random candidates every worker evaluates per step.
    #[structopt(long = "candidates", default_value = "50")]
    pub candidates: u32,

    /// How many consecutive failed mutations end a hill climb.
    #[structopt(long = "mutations", default_value = "100")]
    pub mutations: u32,

    /// How many worker threads to use, 0 picks the hardware concurrency.
    #[structopt(short = "t", long = "threads", default_value = "0")]
    pub threads: u32,

    /// The base RNG seed. Keeping seed and threads fixed makes runs
    /// reproducible.
    #[structopt(short = "s", long = "seed", default_value = "0")]
    pub seed: u32,

    /// Start from a solid "r,g,b" background instead of the average color of
    /// the target.
    #[structopt(short = "b", long = "background")]
    pub background: Option<Background>,
}

/// A shape kind selection parsed from the command line.
#[derive(Clone, Debug)]
pub struct Mode(Vec<ShapeKind>);

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = match s.trim() {
            "rectangle" => vec![ShapeKind::Rectangle],
            "rotated-rectangle" => vec![ShapeKind::RotatedRectangle],
            "triangle" => vec![ShapeKind::Triangle],
            "ellipse" => vec![ShapeKind::Ellipse],
            "rotated-ellipse" => vec![ShapeKind::RotatedEllipse],
            "circle" => vec![ShapeKind::Circle],
            "line" => vec![ShapeKind::Line],
            "bezier" => vec![ShapeKind::QuadraticBezier],
            "polyline" => vec![ShapeKind::Polyline],
            "all" => ShapeKind::ALL.to_vec(),
            other => return Err(format!("unknown shape kind `{}`", other)),
        };

        Ok(Mode(kinds))
    }
}

/// A solid background color parsed from the command line as "r,g,b".
#[derive(Clone, Debug)]
pub struct Background(Rgba);

impl FromStr for Background {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels: Result<Vec<u8>, _> = s.trim().split(',').map(|c| c.trim().parse()).collect();

        match channels {
            Err(e) => Err(format!("bad channel number format, {}", e)),
            Ok(channels) => {
                if channels.len() != 3 {
                    Err("please pass the background as r,g,b bytes".to_string())
                } else {
                    Ok(Background(Rgba::new(channels[0], channels[1], channels[2], 255)))
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let img = image::open(&opt.input)?.to_rgba8();
    let (width, height) = img.dimensions();
    let target = Bitmap::from_raw(width, height, img.into_raw())?;

    let mut model = match &opt.background {
        Some(background) => Model::with_background(target, background.0)?,
        None => Model::new(target)?,
    };
    model.set_seed(opt.seed);

    let kinds: Vec<ShapeKind> = opt
        .modes
        .iter()
        .flat_map(|mode| mode.0.iter().cloned())
        .collect();

    println!(
        "approximating a {}x{} image starting at score {:.6}",
        model.width(),
        model.height(),
        model.last_score()
    );

    let mut results = Vec::with_capacity(opt.shapes as usize);
    for i in 0..opt.shapes {
        for result in model.step(&kinds, opt.alpha, opt.candidates, opt.mutations, opt.threads) {
            println!(
                "shape {}/{}: {:?}, score {:.6}",
                i + 1,
                opt.shapes,
                result.shape.kind(),
                result.score
            );

            results.push(result);
        }
    }

    for path in &opt.outputs {
        save(path, &model, &results)?;
        println!("saved {}", path.display());
    }

    Ok(())
}

fn save(path: &Path, model: &Model, results: &[ShapeResult]) -> Result<(), Box<dyn Error>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("svg") => fs::write(path, svg::export(results, model.width(), model.height()))?,
        Some("json") => fs::write(path, shape_json::export(results)?)?,
        Some("bmp") => fs::write(path, bmp::export(model.current()))?,
        _ => {
            let img: image::RgbaImage = image::ImageBuffer::from_raw(
                model.width(),
                model.height(),
                model.current().data().to_vec(),
            )
            .ok_or("the canvas does not fit a raster image")?;

            img.save(path)?;
        }
    }

    Ok(())
}
