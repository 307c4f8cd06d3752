//! Command-line interface for compositing PNG layers through a provider stack

use crate::collection::ProviderCollection;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GIF_FRAME_DELAY_MS, LAYER_SPEC_SEPARATOR,
    MAX_GRID_DIMENSION, STEPS_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_composite_png, load_layer};
use crate::io::progress::ProgressManager;
use crate::io::visualization::FrameRecorder;
use clap::Parser;
use image::Rgba;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One provider to add, parsed from `NAME:LAYER:X:Y:PATH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    /// Unique provider name
    pub name: String,
    /// Depth key
    pub layer: i32,
    /// World column of the image's left edge
    pub x: i32,
    /// World row of the image's top edge
    pub y: i32,
    /// PNG whose pixels become the provider's tiles
    pub path: PathBuf,
}

/// Parse a `NAME:LAYER:X:Y:PATH` layer specification
///
/// The path is the final field, so it may itself contain the separator.
///
/// # Errors
///
/// Returns an error if a field is missing, the name is empty, or a numeric
/// field does not parse.
pub fn parse_layer_spec(raw: &str) -> Result<LayerSpec> {
    let mut fields = raw.splitn(5, LAYER_SPEC_SEPARATOR);
    let mut next_field = |field: &'static str| {
        fields
            .next()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| invalid_parameter(field, &raw, &"expected NAME:LAYER:X:Y:PATH"))
    };

    let name = next_field("name")?.to_string();
    let layer = parse_number("layer", next_field("layer")?)?;
    let x = parse_number("x", next_field("x")?)?;
    let y = parse_number("y", next_field("y")?)?;
    let path = PathBuf::from(next_field("path")?);

    Ok(LayerSpec {
        name,
        layer,
        x,
        y,
        path,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid_parameter(field, &value, &e))
}

#[derive(Parser, Debug)]
#[command(name = "tilestack")]
#[command(
    author,
    version,
    about = "Composite PNG layers through a layered tile provider stack"
)]
/// Command-line arguments for the compositing tool
pub struct Cli {
    /// Output PNG path for the composited grid
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Composite grid width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Composite grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Horizontal world-to-grid offset
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset_x: i32,

    /// Vertical world-to-grid offset
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset_y: i32,

    /// Provider to add, as NAME:LAYER:X:Y:PATH (repeatable, added in order)
    #[arg(short = 'l', long = "layer", value_name = "SPEC", value_parser = parse_layer_spec)]
    pub layers: Vec<LayerSpec>,

    /// Provider to hide after all layers are added
    #[arg(short = 'x', long = "hide", value_name = "NAME")]
    pub hidden: Vec<String>,

    /// Provider to re-insert behind its layer peers
    #[arg(short = 't', long = "top", value_name = "NAME")]
    pub tops: Vec<String>,

    /// Provider to remove last
    #[arg(short = 'r', long = "remove", value_name = "NAME")]
    pub removals: Vec<String>,

    /// Record every step as an animated GIF next to the output
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Total number of structural steps the scene performs
    pub fn step_count(&self) -> usize {
        self.layers.len() + self.hidden.len() + self.tops.len() + self.removals.len()
    }
}

/// Builds a provider collection from the command line and exports the result
pub struct SceneProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    recorder: Option<FrameRecorder>,
}

impl SceneProcessor {
    /// Create a scene processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let recorder = cli.visualize.then(FrameRecorder::new);

        Self {
            cli,
            progress_manager,
            recorder,
        }
    }

    /// Frames recorded so far, when visualization is enabled
    pub const fn recorder(&self) -> Option<&FrameRecorder> {
        self.recorder.as_ref()
    }

    /// Run every step and write the composite (and optional recording)
    ///
    /// Steps run in a fixed order: adds, hides, set-tops, then removals.
    /// Names that match no provider are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Grid dimensions or the output path are invalid
    /// - A layer image cannot be loaded
    /// - Two layers share a name
    /// - The composite or recording cannot be written
    pub fn process(&mut self) -> Result<()> {
        self.validate()?;
        let start_time = Instant::now();

        let collection: ProviderCollection<Rgba<u8>> = ProviderCollection::new(
            self.cli.width,
            self.cli.height,
            self.cli.offset_x,
            self.cli.offset_y,
            None,
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.step_count());
        }

        for spec in self.cli.layers.clone() {
            let provider = load_layer(&spec.name, &spec.path, spec.x, spec.y, spec.layer)?;
            collection.add(provider)?;
            self.finish_step(&collection, &format!("add {}", spec.name));
        }

        for name in self.cli.hidden.clone() {
            if !collection.set_enabled(&name, false) {
                log::warn!("Skipping hide of unknown provider '{name}'");
            }
            self.finish_step(&collection, &format!("hide {name}"));
        }

        for name in self.cli.tops.clone() {
            if !collection.set_top(&name) {
                log::warn!("Skipping set-top of unknown provider '{name}'");
            }
            self.finish_step(&collection, &format!("top {name}"));
        }

        for name in self.cli.removals.clone() {
            if !collection.remove(&name) {
                log::warn!("Skipping removal of unknown provider '{name}'");
            }
            self.finish_step(&collection, &format!("remove {name}"));
        }

        export_composite_png(&collection.snapshot(), &self.cli.output)?;

        if let Some(ref recorder) = self.recorder {
            let viz_path = Self::get_visualization_path(&self.cli.output);
            recorder.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        log::info!(
            "composited {} providers into {} in {:?}",
            collection.len(),
            self.cli.output.display(),
            start_time.elapsed()
        );
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.cli.width), ("height", self.cli.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.cli.output.extension().and_then(|s| s.to_str()) != Some("png") {
            return Err(invalid_parameter(
                "output",
                &self.cli.output.display(),
                &"output must be a PNG image",
            ));
        }

        Ok(())
    }

    fn finish_step(&mut self, collection: &ProviderCollection<Rgba<u8>>, label: &str) {
        if let Some(ref mut recorder) = self.recorder {
            recorder.capture(label, &collection.snapshot());
        }
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_step(label);
        }
    }

    /// Path of the step recording for a given output file
    pub fn get_visualization_path(output_path: &Path) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{STEPS_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = output_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
