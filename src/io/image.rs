//! PNG layer loading and composite export
//!
//! Each pixel of a layer image becomes one tile, so a PNG maps directly onto a
//! [`TileProvider`] of RGBA tiles.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;

use crate::io::configuration::VOID_COLOR;
use crate::io::error::{CompositeError, Result};
use crate::provider::tiled::TileProvider;
use crate::spatial::tiles::Tile;

impl Tile for Rgba<u8> {
    fn void() -> Self {
        Rgba(VOID_COLOR)
    }
}

/// Load a PNG as a provider positioned at `(x, y)`
///
/// # Errors
///
/// Returns an error if:
/// - The image cannot be opened or decoded
/// - The image has no pixels
pub fn load_layer(
    name: &str,
    path: &Path,
    x: i32,
    y: i32,
    layer: i32,
) -> Result<TileProvider<Rgba<u8>>> {
    let img = image::open(path).map_err(|e| CompositeError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    if width == 0 || height == 0 {
        return Err(CompositeError::InvalidSourceData {
            reason: format!("Layer image '{}' has no pixels", path.display()),
        });
    }

    let tiles = Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        *rgba_img.get_pixel(col as u32, row as u32)
    });

    Ok(TileProvider::from_array(name, x, y, layer, tiles))
}

/// Convert a composite snapshot (indexed by `row`, `col`) into an image
pub fn snapshot_to_image(snapshot: &Array2<Rgba<u8>>) -> RgbaImage {
    let (rows, cols) = snapshot.dim();
    let mut img = ImageBuffer::new(cols as u32, rows as u32);
    for ((row, col), pixel) in snapshot.indexed_iter() {
        img.put_pixel(col as u32, row as u32, *pixel);
    }
    img
}

/// Export a composite snapshot as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_composite_png(snapshot: &Array2<Rgba<u8>>, output_path: &Path) -> Result<()> {
    if snapshot.is_empty() {
        return Err(CompositeError::InvalidSourceData {
            reason: "Composite grid has no tiles to export".to_string(),
        });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CompositeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    snapshot_to_image(snapshot)
        .save(output_path)
        .map_err(|e| CompositeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
