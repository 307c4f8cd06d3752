//! Host constants and runtime configuration defaults

// Composite grid defaults for the command-line host
/// Default composite grid width in tiles
pub const DEFAULT_GRID_WIDTH: usize = 256;
/// Default composite grid height in tiles
pub const DEFAULT_GRID_HEIGHT: usize = 256;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Color shown for grid positions not covered by any provider
pub const VOID_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Separator between the fields of a `NAME:LAYER:X:Y:PATH` layer spec
pub const LAYER_SPEC_SEPARATOR: char = ':';

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to the step recording filename
pub const STEPS_SUFFIX: &str = "_steps";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the final frame so the end state stays visible
pub const FINAL_FRAME_HOLD: u32 = 5;
