// Configuration file, all measurements in map units (1 unit = 1 meter)
// This controls the initial generation parameter settings

pub const INITIAL_SEED: u64 = 7215114083291877003;

// Default run parameters, mirrored by the UI slider defaults
pub const NUM_BUILDINGS: usize = 150;
pub const MAP_WIDTH: f32 = 40.0;       // side length of the square map
pub const MIN_HEIGHT: f32 = 3.0;
pub const MAX_HEIGHT: f32 = 8.0;
pub const MIN_WIDTH: f32 = 2.0;
pub const MAX_WIDTH: f32 = 5.0;
pub const MIN_GAP_WIDTH: f32 = 0.0;    // extra clearance between footprints

// Centre falloff defaults
pub const CENTRE_HEIGHT: bool = true;  // taller buildings near the map origin
pub const CENTRE_WIDTH: bool = true;   // wider buildings near the map origin
pub const CENTRE_CLUSTER: bool = true; // denser placement near the low corner

// Sampling parameters
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10; // rejection budget per building
pub const POSITION_STEP: f32 = 0.01;        // placement grid resolution
pub const SIZE_STEP: f32 = 0.1;             // width/height/jitter resolution
pub const CLUSTER_EXPONENT: f32 = 1.5;      // fixed shaping constant for cluster bias

// Size jitter applied on top of the centre falloff
pub const JITTER_MIN: f32 = 0.8;
pub const JITTER_MAX: f32 = 1.2;

// Reference grid parameters
pub const GRID_SPACING: f32 = 1.0;     // minor line spacing
pub const GRID_MAJOR_EVERY: u32 = 10;  // every n-th line is a major line
pub const GRID_MARGIN: f32 = 10.0;     // drawn past the ground plane edge
