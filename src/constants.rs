// --- File: constants.rs ---
// --- Global Simulation Constants ---

// Rope solver. More relaxation passes make the stem stiffer and straighter.
pub const CONSTRAINT_ITERATIONS: usize = 20;
pub const DISTANCE_EPSILON: f32 = 0.000001;
// Stems are built so no single segment exceeds this length.
pub const MAX_SEGMENT_LENGTH: f32 = 20.0;
// Target on-screen segment length after Chaikin smoothing.
pub const MIN_DRAW_SEGMENT_LENGTH: f32 = 5.0;
pub const CHAIKIN_RATIO: f32 = 0.333;

// Petal geometry and lifecycle.
pub const PETALS_DROP_RATE: f32 = 0.1;
pub const PETAL_MIN_WIDTH: f32 = 50.0;
pub const PETAL_MAX_WIDTH: f32 = 70.0;
pub const PETAL_MIN_PROPORTIONS: f32 = 0.3;
pub const PETAL_MAX_PROPORTIONS: f32 = 0.7;
pub const PETAL_LIFT_FACTOR: f32 = 0.05;
pub const PETAL_MAX_ROTATION_SPEED: f32 = 1.5;
pub const OUTLINE_POINTS: usize = 40;
pub const OUTLINE_RADIUS: f32 = 20.0;

// Corolla forces, applied through the stem's free end.
pub const GRAVITY: f32 = 3000.0;
pub const MIN_LIFTING_FORCE: f32 = 5000.0;
pub const MAX_LIFTING_FORCE: f32 = 8000.0;
pub const WIND_HORIZONTAL_FACTOR: f32 = 10_000.0;
pub const WIND_VERTICAL_FACTOR: f32 = 1000.0;
pub const POINTER_FORCE_FACTOR: f32 = 2000.0;
pub const STRENGTH_EXPONENT: f32 = 0.25;
pub const MIN_NOISE_PERIOD: f32 = 1.0;
pub const MAX_NOISE_PERIOD: f32 = 2.0;

// A bare corolla must fall this far past the lower bound before recycling.
pub const CORPSE_MARGIN: f32 = 50.0;

pub const POINTER_INFLUENCE_RADIUS: f32 = 300.0;

// Frame loop.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
// Upper bound on the integration step, so a delayed frame cannot explode.
pub const MAX_FRAME_DT: f32 = 1.0 / 60.0;
pub const DOMAIN_WIDTH: f32 = 1280.0;
pub const DOMAIN_HEIGHT: f32 = 720.0;
pub const DEMO_FRAME_COUNT: usize = 1800;
// --- End of File: constants.rs ---
