// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Payload defaults
// =============================================================================

/// Default maximum encoded payload size (1 MiB)
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

// =============================================================================
// Encoding quality defaults
// =============================================================================

/// Highest encoding quality; also the default when `q` is absent
pub const MAX_QUALITY: u8 = 100;

/// Quality floor for adaptive degradation (JPEG's lowest meaningful setting)
pub const MIN_QUALITY: u8 = 1;

/// Quality decay per reduction step: q * 4 / 5 (a 0.8 multiplier in
/// integer arithmetic, strictly decreasing for q >= 1)
pub const QUALITY_DECAY_NUMERATOR: u32 = 4;

/// Denominator of the quality decay ratio
pub const QUALITY_DECAY_DENOMINATOR: u32 = 5;

/// Hard cap on quality-reduction iterations
pub const MAX_REDUCTION_STEPS: u32 = 25;

// =============================================================================
// Eligibility defaults
// =============================================================================

/// Extension assumed when a resource key has none
pub const DEFAULT_EXTENSION: &str = "jpg";

// =============================================================================
// Resize defaults
// =============================================================================

/// Fill color for letterboxed areas when both dimensions are requested (white)
pub const CANVAS_FILL_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Largest letterbox canvas the resize stage will compose, in pixels.
/// 100 MP of RGBA is a 400 MiB buffer; requested boxes above this are
/// rejected before anything is allocated.
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;
