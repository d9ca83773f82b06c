// Tunable parameters for the particle field. The defaults reproduce the
// network background on the landing page.

use crate::color::Color;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_MAX_SPEED: f64 = 0.25;
pub const DEFAULT_MAX_RADIUS: f64 = 2.0;
pub const DEFAULT_LINK_DISTANCE: f64 = 100.0;
pub const DEFAULT_LINK_OPACITY: f64 = 0.1;
pub const DEFAULT_LINK_WIDTH: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    // Per-axis bound, velocities are drawn from [-max_speed, max_speed)
    pub max_speed: f64,
    pub max_radius: f64,
    // Pairs strictly closer than this are joined by a line
    pub link_distance: f64,
    // Line opacity for two coincident particles, fades to 0 at link_distance
    pub link_opacity: f64,
    pub link_width: f64,
    pub link_color: Color,
    pub palette: [Color; 2],
    // Pull a bounced particle back onto the edge it crossed. Off by default so
    // particles keep drifting up to one step past the edge.
    pub clamp_to_bounds: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            max_radius: DEFAULT_MAX_RADIUS,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_opacity: DEFAULT_LINK_OPACITY,
            link_width: DEFAULT_LINK_WIDTH,
            link_color: Color::WHITE,
            palette: [Color::EMERALD, Color::CYAN],
            clamp_to_bounds: false,
        }
    }
}

impl FieldConfig {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_clamping(mut self, clamp_to_bounds: bool) -> Self {
        self.clamp_to_bounds = clamp_to_bounds;
        self
    }

    // Opacity of the line joining two particles `distance` apart, None when
    // they are too far apart to be linked
    pub fn link_alpha(&self, distance: f64) -> Option<f64> {
        if distance < self.link_distance {
            Some(self.link_opacity * (1.0 - distance / self.link_distance))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_landing_page() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.link_distance, 100.0);
        assert_eq!(config.link_width, 0.5);
        assert!(!config.clamp_to_bounds);
    }

    #[test]
    fn link_alpha_at_zero_distance_is_full_opacity() {
        assert_eq!(FieldConfig::default().link_alpha(0.0), Some(0.1));
    }

    #[test]
    fn link_alpha_fades_linearly() {
        let alpha = FieldConfig::default().link_alpha(50.0).unwrap();
        assert!((alpha - 0.05).abs() < 1e-12);
    }

    #[test]
    fn no_link_at_or_past_threshold() {
        let config = FieldConfig::default();
        assert_eq!(config.link_alpha(100.0), None);
        assert_eq!(config.link_alpha(150.0), None);
        assert!(config.link_alpha(99.999).is_some());
    }
}
