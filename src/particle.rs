// Simple particle struct to keep track of individual position, velocity, size, and color

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        radius: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
        }
    }

    // Uniformly random position inside the bounds, velocity, radius and palette entry
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let radius = rng.gen::<f64>() * config.max_radius;
        let color = if rng.gen::<f64>() > 0.5 {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, color)
    }

    // One unit time step, then reverse velocity on each axis that left the bounds.
    // Returns true if either axis bounced.
    pub fn update(&mut self, width: f64, height: f64, clamp: bool) -> bool {
        self.pos = vecmath::vec2_add(self.pos, self.vel);

        let bounced_x = bounce(&mut self.pos[0], &mut self.vel[0], width, clamp);
        let bounced_y = bounce(&mut self.pos[1], &mut self.vel[1], height, clamp);
        bounced_x || bounced_y
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

fn bounce(pos: &mut f64, vel: &mut f64, extent: f64, clamp: bool) -> bool {
    if *pos < 0.0 || *pos > extent {
        *vel *= -1.0;
        if clamp {
            *pos = pos.max(0.0).min(extent);
        }
        true
    } else {
        false
    }
}
