// The particle network: a fixed set of particles drifting inside the surface
// bounds, drawn as discs and joined by lines when close to each other.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

/// Line between two particles closer than the link distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub alpha: f64,
}

pub struct ParticleField {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> ParticleField {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(rng, width as f64, height as f64, &config));
        }
        ParticleField::with_particles(width, height, config, particles)
    }

    pub fn with_particles(
        width: u32,
        height: u32,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> ParticleField {
        ParticleField {
            width,
            height,
            particles,
            config,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    // New bounds only, particles keep their state and get corrected by the
    // bounce check on later steps
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;
        let clamp = self.config.clamp_to_bounds;
        for particle in &mut self.particles {
            particle.update(width, height, clamp);
        }
    }

    pub fn link(&self, i: usize, j: usize) -> Option<Link> {
        let distance = self.particles[i].distance_to(&self.particles[j]);
        self.config.link_alpha(distance).map(|alpha| Link {
            from: i,
            to: j,
            distance,
            alpha,
        })
    }

    // Every unordered pair closer than the link distance, O(n^2)
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                if let Some(link) = self.link(i, j) {
                    links.push(link);
                }
            }
        }
        links
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.width as f64, self.height as f64);

        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color)?;
        }

        let link_color = self.config.link_color;
        for link in self.links() {
            surface.stroke_line(
                self.particles[link.from].pos,
                self.particles[link.to].pos,
                link_color.with_alpha(link.alpha),
                self.config.link_width,
            )?;
        }
        Ok(())
    }
}
