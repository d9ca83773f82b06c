// Owns the field together with the surface it draws on and the viewport that
// sizes it. The browser drives `tick` from requestAnimationFrame, anything else
// can call `run` with its own frame source.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::surface::{FrameSource, Surface, Viewport};
use rand::Rng;

pub struct Animation<S: Surface, V: Viewport> {
    field: ParticleField,
    surface: S,
    viewport: V,
    frames: u64,
    stopped: bool,
}

impl<S: Surface, V: Viewport> Animation<S, V> {
    // Sizes the surface to the viewport before seeding particles into it
    pub fn new<R: Rng + ?Sized>(
        mut surface: S,
        viewport: V,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let (width, height) = viewport.client_size();
        surface.set_size(width, height);
        let field = ParticleField::new(width, height, config, rng);
        Animation {
            field,
            surface,
            viewport,
            frames: 0,
            stopped: false,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    // Re-read the viewport and match both surface and field bounds to it
    pub fn handle_resize(&mut self) {
        let (width, height) = self.viewport.client_size();
        self.surface.set_size(width, height);
        self.field.resize(width, height);
    }

    // A frame the surface rejects stops the animation for good
    pub fn tick(&mut self) -> Result<(), S::Error> {
        self.field.step();
        if let Err(err) = self.field.render(&mut self.surface) {
            self.stopped = true;
            return Err(err);
        }
        self.frames += 1;
        Ok(())
    }

    // Ticks once per frame until the source runs dry or the animation is stopped.
    // Returns the number of frames drawn by this call.
    pub fn run<F: FrameSource + ?Sized>(&mut self, source: &mut F) -> Result<u64, S::Error> {
        let start = self.frames;
        while !self.stopped && source.next_frame() {
            self.tick()?;
        }
        Ok(self.frames - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::particle::Particle;
    use crate::surface::{FixedFrames, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeViewport {
        size: Rc<Cell<(u32, u32)>>,
    }

    impl FakeViewport {
        fn new(width: u32, height: u32) -> Self {
            FakeViewport {
                size: Rc::new(Cell::new((width, height))),
            }
        }
    }

    impl Viewport for FakeViewport {
        fn client_size(&self) -> (u32, u32) {
            self.size.get()
        }
    }

    type TestAnimation = Animation<RecordingSurface, FakeViewport>;

    fn animation(width: u32, height: u32) -> (TestAnimation, FakeViewport) {
        let viewport = FakeViewport::new(width, height);
        let mut rng = StdRng::seed_from_u64(17);
        let anim = Animation::new(
            RecordingSurface::default(),
            viewport.clone(),
            FieldConfig::default(),
            &mut rng,
        );
        (anim, viewport)
    }

    // Accepts `budget` discs, then refuses to draw
    struct BrokenSurface {
        budget: usize,
    }

    impl Surface for BrokenSurface {
        type Error = &'static str;

        fn set_size(&mut self, _width: u32, _height: u32) {}

        fn clear(&mut self, _width: f64, _height: f64) {}

        fn fill_circle(
            &mut self,
            _center: [f64; 2],
            _radius: f64,
            _color: Color,
        ) -> Result<(), Self::Error> {
            if self.budget == 0 {
                return Err("context lost");
            }
            self.budget -= 1;
            Ok(())
        }

        fn stroke_line(
            &mut self,
            _from: [f64; 2],
            _to: [f64; 2],
            _color: Color,
            _width: f64,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn failed_frame_stops_the_animation() {
        let mut rng = StdRng::seed_from_u64(23);
        let config = FieldConfig::default().with_particle_count(4);
        let surface = BrokenSurface { budget: 6 };
        let mut anim = Animation::new(surface, FakeViewport::new(100, 100), config, &mut rng);

        assert_eq!(anim.tick(), Ok(()));
        assert_eq!(anim.tick(), Err("context lost"));
        assert!(anim.is_stopped());
        assert_eq!(anim.frames(), 1);
        assert_eq!(anim.run(&mut FixedFrames::new(5)), Ok(0));
    }

    #[test]
    fn surface_matches_viewport_on_creation() {
        let (anim, _) = animation(1024, 300);
        assert_eq!((anim.surface().width, anim.surface().height), (1024, 300));
        assert_eq!((anim.field().width(), anim.field().height()), (1024, 300));
    }

    #[test]
    fn resize_updates_surface_but_not_particles() {
        let (mut anim, viewport) = animation(800, 600);
        let before = anim.field().particles().to_vec();
        viewport.size.set((400, 200));
        anim.handle_resize();
        assert_eq!((anim.surface().width, anim.surface().height), (400, 200));
        assert_eq!((anim.field().width(), anim.field().height()), (400, 200));
        assert_eq!(anim.field().particles(), &before[..]);
    }

    #[test]
    fn run_ticks_once_per_frame() {
        let (mut anim, _) = animation(500, 500);
        assert_eq!(anim.run(&mut FixedFrames::new(30)).unwrap(), 30);
        assert_eq!(anim.frames(), 30);
        assert_eq!(anim.surface().circles(), 50);
    }

    #[test]
    fn stopped_animation_draws_nothing_more() {
        let (mut anim, _) = animation(500, 500);
        anim.run(&mut FixedFrames::new(3)).unwrap();
        anim.stop();
        assert_eq!(anim.run(&mut FixedFrames::new(10)).unwrap(), 0);
        assert_eq!(anim.frames(), 3);
    }

    #[test]
    fn stops_from_inside_the_frame_source() {
        struct StopAfter<'a> {
            frames: usize,
            stop: &'a Cell<bool>,
        }
        impl<'a> FrameSource for StopAfter<'a> {
            fn next_frame(&mut self) -> bool {
                self.frames += 1;
                if self.frames > 5 {
                    self.stop.set(true);
                }
                !self.stop.get()
            }
        }
        let (mut anim, _) = animation(500, 500);
        let stop = Cell::new(false);
        let drawn = anim.run(&mut StopAfter { frames: 0, stop: &stop }).unwrap();
        assert_eq!(drawn, 5);
    }

    #[test]
    fn bounce_scenario_on_200_square() {
        let (mut anim, _) = animation(200, 200);
        let particles = anim.field_mut().particles_mut();
        for p in particles.iter_mut() {
            *p = Particle::new(20.0, 20.0, 0.0, 0.0, 1.0, Color::CYAN);
        }
        particles[0] = Particle::new(195.0, 100.0, 0.5, 0.0, 1.0, Color::EMERALD);

        anim.tick().unwrap();
        assert_eq!(anim.field().particles()[0].pos, [195.5, 100.0]);
        assert_eq!(anim.field().particles()[0].vel, [0.5, 0.0]);

        anim.field_mut().particles_mut()[0].pos = [199.8, 100.0];
        anim.tick().unwrap();
        let p = anim.field().particles()[0];
        assert!((p.pos[0] - 200.3).abs() < 1e-9);
        assert_eq!(p.pos[1], 100.0);
        assert_eq!(p.vel, [-0.5, 0.0]);
    }
}
