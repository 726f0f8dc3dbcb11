use rand::Rng;

const MAX_SPEED: f64 = 0.5;
const MIN_RADIUS: f64 = 1.0;
const RADIUS_SPREAD: f64 = 2.0;
const MIN_OPACITY: f64 = 0.2;
const OPACITY_SPREAD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * MAX_SPEED,
            vy: (rng.gen::<f64>() - 0.5) * MAX_SPEED,
            radius: rng.gen::<f64>() * RADIUS_SPREAD + MIN_RADIUS,
            opacity: rng.gen::<f64>() * OPACITY_SPREAD + MIN_OPACITY,
        }
    }

    fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }

    pub fn fill_style(&self) -> String {
        format!("rgba(0, 212, 255, {:.3})", self.opacity)
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn seeded<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f64, height: f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height))
            .collect();

        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        for particle in &mut self.particles {
            particle.x = particle.x.clamp(0.0, self.width);
            particle.y = particle.y.clamp(0.0, self.height);
        }
    }

    #[cfg(test)]
    fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
        Self {
            particles,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 2.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn population_is_constant_across_frames() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::seeded(&mut rng, 50, 800.0, 600.0);

        for _ in 0..10_000 {
            field.step();
        }

        assert_eq!(field.len(), 50);
    }

    #[test]
    fn seeded_values_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::seeded(&mut rng, 200, 1280.0, 720.0);

        for p in field.particles() {
            assert!((0.0..1280.0).contains(&p.x));
            assert!((0.0..720.0).contains(&p.y));
            assert!(p.vx.abs() <= 0.25 && p.vy.abs() <= 0.25);
            assert!((1.0..3.0).contains(&p.radius));
            assert!((0.2..0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn velocity_flips_only_when_leaving_bounds() {
        let mut field = ParticleField::from_particles(
            vec![
                particle(99.8, 50.0, 0.5, 0.1),
                particle(50.0, 50.0, 0.5, -0.1),
                particle(50.0, 0.05, 0.2, -0.1),
            ],
            100.0,
            100.0,
        );

        field.step();
        let moved = field.particles();

        assert_eq!(moved[0].vx, -0.5, "crossed right edge");
        assert_eq!(moved[0].vy, 0.1);
        assert_eq!(moved[1].vx, 0.5, "interior particle keeps heading");
        assert_eq!(moved[1].vy, -0.1);
        assert_eq!(moved[2].vx, 0.2);
        assert_eq!(moved[2].vy, 0.1, "crossed top edge");
    }

    #[test]
    fn landing_exactly_on_the_edge_does_not_flip() {
        let mut field =
            ParticleField::from_particles(vec![particle(99.5, 10.0, 0.5, 0.0)], 100.0, 100.0);
        field.step();
        assert_eq!(field.particles()[0].vx, 0.5);
    }

    #[test]
    fn speed_is_preserved_through_bounces() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::seeded(&mut rng, 20, 50.0, 50.0);
        let speeds: Vec<(f64, f64)> = field
            .particles()
            .iter()
            .map(|p| (p.vx.abs(), p.vy.abs()))
            .collect();

        for _ in 0..2_000 {
            field.step();
        }

        for (p, (vx, vy)) in field.particles().iter().zip(speeds) {
            assert_eq!(p.vx.abs(), vx);
            assert_eq!(p.vy.abs(), vy);
        }
    }

    #[test]
    fn resize_clamps_positions_into_new_bounds() {
        let mut field =
            ParticleField::from_particles(vec![particle(900.0, 500.0, 0.1, 0.1)], 1000.0, 800.0);

        field.resize(400.0, 300.0);

        assert_eq!(field.bounds(), (400.0, 300.0));
        assert_eq!(field.particles()[0].x, 400.0);
        assert_eq!(field.particles()[0].y, 300.0);
    }

    #[test]
    fn fill_style_embeds_opacity() {
        assert_eq!(
            particle(0.0, 0.0, 0.0, 0.0).fill_style(),
            "rgba(0, 212, 255, 0.500)"
        );
    }
}
