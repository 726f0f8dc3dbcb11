use std::collections::VecDeque;

const INITIAL_LIFE: f64 = 1.0;
// Repeated decay leaves float residue around zero.
const LIFE_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    pub life: f64,
}

#[derive(Clone, Debug)]
pub struct MouseTrail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    decay: f64,
}

impl MouseTrail {
    pub fn new(capacity: usize, decay: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            decay,
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push_back(TrailPoint {
            x,
            y,
            life: INITIAL_LIFE,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn step(&mut self) {
        let decay = self.decay;
        self.points.retain_mut(|point| {
            point.life -= decay;
            point.life > LIFE_EPSILON
        });
    }

    #[cfg(test)]
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity_and_evicts_oldest() {
        let mut trail = MouseTrail::new(20, 0.05);
        for i in 0..25 {
            trail.push(f64::from(i), 0.0);
            assert!(trail.len() <= 20);
        }

        let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs.len(), 20);
        assert_eq!(xs.first(), Some(&5.0));
        assert_eq!(xs.last(), Some(&24.0));
    }

    #[test]
    fn life_drops_by_decay_each_frame() {
        let mut trail = MouseTrail::new(20, 0.05);
        trail.push(1.0, 2.0);

        trail.step();
        trail.step();

        let life = trail.points().next().map(|p| p.life).expect("point survives");
        assert!((life - 0.9).abs() < 1e-9);
    }

    #[test]
    fn point_is_removed_once_life_runs_out() {
        let mut trail = MouseTrail::new(20, 0.05);
        trail.push(0.0, 0.0);

        for _ in 0..19 {
            trail.step();
        }
        assert_eq!(trail.len(), 1);

        trail.step();
        assert!(trail.is_empty());
    }

    #[test]
    fn newer_points_outlive_older_ones() {
        let mut trail = MouseTrail::new(20, 0.25);
        trail.push(0.0, 0.0);
        trail.step();
        trail.step();
        trail.push(10.0, 10.0);
        trail.step();
        trail.step();

        let remaining: Vec<f64> = trail.points().map(|p| p.x).collect();
        assert_eq!(remaining, vec![10.0]);
    }
}
