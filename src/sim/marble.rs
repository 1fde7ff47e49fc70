//! The marble and its per-tick integrator
//!
//! One call to [`Marble::advance`] is one frame: gravity feeds velocity,
//! velocity feeds a candidate position, and the candidate is checked first
//! against the board edges, then against each object in board order. The
//! first event found decides the outcome; nothing else is resolved that tick.

use glam::Vec2;

use super::board::Board;
use super::error::SimError;
use super::object::{ObjectKind, WorldObject};
use crate::is_finite_vec;
use crate::renderer::{Painter, Style};
use crate::tuning::Tuning;

/// What a single tick of movement ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    None,
    Boundary,
    Wall,
    Obstacle,
    Goal,
    Hole,
}

impl HitOutcome {
    /// Goal and hole end the level
    pub fn is_terminal(self) -> bool {
        matches!(self, HitOutcome::Goal | HitOutcome::Hole)
    }

    /// Outcomes that reflected the marble's velocity
    pub fn is_bounce(self) -> bool {
        matches!(
            self,
            HitOutcome::Boundary | HitOutcome::Wall | HitOutcome::Obstacle
        )
    }
}

/// The player's marble
#[derive(Debug, Clone, PartialEq)]
pub struct Marble {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    tuning: Tuning,
}

impl Marble {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, tuning: Tuning) -> Result<Self, SimError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        if !is_finite_vec(pos) || !is_finite_vec(vel) {
            return Err(SimError::NonFiniteInput);
        }
        Ok(Self {
            pos,
            vel,
            radius,
            tuning,
        })
    }

    /// Marble with zero velocity
    pub fn at_rest(pos: Vec2, radius: f32, tuning: Tuning) -> Result<Self, SimError> {
        Self::new(pos, Vec2::ZERO, radius, tuning)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance one tick on `board`
    pub fn advance(&mut self, dt: f32, gravity: Vec2, board: &Board) -> Result<HitOutcome, SimError> {
        self.advance_in(dt, gravity, board.size(), board.objects())
    }

    /// Advance one tick inside a `bounds` canvas against `objects`
    ///
    /// Inputs are validated before anything is written: on error the marble
    /// is exactly as it was.
    pub fn advance_in(
        &mut self,
        dt: f32,
        gravity: Vec2,
        bounds: Vec2,
        objects: &[WorldObject],
    ) -> Result<HitOutcome, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Rejected timestep {}", dt);
            return Err(SimError::InvalidTimestep(dt));
        }
        if !is_finite_vec(gravity) {
            log::warn!("Rejected non-finite gravity {:?}", gravity);
            return Err(SimError::NonFiniteInput);
        }
        let r = self.radius;
        if !(bounds.x >= 2.0 * r && bounds.y >= 2.0 * r) {
            return Err(SimError::MarbleOutOfBounds);
        }

        let t = self.tuning;
        let k = t.restitution;
        let from = self.pos;

        let mut vel = self.vel + Vec2::new(t.accelerate(gravity.x, dt), t.accelerate(gravity.y, dt));
        let mut pos = from + Vec2::new(t.step(vel.x, dt), t.step(vel.y, dt));
        if !is_finite_vec(vel) || !is_finite_vec(pos) {
            log::warn!("Integration overflowed (vel {:?}), state left untouched", vel);
            return Err(SimError::NonFiniteInput);
        }

        // Board edges take priority over every object
        let mut boundary = false;
        if pos.x < r || pos.x > bounds.x - r {
            vel.x = -vel.x * k;
            pos.x = from.x + t.step(vel.x, dt);
            boundary = true;
        }
        if pos.y < r || pos.y > bounds.y - r {
            vel.y = -vel.y * k;
            pos.y = from.y + t.step(vel.y, dt);
            boundary = true;
        }
        if boundary {
            self.commit(pos, vel, bounds);
            return Ok(HitOutcome::Boundary);
        }

        for object in objects {
            if !object.collides_with(pos, r, vel) {
                continue;
            }

            let outcome = match object.kind() {
                ObjectKind::Goal => HitOutcome::Goal,
                ObjectKind::Hole => HitOutcome::Hole,
                ObjectKind::Wall | ObjectKind::Obstacle => {
                    let side = object.side_of_impact(pos);
                    if side.reflects_x() {
                        vel.x = -vel.x * k;
                        pos.x = from.x + t.step(vel.x, dt);
                    }
                    if side.reflects_y() {
                        vel.y = -vel.y * k;
                        pos.y = from.y + t.step(vel.y, dt);
                    }
                    log::debug!("Marble hit {:?} on side {:?} at {:?}", object.kind(), side, pos);
                    if object.kind() == ObjectKind::Wall {
                        HitOutcome::Wall
                    } else {
                        HitOutcome::Obstacle
                    }
                }
            };

            self.commit(pos, vel, bounds);
            return Ok(outcome);
        }

        self.commit(pos, vel, bounds);
        Ok(HitOutcome::None)
    }

    /// Store the new state, clamped so the marble stays on the board
    fn commit(&mut self, pos: Vec2, vel: Vec2, bounds: Vec2) {
        let r = Vec2::splat(self.radius);
        self.pos = pos.clamp(r, bounds - r);
        self.vel = vel;
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, style: &Style) {
        painter.fill_circle(self.pos, self.radius, style.marble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    const K: f32 = 0.3;

    fn marble(pos: Vec2, vel: Vec2, radius: f32) -> Marble {
        Marble::new(pos, vel, radius, Tuning::default()).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert_eq!(
            Marble::at_rest(Vec2::new(10.0, 10.0), 0.0, Tuning::default()),
            Err(SimError::InvalidRadius(0.0))
        );
    }

    #[test]
    fn test_resting_marble_is_noop() {
        let mut m = marble(Vec2::new(200.0, 200.0), Vec2::ZERO, 10.0);
        let bounds = Vec2::new(400.0, 400.0);
        for _ in 0..10 {
            let outcome = m.advance_in(SIM_DT, Vec2::ZERO, bounds, &[]).unwrap();
            assert_eq!(outcome, HitOutcome::None);
        }
        assert_eq!(m.pos(), Vec2::new(200.0, 200.0));
        assert_eq!(m.vel(), Vec2::ZERO);
    }

    #[test]
    fn test_free_flight_follows_scale_constants() {
        let mut m = marble(Vec2::new(200.0, 200.0), Vec2::ZERO, 10.0);
        m.advance_in(0.1, Vec2::new(1.0, 0.0), Vec2::new(400.0, 400.0), &[])
            .unwrap();
        // v = 1 * 0.1 * 10 = 1, dx = 1 * 0.1 * 100 = 10
        assert!(approx(m.vel().x, 1.0));
        assert!(approx(m.pos().x, 210.0));
    }

    #[test]
    fn test_straight_drop_into_hole() {
        let board = Board::with_objects(
            400.0,
            400.0,
            [WorldObject::hole(Vec2::new(100.0, 300.0), 10.0).unwrap()],
        )
        .unwrap();
        let mut m = marble(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);

        let mut fell = false;
        for _ in 0..200 {
            let outcome = m.advance(SIM_DT, Vec2::new(0.0, 9.8), &board).unwrap();
            assert_eq!(m.pos().x, 100.0);
            if outcome == HitOutcome::Hole {
                assert!(m.pos().distance(Vec2::new(100.0, 300.0)) < 20.0);
                fell = true;
                break;
            }
            assert_eq!(outcome, HitOutcome::None);
        }
        assert!(fell, "marble never reached the hole");
    }

    #[test]
    fn test_wall_bounce_reverses_normal_component_only() {
        let wall = WorldObject::wall(Vec2::new(200.0, 100.0), Vec2::new(200.0, 300.0), 5.0).unwrap();
        let mut m = marble(Vec2::new(180.0, 200.0), Vec2::new(6.0, 0.0), 10.0);

        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(400.0, 400.0), &[wall])
            .unwrap();

        assert_eq!(outcome, HitOutcome::Wall);
        assert!(approx(m.vel().x, -K * 6.0));
        assert_eq!(m.vel().y, 0.0);
        // Position recomputed from the reflected velocity
        assert!(approx(m.pos().x, 180.0 - K * 6.0 * SIM_DT * 100.0));
    }

    #[test]
    fn test_corner_bounce_reverses_both_axes() {
        let rect = WorldObject::rect(Vec2::new(200.0, 200.0), Vec2::new(100.0, 100.0)).unwrap();
        let mut m = marble(Vec2::new(185.0, 185.0), Vec2::new(5.4, 5.4), 10.0);

        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(600.0, 600.0), &[rect])
            .unwrap();

        assert_eq!(outcome, HitOutcome::Obstacle);
        assert!(approx(m.vel().x, -K * 5.4));
        assert!(approx(m.vel().y, -K * 5.4));
    }

    #[test]
    fn test_wall_end_cap_turns_marble_back() {
        // Marble skimming past the top tip of a vertical wall
        let wall = WorldObject::wall(Vec2::new(200.0, 100.0), Vec2::new(200.0, 300.0), 5.0).unwrap();
        let objects = [wall];
        let bounds = Vec2::new(400.0, 400.0);
        let mut m = marble(Vec2::new(185.0, 92.0), Vec2::new(6.0, 0.0), 10.0);

        let outcome = m.advance_in(SIM_DT, Vec2::ZERO, bounds, &objects).unwrap();
        assert_eq!(outcome, HitOutcome::Wall);
        assert!(approx(m.vel().x, -K * 6.0));
        assert_eq!(m.vel().y, 0.0);
        assert!(approx(m.pos().x, 182.0));
        assert!(approx(m.pos().y, 92.0));

        for _ in 0..30 {
            let outcome = m.advance_in(SIM_DT, Vec2::ZERO, bounds, &objects).unwrap();
            assert_eq!(outcome, HitOutcome::None);
            assert!(m.pos().x < 200.0, "marble crossed the wall tip: {:?}", m.pos());
        }
    }

    #[test]
    fn test_wall_end_cap_head_on() {
        // Rising straight into the bottom tip
        let wall = WorldObject::wall(Vec2::new(200.0, 100.0), Vec2::new(200.0, 300.0), 5.0).unwrap();
        let mut m = marble(Vec2::new(200.0, 318.0), Vec2::new(0.0, -6.0), 10.0);

        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(400.0, 400.0), &[wall])
            .unwrap();
        assert_eq!(outcome, HitOutcome::Wall);
        assert_eq!(m.vel().x, 0.0);
        assert!(approx(m.vel().y, K * 6.0));
        assert!(approx(m.pos().y, 321.0));
    }

    #[test]
    fn test_obstacle_side_hit_reverses_one_axis() {
        let rect = WorldObject::rect(Vec2::new(200.0, 200.0), Vec2::new(100.0, 100.0)).unwrap();
        let mut m = marble(Vec2::new(185.0, 250.0), Vec2::new(6.0, 2.0), 10.0);

        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(600.0, 600.0), &[rect])
            .unwrap();

        assert_eq!(outcome, HitOutcome::Obstacle);
        assert!(approx(m.vel().x, -K * 6.0));
        assert_eq!(m.vel().y, 2.0);
        assert!(approx(m.pos().x, 182.0));
        assert!(approx(m.pos().y, 250.0 + 2.0 * SIM_DT * 100.0));
    }

    #[test]
    fn test_boundary_takes_priority_over_objects() {
        let wall = WorldObject::wall(Vec2::new(396.0, 100.0), Vec2::new(396.0, 300.0), 2.0).unwrap();
        assert!(wall.collides_with(Vec2::new(395.0, 200.0), 10.0, Vec2::new(6.0, 0.0)));

        let mut m = marble(Vec2::new(385.0, 200.0), Vec2::new(6.0, 0.0), 10.0);
        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(400.0, 400.0), &[wall])
            .unwrap();

        assert_eq!(outcome, HitOutcome::Boundary);
        assert!(approx(m.vel().x, -K * 6.0));
    }

    #[test]
    fn test_boundary_bounce_keeps_other_axis() {
        let mut m = marble(Vec2::new(12.0, 200.0), Vec2::new(-6.0, 2.0), 10.0);
        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, Vec2::new(400.0, 400.0), &[])
            .unwrap();
        assert_eq!(outcome, HitOutcome::Boundary);
        assert!(approx(m.vel().x, K * 6.0));
        assert_eq!(m.vel().y, 2.0);
    }

    #[test]
    fn test_goal_is_reported_every_tick_while_overlapping() {
        let goal = WorldObject::goal(Vec2::new(105.0, 100.0), 10.0).unwrap();
        let mut m = marble(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        let bounds = Vec2::new(400.0, 400.0);
        let objects = [goal];

        assert_eq!(
            m.advance_in(SIM_DT, Vec2::ZERO, bounds, &objects).unwrap(),
            HitOutcome::Goal
        );
        assert_eq!(
            m.advance_in(SIM_DT, Vec2::ZERO, bounds, &objects).unwrap(),
            HitOutcome::Goal
        );
        assert_eq!(m.pos(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_first_object_in_order_wins() {
        let hole = WorldObject::hole(Vec2::new(100.0, 100.0), 10.0).unwrap();
        let goal = WorldObject::goal(Vec2::new(100.0, 100.0), 10.0).unwrap();
        let bounds = Vec2::new(400.0, 400.0);

        let mut m = marble(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        let outcome = m
            .advance_in(SIM_DT, Vec2::ZERO, bounds, &[hole.clone(), goal.clone()])
            .unwrap();
        assert_eq!(outcome, HitOutcome::Hole);

        let outcome = m.advance_in(SIM_DT, Vec2::ZERO, bounds, &[goal, hole]).unwrap();
        assert_eq!(outcome, HitOutcome::Goal);
    }

    #[test]
    fn test_invalid_inputs_leave_state_untouched() {
        let start = marble(Vec2::new(200.0, 200.0), Vec2::new(1.0, 1.0), 10.0);
        let bounds = Vec2::new(400.0, 400.0);

        let mut m = start.clone();
        assert_eq!(
            m.advance_in(0.0, Vec2::ZERO, bounds, &[]),
            Err(SimError::InvalidTimestep(0.0))
        );
        assert_eq!(
            m.advance_in(SIM_DT, Vec2::new(f32::NAN, 0.0), bounds, &[]),
            Err(SimError::NonFiniteInput)
        );
        assert_eq!(
            m.advance_in(SIM_DT, Vec2::ZERO, Vec2::new(15.0, 400.0), &[]),
            Err(SimError::MarbleOutOfBounds)
        );
        assert_eq!(m, start);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut m = marble(Vec2::new(200.0, 200.0), Vec2::new(1e38, 0.0), 10.0);
        let before = m.clone();
        assert_eq!(
            m.advance_in(1.0, Vec2::ZERO, Vec2::new(400.0, 400.0), &[]),
            Err(SimError::NonFiniteInput)
        );
        assert_eq!(m, before);
    }

    #[test]
    fn test_max_step_caps_displacement() {
        let tuning = Tuning {
            max_step: Some(2.0),
            ..Default::default()
        };
        let mut m = Marble::new(Vec2::new(200.0, 200.0), Vec2::new(60.0, 0.0), 10.0, tuning).unwrap();
        m.advance_in(SIM_DT, Vec2::ZERO, Vec2::new(400.0, 400.0), &[])
            .unwrap();
        assert!(approx(m.pos().x, 202.0));
    }

    #[test]
    fn test_draw_uses_marble_color() {
        use crate::renderer::ShapeBatch;

        let m = marble(Vec2::new(50.0, 50.0), Vec2::ZERO, 10.0);
        let style = Style::default();
        let mut batch = ShapeBatch::new(style.circle_segments);
        m.draw(&mut batch, &style);
        assert!(!batch.vertices().is_empty());
        assert!(batch.vertices().iter().all(|v| v.color == style.marble));
    }

    fn obstacle_course() -> Vec<WorldObject> {
        vec![
            WorldObject::wall(Vec2::new(150.0, 50.0), Vec2::new(150.0, 250.0), 5.0).unwrap(),
            WorldObject::wall(Vec2::new(200.0, 300.0), Vec2::new(350.0, 300.0), 5.0).unwrap(),
            WorldObject::rect(Vec2::new(250.0, 100.0), Vec2::new(60.0, 40.0)).unwrap(),
        ]
    }

    proptest! {
        #[test]
        fn prop_marble_stays_on_board(
            x in 10.0f32..390.0,
            y in 10.0f32..390.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            gx in -20.0f32..20.0,
            gy in -20.0f32..20.0,
            dt in 0.001f32..0.05,
        ) {
            let objects = obstacle_course();
            let bounds = Vec2::new(400.0, 400.0);
            let mut m = marble(Vec2::new(x, y), Vec2::new(vx, vy), 10.0);
            for _ in 0..120 {
                m.advance_in(dt, Vec2::new(gx, gy), bounds, &objects).unwrap();
                let p = m.pos();
                prop_assert!(p.x >= 10.0 && p.x <= 390.0, "x out of bounds: {}", p.x);
                prop_assert!(p.y >= 10.0 && p.y <= 390.0, "y out of bounds: {}", p.y);
                prop_assert!(is_finite_vec(m.vel()));
            }
        }

        #[test]
        fn prop_reflection_scales_by_restitution(
            x in 10.0f32..390.0,
            y in 10.0f32..390.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            gx in -20.0f32..20.0,
            gy in -20.0f32..20.0,
        ) {
            let objects = obstacle_course();
            let bounds = Vec2::new(400.0, 400.0);
            let mut m = marble(Vec2::new(x, y), Vec2::new(vx, vy), 10.0);
            let dt = SIM_DT;
            // Velocity after gravity, before any reflection
            let pre = m.vel() + Vec2::new(gx, gy) * dt * 10.0;
            let outcome = m.advance_in(dt, Vec2::new(gx, gy), bounds, &objects).unwrap();
            let after = m.vel();

            for (a, p) in [(after.x, pre.x), (after.y, pre.y)] {
                let kept = (a - p).abs() < 1e-3;
                let reflected = (a + K * p).abs() < 1e-3;
                prop_assert!(kept || reflected, "axis velocity {} not derived from {}", a, p);
                if !outcome.is_bounce() {
                    prop_assert!(kept);
                }
            }
        }
    }
}
