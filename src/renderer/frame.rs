//! Frame draw sequence

use super::{Hsla, Surface};
use crate::consts::{BALL_ALPHA, BALL_LIGHTNESS, BALL_SATURATION, LINK_ALPHA, SHOCKWAVE_LINE_WIDTH};
use crate::sim::{Ball, Scene};

/// Colour of a ball (and of the sparks it emits)
pub fn ball_color(hue: f32) -> Hsla {
    Hsla::new(hue, BALL_SATURATION, BALL_LIGHTNESS, BALL_ALPHA)
}

fn ring_color(alpha: f32) -> Hsla {
    Hsla::new(0.0, 0.0, 100.0, alpha.max(0.0))
}

/// Link opacity for two ball centres `dist` apart, or `None` when too far
pub fn link_alpha(dist: f32, link_distance: f32) -> Option<f32> {
    (dist < link_distance).then(|| (1.0 - dist / link_distance) * LINK_ALPHA)
}

fn draw_links(balls: &[Ball], link_distance: f32, width: f32, surface: &mut impl Surface) {
    for (i, a) in balls.iter().enumerate() {
        for b in &balls[i + 1..] {
            if let Some(alpha) = link_alpha(a.pos.distance(b.pos), link_distance) {
                surface.stroke_line(a.pos, b.pos, width, ball_color(a.hue).with_alpha(alpha));
            }
        }
    }
}

/// Combined opacity of `steps` successive fades at `alpha` each
pub fn compound_fade(alpha: f32, steps: u32) -> f32 {
    1.0 - (1.0 - alpha).powi(steps as i32)
}

/// Draw the scene after exactly one simulation step
pub fn render_scene(scene: &Scene, surface: &mut impl Surface) {
    render_frames(scene, 1, surface);
}

/// Draw the scene after `steps` simulation steps: trail fade (compounded
/// over the steps), shockwave rings, links, sparks, then balls.
///
/// Nothing is drawn when no step ran, so trails fade at the step rate.
pub fn render_frames(scene: &Scene, steps: u32, surface: &mut impl Surface) {
    if steps == 0 {
        return;
    }
    let tuning = &scene.tuning;

    surface.fade(compound_fade(tuning.trail_alpha, steps));

    for sw in &scene.shockwaves {
        surface.stroke_ring(sw.origin, sw.radius, SHOCKWAVE_LINE_WIDTH, ring_color(sw.alpha));
    }

    draw_links(&scene.balls, tuning.link_distance, tuning.link_width, surface);

    for p in &scene.particles {
        surface.fill_circle(p.pos, p.radius, ball_color(p.hue), p.alpha);
    }

    for ball in &scene.balls {
        surface.fill_circle(ball.pos, ball.display_radius(), ball_color(ball.hue), 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, DrawList};
    use crate::sim::Impact;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn scene() -> Scene {
        Scene::empty(11, Tuning::default(), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_empty_scene_only_fades() {
        let mut list = DrawList::new();
        render_scene(&scene(), &mut list);
        assert_eq!(list.cmds, vec![DrawCmd::Fade { alpha: 0.2 }]);
    }

    #[test]
    fn test_no_steps_draws_nothing() {
        let mut scene = scene();
        scene.spawn_ball(Vec2::new(100.0, 100.0), Vec2::X, 10.0);
        let mut list = DrawList::new();
        render_frames(&scene, 0, &mut list);
        assert!(list.cmds.is_empty());
    }

    #[test]
    fn test_fade_compounds_over_steps() {
        let mut list = DrawList::new();
        render_frames(&scene(), 2, &mut list);
        match list.cmds[0] {
            DrawCmd::Fade { alpha } => assert!((alpha - 0.36).abs() < 1e-6),
            _ => unreachable!(),
        }
        assert!((compound_fade(0.2, 1) - 0.2).abs() < 1e-6);
        assert_eq!(compound_fade(0.2, 0), 0.0);
    }

    #[test]
    fn test_draw_order() {
        let mut scene = scene();
        scene.spawn_ball(Vec2::new(100.0, 100.0), Vec2::X, 10.0);
        scene.spawn_ball(Vec2::new(190.0, 100.0), Vec2::X, 10.0);
        scene.press(Vec2::new(400.0, 300.0));
        let crate::sim::Scene {
            rng, balls, particles, ..
        } = &mut scene;
        balls[0].impact(None, Impact::Standard, 2, rng, particles);

        let mut list = DrawList::new();
        render_scene(&scene, &mut list);

        let kinds: Vec<&str> = list
            .cmds
            .iter()
            .map(|c| match c {
                DrawCmd::Fade { .. } => "fade",
                DrawCmd::Ring { .. } => "ring",
                DrawCmd::Line { .. } => "line",
                DrawCmd::Circle { .. } => "circle",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["fade", "ring", "line", "circle", "circle", "circle", "circle"]
        );
    }

    #[test]
    fn test_link_alpha_falls_off_with_distance() {
        assert_eq!(link_alpha(0.0, 180.0), Some(0.4));
        assert!((link_alpha(90.0, 180.0).unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(link_alpha(180.0, 180.0), None);
        assert_eq!(link_alpha(500.0, 180.0), None);
    }

    #[test]
    fn test_link_uses_first_ball_hue() {
        let mut scene = scene();
        scene.spawn_ball(Vec2::new(0.0, 0.0), Vec2::X, 10.0);
        scene.spawn_ball(Vec2::new(90.0, 0.0), Vec2::X, 10.0);
        scene.balls[0].hue = 42.0;
        scene.balls[1].hue = 300.0;

        let mut list = DrawList::new();
        render_scene(&scene, &mut list);

        let line = list.lines().next().unwrap();
        match line {
            DrawCmd::Line { color, width, .. } => {
                assert_eq!(color.h, 42.0);
                assert!((color.a - 0.2).abs() < 1e-6);
                assert_eq!(*width, 1.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_ball_drawn_inflated() {
        let mut scene = scene();
        scene.spawn_ball(Vec2::new(50.0, 50.0), Vec2::X, 10.0);
        scene.balls[0].effect_timer = 6;

        let mut list = DrawList::new();
        render_scene(&scene, &mut list);

        match list.circles().last().unwrap() {
            DrawCmd::Circle {
                radius, opacity, ..
            } => {
                assert_eq!(*radius, 16.0);
                assert_eq!(*opacity, 1.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_particle_opacity_tracks_alpha() {
        let mut scene = scene();
        scene.spawn_ball(Vec2::new(50.0, 50.0), Vec2::X, 10.0);
        let crate::sim::Scene {
            rng, balls, particles, ..
        } = &mut scene;
        balls[0].impact(None, Impact::Standard, 1, rng, particles);
        scene.advance_particles();
        let alpha = scene.particles[0].alpha;

        let mut list = DrawList::new();
        render_scene(&scene, &mut list);

        match list.circles().next().unwrap() {
            DrawCmd::Circle { opacity, color, .. } => {
                assert_eq!(*opacity, alpha);
                assert_eq!(color.a, BALL_ALPHA);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_ring_alpha_never_negative() {
        let mut scene = scene();
        scene.press(Vec2::ZERO);
        scene.shockwaves[0].alpha = -0.01;

        let mut list = DrawList::new();
        render_scene(&scene, &mut list);

        match list.rings().next().unwrap() {
            DrawCmd::Ring { color, width, .. } => {
                assert_eq!(color.a, 0.0);
                assert_eq!(*width, SHOCKWAVE_LINE_WIDTH);
            }
            _ => unreachable!(),
        }
    }
}
