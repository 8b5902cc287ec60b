// Host-side tests for the hover highlight state machine.

mod common;

use common::*;
use glam::Vec3;
use glint_core::*;
use rand::prelude::*;

fn three_balls() -> (Scene, [ObjectId; 3]) {
    let mut scene = Scene::new();
    let a = add_ball(&mut scene, Vec3::new(-5.0, 0.0, 0.0), 1.0, 0xff0000);
    let b = add_ball(&mut scene, Vec3::ZERO, 1.0, 0x00ff00);
    let c = add_ball(&mut scene, Vec3::new(5.0, 0.0, 0.0), 1.0, 0x0000ff);
    (scene, [a, b, c])
}

fn highlighted(scene: &Scene) -> Vec<ObjectId> {
    scene
        .pickables()
        .filter(|o| {
            o.material.emissive == o.material.base_color
                && o.material.emissive_intensity == HIGHLIGHT_EMISSIVE_INTENSITY
        })
        .map(|o| o.id)
        .collect()
}

#[test]
fn entering_sets_emissive_to_base_color() {
    let (mut scene, [a, _, _]) = three_balls();
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);

    assert_eq!(hl.update(Some(a), &mut scene), HighlightChange::Entered(a));
    let obj = scene.get(a).expect("a");
    assert_eq!(obj.material.emissive, Color::from_hex(0xff0000));
    assert_eq!(obj.material.emissive_intensity, 0.5);
    assert_eq!(hl.saved_emissive(), Some(Color::BLACK));
}

#[test]
fn repeated_updates_with_same_object_do_not_mutate() {
    let (mut scene, [a, _, _]) = three_balls();
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    hl.update(Some(a), &mut scene);

    // tamper so a second enter would be visible
    scene.get_mut(a).expect("a").material.emissive = Color::from_hex(0x123456);
    for _ in 0..5 {
        assert_eq!(hl.update(Some(a), &mut scene), HighlightChange::Unchanged);
    }
    assert_eq!(
        scene.get(a).expect("a").material.emissive,
        Color::from_hex(0x123456)
    );
    assert_eq!(hl.saved_emissive(), Some(Color::BLACK));
}

#[test]
fn switching_restores_previous_before_entering_next() {
    let (mut scene, [a, b, _]) = three_balls();
    scene.get_mut(a).expect("a").material.emissive = Color::from_hex(0x0a0b0c);
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    hl.update(Some(a), &mut scene);

    assert_eq!(
        hl.update(Some(b), &mut scene),
        HighlightChange::Switched { from: a, to: b }
    );
    let obj_a = scene.get(a).expect("a");
    assert_eq!(obj_a.material.emissive, Color::from_hex(0x0a0b0c));
    assert_eq!(obj_a.material.emissive_intensity, 1.0);
    assert_eq!(highlighted(&scene), vec![b]);
}

#[test]
fn no_hit_clears_and_restores() {
    let (mut scene, [a, _, _]) = three_balls();
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    hl.update(Some(a), &mut scene);
    assert_eq!(hl.update(None, &mut scene), HighlightChange::Cleared(a));
    assert_eq!(hl.state(), HighlightState::Idle);
    assert!(highlighted(&scene).is_empty());
    assert_eq!(hl.update(None, &mut scene), HighlightChange::Unchanged);
}

#[test]
fn save_restore_round_trips_arbitrary_colors() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut scene = Scene::new();
        let id = add_ball(&mut scene, Vec3::ZERO, 1.0, rng.gen_range(0..=0xffffff));
        let original = Color::from_hex(rng.gen_range(0..=0xffffff));
        scene.get_mut(id).expect("id").material.emissive = original;

        let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
        hl.update(Some(id), &mut scene);
        hl.update(None, &mut scene);
        assert_eq!(scene.get(id).expect("id").material.emissive, original);
    }
}

#[test]
fn at_most_one_highlight_across_random_pick_sequences() {
    let (mut scene, ids) = three_balls();
    let originals: Vec<Color> = ids
        .iter()
        .map(|id| scene.get(*id).expect("id").material.emissive)
        .collect();
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let pick = match rng.gen_range(0..4) {
            3 => None,
            i => Some(ids[i]),
        };
        hl.update(pick, &mut scene);

        let lit = highlighted(&scene);
        assert!(lit.len() <= 1);
        assert_eq!(lit.first().copied(), pick);
        for (i, id) in ids.iter().enumerate() {
            if Some(*id) != pick {
                assert_eq!(scene.get(*id).expect("id").material.emissive, originals[i]);
            }
        }
    }
}

#[test]
fn removed_highlighted_object_is_a_silent_no_op() {
    let (mut scene, [a, b, _]) = three_balls();
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    hl.update(Some(a), &mut scene);
    scene.remove(a);

    assert_eq!(
        hl.update(Some(b), &mut scene),
        HighlightChange::Switched { from: a, to: b }
    );
    assert_eq!(hl.current(), Some(b));
    assert_eq!(hl.update(None, &mut scene), HighlightChange::Cleared(b));
}

#[test]
fn entering_a_missing_object_stays_idle() {
    let (mut scene, [a, _, _]) = three_balls();
    scene.remove(a);
    let mut hl = HoverHighlight::new(HIGHLIGHT_EMISSIVE_INTENSITY);
    assert_eq!(hl.update(Some(a), &mut scene), HighlightChange::Unchanged);
    assert_eq!(hl.current(), None);
}
