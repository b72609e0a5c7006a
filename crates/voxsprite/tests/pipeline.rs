//! End-to-end sprite rendering from TOML settings.

use voxsprite::math::Vec3;
use voxsprite::raytrace::{DenseVolume, VolumeSize, VoxelElement};
use voxsprite::{SpriteRenderer, SpriteSettings};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 6x6 floor with a 2x2x4 pillar in the middle.
fn pillar_scene() -> DenseVolume {
    let mut volume = DenseVolume::new(VolumeSize::new(6, 6, 5));
    let up = Vec3::z();
    for x in 0..6 {
        for y in 0..6 {
            volume.set(x, y, 0, VoxelElement::new(1, up, up, 0)).unwrap();
        }
    }
    for x in 2..4 {
        for y in 2..4 {
            for z in 1..5 {
                let n = Vec3::new(x as f64 - 2.5, y as f64 - 2.5, 0.0).normalize();
                volume.set(x, y, z, VoxelElement::new(2, n, n, 1)).unwrap();
            }
        }
    }
    volume
}

#[test]
fn test_square_sprite_from_toml() {
    init_logging();
    let settings = SpriteSettings::from_toml_str(
        r#"
        [sampler]
        strategy = "square"
        accuracy = 3

        [view]
        angle = 45.0
        elevation = 30.0
        width = 20
        "#,
    )
    .unwrap();
    let renderer = SpriteRenderer::new(settings).unwrap();
    let sprite = renderer.render(&pillar_scene());

    assert_eq!(sprite.output.width(), 20);
    assert!(sprite.height > 0);
    assert_eq!(sprite.output.height(), sprite.height);
    assert_eq!(sprite.samples.sample_count(), 20 * sprite.height * 9);

    let samples: Vec<_> = sprite.output.columns().flatten().flatten().collect();
    assert!(samples.iter().any(|s| s.collision && s.index == 1));
    assert!(samples.iter().any(|s| s.collision && s.index == 2));
    assert!(samples.iter().all(|s| (0.0..=1.0).contains(&s.shadowing)));
    // The pillar shades part of the floor.
    assert!(samples
        .iter()
        .any(|s| s.collision && s.index == 1 && s.shadowing > 0.0));
}

#[test]
fn test_seeded_disc_sprites_repeat() {
    init_logging();
    let toml = r#"
        [sampler]
        strategy = "disc"
        accuracy = 3
        overlap = 0.3
        seed = 42

        [view]
        angle = 120.0
        width = 16
    "#;
    let volume = pillar_scene();
    let render = || {
        let settings = SpriteSettings::from_toml_str(toml).unwrap();
        SpriteRenderer::new(settings).unwrap().render(&volume)
    };

    let first = render();
    let second = render();
    assert_eq!(first, second);

    for x in 0..first.output.width() {
        for y in 0..first.height {
            assert!(!first.samples[(x, y)].is_empty());
            assert_eq!(first.output[(x, y)].len(), first.samples[(x, y)].len());
        }
    }
}

#[test]
fn test_flip_matches_mirrored_volume() {
    init_logging();
    // An L-shaped footprint with a post in the corner, and its mirror image
    // across the middle y plane.
    let cells = [
        (0, 0, 0),
        (1, 0, 0),
        (2, 0, 0),
        (3, 0, 0),
        (0, 1, 0),
        (0, 2, 0),
        (0, 0, 1),
    ];
    let size = VolumeSize::new(4, 4, 2);
    let mut volume = DenseVolume::new(size);
    let mut mirrored = DenseVolume::new(size);
    let up = Vec3::z();
    for (x, y, z) in cells {
        let element = VoxelElement::new((1 + x + 4 * y) as u8, up, up, 0);
        volume.set(x, y, z, element).unwrap();
        mirrored.set(x, 3 - y, z, element).unwrap();
    }

    let base = "[sampler]\naccuracy = 2\n[view]\nangle = 30.0\nelevation = 20.0\nwidth = 8\n";
    let plain = SpriteRenderer::new(SpriteSettings::from_toml_str(base).unwrap())
        .unwrap()
        .render(&mirrored);
    let flipped_toml = format!("{base}flip = true\n");
    let flipped = SpriteRenderer::new(SpriteSettings::from_toml_str(&flipped_toml).unwrap())
        .unwrap()
        .render(&volume);

    assert_eq!(flipped.height, plain.height);
    assert!(plain.output.collision_count() > 0);
    for (a, b) in plain
        .output
        .columns()
        .flatten()
        .flatten()
        .zip(flipped.output.columns().flatten().flatten())
    {
        assert_eq!(a.collision, b.collision);
        assert_eq!(a.index, b.index);
        assert_eq!(a.depth, b.depth);
        assert_eq!(a.shadowing, b.shadowing);
    }
}
