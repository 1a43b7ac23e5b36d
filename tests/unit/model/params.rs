use super::*;

fn triangle_3x3() -> FractalParameters {
    FractalParameters::new(
        CoefficientMatrix::from_array([[0, 0, 0], [0, 0, 1], [0, 1, 0]]),
        2,
        [1, 2, 3, 4],
    )
    .unwrap()
}

#[test]
fn rejects_small_modulus() {
    for m in [0, 1] {
        let err = FractalParameters::new(CoefficientMatrix::from_array([[0]]), m, [1]).unwrap_err();
        assert!(matches!(err, CosmatesqueError::Parameter(_)));
    }
}

#[test]
fn summary_drops_self_cell_and_hidden_residues() {
    assert_eq!(
        triangle_3x3().summary(),
        "[[0, 0, 0], [0, 0, 1], [0, 1]], modulus=2, white_residues=[1]"
    );
    assert_eq!(
        FractalParameters::default().summary(),
        "[[0, 1], [1]], modulus=2, white_residues=[1]"
    );

    let none = FractalParameters::default().with_white_residues([]);
    assert!(none.summary().ends_with("white_residues=[]"));
}

#[test]
fn raising_modulus_reveals_staged_residues() {
    let p = triangle_3x3().with_modulus(4).unwrap();
    assert_eq!(p.visible_white_residues().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(triangle_3x3().with_modulus(1).is_err());
}

#[test]
fn inversion_flips_only_visible_residues_and_keeps_staged_ones() {
    let p = triangle_3x3().with_modulus(3).unwrap();
    let inv = p.with_inverted_white_residues();
    assert_eq!(
        inv.white_residues().iter().copied().collect::<Vec<_>>(),
        vec![0, 3, 4]
    );
    assert_eq!(inv.with_inverted_white_residues(), p);
}

#[test]
fn reduction_applies_modulus_to_coefficients() {
    let p = FractalParameters::new(CoefficientMatrix::from_array([[3, 4], [5, 0]]), 3, [0])
        .unwrap()
        .with_reduced_coefficients()
        .unwrap();
    assert_eq!(p.coefficients().to_rows(), vec![vec![0, 1], vec![2, 0]]);
}

#[test]
fn json_document_roundtrip_and_validation() {
    let p = FractalParameters::from_json_str(
        r#"{ "coefficients": [[0, 1], [1, 0]], "modulus": 2, "white_residues": [1] }"#,
    )
    .unwrap();
    assert_eq!(p, FractalParameters::default());

    let json = p.to_json_pretty().unwrap();
    assert_eq!(FractalParameters::from_json_str(&json).unwrap(), p);

    for malformed in [
        r#"{ "coefficients": [[0]], "modulus": 2, "extra": true }"#,
        r#"{ "coefficients": [[0]], "modulus": "two" }"#,
        r#"{ "coefficients": [[0]] "#,
        "[1, 2]",
    ] {
        let err = FractalParameters::from_json_str(malformed).unwrap_err();
        assert!(matches!(err, CosmatesqueError::Serde(_)), "{malformed}: {err}");
    }
}

#[test]
fn json_document_with_invalid_values_is_a_parameter_error() {
    for invalid in [
        r#"{ "coefficients": [[0, 1], [1]], "modulus": 2 }"#,
        r#"{ "coefficients": [], "modulus": 2 }"#,
        r#"{ "coefficients": [[0, 1], [1, 0]], "modulus": 1 }"#,
    ] {
        let err = FractalParameters::from_json_str(invalid).unwrap_err();
        assert!(matches!(err, CosmatesqueError::Parameter(_)), "{invalid}: {err}");
        assert!(err.to_string().starts_with("parameter error:"), "{err}");
    }
}

fn rng(seed: u64) -> rand::rngs::StdRng {
    rand::SeedableRng::seed_from_u64(seed)
}

#[test]
fn default_white_residues_leave_only_zero_black() {
    let p = FractalParameters::default()
        .with_modulus(5)
        .unwrap()
        .with_default_white_residues();
    assert_eq!(p.visible_white_residues().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[test]
fn random_modulus_stays_in_range_and_keeps_the_rest() {
    let p = triangle_3x3();
    let mut r = rng(1);
    let mut seen = BTreeSet::new();
    for _ in 0..200 {
        let q = p.with_random_modulus(&mut r);
        assert!((2..=MAX_MODULUS).contains(&q.modulus()));
        assert_eq!(q.coefficients(), p.coefficients());
        assert_eq!(q.white_residues(), p.white_residues());
        seen.insert(q.modulus());
    }
    assert_eq!(seen.len(), (MAX_MODULUS - 1) as usize);
}

#[test]
fn random_coefficients_are_reduced_with_zero_self_cell() {
    let p = triangle_3x3().with_modulus(5).unwrap();
    let mut r = rng(2);
    for _ in 0..50 {
        let q = p.with_random_coefficients(&mut r, false);
        assert_eq!(q.reach(), 3);
        assert_eq!(q.coefficients().self_coefficient(), 0);
        assert!(q.coefficients().rows().flatten().all(|&c| c < 5));
        assert_eq!(q.modulus(), 5);
    }
}

#[test]
fn symmetric_random_coefficients_mirror_the_diagonal() {
    let p = triangle_3x3().with_modulus(4).unwrap();
    let mut r = rng(3);
    for _ in 0..50 {
        let c = p.with_random_coefficients(&mut r, true).coefficients().clone();
        for row in 0..c.reach() {
            for col in 0..c.reach() {
                assert_eq!(c.get(row, col), c.get(col, row), "{c}");
            }
        }
        assert_eq!(c.self_coefficient(), 0);
    }
}

#[test]
fn random_coefficients_follow_the_seed() {
    let p = triangle_3x3().with_modulus(3).unwrap();
    assert_eq!(
        p.with_random_coefficients(&mut rng(9), true),
        p.with_random_coefficients(&mut rng(9), true)
    );
}

#[test]
fn random_white_residues_change_and_use_both_colours() {
    let mut r = rng(4);
    for modulus in 2..=MAX_MODULUS {
        let mut p = triangle_3x3().with_modulus(modulus).unwrap();
        for _ in 0..100 {
            let q = p.with_random_white_residues(&mut r);
            let old: Vec<u32> = p.visible_white_residues().collect();
            let new: Vec<u32> = q.visible_white_residues().collect();
            assert_ne!(new, old);
            assert!(!new.is_empty() && new.len() < modulus as usize, "{new:?}");
            assert!(q.white_residues().iter().all(|&w| w < MAX_MODULUS));
            p = q;
        }
    }
}

#[test]
fn random_white_residues_cover_large_moduli() {
    let p = triangle_3x3().with_modulus(7).unwrap();
    let q = p.with_random_white_residues(&mut rng(5));
    assert!(q.white_residues().iter().all(|&w| w < 7));
    let visible = q.visible_white_residues().count();
    assert!(visible > 0 && visible < 7);
}
