use super::*;
use crate::model::presets::Preset;

#[test]
fn picture_tokens_roundtrip() {
    for p in [Picture::BlackWhite, Picture::Gradient] {
        assert_eq!(p.token().parse::<Picture>().unwrap(), p);
        assert_eq!(p.to_string(), p.token());
    }
    assert!("color".parse::<Picture>().is_err());
    assert_eq!(serde_json::to_string(&Picture::BlackWhite).unwrap(), "\"bw\"");
    assert_eq!(serde_json::to_string(&Picture::Gradient).unwrap(), "\"gradient\"");
}

#[test]
fn one_shot_render_matches_worked_example() {
    let p = FractalParameters::default();
    let opts = RenderThreading::default();
    let bw = render_picture(&p, 2, Picture::BlackWhite, &opts).unwrap();
    let gradient = render_picture(&p, 2, Picture::Gradient, &opts).unwrap();
    assert_eq!(bw.to_rows(), vec![vec![255, 255], vec![255, 0]]);
    assert_eq!(gradient, bw);
}

#[test]
fn cached_render_evaluates_once_per_grid() {
    let mut cache = FieldCache::new();
    let p = Preset::SierpinskiCarpet.parameters();
    let opts = RenderThreading::default();

    let bw = render_picture_cached(&mut cache, &p, 27, Picture::BlackWhite, &opts).unwrap();
    let gradient = render_picture_cached(&mut cache, &p, 27, Picture::Gradient, &opts).unwrap();
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 1);

    assert_eq!(bw, render_picture(&p, 27, Picture::BlackWhite, &opts).unwrap());
    assert_eq!(gradient, render_picture(&p, 27, Picture::Gradient, &opts).unwrap());
}

#[test]
fn invalid_size_propagates() {
    let err = render_picture(
        &FractalParameters::default(),
        0,
        Picture::Gradient,
        &RenderThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CosmatesqueError::Size(_)));
}
