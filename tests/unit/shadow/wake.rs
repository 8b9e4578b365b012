use super::*;

fn frames(v: &[u64]) -> Vec<FrameIndex> {
    v.iter().copied().map(FrameIndex).collect()
}

fn wake(nframes: u64, params: WakeParams) -> WakeShadow {
    WakeShadow::setup(nframes, params).unwrap()
}

fn rec(id: u64, phase: Phase) -> DrawRecord {
    DrawRecord::new(ElementId(id), phase)
}

#[test]
fn setup_rounds_wake_length() {
    let w = wake(100, WakeParams::new(0.1));
    assert_eq!(w.wake_length_frames(), 10);
    assert_eq!(w.falloff().len(), 10);
    assert_eq!(w.nframes(), 100);
}

#[test]
fn setup_rejects_empty_animation() {
    assert!(WakeShadow::setup(0, WakeParams::new(0.1)).is_err());
}

#[test]
fn zero_length_wake_selects_nothing() {
    let w = wake(50, WakeParams::new(0.0));
    for i in 1..=50 {
        assert!(w.select_frames(FrameIndex(i)).is_empty());
    }
    assert!(w.falloff().is_empty());
}

#[test]
fn wrapped_wake_at_frame_five() {
    let w = wake(100, WakeParams::new(0.1));
    assert_eq!(
        w.select_frames(FrameIndex(5)),
        frames(&[95, 96, 97, 98, 99, 100, 1, 2, 3, 4])
    );
}

#[test]
fn wrapped_wake_at_first_frame_uses_the_tail() {
    let w = wake(20, WakeParams::new(0.25));
    assert_eq!(w.select_frames(FrameIndex(1)), frames(&[16, 17, 18, 19, 20]));
}

#[test]
fn unwrapped_wake_is_clipped_at_start() {
    let params = WakeParams {
        wrap: false,
        ..WakeParams::new(0.1)
    };
    let w = wake(100, params);
    assert!(w.select_frames(FrameIndex(1)).is_empty());
    assert_eq!(w.select_frames(FrameIndex(4)), frames(&[1, 2, 3]));
    assert_eq!(
        w.select_frames(FrameIndex(50)),
        frames(&[40, 41, 42, 43, 44, 45, 46, 47, 48, 49])
    );
}

#[test]
fn full_length_wrapped_wake_covers_every_frame() {
    let w = wake(4, WakeParams::new(1.0));
    assert_eq!(w.select_frames(FrameIndex(2)), frames(&[2, 3, 4, 1]));
}

#[test]
fn falloff_weights_are_in_unit_interval_and_nearest_heaviest() {
    for ease in Ease::ALL {
        for n in [1usize, 2, 5, 10, 37] {
            let curve = falloff_curve(ease, n);
            assert_eq!(curve.len(), n);
            assert!(curve.iter().all(|&w| w > 0.0 && w <= 1.0), "{ease} n={n}");
            assert!(curve.windows(2).all(|p| p[0] >= p[1]), "{ease} n={n}");
        }
    }
}

#[test]
fn cubic_in_falloff_values() {
    let curve = falloff_curve(Ease::InCubic, 3);
    let expected = [0.75f64.powi(3), 0.5f64.powi(3), 0.25f64.powi(3)];
    for (got, want) in curve.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn weight_for_recency_indexes_nearest_first() {
    let w = wake(10, WakeParams::new(0.3));
    assert_eq!(w.weight_for_recency(1), w.falloff()[0]);
    assert_eq!(w.weight_for_recency(3), w.falloff()[2]);
    assert_eq!(w.weight_for_recency(9), w.falloff()[2]);
}

fn buffer_of(sets: Vec<Vec<DrawRecord>>) -> ShadowBuffer {
    ShadowBuffer {
        layers: vec![sets.into_iter().map(RecordSet::new).collect()],
    }
}

#[test]
fn attenuate_prefers_edge_alpha() {
    let w = wake(10, WakeParams::new(0.2));
    let mut a = rec(1, Phase::Static);
    a.edge_alpha = Some(0.8);
    a.alpha = Some(1.0);
    let mut b = rec(1, Phase::Static);
    b.alpha = Some(1.0);
    let out = w.attenuate(&buffer_of(vec![vec![a], vec![b]]));

    let layer = &out[0];
    assert_eq!(layer.weights, vec![w.falloff()[1], w.falloff()[0]]);
    let rows = &layer.records.rows;
    assert!((rows[0].edge_alpha.unwrap() - 0.8 * w.falloff()[1]).abs() < 1e-12);
    assert_eq!(rows[0].alpha, Some(1.0));
    assert_eq!(rows[1].edge_alpha, None);
    assert_eq!(rows[1].alpha, Some(1.0));
}

#[test]
fn attenuate_uses_alpha_when_no_edge_alpha() {
    let w = wake(10, WakeParams::new(0.1));
    let mut a = rec(1, Phase::Static);
    a.alpha = Some(0.5);
    a.colour = Some(Color::rgba(1.0, 0.0, 0.0, 1.0));
    let out = w.attenuate(&buffer_of(vec![vec![a]]));
    let row = &out[0].records.rows[0];
    assert!((row.alpha.unwrap() - 0.5 * w.falloff()[0]).abs() < 1e-12);
    assert_eq!(row.colour.unwrap().opacity, 1.0);
}

#[test]
fn attenuate_falls_back_to_colour_opacity() {
    let w = wake(10, WakeParams::new(0.1));
    let mut a = rec(1, Phase::Static);
    a.colour = Some(Color::rgba(0.2, 0.4, 0.6, 0.5));
    a.edge_fill = Some(Color::rgb(1.0, 1.0, 1.0));
    let out = w.attenuate(&buffer_of(vec![vec![a]]));
    let row = &out[0].records.rows[0];
    let weight = w.falloff()[0];
    let colour = row.colour.unwrap();
    assert_eq!((colour.r, colour.g, colour.b), (0.2, 0.4, 0.6));
    assert!((colour.opacity - 0.5 * weight).abs() < 1e-12);
    assert!((row.edge_fill.unwrap().opacity - weight).abs() < 1e-12);
    assert!(row.fill.is_none());
}

#[test]
fn attenuate_without_alpha_leaves_opacity_channels() {
    let params = WakeParams {
        alpha: false,
        ..WakeParams::new(0.3)
    };
    let w = wake(10, params);
    let mut a = rec(1, Phase::Static);
    a.alpha = Some(0.7);
    a.edge_alpha = Some(0.6);
    a.colour = Some(Color::rgba(0.1, 0.1, 0.1, 0.9));
    a.size = Some(2.0);
    let out = w.attenuate(&buffer_of(vec![vec![a.clone()], vec![a.clone()]]));
    for row in &out[0].records.rows {
        assert_eq!(row.alpha, a.alpha);
        assert_eq!(row.edge_alpha, a.edge_alpha);
        assert_eq!(row.colour, a.colour);
        assert!(row.size.unwrap() < 2.0);
    }
}

#[test]
fn attenuate_shrinks_every_size_channel() {
    let w = wake(10, WakeParams::new(0.1));
    let mut a = rec(1, Phase::Static);
    a.size = Some(4.0);
    a.edge_size = Some(2.0);
    a.edge_width = Some(1.0);
    a.stroke = Some(0.5);
    let out = w.attenuate(&buffer_of(vec![vec![a]]));
    let row = &out[0].records.rows[0];
    let weight = w.falloff()[0];
    assert!((row.size.unwrap() - 4.0 * weight).abs() < 1e-12);
    assert!((row.edge_size.unwrap() - 2.0 * weight).abs() < 1e-12);
    assert!((row.edge_width.unwrap() - weight).abs() < 1e-12);
    assert!((row.stroke.unwrap() - 0.5 * weight).abs() < 1e-12);
}

#[test]
fn attenuate_without_size_leaves_size_channels() {
    let params = WakeParams {
        size: false,
        ..WakeParams::new(0.1)
    };
    let w = wake(10, params);
    let mut a = rec(1, Phase::Static);
    a.size = Some(4.0);
    a.stroke = Some(0.5);
    let out = w.attenuate(&buffer_of(vec![vec![a.clone()]]));
    let row = &out[0].records.rows[0];
    assert_eq!(row.size, a.size);
    assert_eq!(row.stroke, a.stroke);
}

#[test]
fn colour_override_replaces_present_channels_only() {
    let params = WakeParams {
        colour: Some(Color::rgb(0.0, 0.0, 1.0)),
        alpha: false,
        ..WakeParams::new(0.1)
    };
    let w = wake(10, params);
    let mut a = rec(1, Phase::Static);
    a.colour = Some(Color::rgb(1.0, 0.0, 0.0));
    let b = rec(2, Phase::Static);
    let out = w.attenuate(&buffer_of(vec![vec![a, b]]));
    let rows = &out[0].records.rows;
    assert_eq!(rows[0].colour, Some(Color::rgb(0.0, 0.0, 1.0)));
    assert_eq!(rows[1].colour, None);
}

#[test]
fn attenuate_does_not_touch_input() {
    let w = wake(10, WakeParams::new(0.1));
    let mut a = rec(1, Phase::Static);
    a.size = Some(3.0);
    let buf = buffer_of(vec![vec![a]]);
    let before = buf.clone();
    let _ = w.attenuate(&buf);
    assert_eq!(buf, before);
}

fn shadow_of(rows: Vec<DrawRecord>) -> ShadowLayer {
    let weights = vec![1.0; rows.len()];
    ShadowLayer {
        records: RecordSet::new(rows),
        weights,
    }
}

#[test]
fn merge_skips_excluded_layers() {
    let params = WakeParams {
        exclude_layer: BTreeSet::from([0]),
        ..WakeParams::new(0.1)
    };
    let w = wake(10, params);
    let current = FrameLayers::new(vec![RecordSet::new(vec![rec(1, Phase::Static)])]);
    let shadow = vec![shadow_of(vec![rec(1, Phase::Static), rec(1, Phase::Static)])];
    assert_eq!(w.merge_frame(&current, &shadow), current);
}

#[test]
fn merge_drops_shadow_of_entering_and_exiting_elements() {
    let w = wake(10, WakeParams::new(0.1));
    let current = FrameLayers::new(vec![RecordSet::new(vec![
        rec(1, Phase::Enter),
        rec(2, Phase::Transition),
        rec(3, Phase::Exit),
    ])]);
    let shadow = vec![shadow_of(vec![
        rec(1, Phase::Static),
        rec(2, Phase::Static),
        rec(3, Phase::Static),
        rec(4, Phase::Static),
    ])];
    let merged = w.merge_frame(&current, &shadow);
    let ids: Vec<u64> = merged.layers[0].rows.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, [2, 2, 1, 3]);
    assert_eq!(merged.layers[0].rows[0].phase, Phase::Static);
    assert_eq!(merged.layers[0].rows[1].phase, Phase::Transition);
}

#[test]
fn merge_groups_rows_by_identity() {
    let params = WakeParams {
        exclude_phase: BTreeSet::new(),
        ..WakeParams::new(0.1)
    };
    let w = wake(10, params);
    let current = FrameLayers::new(vec![RecordSet::new(vec![
        rec(1, Phase::Raw),
        rec(2, Phase::Raw),
    ])]);
    let shadow = vec![shadow_of(vec![
        rec(2, Phase::Static),
        rec(1, Phase::Static),
        rec(2, Phase::Static),
        rec(1, Phase::Static),
    ])];
    let merged = w.merge_frame(&current, &shadow);
    let got: Vec<(u64, Phase)> = merged.layers[0]
        .rows
        .iter()
        .map(|r| (r.id.0, r.phase))
        .collect();
    assert_eq!(
        got,
        [
            (2, Phase::Static),
            (2, Phase::Static),
            (2, Phase::Raw),
            (1, Phase::Static),
            (1, Phase::Static),
            (1, Phase::Raw),
        ]
    );
}

#[test]
fn merge_with_empty_shadow_is_current_frame() {
    let w = wake(10, WakeParams::new(0.1));
    let current = FrameLayers::new(vec![
        RecordSet::new(vec![rec(1, Phase::Static), rec(2, Phase::Static)]),
        RecordSet::default(),
    ]);
    assert_eq!(w.merge_frame(&current, &[]), current);
}

#[test]
fn unit_weight_is_identity() {
    let mut a = rec(1, Phase::Static);
    a.colour = Some(Color::rgba(0.3, 0.3, 0.3, 0.6));
    a.fill = Some(Color::rgb(0.9, 0.1, 0.1));
    a.size = Some(2.5);
    a.stroke = Some(1.5);
    let mut b = rec(2, Phase::Static);
    b.alpha = Some(0.4);
    b.edge_width = Some(0.75);

    for rows in [vec![a.clone()], vec![a.clone(), b.clone()], vec![b.clone()]] {
        let mut set = RecordSet::new(rows.clone());
        let weights = vec![1.0; rows.len()];
        fade(&mut set, &weights);
        for r in &mut set.rows {
            shrink(r, 1.0);
        }
        assert_eq!(set.rows, rows);
    }
}
