use wavyte_shadow::{
    Color, DrawRecord, ElementId, FrameIndex, FrameLayers, InMemoryFrames, Phase, Point,
    RecordSet, ShadowConfig, render_frame,
};

fn orbit(nframes: u64) -> InMemoryFrames {
    let frames = (0..nframes)
        .map(|f| {
            let t = f as f64 / nframes as f64 * std::f64::consts::TAU;
            let mut r = DrawRecord::new(ElementId(1), Phase::Transition);
            r.position = Some(Point::new(t.cos(), t.sin()));
            r.colour = Some(Color::rgb(0.2, 0.4, 1.0));
            r.size = Some(6.0);
            FrameLayers::new(vec![RecordSet::new(vec![r])])
        })
        .collect();
    InMemoryFrames::new(frames)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let source = orbit(40);
    let config = ShadowConfig::from_json_str(
        r#"{ "kind": "wake", "wake_length": 0.2, "falloff": "quadratic-in" }"#,
    )?;
    let shadow = config.setup(source.frames.len() as u64)?;

    for f in [1u64, 10, 40] {
        let merged = render_frame(&shadow, &source, FrameIndex(f))?;
        println!("frame {f}:");
        for r in &merged.layers[0].rows {
            let p = r.position.unwrap_or(Point::ORIGIN);
            let alpha = r.colour.map_or(1.0, |c| c.opacity);
            println!(
                "  ({:+.3}, {:+.3}) size={:.3} alpha={alpha:.3}",
                p.x,
                p.y,
                r.size.unwrap_or(0.0)
            );
        }
    }

    Ok(())
}
