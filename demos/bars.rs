//! Render a small grouped bar chart onto two reference canvases and print
//! what each surface received.
//!
//! Run with `RUST_LOG=barmark=debug cargo run --example bars --features tracing`
//! to see the per-split log lines.

use barmark::{
    Attribute, BarMark, Canvas, Column, Datum, GroupKey, Mapped, Orientation, RowTable, ScaleFailure, Scales, Split,
    StyleConfig, Surface, SurfaceId, plot_bars,
};

/// Lay out one facet the way a grouping stage would, using the mark's width
/// and baseline for every row.
fn facet(mark: &BarMark, orient: Orientation, values: &[f64], groups: &[&str]) -> Result<RowTable, barmark::BarError> {
    let n = values.len();
    RowTable::from_columns([
        (orient.position_column(), Column::from((0..n).map(|i| i as f64).collect::<Vec<_>>())),
        (orient.value_column(), Column::from(values.to_vec())),
        ("width", Column::from(vec![mark.width; n])),
        ("baseline", Column::from(vec![mark.baseline; n])),
        ("color", Column::from(groups.to_vec())),
    ])
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let orient = std::env::args()
        .nth(1)
        .map(|s| s.parse::<Orientation>())
        .transpose()?
        .unwrap_or(Orientation::Vertical);

    // Group labels pick palette entries
    let scales = Scales::new().with(Attribute::Color, |values: &Column| -> Result<Mapped, ScaleFailure> {
        match values {
            Column::Labels(labels) => Ok(Mapped::Labels(
                labels.iter().map(|l| if l == "a" { "C0".into() } else { "C1".into() }).collect(),
            )),
            Column::Numbers(_) => Err("group labels expected".into()),
        }
    });

    let config = StyleConfig::default();
    for mark in [BarMark::bar(), BarMark::bars()] {
        let mut surfaces = vec![Canvas::new(640.0, 480.0, 100.0), Canvas::new(320.0, 480.0, 100.0)];
        let splits = vec![
            Split::new(facet(&mark, orient, &[3.0, 0.0, 5.0, 2.5], &["a", "b", "a", "b"])?, SurfaceId(0))
                .with_key(GroupKey::from([("col".to_string(), Datum::from("left"))])),
            Split::new(facet(&mark, orient, &[1.0, 4.0], &["b", "a"])?, SurfaceId(1))
                .with_key(GroupKey::from([("col".to_string(), Datum::from("right"))])),
        ];
        let summary = plot_bars(&mark, splits, &scales, orient, &mut surfaces, &config)?;
        println!("=== {:?} ({orient}) ===", mark.strategy);
        println!("{summary:?}");

        for (i, surface) in surfaces.iter_mut().enumerate() {
            surface.autoscale();
            println!("surface {i}: view {:?}", surface.view_limits());
            for shape in surface.shapes() {
                println!(
                    "  bar at ({:.2}, {:.2}) size ({:.2}, {:.2}) fill {} edge {} {}",
                    shape.rect.x(),
                    shape.rect.y(),
                    shape.rect.w(),
                    shape.rect.h(),
                    shape.style.fill_color,
                    shape.style.edge_color,
                    shape.visible_edge_width()
                );
            }
            for collection in surface.collections() {
                for bar in &collection.members {
                    println!(
                        "  batched bar at ({:.2}, {:.2}) size ({:.2}, {:.2}) edge {}",
                        bar.rect.x(),
                        bar.rect.y(),
                        bar.rect.w(),
                        bar.rect.h(),
                        bar.style.edge_width
                    );
                }
            }
        }
    }
    Ok(())
}
