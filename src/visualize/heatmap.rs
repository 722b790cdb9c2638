use ahash::AHashMap;
use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;
use plotters::prelude::*;

use crate::locus::DistanceRecord;

/// Builds the square matrix the heatmap draws: upstream distances above the
/// diagonal, downstream distances below it, NaN where a channel had no
/// data.
pub fn distance_matrix(labels: &[String], records: &[DistanceRecord]) -> Array2<f64> {
    let index: AHashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let n = labels.len();
    let mut matrix = Array2::from_elem((n, n), f64::NAN);
    for record in records {
        let (i, j) = match (index.get(record.a.as_str()), index.get(record.b.as_str())) {
            (Some(&i), Some(&j)) => (i, j),
            _ => continue,
        };
        if let Some(d) = record.upstream {
            matrix[[i, j]] = d;
        }
        if let Some(d) = record.downstream {
            matrix[[j, i]] = d;
        }
    }
    matrix
}

/// Renders the distance matrix as a PNG heatmap with locus ids on both
/// axes; missing comparisons are drawn gray.
pub fn plot_distance_heatmap(
    matrix: &Array2<f64>,
    labels: &[String],
    output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let finite: Array1<f64> = matrix.iter().copied().filter(|v| v.is_finite()).collect();
    let (min_val, max_val) = if finite.is_empty() {
        (0.0, 1.0)
    } else {
        (*finite.min()?, *finite.max()?)
    };

    let n = matrix.nrows();
    let drawing_area = root.margin(40, 40, 60, 120);
    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(
            "K-mer distances (upstream above, downstream below)",
            ("sans-serif", 24),
        )
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..n, 0..n)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|x| labels.get(*x).cloned().unwrap_or_default())
        .y_label_formatter(&|y| labels.get(*y).cloned().unwrap_or_default())
        .x_label_style(("sans-serif", 10).into_font().transform(FontTransform::Rotate90))
        .draw()?;

    for i in 0..n {
        for j in 0..n {
            let val = matrix[[i, j]];
            let style: ShapeStyle = if val.is_nan() {
                RGBColor(150, 150, 150).filled()
            } else {
                let intensity = (val - min_val) / (max_val - min_val + 1e-6);
                HSLColor(intensity, 0.9, 0.4).filled()
            };
            chart.draw_series(std::iter::once(Rectangle::new(
                [(j, i), (j + 1, i + 1)],
                style,
            )))?;
        }
    }

    Ok(())
}
