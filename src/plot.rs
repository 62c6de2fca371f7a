// src/plot.rs
//! Plot rendering for the diagnostic routines
//!
//! Thin wrappers over `plotters`: an overlay of labeled trajectories on a
//! linear time axis, and a log-log error-vs-step-size curve. Both write PNG
//! files through the bitmap backend.

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Configuration for customizing plots
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title
    pub title: String,

    /// X-axis label
    pub xlabel: String,

    /// Y-axis label
    pub ylabel: String,

    /// Line thickness in pixels (default: 2)
    pub line_width: u32,

    /// Background color (default: WHITE)
    pub background: RGBColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Sample paths".to_string(),
            xlabel: "t".to_string(),
            ylabel: "y".to_string(),
            line_width: 2,
            background: WHITE,
        }
    }
}

impl PlotConfig {
    /// Color for series at index i, cycling a fixed palette
    fn series_color(&self, index: usize) -> RGBColor {
        let palette = [
            BLUE,
            RED,
            GREEN,
            BLACK,
            MAGENTA,
            CYAN,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];
        palette[index % palette.len()]
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo >= hi {
        // Degenerate data still needs a drawable window.
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Overlay labeled trajectories over a shared time grid and write a PNG
///
/// Series lengths must match the grid length.
pub fn plot_trajectories(
    ts: &[f64],
    series: &[(String, Vec<f64>)],
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let owned_config = config.cloned().unwrap_or_default();
    let config = &owned_config;

    for (label, values) in series {
        assert_eq!(
            ts.len(),
            values.len(),
            "series '{}' must match the time grid length",
            label
        );
    }

    let (t_min, t_max) = value_range(ts.iter().copied());
    let (y_lo, y_hi) = value_range(series.iter().flat_map(|(_, v)| v.iter().copied()));
    let pad = 0.1 * (y_hi - y_lo);
    let (y_min, y_max) = (y_lo - pad, y_hi + pad);

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .draw()?;

    for (i, (label, values)) in series.iter().enumerate() {
        let color = config.series_color(i);
        let width = config.line_width;
        chart
            .draw_series(LineSeries::new(
                ts.iter().zip(values.iter()).map(|(t, v)| (*t, *v)),
                color.stroke_width(width),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Log-log error-vs-step-size curves with slope-annotated labels, as a PNG
///
/// Non-positive values cannot be placed on logarithmic axes; the caller is
/// expected to pass strictly positive step sizes and errors.
pub fn plot_rate(
    dts: &[f64],
    series: &[(String, Vec<f64>)],
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let owned_config = config.cloned().unwrap_or_default();
    let config = &owned_config;

    for (label, values) in series {
        assert_eq!(
            dts.len(),
            values.len(),
            "series '{}' must match the step-size list length",
            label
        );
    }

    let (x_lo, x_hi) = value_range(dts.iter().copied());
    let (y_lo, y_hi) = value_range(series.iter().flat_map(|(_, v)| v.iter().copied()));
    // Pad multiplicatively so the curves stay off the frame on log axes.
    let x_range = (x_lo * 0.8)..(x_hi * 1.25);
    let y_range = (y_lo * 0.5)..(y_hi * 2.0);

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

    chart
        .configure_mesh()
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .draw()?;

    for (i, (label, values)) in series.iter().enumerate() {
        let color = config.series_color(i);
        let width = config.line_width;
        chart
            .draw_series(LineSeries::new(
                dts.iter().zip(values.iter()).map(|(d, v)| (*d, *v)),
                color.stroke_width(width),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
    }

    #[test]
    fn test_series_color_cycles() {
        let config = PlotConfig::default();
        assert_eq!(config.series_color(0), config.series_color(8));
    }

    #[test]
    fn test_plot_trajectories_writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.png");

        let ts = vec![0.0, 1.0, 2.0];
        let series = vec![
            ("a".to_string(), vec![0.0, 0.5, 0.2]),
            ("b".to_string(), vec![0.1, 0.4, 0.3]),
        ];

        plot_trajectories(&ts, &series, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_rate_writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rate.png");

        let dts = vec![0.5, 0.25, 0.125];
        let series = vec![("euler(k=0.5)".to_string(), vec![1e-1, 5e-2, 2.5e-2])];

        plot_rate(&dts, &series, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    #[should_panic(expected = "must match the time grid length")]
    fn test_plot_trajectories_length_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");

        let ts = vec![0.0, 1.0, 2.0];
        let series = vec![("a".to_string(), vec![0.0, 0.5])];

        plot_trajectories(&ts, &series, &path, None).unwrap();
    }
}
