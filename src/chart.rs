use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::data::loader;
use crate::data::model::{AssayDataset, SmoothedCurve, FLUORESCENCE_LABEL};
use crate::data::smooth;

// ---------------------------------------------------------------------------
// Chart appearance
// ---------------------------------------------------------------------------

/// Artifact size in pixels.
pub const CHART_SIZE: (u32, u32) = (1200, 800);

/// Soft blue for the raw measurement series.
pub const RAW_COLOR: RGBColor = RGBColor(0x8c, 0xb4, 0xd2);

/// Soft coral for the smoothed trend line.
pub const SMOOTH_COLOR: RGBColor = RGBColor(0xf3, 0xa6, 0x83);

const GRID_COLOR: RGBColor = RGBColor(0xe6, 0xe6, 0xe6);
const PLOT_BG: RGBColor = RGBColor(0xf8, 0xf8, 0xf8);

// ---------------------------------------------------------------------------
// Generation pipeline
// ---------------------------------------------------------------------------

/// The result of one chart generation.
#[derive(Debug, Clone)]
pub struct GeneratedChart {
    pub dataset: AssayDataset,
    pub curve: SmoothedCurve,
    /// Where the PNG artifact was written.
    pub artifact: PathBuf,
}

impl GeneratedChart {
    /// URI of the artifact for the egui image loader.
    pub fn artifact_uri(&self) -> String {
        format!("file://{}", self.artifact.display())
    }
}

/// Run the full pipeline against the default output directory:
/// load CSV → fit spline → render PNG → return the artifact path.
pub fn generate(csv_path: &Path) -> Result<GeneratedChart> {
    let out_dir = default_output_dir()?;
    generate_into(csv_path, &out_dir)
}

/// Same as [`generate`] with an explicit output directory.
///
/// Validation and smoothing happen before the directory is created, so a
/// rejected dataset leaves the filesystem untouched. An existing artifact of
/// the same name is overwritten.
pub fn generate_into(csv_path: &Path, out_dir: &Path) -> Result<GeneratedChart> {
    let dataset = loader::load_csv(csv_path)?;
    let curve = smooth::smooth_curve(&dataset)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let artifact = out_dir.join(format!("{}.png", dataset.sample_name));
    render_png(&dataset, &curve, &artifact)?;

    log::info!(
        "saved chart for '{}' ({} points) to {}",
        dataset.sample_name,
        dataset.len(),
        artifact.display()
    );

    Ok(GeneratedChart {
        dataset,
        curve,
        artifact,
    })
}

/// The `Graph` directory next to the executable.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating executable")?;
    let dir = exe
        .parent()
        .context("executable has no parent directory")?;
    Ok(dir.join("Graph"))
}

// ---------------------------------------------------------------------------
// PNG rendering
// ---------------------------------------------------------------------------

/// Render the annotated chart to a PNG file: raw data as connected circular
/// markers, smoothed trend as a dashed line, title, axis labels, light grid
/// and a legend.
pub fn render_png(dataset: &AssayDataset, curve: &SmoothedCurve, path: &Path) -> Result<()> {
    let (x_lo, x_hi) = padded_range(min_max(&dataset.x));
    let (y_lo, y_hi) = padded_range(min_max_2(&dataset.y, &curve.y));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&dataset.sample_name, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart.plotting_area().fill(&PLOT_BG)?;

    chart
        .configure_mesh()
        .x_desc(dataset.axis.label())
        .y_desc(FLUORESCENCE_LABEL)
        .bold_line_style(&GRID_COLOR)
        .light_line_style(&PLOT_BG)
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 16))
        .draw()?;

    let raw: Vec<(f64, f64)> = dataset
        .x
        .iter()
        .zip(dataset.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    chart
        .draw_series(LineSeries::new(raw.iter().copied(), RAW_COLOR.stroke_width(2)))?
        .label("Original Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RAW_COLOR.stroke_width(2)));
    chart.draw_series(
        raw.iter()
            .map(|&(x, y)| Circle::new((x, y), 4, RAW_COLOR.filled())),
    )?;

    let trend: Vec<(f64, f64)> = curve
        .x
        .iter()
        .zip(curve.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    chart
        .draw_series(DashedLineSeries::new(
            trend,
            8,
            5,
            SMOOTH_COLOR.stroke_width(3),
        ))?
        .label("Smooth Trend")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], SMOOTH_COLOR.stroke_width(3))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&GRID_COLOR)
        .label_font(("sans-serif", 18))
        .draw()?;

    root.present()
        .with_context(|| format!("writing chart image {}", path.display()))?;
    Ok(())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

fn min_max_2(a: &[f64], b: &[f64]) -> (f64, f64) {
    let (lo_a, hi_a) = min_max(a);
    let (lo_b, hi_b) = min_max(b);
    (lo_a.min(lo_b), hi_a.max(hi_b))
}

/// Pad a range so markers do not sit on the chart border. Degenerate ranges
/// get a fixed half-unit of padding.
fn padded_range((min_val, max_val): (f64, f64)) -> (f64, f64) {
    let range = (max_val - min_val).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.05 };
    (min_val - padding, max_val + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::DatasetError;
    use crate::data::model::IndependentAxis;
    use crate::data::smooth::{SmoothError, CURVE_POINTS};
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const SAMPLE1: &str = "Time_Sec,Fluorescence\n0,1.0\n1,2.0\n2,1.5\n3,3.0\n";

    #[test]
    fn generates_artifact_for_kinetics_sample() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "sample1.csv", SAMPLE1);
        let out = dir.path().join("Graph");

        let chart = generate_into(&csv, &out).unwrap();

        assert_eq!(chart.artifact, out.join("sample1.png"));
        assert_eq!(chart.dataset.axis, IndependentAxis::TimeSeconds);
        assert_eq!(chart.dataset.axis.label(), "Time (Seconds)");
        assert_eq!(chart.curve.x.len(), CURVE_POINTS);

        let meta = std::fs::metadata(&chart.artifact).unwrap();
        assert!(meta.len() > 0);

        // The artifact is a decodable PNG of the advertised size.
        let img = image::open(&chart.artifact).unwrap();
        assert_eq!((img.width(), img.height()), CHART_SIZE);
    }

    #[test]
    fn regenerating_overwrites_the_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "sample1.csv", SAMPLE1);
        let out = dir.path().join("Graph");

        let first = generate_into(&csv, &out).unwrap();
        let second = generate_into(&csv, &out).unwrap();

        assert_eq!(first.artifact, second.artifact);
        assert!(second.artifact.exists());
    }

    #[test]
    fn invalid_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "bad.csv", "Well,Fluorescence\nA1,0.2\n");
        let out = dir.path().join("Graph");

        let err = generate_into(&csv, &out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidDataset)
        );
        assert!(!out.exists());
    }

    #[test]
    fn degenerate_spline_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(
            dir.path(),
            "dup.csv",
            "Time_Sec,Fluorescence\n0,1.0\n1,2.0\n1,2.1\n3,3.0\n",
        );
        let out = dir.path().join("Graph");

        let err = generate_into(&csv, &out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SmoothError>(),
            Some(&SmoothError::NotStrictlyIncreasing { index: 2 })
        );
        assert!(!out.exists());
    }

    #[test]
    fn wavelength_sample_uses_nm_label() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(
            dir.path(),
            "emission.csv",
            "Wavelength,Fluorescence\n450,0.2\n460,0.9\n470,0.4\n480,0.1\n490,0.05\n",
        );
        let out = dir.path().join("Graph");

        let chart = generate_into(&csv, &out).unwrap();
        assert_eq!(chart.dataset.axis.label(), "Wavelength (nm)");
        assert_eq!(chart.artifact, out.join("emission.png"));
        assert!(chart.artifact.exists());
    }
}
