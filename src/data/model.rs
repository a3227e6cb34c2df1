// ---------------------------------------------------------------------------
// IndependentAxis – which x-axis column the dataset carries
// ---------------------------------------------------------------------------

/// Name of the required dependent-variable column.
pub const FLUORESCENCE_COLUMN: &str = "Fluorescence";

/// Label for the dependent (y) axis.
pub const FLUORESCENCE_LABEL: &str = "Fluorescence (unit)";

/// The recognized independent-variable columns.
///
/// Detection scans [`IndependentAxis::ALL`] in order, so `Time_Sec` wins when
/// a file carries both columns. A new axis type only needs a new variant and
/// an entry in `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndependentAxis {
    TimeSeconds,
    Wavelength,
}

impl IndependentAxis {
    /// All variants in detection-priority order.
    pub const ALL: [IndependentAxis; 2] =
        [IndependentAxis::TimeSeconds, IndependentAxis::Wavelength];

    /// CSV column name for this axis.
    pub fn column(&self) -> &'static str {
        match self {
            IndependentAxis::TimeSeconds => "Time_Sec",
            IndependentAxis::Wavelength => "Wavelength",
        }
    }

    /// Human-readable axis label used in charts.
    pub fn label(&self) -> &'static str {
        match self {
            IndependentAxis::TimeSeconds => "Time (Seconds)",
            IndependentAxis::Wavelength => "Wavelength (nm)",
        }
    }

    /// Find the first recognized axis column in a CSV header row.
    /// Returns the axis and its column index.
    pub fn detect(headers: &[String]) -> Option<(IndependentAxis, usize)> {
        IndependentAxis::ALL.iter().find_map(|axis| {
            headers
                .iter()
                .position(|h| h == axis.column())
                .map(|idx| (*axis, idx))
        })
    }
}

// ---------------------------------------------------------------------------
// AssayDataset – one loaded CSV file
// ---------------------------------------------------------------------------

/// A single assay measurement series parsed from a CSV file.
#[derive(Debug, Clone)]
pub struct AssayDataset {
    /// Input file stem, used as chart title and artifact name.
    pub sample_name: String,
    /// Which independent-variable column was found.
    pub axis: IndependentAxis,
    /// Independent values (x) in file order.
    pub x: Vec<f64>,
    /// Fluorescence values (y) – same length as `x`.
    pub y: Vec<f64>,
}

impl AssayDataset {
    /// Number of measurement rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SmoothedCurve – spline evaluated on a dense grid
// ---------------------------------------------------------------------------

/// The smoothed trend, evaluated at [`crate::data::smooth::CURVE_POINTS`]
/// uniformly spaced x values. Recomputed per generation, never persisted.
#[derive(Debug, Clone)]
pub struct SmoothedCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
