//! Writes deterministic sample CSVs for manual testing of the chart tool:
//! a binding-kinetics trace over `Time_Sec` and an emission spectrum over
//! `Wavelength`.

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Saturating binding curve sampled every 5 seconds for 2 minutes.
fn write_kinetics(path: &str, rng: &mut SimpleRng) -> usize {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    writer
        .write_record(["Time_Sec", "Fluorescence"])
        .expect("Failed to write header");

    let plateau = 850.0;
    let tau = 35.0;
    let baseline = 40.0;

    let mut rows = 0;
    for i in 0..=24 {
        let t = i as f64 * 5.0;
        let signal = baseline + plateau * (1.0 - (-t / tau).exp());
        let value = signal + rng.gauss(0.0, 12.0);
        writer
            .write_record([format!("{t}"), format!("{value:.3}")])
            .expect("Failed to write row");
        rows += 1;
    }
    writer.flush().expect("Failed to flush CSV");
    rows
}

/// Two overlapping emission peaks between 450 and 650 nm.
fn write_spectrum(path: &str, rng: &mut SimpleRng) -> usize {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    writer
        .write_record(["Wavelength", "Fluorescence"])
        .expect("Failed to write header");

    let peaks = [(520.0, 18.0, 950.0), (575.0, 30.0, 420.0)];

    let mut rows = 0;
    for i in 0..=100 {
        let wavelength = 450.0 + i as f64 * 2.0;
        let signal: f64 = peaks
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(wavelength, mu, sigma, amp))
            .sum();
        let value = 25.0 + signal + rng.gauss(0.0, 8.0);
        writer
            .write_record([format!("{wavelength}"), format!("{value:.3}")])
            .expect("Failed to write row");
        rows += 1;
    }
    writer.flush().expect("Failed to flush CSV");
    rows
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let kinetics_rows = write_kinetics("sample_kinetics.csv", &mut rng);
    let spectrum_rows = write_spectrum("sample_spectrum.csv", &mut rng);

    println!("Wrote {kinetics_rows} rows to sample_kinetics.csv");
    println!("Wrote {spectrum_rows} rows to sample_spectrum.csv");
}
