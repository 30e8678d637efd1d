//! Epidemic curve model, the second stage of the two-stage pipeline.
//!
//! Each country's case curve is a superposition of a few waves on top of a
//! small endemic baseline. Waves draw onset, duration and peak amplitude
//! from the seeded stream within population-scaled bounds; the amplitude of
//! a wave is damped by the vaccination coverage in effect at its peak.
//! Deaths and recoveries are lagged fractions of the case series.

use chrono::NaiveDate;
use rand_distr::LogNormal;

use crate::context::Context;
use crate::countries::CountryProfile;
use crate::define_rng;
use crate::parameters::ParametersValues;
use crate::random::ContextRandomExt;

define_rng!(CasesRng);

/// Spread of the log-normal multiplier applied to wave peak amplitudes.
const PEAK_SIGMA: f64 = 0.5;
/// Clamp on the log-normal multiplier, so a single draw cannot produce a
/// degenerate or absurd wave.
const PEAK_MULT_MIN: f64 = 0.25;
const PEAK_MULT_MAX: f64 = 4.0;

/// Daily case, death and recovery series for one country. Cumulative and
/// active fields are derived later by the consistency pass.
pub struct CaseSeries {
    pub daily_cases: Vec<i64>,
    pub daily_deaths: Vec<i64>,
    pub daily_recovered: Vec<i64>,
}

struct Wave {
    peak_day: f64,
    sigma: f64,
    amplitude: f64,
}

/// Generates the case curve for one country, damping later waves by the
/// coverage trajectory computed in the vaccination stage.
pub fn generate_series(
    context: &Context,
    params: &ParametersValues,
    country: &CountryProfile,
    dates: &[NaiveDate],
    coverage: &[f64],
) -> CaseSeries {
    let n = dates.len();
    let mut series = CaseSeries {
        daily_cases: vec![0; n],
        daily_deaths: vec![0; n],
        daily_recovered: vec![0; n],
    };
    if n == 0 {
        return series;
    }

    let population = country.population as f64;
    let horizon = n as i64;

    let wave_count = context.sample_range(
        CasesRng,
        params.wave_count_min..=params.wave_count_max,
    );
    let peak_dist = LogNormal::new(0.0, PEAK_SIGMA).unwrap();

    let mut waves = Vec::with_capacity(wave_count as usize);
    for _ in 0..wave_count {
        let duration: i64 = context.sample_range(
            CasesRng,
            params.wave_duration_min..=params.wave_duration_max,
        );
        // Onsets may fall before the grid or near its end; partial, clipped
        // waves are valid.
        let onset: i64 = context.sample_range(CasesRng, -duration / 2..horizon);
        let peak_day = onset as f64 + duration as f64 / 2.0;
        let sigma = duration as f64 / 6.0;

        let mult = context
            .sample_distr(CasesRng, peak_dist)
            .clamp(PEAK_MULT_MIN, PEAK_MULT_MAX);
        // Coverage in effect at the wave peak suppresses its amplitude.
        let peak_index = (peak_day as i64).clamp(0, horizon - 1) as usize;
        let damping = 1.0 - params.vaccine_efficacy * coverage[peak_index];
        let amplitude = population * params.peak_attack_fraction * mult * damping;

        waves.push(Wave {
            peak_day,
            sigma,
            amplitude,
        });
    }

    // A small endemic baseline keeps the curve alive between waves.
    let baseline = population * 2e-6 * context.sample_range(CasesRng, 0.5..1.5);

    let noise = params.daily_noise;
    for i in 0..n {
        let t = i as f64;
        let mut expected = baseline;
        for wave in &waves {
            let z = (t - wave.peak_day) / wave.sigma;
            expected += wave.amplitude * (-0.5 * z * z).exp();
        }
        let jitter = 1.0 + context.sample_range(CasesRng, -noise..=noise);
        series.daily_cases[i] = (expected * jitter).round().max(0.0) as i64;
    }

    // Deaths and recoveries are lagged fractions of the case series; the
    // first lag window reports zero, and the consistency pass has the final
    // word on active-case non-negativity.
    let death_lag = params.death_lag_days as usize;
    let recovery_lag = params.recovery_lag_days as usize;
    for i in 0..n {
        if i >= death_lag {
            let fraction = context.sample_range(
                CasesRng,
                params.case_fatality_min..=params.case_fatality_max,
            );
            series.daily_deaths[i] =
                (series.daily_cases[i - death_lag] as f64 * fraction).round() as i64;
        }
        if i >= recovery_lag {
            let fraction = context.sample_range(
                CasesRng,
                params.recovery_fraction_min..=params.recovery_fraction_max,
            );
            series.daily_recovered[i] =
                (series.daily_cases[i - recovery_lag] as f64 * fraction).round() as i64;
        }
    }

    series
}
