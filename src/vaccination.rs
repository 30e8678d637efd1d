//! Vaccination rollout model, the first stage of the two-stage pipeline.
//!
//! Each country gets a logistic first-dose ramp toward a coverage ceiling
//! below its population, a lagged second-dose series and a booster series
//! that trails second doses. The resulting coverage trajectory is passed
//! forward to the epidemic curve model, which damps later wave amplitudes
//! in proportion to it.

use chrono::NaiveDate;

use crate::context::Context;
use crate::countries::CountryProfile;
use crate::define_rng;
use crate::parameters::ParametersValues;
use crate::random::ContextRandomExt;

define_rng!(VaccinationRng);

/// Daily dose series for one country over the full date grid, plus the
/// first-dose coverage trajectory consumed by the epidemic curve model.
pub struct VaccinationSeries {
    pub daily_dose1: Vec<i64>,
    pub daily_dose2: Vec<i64>,
    pub daily_booster: Vec<i64>,
    /// Fraction of the population with a first dose, per grid day, in [0, 1].
    pub coverage: Vec<f64>,
}

/// Generates the dose series for one country. All dates before the rollout
/// start carry zero doses; the grid itself always spans the full range.
pub fn generate_series(
    context: &Context,
    params: &ParametersValues,
    country: &CountryProfile,
    dates: &[NaiveDate],
) -> VaccinationSeries {
    let n = dates.len();
    let mut series = VaccinationSeries {
        daily_dose1: vec![0; n],
        daily_dose2: vec![0; n],
        daily_booster: vec![0; n],
        coverage: vec![0.0; n],
    };
    if n == 0 {
        return series;
    }

    // Index of the first grid day on or after the rollout start. A range
    // that ends before the rollout produces an all-zero table for this
    // country without consuming any draws.
    let offset = (params.vaccination_start - dates[0]).num_days().max(0);
    if offset >= n as i64 {
        return series;
    }
    let offset = usize::try_from(offset).unwrap();

    let population = country.population as f64;
    let ceiling = population
        * context.sample_range(
            VaccinationRng,
            params.coverage_ceiling_min..=params.coverage_ceiling_max,
        );
    // Logistic ramp shape, in days since rollout start.
    let midpoint: f64 = context.sample_range(VaccinationRng, 240.0..360.0);
    let tau: f64 = context.sample_range(VaccinationRng, 45.0..90.0);
    let dose2_lag: i64 = context.sample_range(VaccinationRng, 30..=60);
    let dose2_fraction: f64 = context.sample_range(VaccinationRng, 0.85..0.98);
    let booster_lag: i64 = context.sample_range(VaccinationRng, 210..=300);
    let booster_fraction: f64 = context.sample_range(VaccinationRng, 0.35..0.65);

    let logistic = |t: f64| ceiling / (1.0 + (-(t - midpoint) / tau).exp());

    let noise = params.daily_noise;
    let mut cumulative_dose1 = 0i64;
    for i in offset..n {
        let t = (i - offset) as i64;
        let target_increment = logistic(t as f64) - logistic(t as f64 - 1.0);
        let jitter = 1.0 + context.sample_range(VaccinationRng, -noise..=noise);
        series.daily_dose1[i] = (target_increment * jitter).round().max(0.0) as i64;

        // Second doses follow first doses after a fixed per-country lag.
        if t >= dose2_lag {
            let lagged = series.daily_dose1[i - dose2_lag as usize] as f64;
            let jitter = 1.0 + context.sample_range(VaccinationRng, -noise..=noise);
            series.daily_dose2[i] = (lagged * dose2_fraction * jitter).round().max(0.0) as i64;
        }

        // Boosters trail the second-dose series.
        if t >= booster_lag {
            let lagged = series.daily_dose2[i - (booster_lag - dose2_lag) as usize] as f64;
            let jitter = 1.0 + context.sample_range(VaccinationRng, -noise..=noise);
            series.daily_booster[i] =
                (lagged * booster_fraction * jitter).round().max(0.0) as i64;
        }

        cumulative_dose1 += series.daily_dose1[i];
        series.coverage[i] = (cumulative_dose1 as f64 / population).min(1.0);
    }

    series
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::countries::COUNTRIES;
    use crate::generator::date_grid;

    fn test_context(seed: u64) -> Context {
        let mut context = Context::new();
        context.init_random(seed);
        context
    }

    fn default_grid(params: &ParametersValues) -> Vec<NaiveDate> {
        date_grid(params.start_date, params.end_date).unwrap()
    }

    #[test]
    fn zero_doses_before_rollout_start() {
        let params = ParametersValues::default();
        let context = test_context(42);
        let dates = default_grid(&params);
        let series = generate_series(&context, &params, &COUNTRIES[0], &dates);

        for (i, date) in dates.iter().enumerate() {
            if *date < params.vaccination_start {
                assert_eq!(series.daily_dose1[i], 0);
                assert_eq!(series.daily_dose2[i], 0);
                assert_eq!(series.daily_booster[i], 0);
                assert_eq!(series.coverage[i], 0.0);
            }
        }
    }

    #[test]
    fn dailies_are_non_negative_and_coverage_bounded() {
        let params = ParametersValues::default();
        let context = test_context(42);
        let dates = default_grid(&params);
        for country in &COUNTRIES {
            let series = generate_series(&context, &params, country, &dates);
            for i in 0..dates.len() {
                assert!(series.daily_dose1[i] >= 0);
                assert!(series.daily_dose2[i] >= 0);
                assert!(series.daily_booster[i] >= 0);
                assert!((0.0..=1.0).contains(&series.coverage[i]));
            }
        }
    }

    #[test]
    fn coverage_is_monotone() {
        let params = ParametersValues::default();
        let context = test_context(42);
        let dates = default_grid(&params);
        let series = generate_series(&context, &params, &COUNTRIES[1], &dates);
        for pair in series.coverage.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn rollout_reaches_meaningful_coverage() {
        // Over the default five-year range the ramp should approach its
        // ceiling for every country.
        let params = ParametersValues::default();
        let context = test_context(42);
        let dates = default_grid(&params);
        for country in &COUNTRIES {
            let series = generate_series(&context, &params, country, &dates);
            let final_coverage = *series.coverage.last().unwrap();
            assert!(
                final_coverage > 0.4,
                "{} only reached coverage {}",
                country.name,
                final_coverage
            );
        }
    }

    #[test]
    fn range_before_rollout_is_all_zero() {
        let params = ParametersValues {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
            ..Default::default()
        };
        let context = test_context(42);
        let dates = default_grid(&params);
        let series = generate_series(&context, &params, &COUNTRIES[0], &dates);
        assert!(series.daily_dose1.iter().all(|&v| v == 0));
        assert!(series.coverage.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn same_seed_reproduces_series() {
        let params = ParametersValues::default();
        let dates = default_grid(&params);

        let context_a = test_context(42);
        let a = generate_series(&context_a, &params, &COUNTRIES[2], &dates);
        let context_b = test_context(42);
        let b = generate_series(&context_b, &params, &COUNTRIES[2], &dates);

        assert_eq!(a.daily_dose1, b.daily_dose1);
        assert_eq!(a.daily_dose2, b.daily_dose2);
        assert_eq!(a.daily_booster, b.daily_booster);
    }
}
