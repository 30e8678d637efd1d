//! Hospital demand and capacity model for the state-reporting country.
//!
//! Admissions are a bounded fraction of the country's daily case load,
//! split across states by static share weights. Capacity is generated as a
//! slowly varying baseline proportional to the country's bed stock,
//! independent of demand, so demand may legitimately exceed supply.

use chrono::NaiveDate;

use crate::context::Context;
use crate::countries::CountryProfile;
use crate::define_rng;
use crate::parameters::ParametersValues;
use crate::random::ContextRandomExt;

define_rng!(HospitalRng);

/// Period, in days, of the slow seasonal swing applied to bed availability.
const CAPACITY_PERIOD_DAYS: f64 = 28.0;
/// Relative amplitude of that swing.
const CAPACITY_SWING: f64 = 0.1;

/// Daily hospital series for one state.
pub struct StateSeries {
    pub state: &'static str,
    pub admissions: Vec<i64>,
    pub icu_admissions: Vec<i64>,
    pub ventilator_usage: Vec<i64>,
    pub available_beds: Vec<i64>,
    pub available_icu_beds: Vec<i64>,
}

/// Generates the per-state hospital series, driven by the reporting
/// country's daily case curve.
pub fn generate_series(
    context: &Context,
    params: &ParametersValues,
    country: &CountryProfile,
    states: &[&'static str],
    dates: &[NaiveDate],
    country_daily_cases: &[i64],
) -> Vec<StateSeries> {
    let n = dates.len();

    // Static state shares of the country's case load, drawn once and
    // normalized so they partition the total.
    let raw_shares: Vec<f64> = states
        .iter()
        .map(|_| context.sample_range(HospitalRng, 0.5..1.5))
        .collect();
    let share_total: f64 = raw_shares.iter().sum();

    let total_beds = country.hospital_beds_per_1000 * country.population as f64 / 1000.0;

    let noise = params.daily_noise;
    let mut result = Vec::with_capacity(states.len());
    for (state_index, &state) in states.iter().enumerate() {
        let share = raw_shares[state_index] / share_total;
        let admission_fraction = context.sample_range(
            HospitalRng,
            params.admission_fraction_min..=params.admission_fraction_max,
        );
        // Capacity baseline: the state's slice of the national bed stock,
        // of which only a fraction is free for incoming patients.
        let state_beds = total_beds * share;
        let availability_fraction = context.sample_range(HospitalRng, 0.2..0.4);
        let icu_pool_fraction = context.sample_range(HospitalRng, 0.05..0.10);

        let mut series = StateSeries {
            state,
            admissions: vec![0; n],
            icu_admissions: vec![0; n],
            ventilator_usage: vec![0; n],
            available_beds: vec![0; n],
            available_icu_beds: vec![0; n],
        };

        for i in 0..n {
            let state_cases = country_daily_cases[i] as f64 * share;
            let jitter = 1.0 + context.sample_range(HospitalRng, -noise..=noise);
            let admissions = (state_cases * admission_fraction * jitter).round().max(0.0);
            series.admissions[i] = admissions as i64;

            let icu_fraction = context.sample_range(
                HospitalRng,
                params.icu_fraction_min..=params.icu_fraction_max,
            );
            let icu = (admissions * icu_fraction).round();
            series.icu_admissions[i] = icu as i64;

            let ventilator_fraction = context.sample_range(
                HospitalRng,
                params.ventilator_fraction_min..=params.ventilator_fraction_max,
            );
            series.ventilator_usage[i] = (icu * ventilator_fraction).round() as i64;

            // Supply varies slowly and is independent of the demand above.
            let swing = 1.0 + CAPACITY_SWING * (i as f64 / CAPACITY_PERIOD_DAYS).sin();
            let jitter = 1.0 + context.sample_range(HospitalRng, -0.05..=0.05);
            series.available_beds[i] =
                (state_beds * availability_fraction * swing * jitter).round().max(0.0) as i64;
            series.available_icu_beds[i] =
                (state_beds * icu_pool_fraction * availability_fraction * swing * jitter)
                    .round()
                    .max(0.0) as i64;
        }

        result.push(series);
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::countries::{find_country, HOSPITAL_REPORTING_COUNTRY, STATES};
    use crate::generator::date_grid;

    fn test_context(seed: u64) -> Context {
        let mut context = Context::new();
        context.init_random(seed);
        context
    }

    fn fixture() -> (ParametersValues, Vec<NaiveDate>, Vec<i64>) {
        let params = ParametersValues::default();
        let dates = date_grid(params.start_date, params.end_date).unwrap();
        // A synthetic national case curve with a pronounced hump.
        let cases: Vec<i64> = (0..dates.len())
            .map(|i| 50_000 + 150_000 * i as i64 % 90_000)
            .collect();
        (params, dates, cases)
    }

    #[test]
    fn one_series_per_state() {
        let (params, dates, cases) = fixture();
        let context = test_context(42);
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();
        let series = generate_series(&context, &params, india, &STATES, &dates, &cases);
        assert_eq!(series.len(), STATES.len());
        for s in &series {
            assert_eq!(s.admissions.len(), dates.len());
        }
    }

    #[test]
    fn all_values_non_negative() {
        let (params, dates, cases) = fixture();
        let context = test_context(42);
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();
        for s in generate_series(&context, &params, india, &STATES, &dates, &cases) {
            for i in 0..dates.len() {
                assert!(s.admissions[i] >= 0);
                assert!(s.icu_admissions[i] >= 0);
                assert!(s.ventilator_usage[i] >= 0);
                assert!(s.available_beds[i] >= 0);
                assert!(s.available_icu_beds[i] >= 0);
            }
        }
    }

    #[test]
    fn ventilators_do_not_exceed_icu() {
        // Ventilator usage is a sub-fraction of ICU admissions by
        // construction (icu <= admissions is deliberately not guaranteed).
        let (params, dates, cases) = fixture();
        let context = test_context(42);
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();
        for s in generate_series(&context, &params, india, &STATES, &dates, &cases) {
            for i in 0..dates.len() {
                assert!(s.ventilator_usage[i] <= s.icu_admissions[i]);
            }
        }
    }

    #[test]
    fn capacity_is_independent_of_demand() {
        // Doubling the case curve leaves bed availability untouched for
        // identical draws.
        let (params, dates, cases) = fixture();
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();
        let doubled: Vec<i64> = cases.iter().map(|c| c * 2).collect();

        let context_a = test_context(42);
        let base = generate_series(&context_a, &params, india, &STATES, &dates, &cases);
        let context_b = test_context(42);
        let stressed = generate_series(&context_b, &params, india, &STATES, &dates, &doubled);

        for (a, b) in base.iter().zip(&stressed) {
            assert_eq!(a.available_beds, b.available_beds);
            assert_eq!(a.available_icu_beds, b.available_icu_beds);
            assert!(b.admissions.iter().sum::<i64>() > a.admissions.iter().sum::<i64>());
        }
    }

    #[test]
    fn same_seed_reproduces_series() {
        let (params, dates, cases) = fixture();
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();

        let context_a = test_context(9);
        let a = generate_series(&context_a, &params, india, &STATES, &dates, &cases);
        let context_b = test_context(9);
        let b = generate_series(&context_b, &params, india, &STATES, &dates, &cases);

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.admissions, y.admissions);
            assert_eq!(x.available_beds, y.available_beds);
        }
    }
}
