use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::define_global_property;
use crate::error::DatagenError;
use crate::global_properties::ContextGlobalPropertiesExt;

/// All knobs of the generator. The defaults reproduce the shipped dataset;
/// a JSON parameter file may override any subset of fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersValues {
    /// First date of the daily grid, inclusive.
    pub start_date: NaiveDate,
    /// Last date of the daily grid, inclusive.
    pub end_date: NaiveDate,
    pub seed: u64,
    /// Date the vaccination rollout begins. Rows before it carry zero doses.
    pub vaccination_start: NaiveDate,

    // Epidemic curve
    pub wave_count_min: u32,
    pub wave_count_max: u32,
    pub wave_duration_min: i64,
    pub wave_duration_max: i64,
    /// Median fraction of a country's population infected per day at a wave
    /// peak. Individual waves draw around this on a log scale.
    pub peak_attack_fraction: f64,
    /// Bound of the daily multiplicative noise, e.g. 0.15 for +/-15%.
    pub daily_noise: f64,
    pub case_fatality_min: f64,
    pub case_fatality_max: f64,
    pub recovery_fraction_min: f64,
    pub recovery_fraction_max: f64,
    pub death_lag_days: i64,
    pub recovery_lag_days: i64,

    // Vaccination rollout
    pub coverage_ceiling_min: f64,
    pub coverage_ceiling_max: f64,
    /// How strongly first-dose coverage damps the amplitude of later waves.
    pub vaccine_efficacy: f64,

    // Hospital series
    pub admission_fraction_min: f64,
    pub admission_fraction_max: f64,
    pub icu_fraction_min: f64,
    pub icu_fraction_max: f64,
    pub ventilator_fraction_min: f64,
    pub ventilator_fraction_max: f64,

    // Testing series
    /// Target positivity rate (daily_cases / daily_tests). A generation
    /// target, not an enforced ceiling.
    pub positivity_target: f64,
}

impl Default for ParametersValues {
    fn default() -> Self {
        ParametersValues {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, 12).unwrap(),
            seed: 42,
            vaccination_start: NaiveDate::from_ymd_opt(2021, 1, 16).unwrap(),
            wave_count_min: 3,
            wave_count_max: 5,
            wave_duration_min: 90,
            wave_duration_max: 240,
            peak_attack_fraction: 3e-4,
            daily_noise: 0.15,
            case_fatality_min: 0.02,
            case_fatality_max: 0.03,
            recovery_fraction_min: 0.90,
            recovery_fraction_max: 0.95,
            death_lag_days: 14,
            recovery_lag_days: 14,
            coverage_ceiling_min: 0.60,
            coverage_ceiling_max: 0.85,
            vaccine_efficacy: 0.6,
            admission_fraction_min: 0.04,
            admission_fraction_max: 0.08,
            icu_fraction_min: 0.15,
            icu_fraction_max: 0.25,
            ventilator_fraction_min: 0.3,
            ventilator_fraction_max: 0.5,
            positivity_target: 0.08,
        }
    }
}

define_global_property!(Parameters, ParametersValues);

impl ParametersValues {
    /// Checks the configuration before any generation work starts.
    ///
    /// # Errors
    ///
    /// Returns `DatagenError::ConfigError` naming the offending parameter.
    pub fn validate(&self) -> Result<(), DatagenError> {
        if self.end_date < self.start_date {
            return Err(DatagenError::ConfigError(format!(
                "end_date ({}) precedes start_date ({})",
                self.end_date, self.start_date
            )));
        }
        if self.wave_count_min == 0 || self.wave_count_min > self.wave_count_max {
            return Err(DatagenError::ConfigError(format!(
                "wave_count bounds are invalid ({}..={})",
                self.wave_count_min, self.wave_count_max
            )));
        }
        if self.wave_duration_min <= 0 || self.wave_duration_min > self.wave_duration_max {
            return Err(DatagenError::ConfigError(format!(
                "wave_duration bounds are invalid ({}..={})",
                self.wave_duration_min, self.wave_duration_max
            )));
        }
        if self.peak_attack_fraction <= 0.0 || self.peak_attack_fraction >= 1.0 {
            return Err(DatagenError::ConfigError(format!(
                "peak_attack_fraction must be in (0, 1), got {}",
                self.peak_attack_fraction
            )));
        }
        if !(0.0..1.0).contains(&self.daily_noise) {
            return Err(DatagenError::ConfigError(format!(
                "daily_noise must be in [0, 1), got {}",
                self.daily_noise
            )));
        }
        if self.death_lag_days < 0 || self.recovery_lag_days < 0 {
            return Err(DatagenError::ConfigError(
                "death_lag_days and recovery_lag_days must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.vaccine_efficacy) {
            return Err(DatagenError::ConfigError(format!(
                "vaccine_efficacy must be in [0, 1], got {}",
                self.vaccine_efficacy
            )));
        }
        if self.positivity_target <= 0.0 || self.positivity_target > 1.0 {
            return Err(DatagenError::ConfigError(format!(
                "positivity_target must be in (0, 1], got {}",
                self.positivity_target
            )));
        }
        for (name, min, max) in [
            ("case_fatality", self.case_fatality_min, self.case_fatality_max),
            (
                "recovery_fraction",
                self.recovery_fraction_min,
                self.recovery_fraction_max,
            ),
            (
                "coverage_ceiling",
                self.coverage_ceiling_min,
                self.coverage_ceiling_max,
            ),
            (
                "admission_fraction",
                self.admission_fraction_min,
                self.admission_fraction_max,
            ),
            ("icu_fraction", self.icu_fraction_min, self.icu_fraction_max),
            (
                "ventilator_fraction",
                self.ventilator_fraction_min,
                self.ventilator_fraction_max,
            ),
        ] {
            if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
                return Err(DatagenError::ConfigError(format!(
                    "{name} bounds are invalid ({min}..={max})"
                )));
            }
        }
        // The deaths and recoveries carved out of the lagged case series
        // must leave active cases non-negative without repair on average.
        if self.case_fatality_max + self.recovery_fraction_max > 1.0 {
            return Err(DatagenError::ConfigError(
                "case_fatality_max + recovery_fraction_max exceeds 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads parameters from an optional JSON file, validates them and installs
/// them as a global property on the context.
///
/// # Errors
///
/// Returns a `DatagenError` if the file cannot be read or the resulting
/// configuration is invalid.
pub fn init_parameters(
    context: &mut Context,
    file_path: Option<&Path>,
) -> Result<(), DatagenError> {
    let parameters = match file_path {
        Some(path) => context.load_parameters_from_json::<ParametersValues>(path)?,
        None => ParametersValues::default(),
    };
    parameters.validate()?;
    context.set_global_property_value(Parameters, parameters);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        ParametersValues::default().validate().unwrap();
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let params = ParametersValues {
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("end_date"));
    }

    #[test]
    fn single_day_range_is_valid() {
        let day = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let params = ParametersValues {
            start_date: day,
            end_date: day,
            ..Default::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn bad_positivity_is_rejected() {
        let params = ParametersValues {
            positivity_target: 0.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("positivity_target"));
    }

    #[test]
    fn bad_fraction_bounds_are_rejected() {
        let params = ParametersValues {
            icu_fraction_min: 0.5,
            icu_fraction_max: 0.2,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("icu_fraction"));
    }

    #[test]
    fn init_parameters_with_partial_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("params.json");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(br#"{"seed": 7, "positivity_target": 0.1}"#)
            .unwrap();

        let mut context = Context::new();
        init_parameters(&mut context, Some(file_path.as_path())).unwrap();
        let params = context.get_global_property_value(Parameters).unwrap();
        assert_eq!(params.seed, 7);
        assert_eq!(params.positivity_target, 0.1);
        // Unset fields fall back to the defaults.
        assert_eq!(params.end_date, ParametersValues::default().end_date);
    }

    #[test]
    fn init_parameters_defaults_without_file() {
        let mut context = Context::new();
        init_parameters(&mut context, None).unwrap();
        assert!(context.get_global_property_value(Parameters).is_some());
    }
}
