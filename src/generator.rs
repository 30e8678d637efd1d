//! Pipeline orchestration: registry -> vaccination -> epidemic curve ->
//! hospital -> testing -> consistency pass, producing an in-memory bundle
//! of the five tables ready for the table writer.
//!
//! Countries are always visited in registry order and dates ascending, so
//! the seeded streams are consumed in a fixed order and a run reproduces
//! byte-for-byte from its seed.

use chrono::NaiveDate;
use log::{debug, info};

use crate::consistency;
use crate::context::Context;
use crate::countries::{COUNTRIES, HOSPITAL_REPORTING_COUNTRY, STATES};
use crate::epi_curve;
use crate::error::DatagenError;
use crate::global_properties::ContextGlobalPropertiesExt;
use crate::hospital;
use crate::parameters::Parameters;
use crate::report::ContextReportExt;
use crate::tables::{CovidCaseRow, DemographicsRow, HospitalRow, TestingRow, VaccinationRow};
use crate::testing;
use crate::vaccination;

/// The five generated tables. Immutable once generation completes; a new
/// configuration means a full regeneration, never an update in place.
pub struct DatasetBundle {
    pub covid_cases: Vec<CovidCaseRow>,
    pub hospital_data: Vec<HospitalRow>,
    pub vaccination_data: Vec<VaccinationRow>,
    pub country_demographics: Vec<DemographicsRow>,
    pub testing_data: Vec<TestingRow>,
}

/// Builds the inclusive daily grid between two dates.
///
/// # Errors
///
/// Returns a configuration error if `end` precedes `start`.
pub fn date_grid(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DatagenError> {
    if end < start {
        return Err(DatagenError::ConfigError(format!(
            "end_date ({end}) precedes start_date ({start})"
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Runs the whole generation pipeline using the parameters installed on the
/// context. The context's random streams must be initialized first.
///
/// # Errors
///
/// Returns a configuration error for an invalid date range, or an invariant
/// violation if the consistency pass encounters a state it cannot repair.
pub fn generate(context: &Context) -> Result<DatasetBundle, DatagenError> {
    let params = context
        .get_global_property_value(Parameters)
        .ok_or_else(|| DatagenError::ConfigError("parameters not initialized".to_string()))?;
    let dates = date_grid(params.start_date, params.end_date)?;
    info!(
        "generating {} days x {} countries from seed {}",
        dates.len(),
        COUNTRIES.len(),
        params.seed
    );

    // Stage 1: vaccination rollout, producing the coverage trajectories
    // that damp later case waves.
    let vaccination_series: Vec<_> = COUNTRIES
        .iter()
        .map(|country| vaccination::generate_series(context, params, country, &dates))
        .collect();
    debug!("vaccination stage complete");

    // Stage 2: epidemic curves, consuming the coverage trajectories.
    let case_series: Vec<_> = COUNTRIES
        .iter()
        .zip(&vaccination_series)
        .map(|(country, vax)| {
            epi_curve::generate_series(context, params, country, &dates, &vax.coverage)
        })
        .collect();
    debug!("epidemic curve stage complete");

    // Dependent series: hospital load for the state-reporting country and
    // testing volume for everyone.
    let reporting_index = COUNTRIES
        .iter()
        .position(|c| c.name == HOSPITAL_REPORTING_COUNTRY)
        .expect("hospital reporting country missing from registry");
    let hospital_series = hospital::generate_series(
        context,
        params,
        &COUNTRIES[reporting_index],
        &STATES,
        &dates,
        &case_series[reporting_index].daily_cases,
    );
    let testing_series: Vec<_> = COUNTRIES
        .iter()
        .zip(&case_series)
        .map(|(country, cases)| {
            testing::generate_series(context, params, country, &dates, &cases.daily_cases)
        })
        .collect();
    debug!("derived stages complete");

    let mut bundle = assemble(
        &dates,
        &case_series,
        &vaccination_series,
        &hospital_series,
        &testing_series,
    );

    // The consistency pass is the final authority on the cumulative,
    // active and non-negativity invariants.
    consistency::enforce_covid_cases(&mut bundle.covid_cases)?;
    consistency::enforce_vaccinations(&mut bundle.vaccination_data)?;
    consistency::enforce_testing(&mut bundle.testing_data)?;
    consistency::enforce_hospital(&bundle.hospital_data)?;

    Ok(bundle)
}

/// Interleaves the per-country series into their final row order: date
/// ascending, then country (or state) in registry order.
fn assemble(
    dates: &[NaiveDate],
    case_series: &[epi_curve::CaseSeries],
    vaccination_series: &[vaccination::VaccinationSeries],
    hospital_series: &[hospital::StateSeries],
    testing_series: &[Vec<i64>],
) -> DatasetBundle {
    let n = dates.len();
    let mut covid_cases = Vec::with_capacity(n * COUNTRIES.len());
    let mut vaccination_data = Vec::with_capacity(n * COUNTRIES.len());
    let mut testing_data = Vec::with_capacity(n * COUNTRIES.len());
    let mut hospital_data = Vec::with_capacity(n * STATES.len());

    for (i, &date) in dates.iter().enumerate() {
        for (c, country) in COUNTRIES.iter().enumerate() {
            let cases = &case_series[c];
            covid_cases.push(CovidCaseRow {
                date,
                country: country.name.to_string(),
                daily_cases: cases.daily_cases[i],
                daily_deaths: cases.daily_deaths[i],
                daily_recovered: cases.daily_recovered[i],
                cumulative_cases: 0,
                cumulative_deaths: 0,
                cumulative_recovered: 0,
                active_cases: 0,
            });

            let vax = &vaccination_series[c];
            vaccination_data.push(VaccinationRow {
                date,
                country: country.name.to_string(),
                daily_vaccinations_dose1: vax.daily_dose1[i],
                daily_vaccinations_dose2: vax.daily_dose2[i],
                daily_vaccinations_booster: vax.daily_booster[i],
                cumulative_dose1: 0,
                cumulative_dose2: 0,
                cumulative_booster: 0,
                total_vaccinations: 0,
            });

            testing_data.push(TestingRow {
                date,
                country: country.name.to_string(),
                daily_tests: testing_series[c][i],
                cumulative_tests: 0,
            });
        }

        for state in hospital_series {
            hospital_data.push(HospitalRow {
                date,
                state: state.state.to_string(),
                country: HOSPITAL_REPORTING_COUNTRY.to_string(),
                hospital_admissions: state.admissions[i],
                icu_admissions: state.icu_admissions[i],
                ventilator_usage: state.ventilator_usage[i],
                available_beds: state.available_beds[i],
                available_icu_beds: state.available_icu_beds[i],
            });
        }
    }

    let country_demographics = COUNTRIES.iter().map(DemographicsRow::from).collect();

    DatasetBundle {
        covid_cases,
        hospital_data,
        vaccination_data,
        country_demographics,
        testing_data,
    }
}

impl DatasetBundle {
    /// Serializes the five tables into the context's report directory. A
    /// write failure on any table aborts the whole run; partially written
    /// files are not valid output.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` on any file creation or write failure.
    pub fn write_csv(&self, context: &mut Context) -> Result<(), DatagenError> {
        context.add_report::<CovidCaseRow>("covid_cases")?;
        context.add_report::<HospitalRow>("hospital_data")?;
        context.add_report::<VaccinationRow>("vaccination_data")?;
        context.add_report::<DemographicsRow>("country_demographics")?;
        context.add_report::<TestingRow>("testing_data")?;

        for row in &self.covid_cases {
            context.send_report(row)?;
        }
        for row in &self.hospital_data {
            context.send_report(row)?;
        }
        for row in &self.vaccination_data {
            context.send_report(row)?;
        }
        for row in &self.country_demographics {
            context.send_report(row)?;
        }
        for row in &self.testing_data {
            context.send_report(row)?;
        }
        context.flush_reports()?;

        for (name, count) in self.summary() {
            info!("{name:25}: {count} records");
        }
        Ok(())
    }

    /// Row counts per table, in file order.
    pub fn summary(&self) -> [(&'static str, usize); 5] {
        [
            ("covid_cases", self.covid_cases.len()),
            ("hospital_data", self.hospital_data.len()),
            ("vaccination_data", self.vaccination_data.len()),
            ("country_demographics", self.country_demographics.len()),
            ("testing_data", self.testing_data.len()),
        ]
    }
}
