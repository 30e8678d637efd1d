//! Row types for the five generated tables.
//!
//! Serde field order defines the CSV column order, which downstream schema
//! loaders depend on. All count fields are non-negative after the
//! consistency pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::create_report_trait;

/// One row of `covid_cases.csv`: per-country daily case accounting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CovidCaseRow {
    pub date: NaiveDate,
    pub country: String,
    pub daily_cases: i64,
    pub daily_deaths: i64,
    pub daily_recovered: i64,
    pub cumulative_cases: i64,
    pub cumulative_deaths: i64,
    pub cumulative_recovered: i64,
    pub active_cases: i64,
}

/// One row of `hospital_data.csv`: per-state demand and capacity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HospitalRow {
    pub date: NaiveDate,
    pub state: String,
    pub country: String,
    pub hospital_admissions: i64,
    pub icu_admissions: i64,
    pub ventilator_usage: i64,
    pub available_beds: i64,
    pub available_icu_beds: i64,
}

/// One row of `vaccination_data.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VaccinationRow {
    pub date: NaiveDate,
    pub country: String,
    pub daily_vaccinations_dose1: i64,
    pub daily_vaccinations_dose2: i64,
    pub daily_vaccinations_booster: i64,
    pub cumulative_dose1: i64,
    pub cumulative_dose2: i64,
    pub cumulative_booster: i64,
    pub total_vaccinations: i64,
}

/// One row of `country_demographics.csv`; static for the run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DemographicsRow {
    pub country: String,
    pub population: i64,
    pub median_age: f64,
    pub gdp_per_capita: i64,
    pub population_density: i64,
    pub hospital_beds_per_1000: f64,
}

/// One row of `testing_data.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TestingRow {
    pub date: NaiveDate,
    pub country: String,
    pub daily_tests: i64,
    pub cumulative_tests: i64,
}

create_report_trait!(CovidCaseRow);
create_report_trait!(HospitalRow);
create_report_trait!(VaccinationRow);
create_report_trait!(DemographicsRow);
create_report_trait!(TestingRow);

impl From<&crate::countries::CountryProfile> for DemographicsRow {
    fn from(profile: &crate::countries::CountryProfile) -> Self {
        DemographicsRow {
            country: profile.name.to_string(),
            population: profile.population,
            median_age: profile.median_age,
            gdp_per_capita: profile.gdp_per_capita,
            population_density: profile.population_density,
            hospital_beds_per_1000: profile.hospital_beds_per_1000,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::countries::COUNTRIES;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn demographics_row_from_profile() {
        let row = DemographicsRow::from(&COUNTRIES[0]);
        assert_eq!(row.country, "India");
        assert_eq!(row.population, 1_393_409_038);
        assert_approx_eq!(row.median_age, 28.4);
        assert_approx_eq!(row.hospital_beds_per_1000, 0.5);
    }

    #[test]
    fn case_row_serializes_date_first() {
        let row = CovidCaseRow {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            country: "India".to_string(),
            daily_cases: 1,
            daily_deaths: 0,
            daily_recovered: 0,
            cumulative_cases: 1,
            cumulative_deaths: 0,
            cumulative_recovered: 0,
            active_cases: 1,
        };
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&row).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,country,daily_cases,daily_deaths,daily_recovered,\
             cumulative_cases,cumulative_deaths,cumulative_recovered,active_cases"
        );
        assert_eq!(lines.next().unwrap(), "2020-01-01,India,1,0,0,1,0,0,1");
    }
}
