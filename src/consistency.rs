//! Final consistency pass over the assembled tables.
//!
//! A single deterministic walk per table recomputes every cumulative field
//! from its daily field and recomputes active cases from the cumulative
//! fields, overriding any rounding drift introduced by floating-point
//! intermediates upstream. This pass is the final authority on the table
//! invariants; no upstream model is trusted to satisfy them exactly.

use std::collections::HashMap;

use crate::error::DatagenError;
use crate::tables::{CovidCaseRow, HospitalRow, TestingRow, VaccinationRow};

fn check_non_negative(
    table: &'static str,
    key: &str,
    date: chrono::NaiveDate,
    field: &'static str,
    value: i64,
) -> Result<(), DatagenError> {
    if value < 0 {
        return Err(DatagenError::InvariantViolation {
            table,
            key: key.to_string(),
            date,
            message: format!("negative {field} ({value})"),
        });
    }
    Ok(())
}

#[derive(Default, Clone, Copy)]
struct CaseTotals {
    cases: i64,
    deaths: i64,
    recovered: i64,
}

/// Recomputes the cumulative and active fields of the case table and
/// applies the active-case clamp: when a day's recoveries would drive
/// active cases negative, that day's recovered count is reduced so active
/// lands at exactly zero.
pub fn enforce_covid_cases(rows: &mut [CovidCaseRow]) -> Result<(), DatagenError> {
    let mut totals: HashMap<String, CaseTotals> = HashMap::new();

    for row in rows.iter_mut() {
        check_non_negative("covid_cases", &row.country, row.date, "daily_cases", row.daily_cases)?;
        check_non_negative(
            "covid_cases",
            &row.country,
            row.date,
            "daily_deaths",
            row.daily_deaths,
        )?;
        check_non_negative(
            "covid_cases",
            &row.country,
            row.date,
            "daily_recovered",
            row.daily_recovered,
        )?;

        let running = totals.entry(row.country.clone()).or_default();
        let cases = running.cases + row.daily_cases;
        let deaths = running.deaths + row.daily_deaths;
        let mut recovered = running.recovered + row.daily_recovered;

        let mut active = cases - deaths - recovered;
        if active < 0 {
            // The primary defensive rule: pull back this day's recoveries.
            row.daily_recovered += active;
            recovered += active;
            active = 0;
            if row.daily_recovered < 0 {
                return Err(DatagenError::InvariantViolation {
                    table: "covid_cases",
                    key: row.country.clone(),
                    date: row.date,
                    message: "active cases negative even with zero recoveries".to_string(),
                });
            }
        }

        row.cumulative_cases = cases;
        row.cumulative_deaths = deaths;
        row.cumulative_recovered = recovered;
        row.active_cases = active;
        *running = CaseTotals {
            cases,
            deaths,
            recovered,
        };
    }
    Ok(())
}

#[derive(Default, Clone, Copy)]
struct DoseTotals {
    dose1: i64,
    dose2: i64,
    booster: i64,
}

/// Recomputes the cumulative dose fields and their total.
pub fn enforce_vaccinations(rows: &mut [VaccinationRow]) -> Result<(), DatagenError> {
    let mut totals: HashMap<String, DoseTotals> = HashMap::new();

    for row in rows.iter_mut() {
        check_non_negative(
            "vaccination_data",
            &row.country,
            row.date,
            "daily_vaccinations_dose1",
            row.daily_vaccinations_dose1,
        )?;
        check_non_negative(
            "vaccination_data",
            &row.country,
            row.date,
            "daily_vaccinations_dose2",
            row.daily_vaccinations_dose2,
        )?;
        check_non_negative(
            "vaccination_data",
            &row.country,
            row.date,
            "daily_vaccinations_booster",
            row.daily_vaccinations_booster,
        )?;

        let running = totals.entry(row.country.clone()).or_default();
        running.dose1 += row.daily_vaccinations_dose1;
        running.dose2 += row.daily_vaccinations_dose2;
        running.booster += row.daily_vaccinations_booster;

        row.cumulative_dose1 = running.dose1;
        row.cumulative_dose2 = running.dose2;
        row.cumulative_booster = running.booster;
        row.total_vaccinations = running.dose1 + running.dose2 + running.booster;
    }
    Ok(())
}

/// Recomputes cumulative test counts.
pub fn enforce_testing(rows: &mut [TestingRow]) -> Result<(), DatagenError> {
    let mut totals: HashMap<String, i64> = HashMap::new();

    for row in rows.iter_mut() {
        check_non_negative("testing_data", &row.country, row.date, "daily_tests", row.daily_tests)?;
        let running = totals.entry(row.country.clone()).or_default();
        *running += row.daily_tests;
        row.cumulative_tests = *running;
    }
    Ok(())
}

/// The hospital table has no cumulative fields; the pass only rejects
/// negative values.
pub fn enforce_hospital(rows: &[HospitalRow]) -> Result<(), DatagenError> {
    for row in rows {
        for (field, value) in [
            ("hospital_admissions", row.hospital_admissions),
            ("icu_admissions", row.icu_admissions),
            ("ventilator_usage", row.ventilator_usage),
            ("available_beds", row.available_beds),
            ("available_icu_beds", row.available_icu_beds),
        ] {
            check_non_negative("hospital_data", &row.state, row.date, field, value)?;
        }
    }
    Ok(())
}
