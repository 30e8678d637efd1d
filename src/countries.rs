//! The fixed country registry.
//!
//! The 20 countries and their demographic attributes are deterministic
//! constants, identical across seeds. Registry order defines all downstream
//! iteration order, which matters for reproducibility because the seeded
//! random streams are consumed in that order.

/// Static demographic attributes for one country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryProfile {
    pub name: &'static str,
    pub population: i64,
    pub median_age: f64,
    pub gdp_per_capita: i64,
    pub population_density: i64,
    pub hospital_beds_per_1000: f64,
}

/// The country whose hospital series is partitioned by state.
pub const HOSPITAL_REPORTING_COUNTRY: &str = "India";

/// States of the hospital-reporting country, in reporting order.
pub const STATES: [&str; 10] = [
    "Maharashtra",
    "Karnataka",
    "Kerala",
    "Tamil Nadu",
    "Delhi",
    "Uttar Pradesh",
    "West Bengal",
    "Gujarat",
    "Rajasthan",
    "Madhya Pradesh",
];

pub const COUNTRIES: [CountryProfile; 20] = [
    CountryProfile {
        name: "India",
        population: 1_393_409_038,
        median_age: 28.4,
        gdp_per_capita: 6700,
        population_density: 464,
        hospital_beds_per_1000: 0.5,
    },
    CountryProfile {
        name: "USA",
        population: 331_893_745,
        median_age: 38.3,
        gdp_per_capita: 63051,
        population_density: 36,
        hospital_beds_per_1000: 2.9,
    },
    CountryProfile {
        name: "Brazil",
        population: 214_326_223,
        median_age: 33.5,
        gdp_per_capita: 14103,
        population_density: 25,
        hospital_beds_per_1000: 2.1,
    },
    CountryProfile {
        name: "UK",
        population: 68_207_114,
        median_age: 40.5,
        gdp_per_capita: 42330,
        population_density: 275,
        hospital_beds_per_1000: 2.5,
    },
    CountryProfile {
        name: "France",
        population: 67_391_582,
        median_age: 41.7,
        gdp_per_capita: 44995,
        population_density: 119,
        hospital_beds_per_1000: 5.9,
    },
    CountryProfile {
        name: "Germany",
        population: 83_900_471,
        median_age: 47.8,
        gdp_per_capita: 50795,
        population_density: 240,
        hospital_beds_per_1000: 8.0,
    },
    CountryProfile {
        name: "Italy",
        population: 60_367_477,
        median_age: 47.9,
        gdp_per_capita: 42776,
        population_density: 206,
        hospital_beds_per_1000: 3.2,
    },
    CountryProfile {
        name: "Spain",
        population: 47_351_567,
        median_age: 45.5,
        gdp_per_capita: 38286,
        population_density: 94,
        hospital_beds_per_1000: 2.9,
    },
    CountryProfile {
        name: "Russia",
        population: 145_912_025,
        median_age: 39.6,
        gdp_per_capita: 27394,
        population_density: 9,
        hospital_beds_per_1000: 7.1,
    },
    CountryProfile {
        name: "Turkey",
        population: 85_042_738,
        median_age: 32.2,
        gdp_per_capita: 27956,
        population_density: 109,
        hospital_beds_per_1000: 2.9,
    },
    CountryProfile {
        name: "South Africa",
        population: 60_041_994,
        median_age: 27.6,
        gdp_per_capita: 12032,
        population_density: 49,
        hospital_beds_per_1000: 2.3,
    },
    CountryProfile {
        name: "Argentina",
        population: 45_605_826,
        median_age: 31.9,
        gdp_per_capita: 19922,
        population_density: 17,
        hospital_beds_per_1000: 5.0,
    },
    CountryProfile {
        name: "Colombia",
        population: 51_265_844,
        median_age: 31.2,
        gdp_per_capita: 13579,
        population_density: 46,
        hospital_beds_per_1000: 1.7,
    },
    CountryProfile {
        name: "Mexico",
        population: 130_262_216,
        median_age: 29.3,
        gdp_per_capita: 17336,
        population_density: 66,
        hospital_beds_per_1000: 1.0,
    },
    CountryProfile {
        name: "Japan",
        population: 125_836_021,
        median_age: 48.6,
        gdp_per_capita: 42248,
        population_density: 347,
        hospital_beds_per_1000: 13.0,
    },
    CountryProfile {
        name: "South Korea",
        population: 51_780_579,
        median_age: 43.7,
        gdp_per_capita: 43143,
        population_density: 527,
        hospital_beds_per_1000: 12.4,
    },
    CountryProfile {
        name: "Canada",
        population: 38_155_012,
        median_age: 41.8,
        gdp_per_capita: 48720,
        population_density: 4,
        hospital_beds_per_1000: 2.5,
    },
    CountryProfile {
        name: "Australia",
        population: 25_788_215,
        median_age: 37.5,
        gdp_per_capita: 59934,
        population_density: 3,
        hospital_beds_per_1000: 3.8,
    },
    CountryProfile {
        name: "China",
        population: 1_444_216_107,
        median_age: 38.4,
        gdp_per_capita: 16117,
        population_density: 153,
        hospital_beds_per_1000: 4.3,
    },
    CountryProfile {
        name: "Indonesia",
        population: 276_361_783,
        median_age: 30.2,
        gdp_per_capita: 11812,
        population_density: 151,
        hospital_beds_per_1000: 1.0,
    },
];

/// Looks up a country by name in the registry.
pub fn find_country(name: &str) -> Option<&'static CountryProfile> {
    COUNTRIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registry_has_twenty_countries() {
        assert_eq!(COUNTRIES.len(), 20);
    }

    #[test]
    fn reporting_country_is_registered() {
        let india = find_country(HOSPITAL_REPORTING_COUNTRY).unwrap();
        assert_eq!(india.population, 1_393_409_038);
        assert_eq!(STATES.len(), 10);
    }

    #[test]
    fn demographics_are_sane() {
        for country in &COUNTRIES {
            assert!(country.population > 0, "{}", country.name);
            assert!(country.median_age > 0.0, "{}", country.name);
            assert!(country.gdp_per_capita > 0, "{}", country.name);
            assert!(country.population_density > 0, "{}", country.name);
            assert!(country.hospital_beds_per_1000 > 0.0, "{}", country.name);
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in COUNTRIES.iter().enumerate() {
            for b in &COUNTRIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
