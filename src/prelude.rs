pub use crate::context::Context;
pub use crate::countries::{CountryProfile, COUNTRIES, HOSPITAL_REPORTING_COUNTRY, STATES};
pub use crate::error::DatagenError;
pub use crate::generator::{date_grid, generate, DatasetBundle};
pub use crate::global_properties::ContextGlobalPropertiesExt;
pub use crate::parameters::{init_parameters, Parameters, ParametersValues};
pub use crate::random::ContextRandomExt;
pub use crate::report::ContextReportExt;
pub use crate::tables::{
    CovidCaseRow, DemographicsRow, HospitalRow, TestingRow, VaccinationRow,
};
pub use crate::{define_data_plugin, define_global_property, define_rng};
