use crate::context::Context;
use crate::define_data_plugin;
use crate::error::DatagenError;
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Defines a global property with the following parameters:
/// * `$global_property`: Name for the identifier type of the global property
/// * `$value`: The type of the property's value
#[macro_export]
macro_rules! define_global_property {
    ($global_property:ident, $value:ty) => {
        #[derive(Copy, Clone)]
        pub struct $global_property;

        impl $crate::global_properties::GlobalProperty for $global_property {
            type Value = $value;
        }
    };
}

pub trait GlobalProperty: Any {
    type Value: Any;
}

pub use define_global_property;

struct GlobalPropertiesDataContainer {
    global_property_container: HashMap<TypeId, Box<dyn Any>>,
}

define_data_plugin!(
    GlobalPropertiesPlugin,
    GlobalPropertiesDataContainer,
    GlobalPropertiesDataContainer {
        global_property_container: HashMap::default(),
    }
);

pub trait ContextGlobalPropertiesExt {
    fn set_global_property_value<T: GlobalProperty>(&mut self, property: T, value: T::Value);

    fn get_global_property_value<T: GlobalProperty>(&self, property: T) -> Option<&T::Value>;

    /// Deserializes a value of type `T` from a JSON file, for use as a
    /// global property value.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` if the file cannot be read or parsed.
    fn load_parameters_from_json<T: DeserializeOwned>(
        &self,
        file_path: &Path,
    ) -> Result<T, DatagenError>;
}

impl GlobalPropertiesDataContainer {
    fn set_global_property_value<T: GlobalProperty>(&mut self, _property: &T, value: T::Value) {
        self.global_property_container
            .insert(TypeId::of::<T>(), Box::new(value));
    }

    fn get_global_property_value<T: GlobalProperty>(&self) -> Option<&T::Value> {
        self.global_property_container
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T::Value>())
    }
}

impl ContextGlobalPropertiesExt for Context {
    fn set_global_property_value<T: GlobalProperty>(&mut self, property: T, value: T::Value) {
        let data_container = self.get_data_container_mut::<GlobalPropertiesPlugin>();
        data_container.set_global_property_value(&property, value);
    }

    fn get_global_property_value<T: GlobalProperty>(&self, _property: T) -> Option<&T::Value> {
        self.get_data_container::<GlobalPropertiesPlugin>()
            .and_then(GlobalPropertiesDataContainer::get_global_property_value::<T>)
    }

    fn load_parameters_from_json<T: DeserializeOwned>(
        &self,
        file_path: &Path,
    ) -> Result<T, DatagenError> {
        let contents = fs::read_to_string(file_path)?;
        let value = serde_json::from_str(&contents)?;
        Ok(value)
    }
}
