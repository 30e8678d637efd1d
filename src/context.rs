use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

pub trait DataPlugin: Any {
    type DataContainer;

    fn create_data_container() -> Self::DataContainer;
}

#[macro_export]
macro_rules! define_data_plugin {
    ($plugin:ident, $data_container:ty, $default: expr) => {
        struct $plugin {}

        impl $crate::context::DataPlugin for $plugin {
            type DataContainer = $data_container;

            fn create_data_container() -> Self::DataContainer {
                $default
            }
        }
    };
}
pub use define_data_plugin;

/// Owns the state shared across the generation pipeline: the seeded random
/// streams, the loaded parameters and the report writers, each stored as a
/// data container keyed by its plugin type. Containers are created lazily
/// the first time they are requested mutably.
pub struct Context {
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("data_plugins", &self.data_plugins.len())
            .finish()
    }
}

impl Context {
    pub fn new() -> Context {
        Context {
            data_plugins: HashMap::new(),
        }
    }

    fn add_plugin<T: DataPlugin>(&mut self) {
        self.data_plugins
            .insert(TypeId::of::<T>(), Box::new(T::create_data_container()));
    }

    pub fn get_data_container_mut<T: DataPlugin>(&mut self) -> &mut T::DataContainer {
        let type_id = &TypeId::of::<T>();
        if !self.data_plugins.contains_key(type_id) {
            self.add_plugin::<T>();
        }
        self.data_plugins
            .get_mut(type_id)
            .unwrap()
            .downcast_mut::<T::DataContainer>()
            .unwrap()
    }

    pub fn get_data_container<T: DataPlugin>(&self) -> Option<&T::DataContainer> {
        let type_id = &TypeId::of::<T>();
        if !self.data_plugins.contains_key(type_id) {
            return None;
        }
        self.data_plugins
            .get(type_id)
            .unwrap()
            .downcast_ref::<T::DataContainer>()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
