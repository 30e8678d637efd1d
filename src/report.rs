use crate::context::Context;
use crate::error::DatagenError;
use csv::Writer;
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::path::PathBuf;

pub trait Report: 'static {
    // Returns report type
    fn type_id(&self) -> TypeId;
    // Serializes the data with the correct writer
    fn serialize(&self, writer: &mut Writer<File>) -> Result<(), csv::Error>;
}

/// Use this macro to define a unique report type
#[macro_export]
macro_rules! create_report_trait {
    ($name:ident) => {
        impl $crate::report::Report for $name {
            fn type_id(&self) -> std::any::TypeId {
                std::any::TypeId::of::<$name>()
            }

            fn serialize(
                &self,
                writer: &mut csv::Writer<std::fs::File>,
            ) -> Result<(), csv::Error> {
                writer.serialize(self)
            }
        }
    };
}
pub use create_report_trait;

struct ReportData {
    directory: PathBuf,
    file_writers: RefCell<HashMap<TypeId, Writer<File>>>,
}

// Registers a data container that stores
// * directory: the destination directory for all report files
// * file_writers: maps report type to file writer
crate::context::define_data_plugin!(
    ReportPlugin,
    ReportData,
    ReportData {
        directory: PathBuf::from("."),
        file_writers: RefCell::new(HashMap::new()),
    }
);

pub trait ContextReportExt {
    /// Sets the destination directory for report files, creating it and any
    /// missing parents. Called before generation so an unwritable output
    /// location fails the run up front.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` if the directory cannot be created.
    fn set_report_directory(&mut self, directory: PathBuf) -> Result<(), DatagenError>;

    /// Call `add_report` with each report type, passing the short name of
    /// the report. The file is created as `<directory>/<short_name>.csv`.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` if the file cannot be created.
    fn add_report<T: Report + 'static>(&mut self, short_name: &str) -> Result<(), DatagenError>;

    /// Write a new row with columns following items in the report struct
    /// to the report file associated with the report type struct.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` if serialization fails; the run is aborted
    /// rather than leaving a partial dataset in place.
    fn send_report<T: Report>(&self, report: &T) -> Result<(), DatagenError>;

    /// Flushes all report writers. Must be called once all rows are sent.
    ///
    /// # Errors
    ///
    /// Returns a `DatagenError` on a failed flush.
    fn flush_reports(&self) -> Result<(), DatagenError>;
}

impl ContextReportExt for Context {
    fn set_report_directory(&mut self, directory: PathBuf) -> Result<(), DatagenError> {
        create_dir_all(&directory)?;
        let data_container = self.get_data_container_mut::<ReportPlugin>();
        data_container.directory = directory;
        Ok(())
    }

    fn add_report<T: Report + 'static>(&mut self, short_name: &str) -> Result<(), DatagenError> {
        let data_container = self.get_data_container_mut::<ReportPlugin>();
        let path = data_container.directory.join(format!("{short_name}.csv"));
        let file = File::create(&path)?;
        let writer = Writer::from_writer(file);
        let mut file_writers = data_container.file_writers.borrow_mut();
        file_writers.insert(TypeId::of::<T>(), writer);
        Ok(())
    }

    fn send_report<T: Report>(&self, report: &T) -> Result<(), DatagenError> {
        // No data container will exist if no reports have been added
        let data_container = self
            .get_data_container::<ReportPlugin>()
            .expect("No writer found for the report type");
        let mut writer_cell = data_container.file_writers.try_borrow_mut().unwrap();
        let writer = writer_cell
            .get_mut(&report.type_id())
            .expect("No writer found for the report type");
        report.serialize(writer)?;
        Ok(())
    }

    fn flush_reports(&self) -> Result<(), DatagenError> {
        if let Some(data_container) = self.get_data_container::<ReportPlugin>() {
            let mut writer_cell = data_container.file_writers.try_borrow_mut().unwrap();
            for writer in writer_cell.values_mut() {
                writer.flush()?;
            }
        }
        Ok(())
    }
}
