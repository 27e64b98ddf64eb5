pub mod csv_reader;
pub mod json_writer;
pub mod summary;
pub mod table_writer;
