//! Data model: cell values, records and declared data types.

mod data_type;
mod record;
mod value;

pub use data_type::DataType;
pub use record::Record;
pub use value::Value;
