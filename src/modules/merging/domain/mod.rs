pub mod golden_record;
pub mod golden_record_index;

pub use golden_record::{GoldenRecord, GoldenRecordId};
pub use golden_record_index::GoldenRecordIndex;
