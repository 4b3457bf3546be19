// School info: CSV-backed search, cost summaries and application steps.

pub mod dataset;
pub mod handlers;
pub mod summary;

pub use dataset::CollegeData;
