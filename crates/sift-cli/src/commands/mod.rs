pub mod chart;
pub mod correlate;
pub mod dataset;
pub mod describe;
pub mod dispatch;
pub mod effect_size;
pub mod group;
pub mod inspect;
pub mod schema;
pub mod summary;
pub mod view;
