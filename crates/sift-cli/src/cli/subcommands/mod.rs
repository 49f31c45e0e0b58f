mod chart;
mod dataset;
mod describe;
mod test;

pub use chart::ChartCommands;
pub use dataset::DatasetCommands;
pub use describe::DescribeCommands;
pub use test::TestCommands;
