mod chart_buffer;

pub use chart_buffer::ChartBuffer;
