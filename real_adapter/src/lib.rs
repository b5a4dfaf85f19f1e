mod real_adapter;

pub use real_adapter::RealAdapter;
