pub mod banner;

pub use banner::print_welcome;
