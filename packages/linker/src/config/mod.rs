pub mod linker_options;

pub use linker_options::LinkerOptions;
