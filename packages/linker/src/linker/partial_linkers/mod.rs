pub mod partial_component_linker;
