/// Release report domain - module model, snapshot policy and graph traversal
///
/// This layer is free of I/O: descriptors reach it through the
/// `ModuleResolver` port.
pub mod domain;
pub mod policies;
pub mod services;
