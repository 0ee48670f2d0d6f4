#[path = "io/image_loader.rs"]
mod image_loader;
#[path = "io/serialization.rs"]
mod serialization;
