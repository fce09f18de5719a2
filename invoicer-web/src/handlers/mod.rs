pub mod app;
pub mod invoice;
