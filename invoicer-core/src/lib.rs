//! invoicer-core: domain logic for the interactive invoice builder.
//!
//! Holds the form session state, the pure totals calculator, the explicit
//! command handlers (add item, clear items, generate document), and the PDF
//! document assembler. The crate is free of HTTP and event-loop assumptions;
//! the rendering front end is a separate collaborator that calls into it.
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod session;

pub use error::AppError;
