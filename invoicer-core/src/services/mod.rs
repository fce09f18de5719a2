//! Services: the totals calculator and the PDF document assembler.

pub mod calculator;
pub mod pdf;
