//! Stats module - correlation analysis

mod correlation;


pub use correlation::CorrelationMatrix;
