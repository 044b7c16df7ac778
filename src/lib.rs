pub mod cli;
pub mod config;
pub mod error;
pub mod links;
pub mod ocr;
pub mod records;
pub mod review;
pub mod scanner;
