//! Parcel Address Common Library
//!
//! 荷札写真のOCRテキストから UK / 北アイルランドの住所を取り出す。
//! I/Oを持たない純粋関数のみ。CLIから並列に呼び出される。

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod extract;
pub mod options;
pub mod postcode;
pub mod types;

pub use assembler::{assemble, assemble_with};
pub use classifier::{
    is_address_line, is_address_line_with, is_noise, is_valid, rejection, rejection_with,
    InvalidReason, NoiseReason, Rejection,
};
pub use error::{Error, Result};
pub use extract::{extract, extract_address, extract_address_with, split_lines};
pub use options::ExtractOptions;
pub use postcode::{contains_postcode, find_postcode, locate_postcode, PostcodeMatch};
pub use types::{Extraction, RejectedLine, ScanRecord};
