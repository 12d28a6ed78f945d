//! Reed-Solomon error correction over Galois fields GF(2^m).
//!
//! Assuming you have never heard of coding theory: by putting some redundancy
//! into a block of symbols one can recover from, say, detection or printing
//! errors when reading a barcode. A clever way to add redundancy
//! is the Reed-Solomon code. The details are relatively
//! math heavy and involve, for example, "higher" algebra (Galois fields).
//! Any book about coding theory should cover it, for example
//! "Error Correction Coding: Mathematical Methods and Algorithms" by Moon.
//!
//! This crate only does the error correction (called _decoding_). The decoder
//! is _syndrome_ based and made of four main steps:
//!
//! 1. Compute the syndrome values.
//! 2. Compute the error locator and error evaluator polynomial
//!    with a truncated Euclidean algorithm.
//! 3. Compute the error locations by trying all field elements (Chien search).
//! 4. Compute the error values with Forney's formula.
//!
//! The field is passed in through the [Field] trait. Tables for the fields
//! used by QR codes, Data Matrix, Aztec and MaxiCode are included, see
//! [QR_CODE_FIELD_256] and friends. The polynomial arithmetic the decoder is
//! built on is public as [GfPoly], so it can be reused, for example, for
//! constructing generator polynomials.
//!
//! ```rust
//! use gf_reedsolomon::{try_decode, DATA_MATRIX_FIELD_256};
//!
//! // 3 data codewords and 5 error codewords, two of them damaged
//! let mut codeword = [230, 40, 11, 255, 207, 37, 244, 82];
//! let correction = try_decode(&DATA_MATRIX_FIELD_256, &mut codeword, 5).unwrap();
//! assert_eq!(correction.num_errors(), 2);
//! assert_eq!(codeword, [23, 40, 11, 255, 207, 37, 244, 81]);
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod decoding;
pub mod galois;
pub mod poly;

pub use decoding::{decode, try_decode, Correction, DecodingError};
pub use galois::{
    Field, GenericGF, AZTEC_DATA_10, AZTEC_DATA_12, AZTEC_DATA_6, AZTEC_DATA_8, AZTEC_PARAM,
    DATA_MATRIX_FIELD_256, MAXICODE_FIELD_64, QR_CODE_FIELD_256,
};
pub use poly::GfPoly;
