//! Documents domain module (national taxpayer identifiers).
//!
//! Structural validation of individual (CPF) and organization (CNPJ) tax
//! identifiers, implemented as deterministic arithmetic (no IO, no registry
//! lookup). A checksum-valid identifier may still be fabricated.

pub mod tax_id;

pub use tax_id::{TaxId, TaxIdKind, classify, is_valid_tax_id, normalize};
