//! Hygraph Storefront Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - Locales and currency formatting
//! - Product records as loaded from the CMS (products, variants, images, localizations)
//! - Cart line items and the quantity bound of the product page
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, locales, prices and product data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
