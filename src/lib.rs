//! # xrechnung-cii
//!
//! Writes German XRechnung e-invoices in the UN/CEFACT Cross Industry
//! Invoice (CII) syntax.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The model follows the [EN 16931](https://standards.cencenelec.eu/dyn/www/f?p=205:110:0::::FSP_PROJECT:60602)
//! semantic model, with every field optional: the writer emits what it is
//! given and leaves completeness checks to an XRechnung validator.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use xrechnung_cii::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new()
//!     .document_id("RE-2024-001")
//!     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .invoice_type(InvoiceType::CommercialInvoice)
//!     .currency("EUR")
//!     .leitweg_id("04011000-12345-67")
//!     .seller(SellerOrBuyer::builder()
//!         .name("ACME GmbH")
//!         .vat_id("DE123456789")
//!         .address(PostalAddress::builder().city("Berlin").zip_code("10115").country_iso_code("DE").build())
//!         .build())
//!     .add_item(Item::builder()
//!         .id(1)
//!         .name("Beratung")
//!         .quantity(dec!(10))
//!         .unit_code(unit_codes::HOUR)
//!         .unit_price(dec!(150.00))
//!         .item_total_net_amount(dec!(1500.00))
//!         .vat(Vat::builder().category(TaxCategory::StandardRate).rate(dec!(19)).build())
//!         .build())
//!     .build();
//!
//! # #[cfg(feature = "xrechnung")]
//! # {
//! let xml = xrechnung_cii::xrechnung::to_cii_string(&invoice).unwrap();
//! assert!(xml.contains("<ram:BuyerReference>04011000-12345-67</ram:BuyerReference>"));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, builders, errors |
//! | `xrechnung` (default) | CII XML generation |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xrechnung")]
pub mod xrechnung;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
