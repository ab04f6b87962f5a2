//! XRechnung CII (UN/CEFACT Cross Industry Invoice) generation.
//!
//! Implements the CII syntax of the German XRechnung standard (v3.0),
//! based on EN 16931.
//!
//! # Example
//!
//! ```
//! use xrechnung_cii::core::*;
//! use xrechnung_cii::xrechnung;
//!
//! let invoice = InvoiceBuilder::new().document_id("RE-1").build();
//! let xml = xrechnung::to_cii_string(&invoice).unwrap();
//! assert!(xml.contains("<ram:BuyerReference>N/A</ram:BuyerReference>"));
//! ```

mod cii;
pub mod tree;

pub use cii::{to_cii_string, to_cii_xml};
pub use tree::{Element, XmlDocumentBuilder};

/// XRechnung 3.0 specification identifier (BT-24).
pub const XRECHNUNG_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0";

/// Peppol BIS Billing 3.0 profile identifier (BT-23).
pub const PEPPOL_PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Buyer reference (BT-10) written when no Leitweg-ID is set.
pub const BUYER_REFERENCE_FALLBACK: &str = "N/A";

/// CII namespace URIs.
pub mod cii_ns {
    pub const RSM: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:100";
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100";
}
