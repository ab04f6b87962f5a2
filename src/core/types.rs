use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RechnungError;

/// BG-0: Invoice — the top-level document.
///
/// Every field is optional so that incomplete invoices can still be
/// written; the writer emits empty or no elements for missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// BT-1: Invoice number.
    pub document_id: Option<String>,
    /// BT-2: Invoice issue date.
    pub issue_date: Option<NaiveDate>,
    /// BT-3: Invoice type code (UNTDID 1001), see [`InvoiceType`].
    pub document_type_code: Option<String>,
    /// BT-5: Invoice currency code (ISO 4217, e.g. "EUR").
    pub currency: Option<String>,
    /// BT-10: Buyer reference (Leitweg-ID).
    pub leitweg_id: Option<String>,
    /// BT-14: Sales order reference.
    pub sales_order_reference: Option<String>,
    /// BG-16: Payment instructions, including BT-20 payment terms.
    pub payment_instructions: Option<PaymentInstructions>,
    /// BG-4: Seller.
    pub seller: Option<SellerOrBuyer>,
    /// BG-7: Buyer.
    pub buyer: Option<SellerOrBuyer>,
    /// BG-13: Delivery information.
    pub delivery_info: Option<DeliveryInformation>,
    /// BG-25: Invoice lines, in document order.
    pub items: Vec<Item>,
    /// BG-23: VAT breakdown.
    pub vat_totals: Vec<Vat>,
    /// BG-3: Preceding invoice references.
    pub preceding_invoice_references: Vec<PrecedingInvoiceReference>,
    /// BT-106: Sum of invoice line net amounts.
    pub line_total_amount: Option<Decimal>,
    /// BT-107: Sum of allowances on document level.
    pub allowance_total_amount: Option<Decimal>,
    /// BT-108: Sum of charges on document level.
    pub charge_total_amount: Option<Decimal>,
    /// BT-109: Invoice total amount without VAT.
    pub tax_basis_total_amount: Option<Decimal>,
    /// BT-110: Invoice total VAT amount.
    pub tax_total_amount: Option<Decimal>,
    /// BT-112: Invoice total amount with VAT.
    pub grand_total_amount: Option<Decimal>,
    /// BT-115: Amount due for payment.
    pub due_payable_amount: Option<Decimal>,
    /// BG-1: Invoice notes, in document order.
    pub invoice_notes: Vec<InvoiceNote>,
    /// BG-20: Document-level allowances.
    pub allowances: Vec<Allowance>,
    /// BG-21: Document-level charges.
    pub charges: Vec<Charge>,
}

/// BG-4 / BG-7: Party (seller or buyer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerOrBuyer {
    /// BT-27 / BT-44: Name.
    pub name: Option<String>,
    /// BT-28 / BT-45: Trading name.
    pub trading_name: Option<String>,
    /// BT-31 / BT-48: VAT identifier (e.g. "DE123456789").
    pub vat_id: Option<String>,
    /// BT-34 / BT-49: Electronic address.
    pub electronic_address: Option<String>,
    /// Scheme of the electronic address (EAS code list).
    pub electronic_address_scheme: Option<String>,
    /// BG-5 / BG-8: Postal address.
    pub address: Option<PostalAddress>,
    /// BG-6 / BG-9: Contact information.
    pub contact: Option<Contact>,
}

/// BG-5 / BG-8 / BG-15: Postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    /// BT-35: Street and house number.
    pub address_line_one: Option<String>,
    /// BT-36: Additional address line.
    pub address_line_two: Option<String>,
    /// BT-162: Address line 3.
    pub address_line_three: Option<String>,
    /// BT-37: City.
    pub city: Option<String>,
    /// BT-38: Post code.
    pub zip_code: Option<String>,
    /// BT-40: Country code (ISO 3166-1 alpha-2).
    pub country_iso_code: Option<String>,
}

/// BG-6: Contact information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// BT-41: Contact point.
    pub name: Option<String>,
    /// BT-42: Telephone.
    pub phone: Option<String>,
    /// BT-43: Email.
    pub email: Option<String>,
}

/// BG-13: Delivery information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryInformation {
    /// BT-70: Deliver-to party name.
    pub name: Option<String>,
    /// BG-15: Deliver-to address.
    pub delivery_address: Option<PostalAddress>,
    /// BT-72: Actual delivery date.
    pub actual_delivery_date: Option<NaiveDate>,
}

/// BG-25: Invoice line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// BT-126: Line identifier.
    pub id: Option<u64>,
    /// BT-129: Invoiced quantity.
    pub quantity: Option<Decimal>,
    /// BT-130: Unit of measure code (e.g. [`unit_codes::PIECE`]).
    pub unit_code: Option<String>,
    /// BT-131: Invoice line net amount.
    pub item_total_net_amount: Option<Decimal>,
    /// BT-153: Item name.
    pub name: Option<String>,
    /// BT-154: Item description.
    pub description: Option<String>,
    /// BT-146: Item net price. Must not be negative.
    pub unit_price: Option<Decimal>,
    /// BG-30: Line VAT information.
    pub vat: Option<Vat>,
    /// BT-155: Seller's item identifier.
    pub seller_assigned_id: Option<String>,
    /// BG-32: Item attributes.
    pub item_attributes: Vec<ItemAttribute>,
}

/// BG-32: Item attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAttribute {
    /// BT-160: Attribute name.
    pub name: Option<String>,
    /// BT-161: Attribute value.
    pub value: Option<String>,
}

/// BG-23 (VAT breakdown) / BG-30 (line VAT information).
///
/// The same shape serves both groups; line VAT usually carries only
/// category and rate, breakdown entries also carry the amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vat {
    /// BT-119 / BT-152: VAT rate in percent.
    pub rate: Option<Decimal>,
    /// BT-118 / BT-151: VAT category.
    pub category: Option<TaxCategory>,
    /// BT-116: Taxable amount.
    pub taxable_amount: Option<Decimal>,
    /// BT-117: Tax amount.
    pub tax_amount: Option<Decimal>,
    /// BT-120: Exemption reason text.
    pub vat_exemption_reason_text: Option<String>,
    /// BT-121: Exemption reason code (VATEX).
    pub vat_exemption_reason_code: Option<String>,
}

/// BG-20: Document-level allowance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowance {
    /// BT-92: Allowance amount. Zero or positive.
    pub net_amount: Option<Decimal>,
    /// BT-95: VAT category of the allowance.
    pub vat_category: Option<TaxCategory>,
    /// BT-96: VAT rate of the allowance.
    pub vat_rate: Option<Decimal>,
    /// BT-97: Reason.
    pub reason: Option<String>,
}

/// BG-21: Document-level charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    /// BT-99: Charge amount. Zero or positive.
    pub net_amount: Option<Decimal>,
    /// BT-102: VAT category of the charge.
    pub vat_category: Option<TaxCategory>,
    /// BT-103: VAT rate of the charge.
    pub vat_rate: Option<Decimal>,
    /// BT-104: Reason.
    pub reason: Option<String>,
}

/// BG-16: Payment instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInstructions {
    /// BT-81: Payment means type code (UNTDID 4461), see [`payment_means`].
    pub means_type: Option<String>,
    /// BT-82: Payment means text.
    pub means_text: Option<String>,
    /// BT-83: Remittance information.
    pub remittance_info: Option<String>,
    /// BT-20: Payment terms.
    pub payment_terms: Option<String>,
    /// BG-17: Credit transfers.
    pub credit_transfers: Vec<CreditTransfer>,
    /// BG-18: Payment card information.
    pub payment_card_information: Option<PaymentCardInformation>,
    /// BG-19: Direct debit.
    pub direct_debit: Option<DirectDebit>,
}

/// BG-17: Credit transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditTransfer {
    /// BT-84: Payment account identifier (IBAN).
    pub iban: Option<String>,
    /// BT-85: Payment account name.
    pub account_name: Option<String>,
    /// BT-86: Payment service provider identifier (BIC).
    pub bic: Option<String>,
}

/// BG-18: Payment card information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentCardInformation {
    /// BT-87: Payment card primary account number (masked).
    pub account_number: Option<String>,
    /// BT-88: Payment card holder name.
    pub card_holder_name: Option<String>,
}

/// BG-19: SEPA direct debit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectDebit {
    /// BT-89: Mandate reference identifier.
    pub mandate_reference: Option<String>,
    /// BT-90: Bank assigned creditor identifier.
    pub creditor_id: Option<String>,
    /// BT-91: Debited account identifier (IBAN).
    pub debited_account_iban: Option<String>,
}

/// BG-3: Preceding invoice reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecedingInvoiceReference {
    /// BT-25: Preceding invoice number.
    pub preceding_invoice_reference: Option<String>,
    /// BT-26: Preceding invoice issue date.
    pub preceding_invoice_issue_date: Option<NaiveDate>,
}

/// BG-1: Invoice note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceNote {
    /// BT-22: Note text.
    pub note: Option<String>,
}

/// Something that carries a net amount and a VAT rate.
pub trait NetAmount {
    /// Net amount without VAT.
    fn net_amount(&self) -> Option<Decimal>;
    /// VAT rate in percent applying to the net amount.
    fn vat_rate(&self) -> Option<Decimal>;
}

impl NetAmount for Item {
    /// BT-131: Invoice line net amount.
    fn net_amount(&self) -> Option<Decimal> {
        self.item_total_net_amount
    }

    fn vat_rate(&self) -> Option<Decimal> {
        self.vat.as_ref().and_then(|v| v.rate)
    }
}

impl NetAmount for Allowance {
    fn net_amount(&self) -> Option<Decimal> {
        self.net_amount
    }

    fn vat_rate(&self) -> Option<Decimal> {
        self.vat_rate
    }
}

impl NetAmount for Charge {
    fn net_amount(&self) -> Option<Decimal> {
        self.net_amount
    }

    fn vat_rate(&self) -> Option<Decimal> {
        self.vat_rate
    }
}

/// UNTDID 5305 — the subset of tax category codes allowed in XRechnung.
///
/// The enumeration is exhaustive; there is no fallback for unknown codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TaxCategory {
    /// S — Standard or reduced rate.
    StandardRate,
    /// Z — Zero rated goods.
    ZeroRatedGoods,
    /// E — Exempt from tax. Requires an exemption reason (BT-120).
    ExemptFromTax,
    /// AE — Reverse charge. Seller and buyer VAT ids required, rate 0%.
    ReverseCharge,
    /// K — Intra-community supply. Seller and buyer VAT ids required.
    IntraCommunitySupply,
    /// G — Free export item, tax not charged.
    FreeExportItem,
    /// O — Services outside scope of tax.
    ServicesOutsideScopeOfTax,
    /// L — Canary Islands general indirect tax.
    CanaryIslandsGeneralIndirectTax,
    /// M — Tax for production, services and importation in Ceuta and Melilla.
    CeutaAndMelillaTax,
}

impl TaxCategory {
    /// All categories, in code list order.
    pub const ALL: [TaxCategory; 9] = [
        Self::StandardRate,
        Self::ZeroRatedGoods,
        Self::ExemptFromTax,
        Self::ReverseCharge,
        Self::IntraCommunitySupply,
        Self::FreeExportItem,
        Self::ServicesOutsideScopeOfTax,
        Self::CanaryIslandsGeneralIndirectTax,
        Self::CeutaAndMelillaTax,
    ];

    /// UNTDID 5305 code as written to the XML.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRatedGoods => "Z",
            Self::ExemptFromTax => "E",
            Self::ReverseCharge => "AE",
            Self::IntraCommunitySupply => "K",
            Self::FreeExportItem => "G",
            Self::ServicesOutsideScopeOfTax => "O",
            Self::CanaryIslandsGeneralIndirectTax => "L",
            Self::CeutaAndMelillaTax => "M",
        }
    }

    /// Resolve a UNTDID 5305 code, ignoring ASCII case.
    pub fn from_code(code: &str) -> Result<Self, RechnungError> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| RechnungError::UnknownTaxCategory(code.to_string()))
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaxCategory {
    type Err = RechnungError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl TryFrom<String> for TaxCategory {
    type Error = RechnungError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value)
    }
}

impl From<TaxCategory> for &'static str {
    fn from(category: TaxCategory) -> Self {
        category.code()
    }
}

/// UNTDID 1001 — Invoice type codes (BT-3) accepted by XRechnung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    /// 380 — Commercial invoice.
    CommercialInvoice,
    /// 384 — Corrected invoice (e.g. Stornorechnung). Needs a BG-3 reference.
    CorrectedInvoice,
    /// 381 — Credit note.
    CreditNote,
    /// 389 — Self-billed invoice (Gutschrift nach § 14 Abs. 2 UStG).
    SelfBilledInvoice,
    /// 326 — Partial invoice.
    PartialInvoice,
    /// 875 — Partial construction invoice.
    PartialConstructionInvoice,
    /// 876 — Partial final construction invoice.
    PartialFinalConstructionInvoice,
    /// 877 — Final construction invoice.
    FinalConstructionInvoice,
    /// 000 — Unofficial invalid type; validation of the result will fail.
    Unsupported,
}

impl InvoiceType {
    /// UNTDID 1001 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommercialInvoice => "380",
            Self::CorrectedInvoice => "384",
            Self::CreditNote => "381",
            Self::SelfBilledInvoice => "389",
            Self::PartialInvoice => "326",
            Self::PartialConstructionInvoice => "875",
            Self::PartialFinalConstructionInvoice => "876",
            Self::FinalConstructionInvoice => "877",
            Self::Unsupported => "000",
        }
    }

    /// Parse from UNTDID 1001 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "380" => Some(Self::CommercialInvoice),
            "384" => Some(Self::CorrectedInvoice),
            "381" => Some(Self::CreditNote),
            "389" => Some(Self::SelfBilledInvoice),
            "326" => Some(Self::PartialInvoice),
            "875" => Some(Self::PartialConstructionInvoice),
            "876" => Some(Self::PartialFinalConstructionInvoice),
            "877" => Some(Self::FinalConstructionInvoice),
            "000" => Some(Self::Unsupported),
            _ => None,
        }
    }
}

/// UNTDID 4461 — common payment means codes (BT-81). Not exhaustive.
pub mod payment_means {
    /// Payment in cash.
    pub const CASH: &str = "10";
    /// SEPA credit transfer.
    pub const SEPA_CREDIT_TRANSFER: &str = "58";
    /// SEPA direct debit.
    pub const SEPA_DIRECT_DEBIT: &str = "59";
    /// Online payment service (e.g. PayPal).
    pub const ONLINE_PAYMENT_SERVICE: &str = "68";
}

/// UN/ECE Recommendation 20/21 unit codes (BT-130). Not exhaustive.
pub mod unit_codes {
    /// A loose or unpacked article, the unit used in the XRechnung samples.
    pub const PIECE: &str = "XPP";
    /// Hour.
    pub const HOUR: &str = "HUR";
    /// One (unit).
    pub const ONE: &str = "C62";
}
