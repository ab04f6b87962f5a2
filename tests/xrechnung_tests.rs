#![cfg(feature = "xrechnung")]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::error::Error as _;
use xrechnung_cii::core::*;
use xrechnung_cii::xrechnung::{self, cii_ns};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> SellerOrBuyer {
    SellerOrBuyer::builder()
        .name("ACME GmbH")
        .vat_id("DE123456789")
        .electronic_address("seller@acme.de")
        .address(
            PostalAddress::builder()
                .address_line_one("Friedrichstraße 123")
                .city("Berlin")
                .zip_code("10115")
                .country_iso_code("DE")
                .build(),
        )
        .contact(
            Contact::builder()
                .name("Max Mustermann")
                .phone("+49 30 12345")
                .email("max@acme.de")
                .build(),
        )
        .build()
}

fn buyer() -> SellerOrBuyer {
    SellerOrBuyer::builder()
        .name("Kunde AG")
        .electronic_address("buyer@kunde.de")
        .address(
            PostalAddress::builder()
                .address_line_one("Marienplatz 1")
                .city("München")
                .zip_code("80331")
                .country_iso_code("DE")
                .build(),
        )
        .build()
}

fn standard_vat() -> Vat {
    Vat::builder()
        .category(TaxCategory::StandardRate)
        .rate(dec!(19))
        .build()
}

/// Complete domestic invoice with two lines and SEPA credit transfer.
fn xrechnung_invoice() -> InvoiceBuilder {
    InvoiceBuilder::new()
        .document_id("RE-2024-001")
        .issue_date(date(2024, 6, 15))
        .invoice_type(InvoiceType::CommercialInvoice)
        .currency("EUR")
        .leitweg_id("04011000-12345-03")
        .sales_order_reference("AB-4711")
        .seller(seller())
        .buyer(buyer())
        .add_item(
            Item::builder()
                .id(1)
                .name("Softwareentwicklung")
                .description("React Frontend")
                .quantity(dec!(80))
                .unit_code(unit_codes::HOUR)
                .unit_price(dec!(120.00))
                .item_total_net_amount(dec!(9600.00))
                .vat(standard_vat())
                .build(),
        )
        .add_item(
            Item::builder()
                .id(2)
                .name("Hosting")
                .quantity(dec!(1))
                .unit_code(unit_codes::ONE)
                .unit_price(dec!(49.90))
                .item_total_net_amount(dec!(49.90))
                .vat(standard_vat())
                .build(),
        )
        .add_vat_total(
            Vat::builder()
                .category(TaxCategory::StandardRate)
                .rate(dec!(19))
                .taxable_amount(dec!(9649.90))
                .tax_amount(dec!(1833.48))
                .build(),
        )
        .payment_instructions(
            PaymentInstructions::builder()
                .means_type(payment_means::SEPA_CREDIT_TRANSFER)
                .remittance_info("RE-2024-001")
                .payment_terms("Zahlbar innerhalb von 30 Tagen")
                .add_credit_transfer(
                    CreditTransfer::builder()
                        .iban("DE89370400440532013000")
                        .account_name("ACME GmbH")
                        .bic("COBADEFFXXX")
                        .build(),
                )
                .build(),
        )
        .line_total_amount(dec!(9649.90))
        .tax_basis_total_amount(dec!(9649.90))
        .tax_total_amount(dec!(1833.48))
        .grand_total_amount(dec!(11483.38))
        .due_payable_amount(dec!(11483.38))
}

fn cii(invoice: &Invoice) -> String {
    xrechnung::to_cii_string(invoice).unwrap()
}

/// Position of `needle` in `xml`, panicking with context when missing.
fn pos(xml: &str, needle: &str) -> usize {
    xml.find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{xml}"))
}

// ---------------------------------------------------------------------------
// Document frame
// ---------------------------------------------------------------------------

#[test]
fn cii_generation_produces_declaration_and_root() {
    let xml = cii(&xrechnung_invoice().build());
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<rsm:CrossIndustryInvoice"));
    assert!(xml.trim_end().ends_with("</rsm:CrossIndustryInvoice>"));
}

#[test]
fn root_declares_exactly_four_namespaces() {
    let xml = cii(&xrechnung_invoice().build());
    assert_eq!(xml.matches("xmlns:").count(), 4);
    for (prefix, uri) in [
        ("rsm", cii_ns::RSM),
        ("ram", cii_ns::RAM),
        ("udt", cii_ns::UDT),
        ("qdt", cii_ns::QDT),
    ] {
        assert!(xml.contains(&format!("xmlns:{prefix}=\"{uri}\"")), "{prefix}");
    }
}

#[test]
fn document_context_carries_profile_and_guideline() {
    let xml = cii(&Invoice::default());
    let business = pos(&xml, xrechnung::PEPPOL_PROFILE_ID);
    let guideline = pos(&xml, xrechnung::XRECHNUNG_CUSTOMIZATION_ID);
    assert!(business < guideline);
}

#[test]
fn exchanged_document_fields() {
    let xml = cii(&xrechnung_invoice().build());
    assert!(xml.contains("<ram:ID>RE-2024-001</ram:ID>"));
    assert!(xml.contains("<ram:TypeCode>380</ram:TypeCode>"));
    assert!(xml.contains("<udt:DateTimeString format=\"102\">20240615</udt:DateTimeString>"));
}

#[test]
fn generation_is_deterministic() {
    let invoice = xrechnung_invoice().note("Vielen Dank für Ihren Auftrag.").build();
    let first = xrechnung::to_cii_xml(&invoice).unwrap();
    let second = xrechnung::to_cii_xml(&invoice).unwrap();
    assert_eq!(first, second);
}

#[test]
fn top_level_sections_in_order() {
    let xml = cii(&xrechnung_invoice().build());
    let context = pos(&xml, "<rsm:ExchangedDocumentContext>");
    let document = pos(&xml, "<rsm:ExchangedDocument>");
    let line = pos(&xml, "<ram:IncludedSupplyChainTradeLineItem>");
    let agreement = pos(&xml, "<ram:ApplicableHeaderTradeAgreement>");
    let delivery = pos(&xml, "<ram:ApplicableHeaderTradeDelivery");
    let settlement = pos(&xml, "<ram:ApplicableHeaderTradeSettlement>");
    assert!(context < document);
    assert!(document < line);
    assert!(line < agreement);
    assert!(agreement < delivery);
    assert!(delivery < settlement);
}

// ---------------------------------------------------------------------------
// Buyer reference (BT-10) and notes
// ---------------------------------------------------------------------------

#[test]
fn buyer_reference_falls_back_when_absent() {
    let xml = cii(&InvoiceBuilder::new().build());
    assert!(xml.contains("<ram:BuyerReference>N/A</ram:BuyerReference>"));
}

#[test]
fn buyer_reference_falls_back_when_blank() {
    let xml = cii(&InvoiceBuilder::new().leitweg_id("   ").build());
    assert!(xml.contains("<ram:BuyerReference>N/A</ram:BuyerReference>"));
}

#[test]
fn buyer_reference_is_written_verbatim() {
    let xml = cii(&InvoiceBuilder::new().leitweg_id(" 991-33333TEST-33 ").build());
    assert!(xml.contains("<ram:BuyerReference> 991-33333TEST-33 </ram:BuyerReference>"));
}

#[test]
fn non_blank_notes_are_included_in_order() {
    let invoice = InvoiceBuilder::new()
        .note("Erste Bemerkung")
        .add_invoice_note(InvoiceNote::default())
        .note(" ")
        .note("Zweite Bemerkung")
        .build();
    let xml = cii(&invoice);
    assert_eq!(xml.matches("<ram:IncludedNote>").count(), 2);
    assert!(pos(&xml, "Erste Bemerkung") < pos(&xml, "Zweite Bemerkung"));
}

#[test]
fn no_notes_no_included_note() {
    let xml = cii(&xrechnung_invoice().build());
    assert!(!xml.contains("IncludedNote"));
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

#[test]
fn line_item_structure() {
    let xml = cii(&xrechnung_invoice().build());
    assert_eq!(xml.matches("<ram:IncludedSupplyChainTradeLineItem>").count(), 2);
    assert!(xml.contains("<ram:LineID>1</ram:LineID>"));
    assert!(xml.contains("<ram:Name>Softwareentwicklung</ram:Name>"));
    assert!(xml.contains("<ram:Description>React Frontend</ram:Description>"));
    assert!(xml.contains("<ram:ChargeAmount>120.00</ram:ChargeAmount>"));
    assert!(xml.contains("<ram:BasisQuantity unitCode=\"HUR\">1</ram:BasisQuantity>"));
    assert!(xml.contains("<ram:BilledQuantity unitCode=\"HUR\">80</ram:BilledQuantity>"));
    assert!(xml.contains("<ram:LineTotalAmount>9600.00</ram:LineTotalAmount>"));
}

#[test]
fn line_without_unit_code_gets_empty_unit_attribute() {
    let invoice = InvoiceBuilder::new()
        .add_item(Item::builder().id(1).quantity(dec!(3)).build())
        .build();
    let xml = cii(&invoice);
    assert!(xml.contains("<ram:BasisQuantity unitCode=\"\">1</ram:BasisQuantity>"));
    assert!(xml.contains("<ram:BilledQuantity unitCode=\"\">3</ram:BilledQuantity>"));
}

#[test]
fn product_characteristics_follow_name() {
    let invoice = InvoiceBuilder::new()
        .add_item(
            Item::builder()
                .seller_assigned_id("SKU-1")
                .name("T-Shirt")
                .attribute("Größe", "L")
                .attribute("Farbe", "Blau")
                .build(),
        )
        .build();
    let xml = cii(&invoice);
    let sku = pos(&xml, "<ram:SellerAssignedID>SKU-1</ram:SellerAssignedID>");
    let name = pos(&xml, "<ram:Name>T-Shirt</ram:Name>");
    let size = pos(&xml, "<ram:Description>Größe</ram:Description>");
    let colour = pos(&xml, "<ram:Value>Blau</ram:Value>");
    assert!(sku < name && name < size && size < colour);
    assert_eq!(xml.matches("<ram:ApplicableProductCharacteristic>").count(), 2);
}

#[test]
fn blank_description_and_seller_id_are_omitted() {
    let invoice = InvoiceBuilder::new()
        .add_item(
            Item::builder()
                .name("Ware")
                .description("  ")
                .seller_assigned_id("")
                .build(),
        )
        .build();
    let xml = cii(&invoice);
    assert!(!xml.contains("SellerAssignedID"));
    assert!(!xml.contains("<ram:Description"));
}

#[test]
fn decimals_keep_their_scale() {
    let invoice = InvoiceBuilder::new()
        .add_item(
            Item::builder()
                .quantity(dec!(1.500))
                .unit_price(dec!(10))
                .item_total_net_amount(dec!(15.0))
                .build(),
        )
        .build();
    let xml = cii(&invoice);
    assert!(xml.contains(">1.500</ram:BilledQuantity>"));
    assert!(xml.contains("<ram:ChargeAmount>10</ram:ChargeAmount>"));
    assert!(xml.contains("<ram:LineTotalAmount>15.0</ram:LineTotalAmount>"));
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

#[test]
fn seller_party_block_order() {
    let xml = cii(&xrechnung_invoice().build());
    let seller = pos(&xml, "<ram:SellerTradeParty>");
    let name = pos(&xml, "<ram:Name>ACME GmbH</ram:Name>");
    let contact = pos(&xml, "<ram:DefinedTradeContact>");
    let address = pos(&xml, "<ram:PostcodeCode>10115</ram:PostcodeCode>");
    let uri = pos(&xml, "<ram:URIID schemeID=\"EM\">seller@acme.de</ram:URIID>");
    let vat = pos(&xml, "<ram:ID schemeID=\"VA\">DE123456789</ram:ID>");
    assert!(seller < name && name < contact && contact < address);
    assert!(address < uri && uri < vat);
    assert!(xml.contains("<ram:CompleteNumber>+49 30 12345</ram:CompleteNumber>"));
    assert!(xml.contains("<ram:URIID>max@acme.de</ram:URIID>"));
}

#[test]
fn seller_without_contact_gets_empty_contact() {
    let mut seller = seller();
    seller.contact = None;
    let xml = cii(&InvoiceBuilder::new().seller(seller).build());
    assert!(xml.contains("<ram:DefinedTradeContact/>"));
}

#[test]
fn buyer_has_no_contact_and_no_vat_registration_when_blank() {
    let xml = cii(&InvoiceBuilder::new().buyer(buyer()).build());
    assert!(!xml.contains("DefinedTradeContact"));
    assert!(!xml.contains("SpecifiedTaxRegistration"));
    assert!(xml.contains("<ram:CityName>München</ram:CityName>"));
}

#[test]
fn electronic_address_always_uses_email_scheme() {
    let buyer = SellerOrBuyer::builder()
        .electronic_address("0204:991-12345-67")
        .electronic_address_scheme("0204")
        .build();
    let xml = cii(&InvoiceBuilder::new().buyer(buyer).build());
    assert!(xml.contains("<ram:URIID schemeID=\"EM\">0204:991-12345-67</ram:URIID>"));
}

#[test]
fn order_reference_is_always_present() {
    let xml = cii(&Invoice::default());
    assert!(xml.contains("<ram:IssuerAssignedID/>"));
    let xml = cii(&xrechnung_invoice().build());
    assert!(xml.contains("<ram:IssuerAssignedID>AB-4711</ram:IssuerAssignedID>"));
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

#[test]
fn delivery_is_empty_without_info() {
    let xml = cii(&xrechnung_invoice().build());
    assert!(xml.contains("<ram:ApplicableHeaderTradeDelivery/>"));
}

#[test]
fn delivery_with_ship_to_and_date() {
    let delivery = DeliveryInformation::builder()
        .name("Lager Nord")
        .delivery_address(
            PostalAddress::builder()
                .address_line_one("Hafenstraße 5")
                .city("Hamburg")
                .zip_code("20095")
                .country_iso_code("DE")
                .build(),
        )
        .actual_delivery_date(date(2024, 6, 10))
        .build();
    let xml = cii(&xrechnung_invoice().delivery_info(delivery).build());
    let ship_to = pos(&xml, "<ram:ShipToTradeParty>");
    let event = pos(&xml, "<ram:ActualDeliverySupplyChainEvent>");
    assert!(ship_to < event);
    assert!(xml.contains("<udt:DateTimeString format=\"102\">20240610</udt:DateTimeString>"));
}

#[test]
fn delivery_without_date_has_no_event() {
    let delivery = DeliveryInformation::builder().name("Lager Nord").build();
    let xml = cii(&xrechnung_invoice().delivery_info(delivery).build());
    assert!(xml.contains("<ram:ShipToTradeParty>"));
    assert!(!xml.contains("ActualDeliverySupplyChainEvent"));
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

#[test]
fn payment_means_with_bic_as_sibling() {
    let xml = cii(&xrechnung_invoice().build());
    let means = pos(&xml, "<ram:SpecifiedTradeSettlementPaymentMeans>");
    let type_code = pos(&xml, "<ram:TypeCode>58</ram:TypeCode>");
    let account_end = pos(&xml, "</ram:PayeePartyCreditorFinancialAccount>");
    let institution = pos(&xml, "<ram:PayeeSpecifiedCreditorFinancialInstitution>");
    assert!(means < type_code && type_code < account_end && account_end < institution);
    assert!(xml.contains("<ram:IBANID>DE89370400440532013000</ram:IBANID>"));
    assert!(xml.contains("<ram:AccountName>ACME GmbH</ram:AccountName>"));
    assert!(xml.contains("<ram:BICID>COBADEFFXXX</ram:BICID>"));
}

#[test]
fn payment_means_is_empty_without_instructions() {
    let xml = cii(&Invoice::default());
    assert!(xml.contains("<ram:SpecifiedTradeSettlementPaymentMeans/>"));
    assert!(!xml.contains("PaymentReference"));
    assert!(!xml.contains("SpecifiedTradePaymentTerms"));
}

#[test]
fn settlement_order() {
    let xml = cii(&xrechnung_invoice().build());
    let reference = pos(&xml, "<ram:PaymentReference>RE-2024-001</ram:PaymentReference>");
    let currency = pos(&xml, "<ram:InvoiceCurrencyCode>EUR</ram:InvoiceCurrencyCode>");
    let means = pos(&xml, "<ram:SpecifiedTradeSettlementPaymentMeans>");
    let tax = pos(&xml, "<ram:CalculatedAmount>1833.48</ram:CalculatedAmount>");
    let terms = pos(&xml, "<ram:SpecifiedTradePaymentTerms>");
    let summation = pos(&xml, "<ram:SpecifiedTradeSettlementHeaderMonetarySummation>");
    assert!(reference < currency && currency < means && means < tax);
    assert!(tax < terms && terms < summation);
}

#[test]
fn direct_debit_fields() {
    let payment = PaymentInstructions::builder()
        .means_type(payment_means::SEPA_DIRECT_DEBIT)
        .payment_terms("Wird eingezogen")
        .direct_debit(
            DirectDebit::builder()
                .mandate_reference("MANDAT-1")
                .creditor_id("DE98ZZZ09999999999")
                .debited_account_iban("DE75512108001245126199")
                .build(),
        )
        .build();
    let xml = cii(&InvoiceBuilder::new().currency("EUR").payment_instructions(payment).build());

    let creditor = pos(&xml, "<ram:CreditorReferenceID>DE98ZZZ09999999999</ram:CreditorReferenceID>");
    let currency = pos(&xml, "<ram:InvoiceCurrencyCode>");
    assert!(creditor < currency);
    let debtor = pos(&xml, "<ram:PayerPartyDebtorFinancialAccount>");
    let iban = pos(&xml, "<ram:IBANID>DE75512108001245126199</ram:IBANID>");
    assert!(debtor < iban);
    let description = pos(&xml, "<ram:Description>Wird eingezogen</ram:Description>");
    let mandate = pos(&xml, "<ram:DirectDebitMandateID>MANDAT-1</ram:DirectDebitMandateID>");
    assert!(description < mandate);
}

#[test]
fn card_payment_fields() {
    let payment = PaymentInstructions::builder()
        .means_type("54")
        .means_text("Kreditkarte")
        .payment_card_information(
            PaymentCardInformation::builder()
                .account_number("4111")
                .card_holder_name("Max Mustermann")
                .build(),
        )
        .build();
    let xml = cii(&InvoiceBuilder::new().payment_instructions(payment).build());
    assert!(xml.contains("<ram:Information>Kreditkarte</ram:Information>"));
    let card = pos(&xml, "<ram:ApplicableTradeSettlementFinancialCard>");
    let id = pos(&xml, "<ram:ID>4111</ram:ID>");
    let holder = pos(&xml, "<ram:CardholderName>Max Mustermann</ram:CardholderName>");
    assert!(card < id && id < holder);
}

#[test]
fn exempt_vat_total_block() {
    let vat = Vat::builder()
        .category(TaxCategory::ExemptFromTax)
        .rate(dec!(0))
        .taxable_amount(dec!(100.00))
        .tax_amount(dec!(0.00))
        .vat_exemption_reason_text("Steuerfrei nach § 4 UStG")
        .vat_exemption_reason_code("VATEX-EU-132")
        .build();
    let xml = cii(&InvoiceBuilder::new().add_vat_total(vat).build());
    let calculated = pos(&xml, "<ram:CalculatedAmount>0.00</ram:CalculatedAmount>");
    let type_code = pos(&xml, "<ram:TypeCode>VAT</ram:TypeCode>");
    let reason = pos(&xml, "<ram:ExemptionReason>Steuerfrei nach § 4 UStG</ram:ExemptionReason>");
    let code = pos(&xml, "<ram:ExemptionReasonCode>VATEX-EU-132</ram:ExemptionReasonCode>");
    let basis = pos(&xml, "<ram:BasisAmount>100.00</ram:BasisAmount>");
    let category = pos(&xml, "<ram:CategoryCode>E</ram:CategoryCode>");
    let rate = pos(&xml, "<ram:RateApplicablePercent>0</ram:RateApplicablePercent>");
    assert!(calculated < type_code && type_code < reason && reason < code);
    assert!(code < basis && basis < category && category < rate);
}

#[test]
fn empty_exemption_reason_is_still_written() {
    let vat = Vat::builder().vat_exemption_reason_text("").build();
    let xml = cii(&InvoiceBuilder::new().add_vat_total(vat).build());
    assert!(xml.contains("<ram:ExemptionReason/>"));
}

#[test]
fn allowances_precede_charges() {
    let invoice = xrechnung_invoice()
        .add_charge(
            Charge::builder()
                .net_amount(dec!(4.90))
                .vat_category(TaxCategory::StandardRate)
                .vat_rate(dec!(19))
                .reason("Versand")
                .build()
                .unwrap(),
        )
        .add_allowance(
            Allowance::builder()
                .net_amount(dec!(10.00))
                .vat_category(TaxCategory::StandardRate)
                .vat_rate(dec!(19))
                .reason("Rabatt")
                .build()
                .unwrap(),
        )
        .allowance_total_amount(dec!(10.00))
        .charge_total_amount(dec!(4.90))
        .build();
    let xml = cii(&invoice);

    let allowance = pos(&xml, "<udt:Indicator>false</udt:Indicator>");
    let charge = pos(&xml, "<udt:Indicator>true</udt:Indicator>");
    assert!(allowance < charge);
    assert!(xml.contains("<ram:ActualAmount>10.00</ram:ActualAmount>"));
    assert!(xml.contains("<ram:Reason>Versand</ram:Reason>"));
    assert_eq!(xml.matches("<ram:CategoryTradeTax>").count(), 2);

    let charge_total = pos(&xml, "<ram:ChargeTotalAmount>4.90</ram:ChargeTotalAmount>");
    let allowance_total = pos(&xml, "<ram:AllowanceTotalAmount>10.00</ram:AllowanceTotalAmount>");
    assert!(charge_total < allowance_total);
}

#[test]
fn monetary_summation_order_and_currency() {
    let xml = cii(&xrechnung_invoice().build());
    let line = pos(&xml, "<ram:LineTotalAmount>9649.90</ram:LineTotalAmount>");
    let basis = pos(&xml, "<ram:TaxBasisTotalAmount>9649.90</ram:TaxBasisTotalAmount>");
    let tax = pos(&xml, "<ram:TaxTotalAmount currencyID=\"EUR\">1833.48</ram:TaxTotalAmount>");
    let grand = pos(&xml, "<ram:GrandTotalAmount>11483.38</ram:GrandTotalAmount>");
    let due = pos(&xml, "<ram:DuePayableAmount>11483.38</ram:DuePayableAmount>");
    assert!(line < basis && basis < tax && tax < grand && grand < due);
    assert!(!xml.contains("ChargeTotalAmount"));
    assert!(!xml.contains("AllowanceTotalAmount"));
}

#[test]
fn tax_total_without_currency_has_empty_currency_id() {
    let xml = cii(&InvoiceBuilder::new().tax_total_amount(dec!(1.00)).build());
    assert!(xml.contains("<ram:TaxTotalAmount currencyID=\"\">1.00</ram:TaxTotalAmount>"));
}

#[test]
fn corrected_invoice_references_preceding_invoice() {
    let invoice = xrechnung_invoice()
        .invoice_type(InvoiceType::CorrectedInvoice)
        .add_preceding_invoice_reference(
            PrecedingInvoiceReference::builder()
                .preceding_invoice_reference("RE-2024-000")
                .preceding_invoice_issue_date(date(2024, 5, 31))
                .build(),
        )
        .build();
    let xml = cii(&invoice);
    assert!(xml.contains("<ram:TypeCode>384</ram:TypeCode>"));
    let summation = pos(&xml, "</ram:SpecifiedTradeSettlementHeaderMonetarySummation>");
    let reference = pos(&xml, "<ram:InvoiceReferencedDocument>");
    assert!(summation < reference);
    assert!(xml.contains("<ram:IssuerAssignedID>RE-2024-000</ram:IssuerAssignedID>"));
    assert!(xml.contains("<qdt:DateTimeString format=\"102\">20240531</qdt:DateTimeString>"));
}

#[test]
fn text_is_escaped() {
    let invoice = InvoiceBuilder::new()
        .seller(SellerOrBuyer::builder().name("Müller & Söhne <GmbH>").build())
        .build();
    let xml = cii(&invoice);
    assert!(xml.contains("<ram:Name>Müller &amp; Söhne &lt;GmbH&gt;</ram:Name>"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn creation_error_display_and_source() {
    let err = RechnungError::Creation(XmlError::MissingRoot);
    assert_eq!(err.to_string(), "XRechnung creation failed");
    let source = err.source().expect("cause is kept");
    assert_eq!(source.to_string(), "document has no root element");
}

#[test]
fn xml_error_converts_into_creation_error() {
    let err: RechnungError = XmlError::RootAlreadySet.into();
    assert!(matches!(err, RechnungError::Creation(XmlError::RootAlreadySet)));
}

#[test]
fn generation_is_thread_safe() {
    let invoice = std::sync::Arc::new(xrechnung_invoice().build());
    let expected = xrechnung::to_cii_xml(&invoice).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let invoice = invoice.clone();
            std::thread::spawn(move || xrechnung::to_cii_xml(&invoice).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
