use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::tree::{Element, XmlDocumentBuilder};
use super::{BUYER_REFERENCE_FALLBACK, PEPPOL_PROFILE_ID, XRECHNUNG_CUSTOMIZATION_ID, cii_ns};
use crate::core::*;

type XmlResult<T = Element> = Result<T, XmlError>;

const VAT_TYPE_CODE: &str = "VAT";

/// Generate XRechnung-compliant CII (Cross Industry Invoice) XML.
///
/// Missing data never fails the generation: depending on the field the
/// element is written empty or left out. The result is well-formed XML but
/// only a valid XRechnung if the invoice data is complete and consistent.
pub fn to_cii_xml(invoice: &Invoice) -> Result<Vec<u8>, RechnungError> {
    debug!(
        "generating CII for invoice {:?}: {} items, {} VAT totals",
        invoice.document_id,
        invoice.items.len(),
        invoice.vat_totals.len()
    );
    let xml = write_document(invoice).map_err(RechnungError::Creation)?;
    debug!("generated {} bytes of CII", xml.len());
    Ok(xml)
}

/// Same as [`to_cii_xml`], returned as a `String`.
pub fn to_cii_string(invoice: &Invoice) -> Result<String, RechnungError> {
    let xml = to_cii_xml(invoice)?;
    String::from_utf8(xml).map_err(|e| RechnungError::Creation(XmlError::Utf8(e)))
}

fn write_document(invoice: &Invoice) -> XmlResult<Vec<u8>> {
    let mut b = XmlDocumentBuilder::new();
    b.register_namespace("rsm", cii_ns::RSM);
    b.register_namespace("ram", cii_ns::RAM);
    b.register_namespace("udt", cii_ns::UDT);
    b.register_namespace("qdt", cii_ns::QDT);

    let mut root = b.create_element(cii_ns::RSM, "CrossIndustryInvoice")?;
    root.append_child(exchanged_document_context(&b)?);
    root.append_child(exchanged_document(&b, invoice)?);

    let mut transaction = b.create_element(cii_ns::RSM, "SupplyChainTradeTransaction")?;
    for item in &invoice.items {
        transaction.append_child(trade_line_item(&b, item)?);
    }
    transaction.append_child(header_trade_agreement(&b, invoice)?);
    transaction.append_child(header_trade_delivery(&b, invoice)?);
    transaction.append_child(header_trade_settlement(&b, invoice)?);
    root.append_child(transaction);

    b.set_root(root)?;
    b.serialize()
}

fn exchanged_document_context(b: &XmlDocumentBuilder) -> XmlResult {
    let mut context = b.create_element(cii_ns::RSM, "ExchangedDocumentContext")?;
    // BT-23
    let mut business = ram(b, "BusinessProcessSpecifiedDocumentContextParameter")?;
    business.append_child(ram_text(b, "ID", Some(PEPPOL_PROFILE_ID))?);
    context.append_child(business);
    // BT-24
    let mut guideline = ram(b, "GuidelineSpecifiedDocumentContextParameter")?;
    guideline.append_child(ram_text(b, "ID", Some(XRECHNUNG_CUSTOMIZATION_ID))?);
    context.append_child(guideline);
    Ok(context)
}

fn exchanged_document(b: &XmlDocumentBuilder, invoice: &Invoice) -> XmlResult {
    let mut document = b.create_element(cii_ns::RSM, "ExchangedDocument")?;
    document.append_child(ram_text(b, "ID", invoice.document_id.as_deref())?);
    document.append_child(ram_text(b, "TypeCode", invoice.document_type_code.as_deref())?);
    document.append_child(date_element(b, "IssueDateTime", cii_ns::UDT, invoice.issue_date)?);
    for note in &invoice.invoice_notes {
        if let Some(text) = non_blank(&note.note) {
            let mut included = ram(b, "IncludedNote")?;
            included.append_child(ram_text(b, "Content", Some(text))?);
            document.append_child(included);
        }
    }
    Ok(document)
}

fn trade_line_item(b: &XmlDocumentBuilder, item: &Item) -> XmlResult {
    let mut line = ram(b, "IncludedSupplyChainTradeLineItem")?;

    let mut line_document = ram(b, "AssociatedDocumentLineDocument")?;
    let line_id = item.id.map(|id| id.to_string());
    line_document.append_child(ram_text(b, "LineID", line_id.as_deref())?);
    line.append_child(line_document);

    let mut product = ram(b, "SpecifiedTradeProduct")?;
    if let Some(id) = non_blank(&item.seller_assigned_id) {
        product.append_child(ram_text(b, "SellerAssignedID", Some(id))?);
    }
    product.append_child(ram_text(b, "Name", item.name.as_deref())?);
    if let Some(description) = non_blank(&item.description) {
        product.append_child(ram_text(b, "Description", Some(description))?);
    }
    for attribute in &item.item_attributes {
        let mut characteristic = ram(b, "ApplicableProductCharacteristic")?;
        characteristic.append_child(ram_text(b, "Description", attribute.name.as_deref())?);
        characteristic.append_child(ram_text(b, "Value", attribute.value.as_deref())?);
        product.append_child(characteristic);
    }
    line.append_child(product);

    // BG-29: price details, the net price always refers to one unit
    let unit_code = item.unit_code.as_deref().unwrap_or_default();
    let mut agreement = ram(b, "SpecifiedLineTradeAgreement")?;
    let mut net_price = ram(b, "NetPriceProductTradePrice")?;
    net_price.append_child(amount(b, "ChargeAmount", item.unit_price)?);
    let mut basis_quantity = ram_text(b, "BasisQuantity", Some("1"))?;
    basis_quantity.set_attribute("unitCode", unit_code);
    net_price.append_child(basis_quantity);
    agreement.append_child(net_price);
    line.append_child(agreement);

    let mut delivery = ram(b, "SpecifiedLineTradeDelivery")?;
    let mut billed_quantity = amount(b, "BilledQuantity", item.quantity)?;
    billed_quantity.set_attribute("unitCode", unit_code);
    delivery.append_child(billed_quantity);
    line.append_child(delivery);

    let mut settlement = ram(b, "SpecifiedLineTradeSettlement")?;
    settlement.append_child(trade_tax(b, "ApplicableTradeTax", item.vat.as_ref())?);
    let mut summation = ram(b, "SpecifiedTradeSettlementLineMonetarySummation")?;
    summation.append_child(amount(b, "LineTotalAmount", item.net_amount())?); // BT-131
    settlement.append_child(summation);
    line.append_child(settlement);

    Ok(line)
}

fn header_trade_agreement(b: &XmlDocumentBuilder, invoice: &Invoice) -> XmlResult {
    let mut agreement = ram(b, "ApplicableHeaderTradeAgreement")?;

    // BT-10 is mandatory in XRechnung
    let buyer_reference = non_blank(&invoice.leitweg_id).unwrap_or(BUYER_REFERENCE_FALLBACK);
    agreement.append_child(ram_text(b, "BuyerReference", Some(buyer_reference))?);

    if let Some(seller) = &invoice.seller {
        agreement.append_child(trade_party(b, "SellerTradeParty", seller, true)?);
    }
    if let Some(buyer) = &invoice.buyer {
        agreement.append_child(trade_party(b, "BuyerTradeParty", buyer, false)?);
    }

    let mut order_reference = ram(b, "SellerOrderReferencedDocument")?;
    order_reference.append_child(ram_text(
        b,
        "IssuerAssignedID",
        invoice.sales_order_reference.as_deref(),
    )?);
    agreement.append_child(order_reference);

    Ok(agreement)
}

fn trade_party(
    b: &XmlDocumentBuilder,
    element: &str,
    party: &SellerOrBuyer,
    with_contact: bool,
) -> XmlResult {
    let mut el = ram(b, element)?;
    el.append_child(ram_text(b, "Name", party.name.as_deref())?);
    if with_contact {
        el.append_child(trade_contact(b, party.contact.as_ref())?);
    }
    el.append_child(postal_address(b, party.address.as_ref())?);

    let mut communication = ram(b, "URIUniversalCommunication")?;
    let mut uri_id = ram_text(b, "URIID", party.electronic_address.as_deref())?;
    uri_id.set_attribute("schemeID", "EM");
    communication.append_child(uri_id);
    el.append_child(communication);

    if let Some(vat_id) = non_blank(&party.vat_id) {
        let mut registration = ram(b, "SpecifiedTaxRegistration")?;
        let mut id = ram_text(b, "ID", Some(vat_id))?;
        id.set_attribute("schemeID", "VA");
        registration.append_child(id);
        el.append_child(registration);
    }
    Ok(el)
}

fn trade_contact(b: &XmlDocumentBuilder, contact: Option<&Contact>) -> XmlResult {
    let mut el = ram(b, "DefinedTradeContact")?;
    let Some(contact) = contact else {
        return Ok(el);
    };
    el.append_child(ram_text(b, "PersonName", contact.name.as_deref())?);
    let mut telephone = ram(b, "TelephoneUniversalCommunication")?;
    telephone.append_child(ram_text(b, "CompleteNumber", contact.phone.as_deref())?);
    el.append_child(telephone);
    let mut email = ram(b, "EmailURIUniversalCommunication")?;
    email.append_child(ram_text(b, "URIID", contact.email.as_deref())?);
    el.append_child(email);
    Ok(el)
}

fn postal_address(b: &XmlDocumentBuilder, address: Option<&PostalAddress>) -> XmlResult {
    let mut el = ram(b, "PostalTradeAddress")?;
    let Some(address) = address else {
        return Ok(el);
    };
    el.append_child(ram_text(b, "PostcodeCode", address.zip_code.as_deref())?);
    el.append_child(ram_text(b, "LineOne", address.address_line_one.as_deref())?);
    el.append_child(ram_text(b, "CityName", address.city.as_deref())?);
    el.append_child(ram_text(b, "CountryID", address.country_iso_code.as_deref())?);
    Ok(el)
}

fn header_trade_delivery(b: &XmlDocumentBuilder, invoice: &Invoice) -> XmlResult {
    let mut delivery = ram(b, "ApplicableHeaderTradeDelivery")?;
    let Some(info) = &invoice.delivery_info else {
        return Ok(delivery);
    };

    let mut ship_to = ram(b, "ShipToTradeParty")?;
    ship_to.append_child(ram_text(b, "Name", info.name.as_deref())?);
    ship_to.append_child(postal_address(b, info.delivery_address.as_ref())?);
    delivery.append_child(ship_to);

    // BT-72
    if let Some(date) = info.actual_delivery_date {
        let mut event = ram(b, "ActualDeliverySupplyChainEvent")?;
        event.append_child(date_element(b, "OccurrenceDateTime", cii_ns::UDT, Some(date))?);
        delivery.append_child(event);
    }
    Ok(delivery)
}

fn header_trade_settlement(b: &XmlDocumentBuilder, invoice: &Invoice) -> XmlResult {
    let mut settlement = ram(b, "ApplicableHeaderTradeSettlement")?;
    let payment = invoice.payment_instructions.as_ref();
    let direct_debit = payment.and_then(|p| p.direct_debit.as_ref());

    // BT-90
    if let Some(dd) = direct_debit {
        settlement.append_child(ram_text(b, "CreditorReferenceID", dd.creditor_id.as_deref())?);
    }
    // BT-83
    if let Some(info) = payment.and_then(|p| non_blank(&p.remittance_info)) {
        settlement.append_child(ram_text(b, "PaymentReference", Some(info))?);
    }
    settlement.append_child(ram_text(b, "InvoiceCurrencyCode", invoice.currency.as_deref())?);
    settlement.append_child(payment_means(b, payment)?);

    for vat in &invoice.vat_totals {
        settlement.append_child(trade_tax(b, "ApplicableTradeTax", Some(vat))?);
    }
    for allowance in &invoice.allowances {
        settlement.append_child(allowance_charge(
            b,
            allowance,
            false,
            allowance.vat_category,
            allowance.reason.as_deref(),
        )?);
    }
    for charge in &invoice.charges {
        settlement.append_child(allowance_charge(
            b,
            charge,
            true,
            charge.vat_category,
            charge.reason.as_deref(),
        )?);
    }

    // BT-20
    if let Some(terms) = payment.and_then(|p| non_blank(&p.payment_terms)) {
        let mut payment_terms = ram(b, "SpecifiedTradePaymentTerms")?;
        payment_terms.append_child(ram_text(b, "Description", Some(terms))?);
        if let Some(dd) = direct_debit {
            payment_terms.append_child(ram_text(
                b,
                "DirectDebitMandateID",
                dd.mandate_reference.as_deref(),
            )?);
        }
        settlement.append_child(payment_terms);
    }

    settlement.append_child(monetary_summation(b, invoice)?);

    for reference in &invoice.preceding_invoice_references {
        settlement.append_child(preceding_invoice_reference(b, reference)?);
    }
    Ok(settlement)
}

/// BG-16. Written even without payment instructions, then empty.
fn payment_means(b: &XmlDocumentBuilder, payment: Option<&PaymentInstructions>) -> XmlResult {
    let mut means = ram(b, "SpecifiedTradeSettlementPaymentMeans")?;
    let Some(payment) = payment else {
        return Ok(means);
    };

    means.append_child(ram_text(b, "TypeCode", payment.means_type.as_deref())?);
    if let Some(text) = non_blank(&payment.means_text) {
        means.append_child(ram_text(b, "Information", Some(text))?);
    }

    // BG-17: the BIC lives in a sibling of the account, not inside it
    for transfer in &payment.credit_transfers {
        let mut account = ram(b, "PayeePartyCreditorFinancialAccount")?;
        account.append_child(ram_text(b, "IBANID", transfer.iban.as_deref())?);
        if let Some(name) = non_blank(&transfer.account_name) {
            account.append_child(ram_text(b, "AccountName", Some(name))?);
        }
        means.append_child(account);
        if let Some(bic) = non_blank(&transfer.bic) {
            let mut institution = ram(b, "PayeeSpecifiedCreditorFinancialInstitution")?;
            institution.append_child(ram_text(b, "BICID", Some(bic))?);
            means.append_child(institution);
        }
    }

    // BG-19
    if let Some(dd) = &payment.direct_debit {
        let mut debtor = ram(b, "PayerPartyDebtorFinancialAccount")?;
        debtor.append_child(ram_text(b, "IBANID", dd.debited_account_iban.as_deref())?);
        means.append_child(debtor);
    }

    // BG-18
    if let Some(card) = &payment.payment_card_information {
        let mut el = ram(b, "ApplicableTradeSettlementFinancialCard")?;
        el.append_child(ram_text(b, "ID", card.account_number.as_deref())?);
        el.append_child(ram_text(b, "CardholderName", card.card_holder_name.as_deref())?);
        means.append_child(el);
    }
    Ok(means)
}

fn monetary_summation(b: &XmlDocumentBuilder, invoice: &Invoice) -> XmlResult {
    let mut sum = ram(b, "SpecifiedTradeSettlementHeaderMonetarySummation")?;
    sum.append_child(amount(b, "LineTotalAmount", invoice.line_total_amount)?); // BT-106
    if invoice.charge_total_amount.is_some() {
        sum.append_child(amount(b, "ChargeTotalAmount", invoice.charge_total_amount)?); // BT-108
    }
    if invoice.allowance_total_amount.is_some() {
        sum.append_child(amount(b, "AllowanceTotalAmount", invoice.allowance_total_amount)?); // BT-107
    }
    sum.append_child(amount(b, "TaxBasisTotalAmount", invoice.tax_basis_total_amount)?); // BT-109
    if invoice.tax_total_amount.is_some() {
        let mut tax_total = amount(b, "TaxTotalAmount", invoice.tax_total_amount)?; // BT-110
        tax_total.set_attribute("currencyID", invoice.currency.as_deref().unwrap_or_default());
        sum.append_child(tax_total);
    }
    sum.append_child(amount(b, "GrandTotalAmount", invoice.grand_total_amount)?); // BT-112
    sum.append_child(amount(b, "DuePayableAmount", invoice.due_payable_amount)?); // BT-115
    Ok(sum)
}

/// BG-3
fn preceding_invoice_reference(
    b: &XmlDocumentBuilder,
    reference: &PrecedingInvoiceReference,
) -> XmlResult {
    let mut el = ram(b, "InvoiceReferencedDocument")?;
    el.append_child(ram_text(
        b,
        "IssuerAssignedID",
        reference.preceding_invoice_reference.as_deref(),
    )?);
    if let Some(date) = reference.preceding_invoice_issue_date {
        el.append_child(date_element(b, "FormattedIssueDateTime", cii_ns::QDT, Some(date))?);
    }
    Ok(el)
}

/// BG-20 / BG-21
fn allowance_charge<T: NetAmount>(
    b: &XmlDocumentBuilder,
    entry: &T,
    is_charge: bool,
    category: Option<TaxCategory>,
    reason: Option<&str>,
) -> XmlResult {
    let mut el = ram(b, "SpecifiedTradeAllowanceCharge")?;

    let mut indicator = ram(b, "ChargeIndicator")?;
    let mut value = b.create_element(cii_ns::UDT, "Indicator")?;
    value.set_text(if is_charge { "true" } else { "false" });
    indicator.append_child(value);
    el.append_child(indicator);

    el.append_child(amount(b, "ActualAmount", entry.net_amount())?);
    el.append_child(ram_text(b, "Reason", reason)?);

    let tax = Vat {
        category,
        rate: entry.vat_rate(),
        ..Vat::default()
    };
    el.append_child(trade_tax(b, "CategoryTradeTax", Some(&tax))?);
    Ok(el)
}

/// Tax block shared by line VAT (BG-30), VAT breakdown (BG-23) and
/// allowance/charge categories. Each element is left out when its value
/// is absent, except the fixed type code.
fn trade_tax(b: &XmlDocumentBuilder, element: &str, vat: Option<&Vat>) -> XmlResult {
    let mut el = ram(b, element)?;
    let Some(vat) = vat else {
        return Ok(el);
    };
    if vat.tax_amount.is_some() {
        el.append_child(amount(b, "CalculatedAmount", vat.tax_amount)?); // BT-117
    }
    el.append_child(ram_text(b, "TypeCode", Some(VAT_TYPE_CODE))?);
    if let Some(text) = &vat.vat_exemption_reason_text {
        el.append_child(ram_text(b, "ExemptionReason", Some(text.as_str()))?); // BT-120
    }
    if let Some(code) = &vat.vat_exemption_reason_code {
        el.append_child(ram_text(b, "ExemptionReasonCode", Some(code.as_str()))?); // BT-121
    }
    if vat.taxable_amount.is_some() {
        el.append_child(amount(b, "BasisAmount", vat.taxable_amount)?); // BT-116
    }
    if let Some(category) = vat.category {
        el.append_child(ram_text(b, "CategoryCode", Some(category.code()))?);
    }
    if vat.rate.is_some() {
        el.append_child(amount(b, "RateApplicablePercent", vat.rate)?);
    }
    Ok(el)
}

fn ram(b: &XmlDocumentBuilder, name: &str) -> XmlResult {
    b.create_element(cii_ns::RAM, name)
}

/// `ram:` element whose text is set when a value is given, empty otherwise.
fn ram_text(b: &XmlDocumentBuilder, name: &str, text: Option<&str>) -> XmlResult {
    let mut el = ram(b, name)?;
    if let Some(text) = text {
        el.set_text(text);
    }
    Ok(el)
}

/// Decimals keep their own scale; no rounding happens here.
fn amount(b: &XmlDocumentBuilder, name: &str, value: Option<Decimal>) -> XmlResult {
    let text = value.map(|v| v.to_string());
    ram_text(b, name, text.as_deref())
}

/// `<ram:{name}><{ns}:DateTimeString format="102">yyyyMMdd</...></ram:{name}>`
fn date_element(
    b: &XmlDocumentBuilder,
    name: &str,
    namespace: &str,
    date: Option<NaiveDate>,
) -> XmlResult {
    let mut el = ram(b, name)?;
    let mut date_time = b.create_element(namespace, "DateTimeString")?;
    date_time.set_attribute("format", "102");
    if let Some(date) = date {
        date_time.set_text(date.format("%Y%m%d").to_string());
    }
    el.append_child(date_time);
    Ok(el)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
