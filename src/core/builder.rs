use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::RechnungError;
use super::types::*;

/// Builder for [`Invoice`].
///
/// Nothing is required: an invoice built without any setter is still
/// accepted by the writer and yields a well-formed (if invalid) XRechnung.
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use xrechnung_cii::core::*;
///
/// let invoice = Invoice::builder()
///     .document_id("RE-2025-1001")
///     .invoice_type(InvoiceType::CommercialInvoice)
///     .issue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
///     .currency("EUR")
///     .add_item(
///         Item::builder()
///             .id(1)
///             .name("Office chair")
///             .quantity(dec!(2))
///             .unit_code(unit_codes::PIECE)
///             .unit_price(dec!(199.99))
///             .item_total_net_amount(dec!(399.98))
///             .vat(Vat::builder().category(TaxCategory::StandardRate).rate(dec!(19)).build())
///             .build(),
///     )
///     .build();
///
/// assert_eq!(invoice.items.len(), 1);
/// assert_eq!(invoice.document_type_code.as_deref(), Some("380"));
/// ```
#[derive(Debug, Default)]
pub struct InvoiceBuilder {
    inner: Invoice,
}

impl Invoice {
    pub fn builder() -> InvoiceBuilder {
        InvoiceBuilder::new()
    }
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_id(mut self, id: impl Into<String>) -> Self {
        self.inner.document_id = Some(id.into());
        self
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.inner.issue_date = Some(date);
        self
    }

    pub fn document_type_code(mut self, code: impl Into<String>) -> Self {
        self.inner.document_type_code = Some(code.into());
        self
    }

    /// Sets BT-3 from a known invoice type.
    pub fn invoice_type(self, invoice_type: InvoiceType) -> Self {
        self.document_type_code(invoice_type.code())
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.inner.currency = Some(code.into());
        self
    }

    pub fn leitweg_id(mut self, id: impl Into<String>) -> Self {
        self.inner.leitweg_id = Some(id.into());
        self
    }

    pub fn sales_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.inner.sales_order_reference = Some(reference.into());
        self
    }

    pub fn payment_instructions(mut self, payment: PaymentInstructions) -> Self {
        self.inner.payment_instructions = Some(payment);
        self
    }

    pub fn seller(mut self, party: SellerOrBuyer) -> Self {
        self.inner.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: SellerOrBuyer) -> Self {
        self.inner.buyer = Some(party);
        self
    }

    pub fn delivery_info(mut self, delivery: DeliveryInformation) -> Self {
        self.inner.delivery_info = Some(delivery);
        self
    }

    pub fn add_item(mut self, item: Item) -> Self {
        self.inner.items.push(item);
        self
    }

    pub fn items(mut self, items: Vec<Item>) -> Self {
        self.inner.items = items;
        self
    }

    pub fn add_vat_total(mut self, vat: Vat) -> Self {
        self.inner.vat_totals.push(vat);
        self
    }

    pub fn vat_totals(mut self, vat_totals: Vec<Vat>) -> Self {
        self.inner.vat_totals = vat_totals;
        self
    }

    pub fn add_preceding_invoice_reference(mut self, reference: PrecedingInvoiceReference) -> Self {
        self.inner.preceding_invoice_references.push(reference);
        self
    }

    pub fn preceding_invoice_references(
        mut self,
        references: Vec<PrecedingInvoiceReference>,
    ) -> Self {
        self.inner.preceding_invoice_references = references;
        self
    }

    pub fn line_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.line_total_amount = Some(amount);
        self
    }

    pub fn allowance_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.allowance_total_amount = Some(amount);
        self
    }

    pub fn charge_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.charge_total_amount = Some(amount);
        self
    }

    pub fn tax_basis_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.tax_basis_total_amount = Some(amount);
        self
    }

    pub fn tax_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.tax_total_amount = Some(amount);
        self
    }

    pub fn grand_total_amount(mut self, amount: Decimal) -> Self {
        self.inner.grand_total_amount = Some(amount);
        self
    }

    pub fn due_payable_amount(mut self, amount: Decimal) -> Self {
        self.inner.due_payable_amount = Some(amount);
        self
    }

    pub fn add_invoice_note(mut self, note: InvoiceNote) -> Self {
        self.inner.invoice_notes.push(note);
        self
    }

    /// Shorthand for adding an [`InvoiceNote`] with the given text.
    pub fn note(self, text: impl Into<String>) -> Self {
        self.add_invoice_note(InvoiceNote::builder().note(text).build())
    }

    pub fn invoice_notes(mut self, notes: Vec<InvoiceNote>) -> Self {
        self.inner.invoice_notes = notes;
        self
    }

    pub fn add_allowance(mut self, allowance: Allowance) -> Self {
        self.inner.allowances.push(allowance);
        self
    }

    pub fn allowances(mut self, allowances: Vec<Allowance>) -> Self {
        self.inner.allowances = allowances;
        self
    }

    pub fn add_charge(mut self, charge: Charge) -> Self {
        self.inner.charges.push(charge);
        self
    }

    pub fn charges(mut self, charges: Vec<Charge>) -> Self {
        self.inner.charges = charges;
        self
    }

    pub fn build(self) -> Invoice {
        self.inner
    }
}

/// Builder for [`SellerOrBuyer`].
#[derive(Debug, Default)]
pub struct PartyBuilder {
    inner: SellerOrBuyer,
}

impl SellerOrBuyer {
    pub fn builder() -> PartyBuilder {
        PartyBuilder::default()
    }
}

impl PartyBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.inner.trading_name = Some(name.into());
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.inner.vat_id = Some(id.into());
        self
    }

    pub fn electronic_address(mut self, address: impl Into<String>) -> Self {
        self.inner.electronic_address = Some(address.into());
        self
    }

    pub fn electronic_address_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.inner.electronic_address_scheme = Some(scheme.into());
        self
    }

    pub fn address(mut self, address: PostalAddress) -> Self {
        self.inner.address = Some(address);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.inner.contact = Some(contact);
        self
    }

    pub fn build(self) -> SellerOrBuyer {
        self.inner
    }
}

/// Builder for [`PostalAddress`].
#[derive(Debug, Default)]
pub struct AddressBuilder {
    inner: PostalAddress,
}

impl PostalAddress {
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }
}

impl AddressBuilder {
    pub fn address_line_one(mut self, line: impl Into<String>) -> Self {
        self.inner.address_line_one = Some(line.into());
        self
    }

    pub fn address_line_two(mut self, line: impl Into<String>) -> Self {
        self.inner.address_line_two = Some(line.into());
        self
    }

    pub fn address_line_three(mut self, line: impl Into<String>) -> Self {
        self.inner.address_line_three = Some(line.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.inner.city = Some(city.into());
        self
    }

    pub fn zip_code(mut self, zip: impl Into<String>) -> Self {
        self.inner.zip_code = Some(zip.into());
        self
    }

    pub fn country_iso_code(mut self, code: impl Into<String>) -> Self {
        self.inner.country_iso_code = Some(code.into());
        self
    }

    pub fn build(self) -> PostalAddress {
        self.inner
    }
}

/// Builder for [`Contact`].
#[derive(Debug, Default)]
pub struct ContactBuilder {
    inner: Contact,
}

impl Contact {
    pub fn builder() -> ContactBuilder {
        ContactBuilder::default()
    }
}

impl ContactBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.inner.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.inner.email = Some(email.into());
        self
    }

    pub fn build(self) -> Contact {
        self.inner
    }
}

/// Builder for [`DeliveryInformation`].
#[derive(Debug, Default)]
pub struct DeliveryBuilder {
    inner: DeliveryInformation,
}

impl DeliveryInformation {
    pub fn builder() -> DeliveryBuilder {
        DeliveryBuilder::default()
    }
}

impl DeliveryBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn delivery_address(mut self, address: PostalAddress) -> Self {
        self.inner.delivery_address = Some(address);
        self
    }

    pub fn actual_delivery_date(mut self, date: NaiveDate) -> Self {
        self.inner.actual_delivery_date = Some(date);
        self
    }

    pub fn build(self) -> DeliveryInformation {
        self.inner
    }
}

/// Builder for [`Item`].
#[derive(Debug, Default)]
pub struct ItemBuilder {
    inner: Item,
}

impl Item {
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }
}

impl ItemBuilder {
    pub fn id(mut self, id: u64) -> Self {
        self.inner.id = Some(id);
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.inner.quantity = Some(quantity);
        self
    }

    pub fn unit_code(mut self, code: impl Into<String>) -> Self {
        self.inner.unit_code = Some(code.into());
        self
    }

    pub fn item_total_net_amount(mut self, amount: Decimal) -> Self {
        self.inner.item_total_net_amount = Some(amount);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.inner.unit_price = Some(price);
        self
    }

    pub fn vat(mut self, vat: Vat) -> Self {
        self.inner.vat = Some(vat);
        self
    }

    pub fn seller_assigned_id(mut self, id: impl Into<String>) -> Self {
        self.inner.seller_assigned_id = Some(id.into());
        self
    }

    pub fn add_item_attribute(mut self, attribute: ItemAttribute) -> Self {
        self.inner.item_attributes.push(attribute);
        self
    }

    /// Shorthand for adding a name/value [`ItemAttribute`].
    pub fn attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_item_attribute(ItemAttribute {
            name: Some(name.into()),
            value: Some(value.into()),
        })
    }

    pub fn item_attributes(mut self, attributes: Vec<ItemAttribute>) -> Self {
        self.inner.item_attributes = attributes;
        self
    }

    pub fn build(self) -> Item {
        self.inner
    }
}

/// Builder for [`ItemAttribute`].
#[derive(Debug, Default)]
pub struct ItemAttributeBuilder {
    inner: ItemAttribute,
}

impl ItemAttribute {
    pub fn builder() -> ItemAttributeBuilder {
        ItemAttributeBuilder::default()
    }
}

impl ItemAttributeBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.inner.value = Some(value.into());
        self
    }

    pub fn build(self) -> ItemAttribute {
        self.inner
    }
}

/// Builder for [`Vat`].
#[derive(Debug, Default)]
pub struct VatBuilder {
    inner: Vat,
}

impl Vat {
    pub fn builder() -> VatBuilder {
        VatBuilder::default()
    }
}

impl VatBuilder {
    pub fn rate(mut self, rate: Decimal) -> Self {
        self.inner.rate = Some(rate);
        self
    }

    pub fn category(mut self, category: TaxCategory) -> Self {
        self.inner.category = Some(category);
        self
    }

    pub fn taxable_amount(mut self, amount: Decimal) -> Self {
        self.inner.taxable_amount = Some(amount);
        self
    }

    pub fn tax_amount(mut self, amount: Decimal) -> Self {
        self.inner.tax_amount = Some(amount);
        self
    }

    pub fn vat_exemption_reason_text(mut self, text: impl Into<String>) -> Self {
        self.inner.vat_exemption_reason_text = Some(text.into());
        self
    }

    pub fn vat_exemption_reason_code(mut self, code: impl Into<String>) -> Self {
        self.inner.vat_exemption_reason_code = Some(code.into());
        self
    }

    pub fn build(self) -> Vat {
        self.inner
    }
}

fn check_net_amount(amount: Option<Decimal>) -> Result<(), RechnungError> {
    match amount {
        Some(a) if a < Decimal::ZERO => Err(RechnungError::Builder(format!(
            "net amount must be zero or positive, got {a}"
        ))),
        _ => Ok(()),
    }
}

/// Builder for [`Allowance`]. Rejects negative net amounts on `build()`.
#[derive(Debug, Default)]
pub struct AllowanceBuilder {
    inner: Allowance,
}

impl Allowance {
    pub fn builder() -> AllowanceBuilder {
        AllowanceBuilder::default()
    }
}

impl AllowanceBuilder {
    pub fn net_amount(mut self, amount: Decimal) -> Self {
        self.inner.net_amount = Some(amount);
        self
    }

    pub fn vat_category(mut self, category: TaxCategory) -> Self {
        self.inner.vat_category = Some(category);
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.inner.vat_rate = Some(rate);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.inner.reason = Some(reason.into());
        self
    }

    pub fn build(self) -> Result<Allowance, RechnungError> {
        check_net_amount(self.inner.net_amount)?;
        Ok(self.inner)
    }
}

/// Builder for [`Charge`]. Rejects negative net amounts on `build()`.
#[derive(Debug, Default)]
pub struct ChargeBuilder {
    inner: Charge,
}

impl Charge {
    pub fn builder() -> ChargeBuilder {
        ChargeBuilder::default()
    }
}

impl ChargeBuilder {
    pub fn net_amount(mut self, amount: Decimal) -> Self {
        self.inner.net_amount = Some(amount);
        self
    }

    pub fn vat_category(mut self, category: TaxCategory) -> Self {
        self.inner.vat_category = Some(category);
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.inner.vat_rate = Some(rate);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.inner.reason = Some(reason.into());
        self
    }

    pub fn build(self) -> Result<Charge, RechnungError> {
        check_net_amount(self.inner.net_amount)?;
        Ok(self.inner)
    }
}

/// Builder for [`PaymentInstructions`].
#[derive(Debug, Default)]
pub struct PaymentInstructionsBuilder {
    inner: PaymentInstructions,
}

impl PaymentInstructions {
    pub fn builder() -> PaymentInstructionsBuilder {
        PaymentInstructionsBuilder::default()
    }
}

impl PaymentInstructionsBuilder {
    pub fn means_type(mut self, code: impl Into<String>) -> Self {
        self.inner.means_type = Some(code.into());
        self
    }

    pub fn means_text(mut self, text: impl Into<String>) -> Self {
        self.inner.means_text = Some(text.into());
        self
    }

    pub fn remittance_info(mut self, info: impl Into<String>) -> Self {
        self.inner.remittance_info = Some(info.into());
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.inner.payment_terms = Some(terms.into());
        self
    }

    pub fn add_credit_transfer(mut self, transfer: CreditTransfer) -> Self {
        self.inner.credit_transfers.push(transfer);
        self
    }

    pub fn credit_transfers(mut self, transfers: Vec<CreditTransfer>) -> Self {
        self.inner.credit_transfers = transfers;
        self
    }

    pub fn payment_card_information(mut self, card: PaymentCardInformation) -> Self {
        self.inner.payment_card_information = Some(card);
        self
    }

    pub fn direct_debit(mut self, direct_debit: DirectDebit) -> Self {
        self.inner.direct_debit = Some(direct_debit);
        self
    }

    pub fn build(self) -> PaymentInstructions {
        self.inner
    }
}

/// Builder for [`CreditTransfer`].
#[derive(Debug, Default)]
pub struct CreditTransferBuilder {
    inner: CreditTransfer,
}

impl CreditTransfer {
    pub fn builder() -> CreditTransferBuilder {
        CreditTransferBuilder::default()
    }
}

impl CreditTransferBuilder {
    pub fn iban(mut self, iban: impl Into<String>) -> Self {
        self.inner.iban = Some(iban.into());
        self
    }

    pub fn account_name(mut self, name: impl Into<String>) -> Self {
        self.inner.account_name = Some(name.into());
        self
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.inner.bic = Some(bic.into());
        self
    }

    pub fn build(self) -> CreditTransfer {
        self.inner
    }
}

/// Builder for [`PaymentCardInformation`].
#[derive(Debug, Default)]
pub struct PaymentCardBuilder {
    inner: PaymentCardInformation,
}

impl PaymentCardInformation {
    pub fn builder() -> PaymentCardBuilder {
        PaymentCardBuilder::default()
    }
}

impl PaymentCardBuilder {
    /// BT-87. Only the last 4 to 6 digits should be given.
    pub fn account_number(mut self, number: impl Into<String>) -> Self {
        self.inner.account_number = Some(number.into());
        self
    }

    pub fn card_holder_name(mut self, name: impl Into<String>) -> Self {
        self.inner.card_holder_name = Some(name.into());
        self
    }

    pub fn build(self) -> PaymentCardInformation {
        self.inner
    }
}

/// Builder for [`DirectDebit`].
#[derive(Debug, Default)]
pub struct DirectDebitBuilder {
    inner: DirectDebit,
}

impl DirectDebit {
    pub fn builder() -> DirectDebitBuilder {
        DirectDebitBuilder::default()
    }
}

impl DirectDebitBuilder {
    pub fn mandate_reference(mut self, reference: impl Into<String>) -> Self {
        self.inner.mandate_reference = Some(reference.into());
        self
    }

    pub fn creditor_id(mut self, id: impl Into<String>) -> Self {
        self.inner.creditor_id = Some(id.into());
        self
    }

    pub fn debited_account_iban(mut self, iban: impl Into<String>) -> Self {
        self.inner.debited_account_iban = Some(iban.into());
        self
    }

    pub fn build(self) -> DirectDebit {
        self.inner
    }
}

/// Builder for [`PrecedingInvoiceReference`].
#[derive(Debug, Default)]
pub struct PrecedingInvoiceBuilder {
    inner: PrecedingInvoiceReference,
}

impl PrecedingInvoiceReference {
    pub fn builder() -> PrecedingInvoiceBuilder {
        PrecedingInvoiceBuilder::default()
    }
}

impl PrecedingInvoiceBuilder {
    pub fn preceding_invoice_reference(mut self, number: impl Into<String>) -> Self {
        self.inner.preceding_invoice_reference = Some(number.into());
        self
    }

    pub fn preceding_invoice_issue_date(mut self, date: NaiveDate) -> Self {
        self.inner.preceding_invoice_issue_date = Some(date);
        self
    }

    pub fn build(self) -> PrecedingInvoiceReference {
        self.inner
    }
}

/// Builder for [`InvoiceNote`].
#[derive(Debug, Default)]
pub struct InvoiceNoteBuilder {
    inner: InvoiceNote,
}

impl InvoiceNote {
    pub fn builder() -> InvoiceNoteBuilder {
        InvoiceNoteBuilder::default()
    }
}

impl InvoiceNoteBuilder {
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.inner.note = Some(text.into());
        self
    }

    pub fn build(self) -> InvoiceNote {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn allowance_rejects_negative_amount() {
        let err = Allowance::builder().net_amount(dec!(-0.01)).build().unwrap_err();
        assert!(matches!(err, RechnungError::Builder(_)));
    }

    #[test]
    fn charge_rejects_negative_amount() {
        assert!(Charge::builder().net_amount(dec!(-5)).build().is_err());
    }

    #[test]
    fn zero_and_absent_amounts_are_accepted() {
        assert!(Allowance::builder().net_amount(dec!(0)).build().is_ok());
        assert!(Allowance::builder().net_amount(dec!(-0)).build().is_ok());
        assert!(Charge::builder().build().is_ok());
    }

    #[test]
    fn invoice_type_sets_code() {
        let inv = Invoice::builder()
            .invoice_type(InvoiceType::CorrectedInvoice)
            .build();
        assert_eq!(inv.document_type_code.as_deref(), Some("384"));
    }

    #[test]
    fn list_setters_append_and_replace() {
        let inv = Invoice::builder()
            .note("first")
            .note("second")
            .add_item(Item::default())
            .items(vec![Item::builder().id(7).build()])
            .build();
        assert_eq!(inv.invoice_notes.len(), 2);
        assert_eq!(inv.invoice_notes[1].note.as_deref(), Some("second"));
        assert_eq!(inv.items.len(), 1);
        assert_eq!(inv.items[0].id, Some(7));
    }

    #[test]
    fn item_attribute_shorthand() {
        let item = Item::builder().attribute("Farbe", "Blau").build();
        assert_eq!(item.item_attributes[0].name.as_deref(), Some("Farbe"));
        assert_eq!(item.item_attributes[0].value.as_deref(), Some("Blau"));
    }

    #[test]
    fn net_amount_trait_on_item() {
        let item = Item::builder()
            .item_total_net_amount(dec!(399.98))
            .vat(Vat::builder().rate(dec!(19)).build())
            .build();
        assert_eq!(item.net_amount(), Some(dec!(399.98)));
        assert_eq!(item.vat_rate(), Some(dec!(19)));
        assert_eq!(Item::default().vat_rate(), None);
    }
}
