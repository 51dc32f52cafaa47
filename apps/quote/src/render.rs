//! Plain-text invoice table.

use std::fmt;

use locadora_core::Invoice;

use crate::config::QuoteConfig;

/// Renders the invoice rows followed by the charges and totals.
///
/// ```text
/// Produto              Marca        Dias  Qtd   Valor unit.       Total
/// Betoneira 400L       Menegotti       5    2      R$ 60,00   R$ 600,00
/// ...
///                                              Subtotal       R$ 600,00
/// ```
pub fn render_table(invoice: &Invoice, config: &QuoteConfig) -> String {
    InvoiceTable { invoice, config }.to_string()
}

/// Table view of an invoice, formatted with the CLI currency settings.
pub struct InvoiceTable<'a> {
    pub invoice: &'a Invoice,
    pub config: &'a QuoteConfig,
}

impl fmt::Display for InvoiceTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |amount| self.config.format_currency(amount);
        let invoice = self.invoice;

        writeln!(
            f,
            "{:<24} {:<14} {:>5} {:>4} {:>14} {:>14}",
            "Produto", "Marca", "Dias", "Qtd", "Valor unit.", "Total"
        )?;
        for row in &invoice.rows {
            writeln!(
                f,
                "{:<24} {:<14} {:>5} {:>4} {:>14} {:>14}",
                row.name,
                row.marca,
                row.days,
                row.quantity,
                money(row.unit_price),
                money(row.total)
            )?;
        }
        if invoice.is_empty() {
            writeln!(f, "(sem itens)")?;
        }

        writeln!(f)?;
        for (label, amount) in [
            ("Subtotal", invoice.subtotal),
            ("Frete", invoice.charges.freight),
            ("Multa", invoice.charges.fine),
            ("Desconto", invoice.charges.discount),
            ("Total", invoice.total),
        ] {
            writeln!(f, "{:>63} {:>14}", label, money(amount))?;
        }
        Ok(())
    }
}
