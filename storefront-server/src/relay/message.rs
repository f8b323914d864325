//! Outbound order message renderer
//!
//! Plain text with WhatsApp markup (`*bold*`), one section per block:
//! header, items, totals, customer, logistics, footer.

use shared::models::{Logistics, Order, OrderLine};
use std::fmt::Write;

const RULE: &str = "------------------";

/// Order text sent to the branch
pub struct OrderMessage<'a> {
    order: &'a Order,
    lines: &'a [OrderLine],
}

impl<'a> OrderMessage<'a> {
    pub fn new(order: &'a Order, lines: &'a [OrderLine]) -> Self {
        Self { order, lines }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_header(&mut out);
        self.render_items(&mut out);
        self.render_totals(&mut out);
        self.render_customer(&mut out);
        self.render_logistics(&mut out);
        self.render_footer(&mut out);
        out
    }

    fn render_header(&self, out: &mut String) {
        let _ = writeln!(out, "*Novo Pedido {}*", self.order.number);
        let _ = writeln!(out, "{}", RULE);
    }

    fn render_items(&self, out: &mut String) {
        for line in self.lines {
            let _ = writeln!(
                out,
                "• {}x {} (R$ {:.2})",
                line.quantity, line.product_name, line.unit_price
            );
            if line.add_ons.rent_tables {
                let _ = writeln!(out, "  - Orçamento Mesas: Sim");
            }
            if line.add_ons.rent_umbrellas {
                let _ = writeln!(out, "  - Orçamento Ombrelones: Sim");
            }
            if let Some(cups) = line.add_ons.cups_quantity.filter(|c| *c > 0) {
                let _ = writeln!(out, "  - Copos: {} un.", cups);
            }
        }
    }

    fn render_totals(&self, out: &mut String) {
        out.push('\n');
        if let Some(percent) = self.order.discount_percent {
            let _ = writeln!(out, "Subtotal: R$ {:.2}", self.order.subtotal);
            let _ = writeln!(out, "Desconto: {}%", percent);
        }
        let _ = writeln!(out, "*Total Aprox.: R$ {:.2}*", self.order.total);
    }

    fn render_customer(&self, out: &mut String) {
        let customer = &self.order.customer;
        let _ = writeln!(out, "\n👤 *Dados do Cliente*");
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "Nome: {}", customer.name);
        if let Some(phone) = &customer.phone {
            let _ = writeln!(out, "Telefone: {}", phone);
        }
        if let Some(birth_date) = &customer.birth_date {
            let _ = writeln!(out, "Nascimento: {}", birth_date);
        }
        let _ = writeln!(out, "📍 Unidade: {}", self.order.branch.display_name());
        let _ = writeln!(
            out,
            "💰 Pagamento: {}",
            self.order.payment_method.display_name()
        );
    }

    fn render_logistics(&self, out: &mut String) {
        match &self.order.logistics {
            Logistics::Delivery { address } => {
                let _ = writeln!(out, "Endereço: {}", address);
            }
            Logistics::Event {
                address,
                date,
                time,
                voltage,
                deferred,
            } => {
                let _ = writeln!(out, "\n🎉 *Evento*");
                let _ = writeln!(out, "{}", RULE);
                if *deferred {
                    let _ = writeln!(out, "Detalhes do evento serão enviados depois");
                }
                if let Some(address) = address {
                    let _ = writeln!(out, "Local: {}", address);
                }
                if let Some(date) = date {
                    let _ = writeln!(out, "Data: {}", date.format("%d/%m/%Y"));
                }
                if let Some(time) = time {
                    let _ = writeln!(out, "Horário: {}", time.format("%H:%M"));
                }
                if let Some(voltage) = voltage {
                    let _ = writeln!(out, "Voltagem: {}", voltage.as_str());
                }
                let _ = writeln!(out, "Volume: {} L", self.order.bulk_volume_liters);
            }
        }
    }

    fn render_footer(&self, out: &mut String) {
        let _ = write!(out, "\n{}\nGostaria de confirmar o pedido.", RULE);
    }
}
