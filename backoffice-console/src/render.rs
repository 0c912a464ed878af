//! HTML fragments swapped into the console page. Every value that came from
//! the backend or the operator passes through [`escape_html`].

use rust_decimal::Decimal;
use std::fmt::Write;

use crate::aggregation::{totals_of, TransactionFilter};
use crate::models::{Amount, Payment, Receipt, Transaction, TransactionKind};
use crate::utils::format::{
    escape_html, format_currency, format_date, format_input, format_signed, MISSING_VALUE,
};
use crate::views::FinancialsSnapshot;

pub const EMPTY_TRANSACTIONS: &str = "Δεν υπάρχουν κινήσεις";
pub const EMPTY_RECEIPTS: &str = "Δεν υπάρχουν αποδείξεις";
pub const EMPTY_PAYMENTS: &str = "Δεν υπάρχουν πληρωμές";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

pub fn notice(level: NoticeLevel, headline: &str, detail: &str) -> String {
    let mut html = format!(
        r#"<div class="{}" role="alert"><strong>{}</strong>"#,
        level.class(),
        escape_html(headline)
    );
    if !detail.is_empty() {
        let _ = write!(html, " <span>{}</span>", escape_html(detail));
    }
    html.push_str("</div>");
    html
}

fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="empty-state"><h3>{}</h3></div>"#,
        escape_html(message)
    )
}

fn kind_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Receipt => "type-receipt",
        TransactionKind::Payment => "type-payment",
    }
}

fn amount_text(amount: &Amount) -> String {
    match amount.checked() {
        Some(value) => format_currency(value),
        None => MISSING_VALUE.to_string(),
    }
}

/// The merged list in the order given. An empty slice renders the empty
/// state, never a blank container.
pub fn transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return empty_state(EMPTY_TRANSACTIONS);
    }

    let mut html = String::new();
    for t in transactions {
        let kind = t.kind();
        let amount = match t.amount().checked() {
            Some(value) => format_signed(kind, value),
            None => MISSING_VALUE.to_string(),
        };
        let _ = write!(
            html,
            concat!(
                r#"<div class="transaction-item" data-kind="{kind}" data-id="{id}">"#,
                r#"<div class="transaction-type {class}">{label}</div>"#,
                r#"<div><strong>{name}</strong></div>"#,
                r#"<div>{date}</div>"#,
                r#"<div class="{class} transaction-amount">{amount}</div>"#,
                r#"<div class="transaction-meta">#{number} - {reason}</div>"#,
                "</div>"
            ),
            kind = kind.as_str(),
            id = t.id(),
            class = kind_class(kind),
            label = kind.label(),
            name = escape_html(t.counterparty()),
            date = format_date(t.date()),
            amount = amount,
            number = escape_html(t.number()),
            reason = escape_html(t.reason()),
        );
    }
    html
}

/// Inflow, outflow and net of the visible rows.
pub fn transaction_totals(transactions: &[Transaction]) -> String {
    let totals = totals_of(transactions);
    format!(
        concat!(
            r#"<div class="transaction-totals">"#,
            r#"<span class="type-receipt">Εισπράξεις: {}</span>"#,
            r#"<span class="type-payment">Πληρωμές: {}</span>"#,
            r#"<span><strong>Υπόλοιπο: {}</strong></span>"#,
            "</div>"
        ),
        format_currency(totals.inflow),
        format_currency(totals.outflow),
        format_currency(totals.net),
    )
}

fn filter_query(path: &str, filter: TransactionFilter) -> String {
    format!(
        "{path}?receipts={}&amp;payments={}",
        filter.show_receipts, filter.show_payments
    )
}

fn checkbox(label: &str, checked: bool, toggled: TransactionFilter) -> String {
    format!(
        concat!(
            r#"<label><input type="checkbox" hx-get="{}" hx-trigger="change" "#,
            r##"hx-target="#transactions-panel" hx-swap="outerHTML"{}> {}</label>"##
        ),
        filter_query("/transactions", toggled),
        if checked { " checked" } else { "" },
        label
    )
}

/// Filter toggles, totals and the list. Toggling a box re-renders from the
/// loaded aggregate without refetching.
pub fn transactions_panel(filter: TransactionFilter, transactions: &[Transaction]) -> String {
    let toggle_receipts = TransactionFilter {
        show_receipts: !filter.show_receipts,
        ..filter
    };
    let toggle_payments = TransactionFilter {
        show_payments: !filter.show_payments,
        ..filter
    };

    format!(
        concat!(
            r#"<div id="transactions-panel">"#,
            r#"<div class="transaction-filters">"#,
            "{}{}",
            r##"<button type="button" class="btn" hx-post="{}" hx-target="#transactions-panel" hx-swap="outerHTML">Ανανέωση</button>"##,
            "</div>",
            "{}",
            r#"<div class="transactions-list">{}</div>"#,
            "</div>"
        ),
        checkbox("Εισπράξεις", filter.show_receipts, toggle_receipts),
        checkbox("Πληρωμές", filter.show_payments, toggle_payments),
        filter_query("/transactions/reload", filter),
        transaction_totals(transactions),
        transaction_list(transactions),
    )
}

pub fn receipt_cards(receipts: &[Receipt]) -> String {
    if receipts.is_empty() {
        return empty_state(EMPTY_RECEIPTS);
    }

    let mut html = String::new();
    for receipt in receipts {
        let _ = write!(
            html,
            concat!(
                r#"<div class="receipt-card" data-id="{id}">"#,
                r#"<div class="card-header">"#,
                r#"<div class="card-title">Απόδειξη #{number}</div>"#,
                r#"<div class="card-badge">{amount}</div>"#,
                "</div>",
                r#"<div class="card-body"><div class="card-info">"#,
                r#"<div class="info-item"><strong>Πελάτης:</strong> {customer}</div>"#,
                r#"<div class="info-item"><strong>Ημερομηνία:</strong> {date}</div>"#,
                r#"<div class="info-item"><strong>Αιτία:</strong> {reason}</div>"#,
                "</div></div></div>"
            ),
            id = receipt.id,
            number = escape_html(&receipt.receipt_number),
            amount = amount_text(&receipt.amount),
            customer = escape_html(&receipt.customer_name),
            date = format_date(receipt.date),
            reason = escape_html(&receipt.reason),
        );
    }
    html
}

pub fn payment_cards(payments: &[Payment]) -> String {
    if payments.is_empty() {
        return empty_state(EMPTY_PAYMENTS);
    }

    let mut html = String::new();
    for payment in payments {
        let _ = write!(
            html,
            concat!(
                r#"<div class="payment-card" data-id="{id}">"#,
                r#"<div class="card-header">"#,
                r#"<div class="card-title">Πληρωμή #{number}</div>"#,
                r#"<div class="card-badge">{amount}</div>"#,
                "</div>",
                r#"<div class="card-body"><div class="card-info">"#,
                r#"<div class="info-item"><strong>Δικαιούχος:</strong> {payee}</div>"#,
                r#"<div class="info-item"><strong>Ημερομηνία:</strong> {date}</div>"#,
                r#"<div class="info-item"><strong>Αιτία:</strong> {reason}</div>"#,
                "</div></div></div>"
            ),
            id = payment.id,
            number = escape_html(&payment.payment_number),
            amount = amount_text(&payment.amount),
            payee = escape_html(payment.counterparty()),
            date = format_date(payment.date),
            reason = escape_html(&payment.reason),
        );
    }
    html
}

pub fn cost_result(cost: Decimal) -> String {
    format!(
        r#"<span class="cost-result">{} / m²</span>"#,
        format_currency(cost)
    )
}

/// Settings form, expense total and metric. The transaction list below it is
/// loaded separately.
pub fn financials_panel(snapshot: &FinancialsSnapshot) -> String {
    let company = &snapshot.company;
    let cost = snapshot
        .cost_per_square_meter
        .map(cost_result)
        .unwrap_or_default();
    let malformed = if snapshot.expenses.malformed > 0 {
        format!(
            r#"<div class="notice notice-warning">{} πληρωμές χωρίς έγκυρο ποσό υπολογίστηκαν ως 0.</div>"#,
            snapshot.expenses.malformed
        )
    } else {
        String::new()
    };

    format!(
        concat!(
            r#"<div id="financials-panel">"#,
            r#"<h2>{company_name}</h2>"#,
            r##"<form class="financial-settings" hx-post="/financials/settings" hx-target="#notifications">"##,
            r#"<label>Αρχικό κεφάλαιο (€) <input type="text" inputmode="decimal" name="starting_capital" value="{capital}"></label>"#,
            r#"<label>Τετραγωνικά μέτρα <input type="text" inputmode="decimal" name="square_meters" value="{square_meters}"></label>"#,
            r#"<button type="submit" class="btn btn-primary">Αποθήκευση</button>"#,
            "</form>",
            r#"<div class="financial-metrics">"#,
            r#"<div><strong>Συνολικά έξοδα:</strong> <span id="total-expenses">{total}</span></div>"#,
            "{malformed}",
            r##"<button type="button" class="btn" hx-get="/financials/cost-per-sqm" hx-include="[name='square_meters']" hx-target="#cost-result">Υπολογισμός κόστους / m²</button>"##,
            r#"<div id="cost-result">{cost}</div>"#,
            "</div>",
            r#"<div hx-post="/transactions/reload" hx-trigger="load" hx-swap="outerHTML"></div>"#,
            "</div>"
        ),
        company_name = escape_html(company.company_name.as_deref().unwrap_or_default()),
        capital = escape_html(&format_input(company.starting_capital)),
        square_meters = escape_html(&format_input(company.square_meters)),
        total = format_currency(snapshot.expenses.total),
        malformed = malformed,
        cost = cost,
    )
}
