/// The console's top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Receipts,
    Payments,
    Transactions,
    Financials,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Receipts,
        Tab::Payments,
        Tab::Transactions,
        Tab::Financials,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Receipts => "receipts",
            Tab::Payments => "payments",
            Tab::Transactions => "transactions",
            Tab::Financials => "financials",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Receipts => "Αποδείξεις",
            Tab::Payments => "Πληρωμές",
            Tab::Transactions => "Κινήσεις",
            Tab::Financials => "Οικονομικά",
        }
    }

    /// Headline of the notice shown when the tab fails to load.
    pub fn load_failure(&self) -> &'static str {
        match self {
            Tab::Receipts => "Αποτυχία φόρτωσης αποδείξεων",
            Tab::Payments => "Αποτυχία φόρτωσης πληρωμών",
            Tab::Transactions => "Αποτυχία φόρτωσης κινήσεων",
            Tab::Financials => "Αποτυχία φόρτωσης οικονομικών στοιχείων",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.slug() == s)
            .ok_or_else(|| format!("unknown tab '{s}'"))
    }
}
