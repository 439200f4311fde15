use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One line of `sopmod list`.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct VersionRow {
    #[tabled(rename = "")]
    pub marker:  String,
    #[tabled(rename = "version")]
    pub version: String,
    #[tabled(rename = "")]
    pub note:    String,
}

impl VersionRow {
    pub fn new(version: &str, is_default: bool) -> Self {
        Self {
            marker:  if is_default { "*".into() } else { String::new() },
            version: version.to_string(),
            note:    if is_default { "(default)".into() } else { String::new() },
        }
    }
}

pub struct Formatter;

impl Formatter {
    /// Borderless table without the header row.
    pub fn plain<T: Tabled>(rows: impl IntoIterator<Item = T>) -> Table {
        let mut table = Table::new(rows);
        table.with(Style::blank());
        table.with(tabled::settings::Remove::row(tabled::settings::object::Rows::first()));
        table
    }
}
