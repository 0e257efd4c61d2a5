//! Commands typed into the terminal dashboard.

use super::state::DashboardState;

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Open the history of a row (1-based) or of a server identifier
    Open(Selection),
    /// Close the history panel
    Close,
    /// Leave the dashboard
    Quit,
    /// Blank line
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Row(usize),
    Server(String),
}

impl DashboardCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => DashboardCommand::Nothing,
            "q" | "quit" | "exit" => DashboardCommand::Quit,
            "c" | "close" => DashboardCommand::Close,
            _ => match line.parse::<usize>() {
                Ok(row) => DashboardCommand::Open(Selection::Row(row)),
                Err(_) => DashboardCommand::Open(Selection::Server(line.to_string())),
            },
        }
    }
}

impl Selection {
    /// Resolve to a server identifier against the displayed snapshot.
    ///
    /// Rows are 1-based. A name matches a record's identifier or its label;
    /// an unknown name is used verbatim as an identifier.
    pub fn resolve(&self, state: &DashboardState) -> Option<String> {
        match self {
            Selection::Row(row) => row
                .checked_sub(1)
                .and_then(|i| state.records.get(i))
                .map(|r| r.security_server.clone()),
            Selection::Server(name) => Some(
                state
                    .records
                    .iter()
                    .find(|r| &r.security_server == name || r.label.as_deref() == Some(name.as_str()))
                    .map(|r| r.security_server.clone())
                    .unwrap_or_else(|| name.clone()),
            ),
        }
    }
}
