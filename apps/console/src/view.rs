//! # Text View
//!
//! Renders a [`CacheSnapshot`] as the plain-text customer list:
//!
//! ```text
//! 2 Customers
//! Name            Email
//! Ada Lovelace    ada@x.io
//! Grace Hopper    grace@navy.mil
//! ```
//!
//! Loading and error lines appear between the header and the table, and the
//! table is printed whenever data is cached, even alongside an error.

use std::fmt::Write;

use crate::state::CacheSnapshot;

const NAME_HEADER: &str = "Name";
const EMAIL_HEADER: &str = "Email";
const COLUMN_GAP: usize = 4;

/// Renders the list header, status lines and table.
pub fn render_list(snapshot: &CacheSnapshot) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} Customers", snapshot.total());

    if snapshot.is_loading {
        let _ = writeln!(out, "Loading...");
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "Error: {}", error.message);
    }

    if let Some(customers) = &snapshot.customers {
        let rows: Vec<(String, &str)> = customers
            .iter()
            .map(|c| (c.display_name(), c.email.as_str()))
            .collect();

        let width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .chain(std::iter::once(NAME_HEADER.len()))
            .max()
            .unwrap_or(0)
            + COLUMN_GAP;

        let _ = writeln!(out, "{:<width$}{}", NAME_HEADER, EMAIL_HEADER);
        for (name, email) in rows {
            let _ = writeln!(out, "{:<width$}{}", name, email);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patron_api::ApiError;
    use patron_core::Customer;

    #[test]
    fn test_empty_snapshot_shows_zero_header() {
        assert_eq!(render_list(&CacheSnapshot::default()), "0 Customers\n");
    }

    #[test]
    fn test_loading_line() {
        let snapshot = CacheSnapshot {
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(render_list(&snapshot), "0 Customers\nLoading...\n");
    }

    #[test]
    fn test_table_rows_in_order() {
        let snapshot = CacheSnapshot {
            customers: Some(vec![
                Customer::new("Ada", "Lovelace", "", "ada@x.io"),
                Customer::new("Grace", "Hopper", "Navy", "grace@navy.mil"),
            ]),
            ..Default::default()
        };

        let rendered = render_list(&snapshot);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "2 Customers");
        assert_eq!(lines[1], "Name            Email");
        assert_eq!(lines[2], "Ada Lovelace    ada@x.io");
        assert_eq!(lines[3], "Grace Hopper    grace@navy.mil");
    }

    #[test]
    fn test_error_shown_alongside_stale_rows() {
        let snapshot = CacheSnapshot {
            customers: Some(vec![Customer::new("Ada", "Lovelace", "", "ada@x.io")]),
            error: Some(ApiError::new("DB_DOWN", "database unavailable")),
            ..Default::default()
        };

        let rendered = render_list(&snapshot);

        assert!(rendered.starts_with("1 Customers\nError: database unavailable\n"));
        assert!(rendered.contains("ada@x.io"));
    }
}
