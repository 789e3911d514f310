//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::core::Store;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Pretty-print any serializable value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Confirmation line for a completed write
pub fn print_done(quiet: bool, action: &str, what: &str, id: i64) {
    if quiet {
        return;
    }
    println!(
        "{} {} {} {}",
        style("✓").green(),
        action,
        what,
        style(format!("#{}", id)).cyan()
    );
}

/// Resolve a department given as numeric id or exact name
pub fn resolve_department(store: &Store, reference: &str) -> Result<i64> {
    if let Ok(id) = reference.trim().parse::<i64>() {
        if store.department_exists(id)? {
            return Ok(id);
        }
        return Err(miette::miette!("Department {} not found", id));
    }
    store
        .find_department_by_name(reference)?
        .map(|d| d.id)
        .ok_or_else(|| miette::miette!("No department named '{}'", reference.trim()))
}

/// Resolve a staff member given as numeric id or name
pub fn resolve_staff(store: &Store, reference: &str) -> Result<i64> {
    if let Ok(id) = reference.trim().parse::<i64>() {
        if store.staff_exists(id)? {
            return Ok(id);
        }
        return Err(miette::miette!("Staff {} not found", id));
    }
    store
        .find_staff_by_name(reference)?
        .map(|s| s.id)
        .ok_or_else(|| miette::miette!("No staff member named '{}'", reference.trim()))
}

/// Resolve a resource given as numeric id or exact name
pub fn resolve_resource(store: &Store, reference: &str) -> Result<i64> {
    if let Ok(id) = reference.trim().parse::<i64>() {
        return Ok(store.get_resource(id)?.id);
    }
    store
        .find_resource_by_name(reference)?
        .map(|r| r.id)
        .ok_or_else(|| miette::miette!("No resource named '{}'", reference.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DepartmentStatus;
    use crate::entities::{NewDepartment, NewResource, NewStaff};

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let store = Store::open_in_memory().unwrap();
        let icu = store
            .create_department(NewDepartment::new("ICU", DepartmentStatus::Green))
            .unwrap();
        let staff = store
            .create_staff(NewStaff::new("Bob Johnson", "Doctor", icu.id))
            .unwrap();
        let vent = store
            .create_resource(NewResource::new("Ventilator", 10, "units"))
            .unwrap();

        assert_eq!(resolve_department(&store, "ICU").unwrap(), icu.id);
        assert_eq!(resolve_department(&store, &icu.id.to_string()).unwrap(), icu.id);
        assert_eq!(resolve_staff(&store, "Bob Johnson").unwrap(), staff.id);
        assert_eq!(resolve_resource(&store, "Ventilator").unwrap(), vent.id);

        assert!(resolve_department(&store, "Morgue").is_err());
        assert!(resolve_department(&store, "42").is_err());
        assert!(resolve_staff(&store, "7").is_err());
        assert!(resolve_resource(&store, "9").is_err());
    }
}
