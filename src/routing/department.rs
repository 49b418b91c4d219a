//! Category to department lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::error::{Result, RouterError};

/// Where complaints of one category are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub category: CategoryLabel,
    pub department_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl DepartmentRecord {
    pub fn new(
        category: CategoryLabel,
        department_name: impl Into<String>,
        contact_email: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        DepartmentRecord {
            category,
            department_name: department_name.into(),
            contact_email: contact_email.into(),
            contact_phone: contact_phone.into(),
        }
    }
}

/// Built-in department table.
const DEFAULT_DEPARTMENTS: &[(CategoryLabel, &str, &str, &str)] = &[
    (
        CategoryLabel::ChildMarriage,
        "Child Welfare Committee",
        "cwc@example.org",
        "+1-555-0101",
    ),
    (
        CategoryLabel::CulturalDiscrimination,
        "District Legal Services Authority",
        "dlsa@example.org",
        "+1-555-0100",
    ),
    (
        CategoryLabel::CyberHarassment,
        "Cyber Crime Cell",
        "cybercell@example.org",
        "+1-555-0102",
    ),
    (
        CategoryLabel::DomesticViolence,
        "Women Protection Cell",
        "wpc@example.org",
        "+1-555-0103",
    ),
    (
        CategoryLabel::DowryHarassment,
        "Dowry Prohibition Cell",
        "dowrycell@example.org",
        "+1-555-0104",
    ),
    (
        CategoryLabel::GenderDiscrimination,
        "State Women Commission",
        "swc@example.org",
        "+1-555-0105",
    ),
    (
        CategoryLabel::GeneralComplaint,
        "District Legal Services Authority",
        "dlsa@example.org",
        "+1-555-0100",
    ),
    (
        CategoryLabel::LegalSystemFailure,
        "District Legal Services Authority",
        "dlsa@example.org",
        "+1-555-0100",
    ),
    (
        CategoryLabel::PublicHarassment,
        "Local Police Public Safety Wing",
        "publicsafety@example.org",
        "+1-555-0106",
    ),
    (
        CategoryLabel::SexualHarassment,
        "Special Women's Police Unit",
        "swpu@example.org",
        "+1-555-0107",
    ),
    (
        CategoryLabel::WorkplaceDiscrimination,
        "Labor Department",
        "labor@example.org",
        "+1-555-0108",
    ),
    (
        CategoryLabel::WorkplaceHarassment,
        "Internal Complaints Committee",
        "icc@example.org",
        "+1-555-0109",
    ),
];

/// Read-only department table with a guaranteed fallback row.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDirectory {
    records: BTreeMap<CategoryLabel, DepartmentRecord>,
    fallback: CategoryLabel,
}

impl DepartmentDirectory {
    /// Build a directory. The table must contain a row for `fallback` and at
    /// most one row per category.
    pub fn new(records: Vec<DepartmentRecord>, fallback: CategoryLabel) -> Result<Self> {
        let mut table = BTreeMap::new();
        for record in records {
            let category = record.category;
            if table.insert(category, record).is_some() {
                return Err(RouterError::invalid_config(format!(
                    "duplicate department row for {category}"
                )));
            }
        }
        if !table.contains_key(&fallback) {
            return Err(RouterError::invalid_config(format!(
                "department table has no row for the fallback category {fallback}"
            )));
        }
        Ok(DepartmentDirectory {
            records: table,
            fallback,
        })
    }

    /// The built-in table, falling back to General Complaint.
    pub fn builtin() -> Self {
        let records = DEFAULT_DEPARTMENTS
            .iter()
            .map(|&(category, name, email, phone)| {
                (category, DepartmentRecord::new(category, name, email, phone))
            })
            .collect();
        DepartmentDirectory {
            records,
            fallback: CategoryLabel::GeneralComplaint,
        }
    }

    /// Department for `category`, or the fallback row when it has none.
    pub fn resolve(&self, category: CategoryLabel) -> &DepartmentRecord {
        self.records
            .get(&category)
            .unwrap_or_else(|| self.fallback_record())
    }

    /// Like [`resolve`](Self::resolve) for a category name; unknown names
    /// get the fallback row.
    pub fn resolve_name(&self, name: &str) -> &DepartmentRecord {
        match name.parse::<CategoryLabel>() {
            Ok(category) => self.resolve(category),
            Err(_) => self.fallback_record(),
        }
    }

    pub fn fallback_record(&self) -> &DepartmentRecord {
        // Presence is checked on construction.
        &self.records[&self.fallback]
    }

    pub fn records(&self) -> impl Iterator<Item = &DepartmentRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for DepartmentDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_covers_every_category() {
        let directory = DepartmentDirectory::builtin();

        assert_eq!(directory.len(), CategoryLabel::ALL.len());
        for category in CategoryLabel::ALL {
            assert_eq!(directory.resolve(category).category, category);
        }
        assert_eq!(
            directory
                .resolve(CategoryLabel::WorkplaceHarassment)
                .department_name,
            "Internal Complaints Committee"
        );
        assert_eq!(
            directory.resolve(CategoryLabel::DowryHarassment).department_name,
            "Dowry Prohibition Cell"
        );
    }

    #[test]
    fn test_unknown_name_resolves_to_fallback() {
        let directory = DepartmentDirectory::builtin();

        let record = directory.resolve_name("Unknown Category");
        assert_eq!(record.category, CategoryLabel::GeneralComplaint);
        assert_eq!(record.department_name, "District Legal Services Authority");

        let record = directory.resolve_name("cyber harassment");
        assert_eq!(record.department_name, "Cyber Crime Cell");
    }

    #[test]
    fn test_missing_category_resolves_to_fallback() {
        let directory = DepartmentDirectory::new(
            vec![
                DepartmentRecord::new(
                    CategoryLabel::GeneralComplaint,
                    "Help Desk",
                    "help@example.org",
                    "+1-555-0199",
                ),
                DepartmentRecord::new(
                    CategoryLabel::CyberHarassment,
                    "Cyber Crime Cell",
                    "cyber@example.org",
                    "+1-555-0102",
                ),
            ],
            CategoryLabel::GeneralComplaint,
        )
        .unwrap();

        assert_eq!(
            directory.resolve(CategoryLabel::ChildMarriage).department_name,
            "Help Desk"
        );
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        let row = DepartmentRecord::new(
            CategoryLabel::CyberHarassment,
            "Cyber Crime Cell",
            "cyber@example.org",
            "+1-555-0102",
        );

        assert!(
            DepartmentDirectory::new(vec![row.clone()], CategoryLabel::GeneralComplaint).is_err()
        );
        assert!(
            DepartmentDirectory::new(vec![row.clone(), row], CategoryLabel::CyberHarassment)
                .is_err()
        );
    }
}
