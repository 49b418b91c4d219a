//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, RouterArgs};
use crate::error::Result;
use crate::routing::department::DepartmentRecord;

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub confidence: f64,
    pub accepted: bool,
    pub threshold: f64,
    pub department: DepartmentRecord,
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub examples: usize,
    pub class_counts: BTreeMap<String, usize>,
    pub vocabulary_size: usize,
    pub training_accuracy: f64,
    pub duration_ms: u64,
    pub snapshot: Option<String>,
}

/// Result structure for the department listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct DepartmentList {
    pub departments: Vec<DepartmentRecord>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput: Serialize {
    fn print_human(&self) -> Result<()> {
        let value = serde_json::to_value(self)?;
        output_generic_human(&value);
        Ok(())
    }
}

impl HumanOutput for ClassificationResult {
    fn print_human(&self) -> Result<()> {
        let status = if self.accepted {
            "accepted"
        } else {
            "fallback"
        };
        println!("Category:   {}", self.category);
        println!(
            "Confidence: {:.3} ({status}, threshold {:.2})",
            self.confidence, self.threshold
        );
        println!();
        print_department(&self.department);
        Ok(())
    }
}

impl HumanOutput for TrainingResult {
    fn print_human(&self) -> Result<()> {
        println!("Training Summary:");
        println!("═════════════════");
        println!("Examples:          {}", self.examples);
        println!("Vocabulary size:   {}", self.vocabulary_size);
        println!("Training accuracy: {:.3}", self.training_accuracy);
        println!("Duration:          {} ms", self.duration_ms);
        if let Some(snapshot) = &self.snapshot {
            println!("Snapshot:          {snapshot}");
        }
        println!();
        println!("Examples per category:");
        for (category, count) in &self.class_counts {
            println!("  {category:<26} {count}");
        }
        Ok(())
    }
}

impl HumanOutput for DepartmentRecord {}

impl HumanOutput for DepartmentList {
    fn print_human(&self) -> Result<()> {
        println!("{:<26} {:<36} {:<26} PHONE", "CATEGORY", "DEPARTMENT", "EMAIL");
        for record in &self.departments {
            println!(
                "{:<26} {:<36} {:<26} {}",
                record.category.as_str(),
                record.department_name,
                record.contact_email,
                record.contact_phone
            );
        }
        Ok(())
    }
}

fn print_department(record: &DepartmentRecord) {
    println!("Department: {}", record.department_name);
    println!("Email:      {}", record.contact_email);
    println!("Phone:      {}", record.contact_phone);
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &RouterArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human()
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RouterArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let fields = obj
                .iter()
                .map(|(key, val)| format!("{key}={}", format_value(val)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{fields}}}")
        }
        serde_json::Value::Null => "null".to_string(),
    }
}
