use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_rows, format_cell, result_of};

/// Format output as a two-column table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(_) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in flatten_rows(result) {
                builder.push_record([key, val]);
            }
            println!("{}", Table::from(builder));
        }
        other => println!("{}", format_cell(other)),
    }

    print_envelope_notes(value);
}

fn print_envelope_notes(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
