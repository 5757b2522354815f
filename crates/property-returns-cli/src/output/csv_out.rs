use serde_json::Value;
use std::io;

use super::{flatten_rows, result_of};

/// Write the result as two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten_rows(result_of(value)) {
        let _ = wtr.write_record([key.as_str(), val.as_str()]);
    }

    let _ = wtr.flush();
}
