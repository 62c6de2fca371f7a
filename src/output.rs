// src/output.rs
use std::fs::File;
use std::io::{self, Write};

/// Write the rate table (step sizes against per-scheme MSE columns) to CSV
/// with a timestamped header comment
pub fn write_rate_csv(filename: &str, dts: &[f64], columns: &[(&str, &[f64])]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    write!(file, "dt")?;
    for (name, _) in columns {
        write!(file, ",{}", name)?;
    }
    writeln!(file)?;

    for (i, dt) in dts.iter().enumerate() {
        write!(file, "{}", dt)?;
        for (_, values) in columns {
            write!(file, ",{}", values[i])?;
        }
        writeln!(file)?;
    }
    Ok(())
}
