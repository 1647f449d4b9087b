//! Formatting of benchmark results.

use std::io::{self, Write};

use crate::bench::{Dataset, Entry};

pub fn write_markdown<W: Write>(out: &mut W, sets: &[Dataset]) -> io::Result<()> {
    writeln!(
        out,
        "| Dataset | Method | Runtime | Average Error | Max Error \
         | Uncompressed | Compressed | Compression Ratio |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for set in sets {
        for e in &set.entries {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {:.1} KB | {:.1} KB | {} |",
                set.name,
                e.method,
                e.runtime.map_or("-".to_string(), |t| format!("{:.3}s", t)),
                fmt_error(e.avg_error),
                fmt_error(e.max_error),
                e.uncompressed_bytes as f64 / 1024.0,
                e.compressed_bytes as f64 / 1024.0,
                fmt_ratio(e),
            )?;
        }
    }
    Ok(())
}

pub fn write_csv<W: Write>(out: &mut W, sets: &[Dataset]) -> io::Result<()> {
    writeln!(
        out,
        "dataset,method,runtime_s,avg_error,max_error,\
         uncompressed_bytes,compressed_bytes,compression_ratio"
    )?;
    for set in sets {
        for e in &set.entries {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{:.4}",
                csv_field(&set.name),
                csv_field(&e.method),
                opt(e.runtime),
                opt(e.avg_error),
                opt(e.max_error),
                e.uncompressed_bytes,
                e.compressed_bytes,
                e.compression_ratio(),
            )?;
        }
    }
    Ok(())
}

fn fmt_error(e: Option<f64>) -> String {
    e.map_or("-".to_string(), |e| format!("{:.6}", e))
}

/// Compression ratio, in red when deflate made the data bigger.
fn fmt_ratio(e: &Entry) -> String {
    let ratio = format!("{:.4}", e.compression_ratio());
    if e.compressed_bytes > e.uncompressed_bytes {
        format!("<div style=\"color:red\">{}</div>", ratio)
    } else {
        ratio
    }
}

fn opt(n: Option<f64>) -> String {
    n.map_or(String::new(), |n| n.to_string())
}

fn csv_field(s: &str) -> String {
    if s.contains(|c: char| c == ',' || c == '"' || c == '\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
