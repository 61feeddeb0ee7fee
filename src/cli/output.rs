//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{GeoSearchArgs, OutputFormat};
use crate::error::Result;

/// A hit as reported by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultHit {
    pub doc_id: u64,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Distance in meters to the nearest stored point, for distance searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

/// Result structure for search operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<ResultHit>,
    pub total_hits: u64,
    pub indexed_documents: u64,
    pub duration_ms: u64,
}

/// Write search results in the selected format.
pub fn output_results(results: &SearchResults, args: &GeoSearchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_human(results, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", format_json(results, args.pretty)?);
            Ok(())
        }
    }
}

/// Render results as JSON.
pub fn format_json(results: &SearchResults, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    Ok(json)
}

/// Render results for a terminal.
pub fn format_human(results: &SearchResults, verbosity: u8) -> String {
    let mut out = String::new();
    if verbosity > 1 {
        out.push_str(&format!("Query: {}\n", results.query));
        out.push_str(&format!(
            "Searched {} documents in {} ms\n",
            results.indexed_documents, results.duration_ms
        ));
    }
    out.push_str(&format!(
        "Found {} matching documents (showing {})\n",
        results.total_hits,
        results.hits.len()
    ));

    for (rank, hit) in results.hits.iter().enumerate() {
        out.push_str(&format!("{:>3}. doc {}", rank + 1, hit.doc_id));
        if let Some(name) = &hit.name {
            out.push_str(&format!(" ({name})"));
        }
        if let Some(distance) = hit.distance_meters {
            out.push_str(&format!(" {:.1} m", distance));
        }
        out.push('\n');
    }
    out
}
