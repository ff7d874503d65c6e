//! Plain-text rendering for terminal output.
//!
//! Prices are printed as whole numbers; no currency symbol or grouping.

use crate::domain::{ArtifactBundle, Field};
use crate::report::Valuation;

/// Width of the text score bar.
const BAR_WIDTH: usize = 20;

/// Format a single valuation for the `estimate` command.
pub fn format_valuation(valuation: &Valuation, model_label: Option<&str>) -> String {
    let mut out = String::new();
    let est = &valuation.estimate;

    out.push_str("=== propai - house valuation ===\n");
    if let Some(label) = model_label {
        out.push_str(&format!("Model: {label}\n"));
    }

    out.push_str("\nInputs:\n");
    for field in Field::ALL {
        out.push_str(&format!("  {:<16} {:>8}\n", field.label(), valuation.input.get(field)));
    }

    out.push_str(&format!("\nEstimated value: {:.0}\n", est.price));
    if est.clamped {
        out.push_str(&format!("  (model output {:.0} raised to display floor)\n", est.raw));
    }
    if let Some(ppsf) = valuation.price_per_sqft {
        out.push_str(&format!("Per sq ft:       {ppsf:.2}\n"));
    }

    out.push_str("\nProfile (this house | market avg):\n");
    for s in &valuation.scores {
        out.push_str(&format!(
            "  {:<14} {} {:>4.2} | {:>4.2}\n",
            s.category.display_name(),
            bar(s.score),
            s.score,
            s.market_average,
        ));
    }

    out
}

/// Format the bundle summary for the `inspect` command.
pub fn format_bundle_summary(bundle: &ArtifactBundle) -> String {
    let mut out = String::new();
    out.push_str(&format!("Label: {}\n", bundle.label().unwrap_or("-")));
    out.push_str(&format!("Features ({}):\n", bundle.features().len()));

    let user_fields: Vec<&str> = Field::ALL.iter().map(|f| f.feature_name()).collect();
    for (idx, name) in bundle.features().iter().enumerate() {
        let default = bundle.defaults().get(name).copied().unwrap_or(f64::NAN);
        let marker = if user_fields.contains(&name.as_str()) { "*" } else { " " };
        out.push_str(&format!("{marker} {:>3} {:<20} {:>12.3}\n", idx, truncate(name, 20), default));
    }
    out.push_str("(* = set from the house form)\n");
    out
}

fn bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
