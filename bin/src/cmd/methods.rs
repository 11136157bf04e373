//! Method listing and single-method valuation commands.

use anyhow::{Result, bail};
use serde_json::Value;
use valora_methods::{
    ChecklistScores, ChecklistValuation, MethodCategory, ScorecardScores, ScorecardValuation,
    VcMethodValuation, methods_by_category, typical_roi,
};
use valora_traits::rounding::format_cents;
use valora_traits::{MethodResult, Stage, Valuator};

use super::banner;

/// List valuation methods grouped by category.
pub(crate) fn list_methods(verbose: bool) {
    banner("Valuation Methods");

    let categories = [
        (MethodCategory::Qualitative, "Qualitative"),
        (MethodCategory::VentureCapital, "Venture Capital"),
        (MethodCategory::Intrinsic, "Intrinsic"),
    ];

    for (category, name) in categories {
        println!("{name}:");
        if verbose {
            println!("  {}", category.description());
        }
        println!("{}", "-".repeat(60));

        for info in methods_by_category(&category) {
            let projection = if info.requires_projection {
                " [needs projection]"
            } else {
                ""
            };
            if verbose {
                println!(
                    "  {:18} - {}{projection}",
                    info.method.as_str(),
                    info.description
                );
            } else {
                println!("  {}{projection}", info.method.as_str());
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for method descriptions.\n");
    }
}

fn print_result(result: &MethodResult) {
    println!("Method:     {}", result.method.as_str());
    println!("Valuation:  {}", format_cents(result.valuation));
    println!();
    if let Value::Object(details) = &result.details {
        println!("Details:");
        for (key, value) in details {
            println!("  {key}: {value}");
        }
        println!();
    }
}

/// Run the scorecard method.
pub(crate) fn run_scorecard(average: f64, scores: ScorecardScores) -> Result<()> {
    banner("Scorecard Valuation");
    print_result(&ScorecardValuation::new(average, scores).valuate()?);
    Ok(())
}

/// Build a checklist valuation from percentage scores, ordered idea,
/// product, team, operating stage, strategic relations.
pub(crate) fn checklist(max_valuation: f64, scores: [f64; 5]) -> ChecklistValuation {
    let [idea, product, team, operating, relationships] = scores;
    ChecklistValuation::new(
        max_valuation,
        ChecklistScores {
            idea_quality_score: idea,
            product_ip_score: product,
            core_team_score: team,
            operating_stage_score: operating,
            strategic_relations_score: relationships,
        },
    )
}

/// Run the checklist method.
pub(crate) fn run_checklist(checklist: &ChecklistValuation) -> Result<()> {
    banner("Checklist Valuation");
    print_result(&checklist.valuate()?);
    Ok(())
}

/// Run the VC method, looking up the target return from the stage if needed.
pub(crate) fn run_vc(
    ebitda: f64,
    multiple: f64,
    roi: Option<f64>,
    stage: Option<&str>,
    years: i32,
    capital_raised: f64,
) -> Result<()> {
    banner("VC Method Valuation");

    let expected_roi = match (roi, stage) {
        (Some(roi), _) => roi,
        (None, Some(stage)) => {
            let stage: Stage = stage.parse()?;
            let roi = typical_roi(stage)?;
            println!("Using typical {} return: {:.2}%\n", stage.as_str(), roi * 100.0);
            roi
        }
        (None, None) => bail!("either --roi or --stage is required"),
    };

    let valuation = VcMethodValuation {
        final_year_ebitda: ebitda,
        exit_multiple: multiple,
        expected_roi,
        years_to_exit: years,
        capital_raised,
    };
    print_result(&valuation.valuate()?);
    Ok(())
}
