// src/report.rs
//! Console reports
//!
//! Formatting only; every function returns the text so the binaries decide
//! where it goes.

use crate::cashflow::irr::IrrAnalysis;
use crate::mc::stats::{Histogram, SimulationSummary};

/// The end-of-run GBM summary, amounts to two decimals with a `$` prefix
pub fn gbm_summary(summary: &SimulationSummary) -> String {
    [
        String::new(),
        "FINAL SUMMARY:".to_string(),
        String::new(),
        format!("Mean final price (Theoretical): ${:.2}", summary.theoretical_mean),
        format!("Mean final price (Simulated)  : ${:.2}", summary.simulated.mean),
        String::new(),
        format!("Std final price (Theoretical) : ${:.2}", summary.theoretical_std),
        format!("Std final price (Simulated)   : ${:.2}", summary.simulated.std_dev),
        String::new(),
        format!(
            "European Call Option Price (K={}): ${:.2}",
            summary.strike, summary.call_price
        ),
        String::new(),
        String::new(),
    ]
    .join("\n")
}

/// Horizontal bar chart of a histogram, bars scaled to `width` characters
pub fn text_histogram(hist: &Histogram, width: usize) -> String {
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    hist.counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            format!(
                "{:>9.2} - {:>9.2} | {:<w$} {}\n",
                hist.edges[i],
                hist.edges[i + 1],
                "#".repeat(count * width / peak),
                count,
                w = width
            )
        })
        .collect()
}

/// NPV table at the fixed rates followed by the IRR list
pub fn irr_report(analysis: &IrrAnalysis) -> String {
    let mut out = String::from("\nNPV AT DIFFERENT DISCOUNT RATES:\n");
    for point in &analysis.table {
        out.push_str(&format!(
            "Rate: {}%  NPV: {:.2}\n",
            (point.rate * 100.0).round() as i64,
            point.npv
        ));
    }

    out.push_str("\nIRR RESULTS:\n");
    if analysis.irrs.has_irr() {
        for (i, root) in analysis.irrs.roots.iter().enumerate() {
            let flag = if root.converged { "" } else { " (not converged)" };
            out.push_str(&format!("IRR {}: {}%{}\n", i + 1, root.rate * 100.0, flag));
        }
    } else {
        out.push_str("No IRR exists in the given rate range\n");
    }

    if analysis.sign_changes > 1 {
        out.push_str(&format!(
            "\nCash flows change sign {} times: multiple IRRs are possible, \
             prefer NPV for decisions.\n",
            analysis.sign_changes
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflow::irr::IrrConfig;
    use crate::cashflow::CashFlows;
    use crate::mc::stats::TerminalStats;

    #[test]
    fn test_gbm_summary_format() {
        let summary = SimulationSummary {
            paths: 1000,
            steps: 252,
            strike: 105.0,
            theoretical_mean: 108.328_706,
            theoretical_std: 21.884_215,
            simulated: TerminalStats {
                count: 1000,
                mean: 108.1,
                std_dev: 21.5,
                sample_std_dev: 21.51,
                min: 60.0,
                max: 190.0,
            },
            call_price: 10.256,
            call_reference: 10.26,
        };

        let text = gbm_summary(&summary);
        assert!(text.contains("Mean final price (Theoretical): $108.33"));
        assert!(text.contains("Mean final price (Simulated)  : $108.10"));
        assert!(text.contains("Std final price (Theoretical) : $21.88"));
        assert!(text.contains("Std final price (Simulated)   : $21.50"));
        assert!(text.contains("European Call Option Price (K=105): $10.26"));
    }

    #[test]
    fn test_irr_report_lists_roots() {
        let analysis =
            IrrAnalysis::run(CashFlows::new(vec![-100.0, 121.0]), &IrrConfig::default()).unwrap();
        let text = irr_report(&analysis);

        assert!(text.contains("Rate: 0%  NPV: 21.00"));
        assert!(text.contains("Rate: 15%  NPV:"));
        assert!(text.contains("IRR 1: 2"));
        assert!(!text.contains("No IRR"));
    }

    #[test]
    fn test_irr_report_without_roots() {
        let analysis =
            IrrAnalysis::run(CashFlows::new(vec![100.0, 50.0]), &IrrConfig::default()).unwrap();
        let text = irr_report(&analysis);
        assert!(text.contains("No IRR exists in the given rate range"));
    }

    #[test]
    fn test_text_histogram_rows() {
        let hist = Histogram {
            edges: vec![0.0, 1.0, 2.0],
            counts: vec![2, 4],
        };
        let text = text_histogram(&hist, 8);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("####") && !lines[0].contains("#####"));
        assert!(lines[1].contains("########"));
    }
}
