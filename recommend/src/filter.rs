//! Severity/likelihood filter (spec §4.11 step 1).

use impact_trace::{Finding, Likelihood, Severity};

/// Keeps findings worth recommending against: `Major`/`Fundamental`
/// severity unconditionally, or `Moderate` severity when likelihood is at
/// least `Likely` (property P8: this is the only filtering Core C.4 does —
/// nothing downstream synthesizes a finding that doesn't pass this gate).
pub fn filter_findings(findings: Vec<Finding>) -> Vec<Finding> {
    findings.into_iter().filter(passes_filter).collect()
}

fn passes_filter(finding: &Finding) -> bool {
    match finding.severity {
        Some(Severity::Major) | Some(Severity::Fundamental) => true,
        Some(Severity::Moderate) => {
            matches!(finding.likelihood, Some(Likelihood::Likely) | Some(Likelihood::VeryLikely))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_trace::TraceabilityStatus;

    fn finding(severity: Severity, likelihood: Likelihood) -> Finding {
        Finding {
            status: TraceabilityStatus::Modification,
            path_type: None,
            changed_file: "src/a.rs".to_string(),
            affected_node: None,
            source_change_set: "set".to_string(),
            likelihood: Some(likelihood),
            severity: Some(severity),
            reasoning: None,
        }
    }

    #[test]
    fn major_and_fundamental_always_pass() {
        let findings = vec![
            finding(Severity::Major, Likelihood::Unlikely),
            finding(Severity::Fundamental, Likelihood::Unlikely),
        ];
        assert_eq!(filter_findings(findings).len(), 2);
    }

    #[test]
    fn moderate_requires_likely_or_very_likely() {
        assert_eq!(filter_findings(vec![finding(Severity::Moderate, Likelihood::Likely)]).len(), 1);
        assert_eq!(filter_findings(vec![finding(Severity::Moderate, Likelihood::VeryLikely)]).len(), 1);
        assert_eq!(filter_findings(vec![finding(Severity::Moderate, Likelihood::Possibly)]).len(), 0);
    }

    #[test]
    fn minor_and_below_always_dropped() {
        assert_eq!(filter_findings(vec![finding(Severity::Minor, Likelihood::VeryLikely)]).len(), 0);
        assert_eq!(filter_findings(vec![finding(Severity::Trivial, Likelihood::VeryLikely)]).len(), 0);
        assert_eq!(filter_findings(vec![finding(Severity::NoneSeverity, Likelihood::VeryLikely)]).len(), 0);
    }
}
