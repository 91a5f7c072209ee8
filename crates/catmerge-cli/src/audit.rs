use std::path::Path;

use catmerge_catalog::AuditReport;

/// Render the human-readable audit summary, showing at most `limit` issues.
pub(crate) fn format_audit_report(report: &AuditReport, limit: usize) -> String {
    let rule = "-".repeat(41);
    let mut lines = vec![rule.clone()];

    if report.passed() {
        lines.push(format!(
            "RESULT: CLEAN AUDIT PASSED. {} products audited.",
            report.products_audited
        ));
    } else {
        let messages: Vec<String> = report
            .issues
            .iter()
            .map(ToString::to_string)
            .chain(
                report
                    .duplicate_handles
                    .iter()
                    .map(|h| format!("CRITICAL: Duplicate Handle detected in catalog: {h}")),
            )
            .collect();

        lines.push(format!(
            "RESULT: AUDIT FAILED with {} potential issues.",
            messages.len()
        ));
        lines.push("Sample of snags:".to_string());
        lines.extend(messages.iter().take(limit).cloned());
        if messages.len() > limit {
            lines.push(format!("... and {} more.", messages.len() - limit));
        }
    }

    if !report.prices_checked {
        lines.push("note: no price column found; prices were not checked".to_string());
    }
    lines.push(rule);
    lines.join("\n")
}

pub(crate) fn run_audit_command(file: &Path, limit: usize) -> anyhow::Result<()> {
    tracing::info!(file = %file.display(), "starting product integrity audit");
    let report = catmerge_catalog::audit_file(file)?;

    println!("{}", format_audit_report(&report, limit));

    if !report.passed() {
        anyhow::bail!("audit failed with {} issue(s)", report.total_issues());
    }
    Ok(())
}
