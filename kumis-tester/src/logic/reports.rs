use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::{PolicyResult, PracticeRecord, TestReport};

fn tier_label(result: &super::RunRecord) -> String {
    result
        .tier
        .map_or_else(|| "-".to_string(), |tier| tier.to_string())
}

/// # Errors
///
/// Propagates write failures.
pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    report: &TestReport,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Playthrough Results".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;

    let total = report.results.len();
    let passed = report.results.iter().filter(|r| r.passed).count();
    writeln!(out, "Policies: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in &report.results {
        write_policy_console(out, result)?;
    }

    if !report.practice.is_empty() {
        writeln!(out, "{}", "🧫 Practice Set".bright_yellow().bold())?;
        writeln!(out, "{}", "===============".yellow())?;
        for record in &report.practice {
            write_practice_console(out, record)?;
        }
    }
    Ok(())
}

fn write_policy_console<W: Write + ?Sized>(out: &mut W, result: &PolicyResult) -> Result<()> {
    let status = if result.passed {
        "✅ PASS".green()
    } else {
        "❌ FAIL".red()
    };
    writeln!(out, "{} {}", status, result.policy.as_str().bold())?;
    writeln!(
        out,
        "   Runs: {}/{} successful",
        result.successful_runs(),
        result.runs.len()
    )?;
    writeln!(out, "   Average score: {:.1}%", result.average_percentage())?;
    writeln!(out, "   Average time: {:?}", result.average_duration)?;
    for run in result.runs.iter().filter(|r| !r.passed()) {
        writeln!(
            out,
            "     • seed {} ({}): {}",
            run.seed,
            tier_label(run),
            run.error.as_deref().unwrap_or_default().red()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_practice_console<W: Write + ?Sized>(out: &mut W, record: &PracticeRecord) -> Result<()> {
    let line = format!(
        "{:<8} {:<16} {:>4} pts / {} questions",
        record.policy.as_str(),
        record.kind.as_str(),
        record.score,
        record.total_questions
    );
    match record.error.as_deref() {
        Some(err) => writeln!(out, "  {} {}", line.red(), err)?,
        None => writeln!(out, "  {line}")?,
    }
    Ok(())
}

/// # Errors
///
/// Propagates serialization and write failures.
pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, report: &TestReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

/// # Errors
///
/// Propagates write failures.
pub fn generate_markdown_report<W: Write + ?Sized>(out: &mut W, report: &TestReport) -> Result<()> {
    writeln!(out, "# Warisan Mbah Kumis Playthrough Results\n")?;
    writeln!(out, "_Generated {}_\n", report.generated_at)?;

    writeln!(out, "## Policies\n")?;
    writeln!(out, "| Policy | Result | Runs | Avg % | Avg time |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for result in &report.results {
        writeln!(
            out,
            "| {} | {} | {}/{} | {:.1} | {:?} |",
            result.policy,
            if result.passed { "✅" } else { "❌" },
            result.successful_runs(),
            result.runs.len(),
            result.average_percentage(),
            result.average_duration
        )?;
    }
    writeln!(out)?;

    let failures: Vec<_> = report
        .results
        .iter()
        .flat_map(|r| r.runs.iter())
        .filter(|run| !run.passed())
        .collect();
    if !failures.is_empty() {
        writeln!(out, "## Failures\n")?;
        for run in failures {
            writeln!(
                out,
                "- **{}** seed {} ({}): {}",
                run.policy,
                run.seed,
                tier_label(run),
                run.error.as_deref().unwrap_or_default()
            )?;
        }
        writeln!(out)?;
    }

    if !report.practice.is_empty() {
        writeln!(out, "## Practice Set\n")?;
        writeln!(out, "| Policy | Game | Score | Questions |")?;
        writeln!(out, "|---|---|---|---|")?;
        for record in &report.practice {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                record.policy, record.kind, record.score, record.total_questions
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RunRecord;
    use kumis_game::{EndingTier, MiniGameKind, Strategy};

    fn run(error: Option<&str>) -> RunRecord {
        RunRecord {
            policy: Strategy::Perfect,
            seed: 7,
            tier: Some(EndingTier::Good),
            total_score: 150,
            max_score: 200,
            percentage: 75,
            steps: 900,
            virtual_ms: 120_000,
            skipped_dialogs: 0,
            mini_games: vec![MiniGameKind::MultipleChoice],
            elapsed: Duration::from_millis(4),
            error: error.map(str::to_string),
        }
    }

    fn report(error: Option<&str>) -> TestReport {
        let runs = vec![run(error)];
        TestReport::new(
            vec![PolicyResult {
                policy: Strategy::Perfect,
                passed: error.is_none(),
                runs,
                average_duration: Duration::from_millis(4),
            }],
            vec![PracticeRecord {
                policy: Strategy::Perfect,
                kind: MiniGameKind::Temperature,
                score: 10,
                total_questions: 5,
                error: None,
            }],
        )
    }

    #[test]
    fn markdown_lists_failures_and_practice() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &report(Some("expected the perfect ending"))).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Warisan Mbah Kumis Playthrough Results"));
        assert!(text.contains("| perfect | ❌ | 0/1 | 75.0 |"));
        assert!(text.contains("seed 7 (good): expected the perfect ending"));
        assert!(text.contains("| perfect | temperature | 10 | 5 |"));
    }

    #[test]
    fn json_round_trips_policy_names() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &report(None)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["results"][0]["policy"], "perfect");
        assert_eq!(value["results"][0]["runs"][0]["elapsed"], 4);
        assert_eq!(value["practice"][0]["kind"], "temperature");
    }

    #[test]
    fn console_report_counts_passes() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &report(None), Duration::from_millis(10)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Passed: 1"));
        assert!(text.contains("✅ PASS perfect"));
        assert!(text.contains("Practice Set"));
    }
}
