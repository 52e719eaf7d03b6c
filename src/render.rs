use clap::ValueEnum;

use crate::projection::OddsProjection;

/// How `project` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn render(proj: &OddsProjection, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(proj)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(proj)?),
    }
}

/// Plain-text table with odds to three decimals; the highest odd is starred.
pub fn render_table(proj: &OddsProjection) -> String {
    let phase = match proj.market {
        Some(m) => m.label().to_string(),
        None => format!("Regulation {}", proj.regulation_minutes),
    };
    let highlight = proj.highest_odd().map(|p| p.minute);

    let mut lines = vec![
        format!(
            "{} | {} min total ({} stoppage) | -{:.4} per minute",
            phase, proj.total_minutes, proj.stoppage_minutes, proj.step
        ),
        format!("{:>6}  {:>9}  {:>7}", "Minute", "Remaining", "Odd"),
    ];
    lines.extend(proj.points.iter().map(|p| {
        let mark = if Some(p.minute) == highlight { " *" } else { "" };
        format!(
            "{:>6}  {:>9}  {:>7.3}{}",
            p.minute, p.minutes_remaining, p.odd, mark
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
