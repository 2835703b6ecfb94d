//! Terminal charts for practice statistics.

use chrono::Datelike;

use super::series::DayPoint;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - (label, value) pairs
/// * `label_width` - Width reserved for labels; longer labels are cut
/// * `bar_width` - Width of the bar portion
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(data: &[(String, u64)], label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);

    data.iter()
        .map(|(label, value)| {
            let label: String = label.chars().take(label_width).collect();
            let bar_length = (*value as f64 / max_value as f64 * bar_width as f64) as usize;
            format!(
                "{label:label_width$} |{}{} {value}",
                FULL_BLOCK.to_string().repeat(bar_length),
                " ".repeat(bar_width - bar_length)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_sparkline(values: &[u64]) -> String {
    let max_value = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                let level = (v as f64 / max_value as f64 * 7.0) as usize;
                BAR_CHARS[level.clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a week of practice as a bar chart of minutes per day.
#[must_use]
pub fn render_week_chart(points: &[DayPoint]) -> String {
    let data: Vec<(String, u64)> = points
        .iter()
        .map(|p| {
            let label = DAY_LABELS[p.date.weekday().num_days_from_monday() as usize];
            (label.to_string(), p.meditation_seconds / 60)
        })
        .collect();

    render_bar_chart(&data, 3, 20)
}

/// Render a calendar heatmap.
///
/// Rows are weekdays (Mon-Sun) and columns are calendar weeks, oldest on
/// the left. `points` must be consecutive days, oldest first.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_heatmap(points: &[DayPoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let offset = first.date.weekday().num_days_from_monday() as usize;
    let weeks = (offset + points.len()).div_ceil(7);
    let max_score = points
        .iter()
        .map(DayPoint::activity_score)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut lines = Vec::new();

    for (day_idx, label) in DAY_LABELS.iter().enumerate() {
        let mut row = format!("{label} ");

        for week in 0..weeks {
            let slot = week * 7 + day_idx;
            let cell = slot
                .checked_sub(offset)
                .and_then(|i| points.get(i))
                .map_or(' ', |p| {
                    if !p.has_activity() {
                        return '·';
                    }
                    let level = (p.activity_score() as f64 / max_score as f64 * 4.0) as usize;
                    match level {
                        0 => '░',
                        1 => '▒',
                        2 => '▓',
                        _ => '█',
                    }
                });
            row.push(' ');
            row.push(cell);
        }

        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push("Legend: · = none  ░ = light  ▒ = moderate  ▓ = strong  █ = peak".to_string());

    lines.join("\n")
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Render a summary box with key metrics.
#[must_use]
pub fn render_summary_box(title: &str, items: &[(&str, String)]) -> String {
    let max_label_len = items.iter().map(|(l, _)| display_width(l)).max().unwrap_or(0);
    let max_value_len = items.iter().map(|(_, v)| display_width(v)).max().unwrap_or(0);
    let content_width = max_label_len + max_value_len + 3; // " : "
    let box_width = content_width.max(display_width(title)) + 4;

    let mut lines = Vec::new();

    lines.push(format!("┌{}┐", "─".repeat(box_width)));

    let title_padding = (box_width - display_width(title)) / 2;
    lines.push(format!(
        "│{}{}{}│",
        " ".repeat(title_padding),
        title,
        " ".repeat(box_width - title_padding - display_width(title))
    ));

    lines.push(format!("├{}┤", "─".repeat(box_width)));

    for (label, value) in items {
        let item_str = format!("{label:>max_label_len$} : {value}");
        let padding = box_width - display_width(&item_str);
        lines.push(format!("│ {}{} │", item_str, " ".repeat(padding - 2)));
    }

    lines.push(format!("└{}┘", "─".repeat(box_width)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(d: u32, minutes: u64) -> DayPoint {
        DayPoint {
            date: NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
            meditation_seconds: minutes * 60,
            breathing_sessions: 0,
        }
    }

    #[test]
    fn test_render_sparkline() {
        let sparkline = render_sparkline(&[0, 2, 5, 3, 8, 4, 1]);
        assert_eq!(sparkline.chars().count(), 7);
        assert!(sparkline.starts_with(' '));
        assert!(sparkline.contains('▇'));
    }

    #[test]
    fn test_render_sparkline_empty() {
        assert!(render_sparkline(&[]).is_empty());
    }

    #[test]
    fn test_render_bar_chart() {
        let data = vec![
            ("Alpha".to_string(), 5),
            ("B".to_string(), 10),
            ("C".to_string(), 0),
        ];
        let chart = render_bar_chart(&data, 3, 10);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Alp |█████"));
        assert!(lines[1].contains("██████████ 10"));
        assert!(lines[2].ends_with(" 0"));
    }

    #[test]
    fn test_render_week_chart_labels() {
        // 2024-04-01 is a Monday
        let points: Vec<_> = (1..=7).map(|d| point(d, u64::from(d))).collect();
        let chart = render_week_chart(&points);
        assert!(chart.lines().next().unwrap().starts_with("Mon"));
        assert!(chart.lines().last().unwrap().starts_with("Sun"));
    }

    #[test]
    fn test_render_heatmap_grid() {
        // Wednesday 2024-04-03 through Tuesday 2024-04-09
        let points: Vec<_> = (3..=9).map(|d| point(d, if d == 5 { 20 } else { 0 })).collect();
        let heatmap = render_heatmap(&points);
        let lines: Vec<_> = heatmap.lines().collect();

        // 7 weekday rows, blank line, legend
        assert_eq!(lines.len(), 9);
        // Monday row: first week is before the range, second week has the 8th
        assert_eq!(lines[0], "Mon   ·");
        // Friday the 5th is the peak day
        assert_eq!(lines[4], "Fri  █");
        assert!(lines[8].starts_with("Legend"));
    }

    #[test]
    fn test_render_heatmap_empty() {
        assert!(render_heatmap(&[]).is_empty());
    }

    #[test]
    fn test_render_summary_box() {
        let items = [("Today", "12m".to_string()), ("Streak", "3 days".to_string())];
        let box_str = render_summary_box("Summary", &items);
        assert!(box_str.contains("Summary"));
        assert!(box_str.contains("Today : 12m"));
        assert!(box_str.contains("3 days"));
    }
}
