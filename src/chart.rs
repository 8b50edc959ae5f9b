use std::path::Path;

use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::UserCount;
use crate::stats;
use crate::style::{ChartStyle, CONFETTI_PALETTE};

const TITLE_AREA: i32 = 90;
const LABEL_AREA: i32 = 220;
const RIGHT_PAD: i32 = 60;
const BOTTOM_AREA: i32 = 50;

/// Renders the yearly aggregate as a horizontal bar chart, largest count on
/// top, with the top entry highlighted and confetti scattered behind it.
/// Callers are expected to have filtered out the empty case already.
pub fn render_wrapped_chart(
    counts: &[UserCount],
    year: i32,
    out: &Path,
    style: &ChartStyle,
) -> anyhow::Result<()> {
    let top = stats::top_index(counts).context("cannot chart an empty aggregate")?;
    let max_count = counts[top].count;

    let root = BitMapBackend::new(out, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let plot_w = style.width as i32 - LABEL_AREA - RIGHT_PAD;
    let plot_h = style.height as i32 - TITLE_AREA - BOTTOM_AREA;
    let row_h = plot_h / counts.len() as i32;
    let x_span = max_count as f64 * style.axis_headroom;
    let bar_len = |count: i64| (count as f64 / x_span * plot_w as f64) as i32;
    let row_mid = |row: usize| TITLE_AREA + row as i32 * row_h + row_h / 2;

    let title = ("sans-serif", 40)
        .into_font()
        .color(&style.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        format!("Poop Wrapped {year}"),
        (style.width as i32 / 2, TITLE_AREA / 2),
        title,
    ))?;

    draw_confetti(&root, style, row_mid(top), row_h, bar_len(max_count))?;

    let name_style = ("sans-serif", 20)
        .into_font()
        .color(&style.text_color)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let count_style = ("sans-serif", 20)
        .into_font()
        .color(&style.text_color)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (row, entry) in counts.iter().enumerate() {
        let mid = row_mid(row);
        let y0 = mid - (row_h as f64 * 0.3) as i32;
        let y1 = mid + (row_h as f64 * 0.3) as i32;
        let x1 = LABEL_AREA + bar_len(entry.count);
        let fill = if row == top { style.top_fill } else { style.bar_fill };

        root.draw(&Rectangle::new([(LABEL_AREA, y0), (x1, y1)], fill.filled()))?;
        root.draw(&Text::new(
            entry.username.clone(),
            (LABEL_AREA - 12, mid),
            name_style.clone(),
        ))?;
        root.draw(&Text::new(
            format!("{}", entry.count),
            (x1 + 10, mid),
            count_style.clone(),
        ))?;
    }

    let axis_label = ("sans-serif", 22)
        .into_font()
        .color(&style.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        "Total Poops".to_string(),
        (LABEL_AREA + plot_w / 2, style.height as i32 - BOTTOM_AREA / 2),
        axis_label,
    ))?;

    root.present()
        .with_context(|| format!("failed to write chart image {}", out.display()))?;
    Ok(())
}

/// Decorative scatter behind the top bar. Purely cosmetic; deterministic
/// only when `ChartStyle::confetti_seed` is set.
fn draw_confetti(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    style: &ChartStyle,
    top_mid: i32,
    row_h: i32,
    top_bar_len: i32,
) -> anyhow::Result<()> {
    let mut rng = match style.confetti_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..style.confetti_count {
        let x = LABEL_AREA + (rng.gen_range(0.0..0.7) * top_bar_len as f64) as i32;
        let y = top_mid + (rng.gen_range(-0.45..0.45) * row_h as f64) as i32;
        let radius = rng.gen_range(2..8);
        let color = CONFETTI_PALETTE[rng.gen_range(0..CONFETTI_PALETTE.len())];
        root.draw(&Circle::new((x, y), radius, color.mix(0.5).filled()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Vec<UserCount> {
        vec![
            UserCount {
                username: "alice".to_string(),
                count: 2,
            },
            UserCount {
                username: "bob".to_string(),
                count: 1,
            },
        ]
    }

    #[test]
    fn writes_one_chart_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("poop_wrapped_2025.png");
        let style = ChartStyle {
            confetti_seed: Some(42),
            ..ChartStyle::default()
        };

        render_wrapped_chart(&counts(), 2025, &out, &style).unwrap();

        let meta = std::fs::metadata(&out).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn rerun_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("poop_wrapped_2025.png");
        let style = ChartStyle {
            confetti_seed: Some(7),
            ..ChartStyle::default()
        };

        render_wrapped_chart(&counts(), 2025, &out, &style).unwrap();
        render_wrapped_chart(&counts(), 2025, &out, &style).unwrap();

        assert!(out.exists());
    }

    #[test]
    fn empty_aggregate_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.png");

        let err = render_wrapped_chart(&[], 2025, &out, &ChartStyle::default()).unwrap_err();
        assert!(err.to_string().contains("empty aggregate"));
        assert!(!out.exists());
    }
}
